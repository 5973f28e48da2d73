//! Keyseal - convert, encrypt and inspect secp256k1 private keys.
//!
//! Hex, WIF, BIP38, password-sealed boxes and mnemonic words, plus the
//! Bitcoin and Ethereum addresses a key controls.

mod commands;

use clap::Parser;
use commands::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    set_up_logger(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Log to stderr. `RUST_LOG` wins over `-v`.
fn set_up_logger(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    match cli.command {
        Commands::Inspect(cmd) => cmd.execute(json)?,
        Commands::Bip38(cmd) => cmd.execute(json)?,
        Commands::Wif(cmd) => cmd.execute(json)?,
        Commands::Seal(cmd) => cmd.execute(json)?,
        Commands::Open(cmd) => cmd.execute(json)?,
        Commands::Phrase(cmd) => cmd.execute(json)?,
        Commands::Generate(cmd) => cmd.execute(json)?,
    }
    Ok(())
}
