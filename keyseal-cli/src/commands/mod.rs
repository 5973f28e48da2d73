//! CLI command definitions and handlers.

mod bip38;
mod generate;
mod inspect;
mod phrase;
mod seal;
mod wif;

pub use bip38::Bip38Command;
use clap::{ArgAction, Parser, Subcommand};
pub use generate::GenerateCommand;
pub use inspect::InspectCommand;
pub use phrase::PhraseCommand;
pub use seal::{OpenCommand, SealCommand};
pub use wif::WifCommand;

/// Keyseal - convert, encrypt and inspect secp256k1 private keys.
#[derive(Parser)]
#[command(name = "keyseal")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print JSON instead of a table.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Show every format of a private key (hex, WIF or BIP38).
    Inspect(InspectCommand),

    /// BIP38 password-encrypted keys.
    Bip38(Bip38Command),

    /// Wallet Import Format.
    Wif(WifCommand),

    /// Seal a private key or seed phrase under a password.
    Seal(SealCommand),

    /// Open a sealed private key or seed phrase.
    Open(OpenCommand),

    /// Pack raw bytes into words and back.
    Phrase(PhraseCommand),

    /// Generate a random key or seed phrase.
    #[command(alias = "gen")]
    Generate(GenerateCommand),
}

/// Error type returned by every handler.
pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Print `value` as pretty JSON.
pub fn print_json(value: &impl serde::Serialize) -> CommandResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
