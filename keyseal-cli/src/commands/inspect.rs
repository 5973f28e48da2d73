//! `keyseal inspect`: every representation of one key.

use clap::Args;
use colored::Colorize;
use keyseal_btc::Network;
use keyseal_cli::pipeline::{KeyInput, KeyReport, ReportOptions};
use zeroize::Zeroizing;

use super::{CommandResult, print_json};

/// Show every format of a private key.
#[derive(Args)]
pub struct InspectCommand {
    /// Private key as hex, WIF or BIP38.
    key: String,

    /// Password for a BIP38 key.
    #[arg(short, long, env = "KEYSEAL_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Report Bitcoin formats for testnet.
    #[arg(short, long)]
    testnet: bool,

    /// Force the compressed (true) or uncompressed (false) public key.
    #[arg(short, long)]
    compressed: Option<bool>,

    /// Also re-encrypt the key with BIP38 under this password.
    #[arg(short, long)]
    reencrypt: Option<String>,
}

impl InspectCommand {
    /// Execute the inspect command.
    pub fn execute(self, json: bool) -> CommandResult {
        let password = self.password.map(Zeroizing::new);
        let input = KeyInput::detect(&self.key, password.as_deref().map(String::as_str))?;
        let options = ReportOptions {
            network: self.testnet.then_some(Network::Testnet),
            compressed: self.compressed,
            reencrypt: self.reencrypt.map(Zeroizing::new),
        };
        let report = KeyReport::build(&input, &options)?;

        if json {
            return print_json(&report);
        }
        print_report(&report);
        Ok(())
    }
}

#[rustfmt::skip]
fn print_report(r: &KeyReport) {
    println!();
    println!("      {}            {}", "Source".cyan().bold(), r.source);
    println!("      {}           {}", "Network".cyan().bold(), r.network);
    println!("      {}        {}", "Compressed".cyan().bold(), r.compressed);
    println!();
    println!("      {}       {}", "Private Key".cyan().bold(), r.private_key);
    println!("      {}               {}", "WIF".cyan().bold(), r.wif);
    println!("      {}    {}", "WIF Compressed".cyan().bold(), r.wif_compressed.dimmed());
    println!("      {}  {}", "WIF Uncompressed".cyan().bold(), r.wif_uncompressed.dimmed());
    println!("      {}        {}", "Public Key".cyan().bold(), r.public_key);
    println!();
    println!("      {}       {}", "BTC Address".cyan().bold(), r.btc_address.green());
    println!("      {}  {}", "BTC (compressed)".cyan().bold(), r.btc_address_compressed.dimmed());
    println!("      {}     {}", "BTC (legacy)".cyan().bold(), r.btc_address_uncompressed.dimmed());
    println!("      {}       {}", "ETH Address".cyan().bold(), r.eth_address_checksum.green());
    if let Some(encrypted) = &r.bip38 {
        println!();
        println!("      {}             {}", "BIP38".cyan().bold(), encrypted.green());
    }
    if let (Some(compressed), Some(uncompressed)) = (&r.bip38_compressed, &r.bip38_uncompressed) {
        println!("      {}  {}", "BIP38 Compressed".cyan().bold(), compressed.dimmed());
        println!("      {}      {}", "BIP38 Legacy".cyan().bold(), uncompressed.dimmed());
    }
    println!();
}
