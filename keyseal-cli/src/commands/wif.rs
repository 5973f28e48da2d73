//! `keyseal wif`: hex ↔ WIF.

use clap::{Args, Subcommand};
use colored::Colorize;
use keyseal::PrivateKey;
use keyseal_btc::{Network, wif};
use serde_json::json;

use super::{CommandResult, print_json};

/// Wallet Import Format.
#[derive(Args)]
pub struct WifCommand {
    #[command(subcommand)]
    command: WifSubcommand,
}

#[derive(Subcommand)]
enum WifSubcommand {
    /// Encode a hex private key as WIF.
    Encode {
        /// 64 hex digits.
        key: String,

        /// Omit the compression marker.
        #[arg(short, long)]
        uncompressed: bool,

        /// Use the testnet prefix.
        #[arg(short, long)]
        testnet: bool,
    },

    /// Decode WIF to a hex private key.
    Decode {
        /// WIF string.
        wif: String,
    },
}

impl WifCommand {
    /// Execute the WIF command.
    pub fn execute(self, json: bool) -> CommandResult {
        match self.command {
            WifSubcommand::Encode {
                key,
                uncompressed,
                testnet,
            } => {
                let network = if testnet {
                    Network::Testnet
                } else {
                    Network::Mainnet
                };
                let key = PrivateKey::from_hex(&key, !uncompressed)?;
                let encoded = wif::encode(&key, network);
                if json {
                    return print_json(&json!({
                        "network": network.name(),
                        "compressed": key.is_compressed(),
                        "wif": encoded.as_str(),
                    }));
                }
                print_wif(&key, network, &encoded);
            }
            WifSubcommand::Decode { wif: text } => {
                let (key, network) = wif::decode(&text)?;
                if json {
                    return print_json(&json!({
                        "network": network.name(),
                        "compressed": key.is_compressed(),
                        "private_key": key.to_hex().as_str(),
                    }));
                }
                print_wif(&key, network, &text);
            }
        }
        Ok(())
    }
}

#[rustfmt::skip]
fn print_wif(key: &PrivateKey, network: Network, wif: &str) {
    println!();
    println!("      {}      {}", "Network".cyan().bold(), network);
    println!("      {}   {}", "Compressed".cyan().bold(), key.is_compressed());
    println!("      {}  {}", "Private Key".cyan().bold(), key.to_hex().as_str());
    println!("      {}          {}", "WIF".cyan().bold(), wif.green());
    println!();
}
