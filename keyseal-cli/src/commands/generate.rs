//! `keyseal generate`: random keys and seed phrases.

use clap::{Args, Subcommand};
use colored::Colorize;
use keyseal::{PrivateKey, mnemonic};
use keyseal_btc::{Network, P2pkhAddress, wif};
use keyseal_eth::EthAddress;
use serde_json::json;

use super::{CommandResult, print_json};

/// Generate a random key or seed phrase.
#[derive(Args)]
pub struct GenerateCommand {
    #[command(subcommand)]
    command: GenerateSubcommand,
}

#[derive(Subcommand)]
enum GenerateSubcommand {
    /// Generate a random private key.
    Key {
        /// Use the uncompressed public key.
        #[arg(short, long)]
        uncompressed: bool,

        /// Use testnet instead of mainnet.
        #[arg(short, long)]
        testnet: bool,
    },

    /// Generate a BIP-39 seed phrase.
    Mnemonic {
        /// Number of words (12, 15, 18, 21, or 24).
        #[arg(short, long, default_value = "12")]
        words: usize,
    },
}

impl GenerateCommand {
    /// Execute the generate command.
    pub fn execute(self, json: bool) -> CommandResult {
        match self.command {
            GenerateSubcommand::Key {
                uncompressed,
                testnet,
            } => {
                let network = if testnet {
                    Network::Testnet
                } else {
                    Network::Mainnet
                };
                let key = PrivateKey::random(!uncompressed);
                let public = key.public_key();
                let wif = wif::encode(&key, network);
                let btc = P2pkhAddress::from_public_key(&public, network).to_string();
                let eth = EthAddress::from_public_key(&public).to_checksum_string();
                if json {
                    return print_json(&json!({
                        "network": network.name(),
                        "private_key": key.to_hex().as_str(),
                        "wif": wif.as_str(),
                        "btc_address": btc,
                        "eth_address": eth,
                    }));
                }
                print_key(network, &key, &wif, &btc, &eth);
            }
            GenerateSubcommand::Mnemonic { words } => {
                let phrase = mnemonic::generate(words)?;
                if json {
                    return print_json(&json!({ "words": words, "mnemonic": phrase.as_str() }));
                }
                println!();
                println!("      {}     {words}", "Words".cyan().bold());
                println!("      {}  {}", "Mnemonic".cyan().bold(), phrase.green());
                println!();
            }
        }
        Ok(())
    }
}

#[rustfmt::skip]
fn print_key(network: Network, key: &PrivateKey, wif: &str, btc: &str, eth: &str) {
    println!();
    println!("      {}      {}", "Network".cyan().bold(), network);
    println!("      {}  {}", "Private Key".cyan().bold(), key.to_hex().as_str());
    println!("      {}          {}", "WIF".cyan().bold(), wif);
    println!("      {}  {}", "BTC Address".cyan().bold(), btc.green());
    println!("      {}  {}", "ETH Address".cyan().bold(), eth.green());
    println!();
}
