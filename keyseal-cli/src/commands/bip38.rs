//! `keyseal bip38`: encrypt and decrypt BIP38 keys.

use clap::{Args, Subcommand};
use colored::Colorize;
use keyseal::PrivateKey;
use keyseal_btc::{Network, bip38, parse_private_key, wif};
use serde_json::json;

use super::{CommandResult, print_json};

/// BIP38 password-encrypted keys.
#[derive(Args)]
pub struct Bip38Command {
    #[command(subcommand)]
    command: Bip38Subcommand,
}

#[derive(Subcommand)]
enum Bip38Subcommand {
    /// Encrypt a hex or WIF private key.
    Encrypt {
        /// Private key as hex or WIF.
        key: String,

        /// Encryption password.
        #[arg(short, long, env = "KEYSEAL_PASSWORD", hide_env_values = true)]
        password: String,

        /// Encrypt the uncompressed form of a hex key.
        #[arg(short, long)]
        uncompressed: bool,
    },

    /// Decrypt a BIP38 key to WIF.
    Decrypt {
        /// BIP38 key starting with 6P.
        encrypted: String,

        /// Decryption password.
        #[arg(short, long, env = "KEYSEAL_PASSWORD", hide_env_values = true)]
        password: String,

        /// Print the WIF for testnet.
        #[arg(short, long)]
        testnet: bool,
    },
}

impl Bip38Command {
    /// Execute the BIP38 command.
    pub fn execute(self, json: bool) -> CommandResult {
        match self.command {
            Bip38Subcommand::Encrypt {
                key,
                password,
                uncompressed,
            } => {
                let (mut private_key, _) = parse_private_key(&key)?;
                if uncompressed {
                    private_key = private_key.with_compressed(false);
                }
                let encrypted = bip38::encrypt(&private_key, &password)?;
                if json {
                    return print_json(&json!({
                        "compressed": private_key.is_compressed(),
                        "bip38": encrypted,
                    }));
                }
                print_encrypted(&private_key, &encrypted);
            }
            Bip38Subcommand::Decrypt {
                encrypted,
                password,
                testnet,
            } => {
                let network = if testnet {
                    Network::Testnet
                } else {
                    Network::Mainnet
                };
                let key = bip38::decrypt(&encrypted, &password)?;
                let wif = wif::encode(&key, network);
                if json {
                    return print_json(&json!({
                        "compressed": key.is_compressed(),
                        "private_key": key.to_hex().as_str(),
                        "wif": wif.as_str(),
                    }));
                }
                print_decrypted(&key, &wif);
            }
        }
        Ok(())
    }
}

#[rustfmt::skip]
fn print_encrypted(key: &PrivateKey, encrypted: &str) {
    println!();
    println!("      {}  {}", "Compressed".cyan().bold(), key.is_compressed());
    println!("      {}       {}", "BIP38".cyan().bold(), encrypted.green());
    println!();
}

#[rustfmt::skip]
fn print_decrypted(key: &PrivateKey, wif: &str) {
    println!();
    println!("      {}   {}", "Compressed".cyan().bold(), key.is_compressed());
    println!("      {}  {}", "Private Key".cyan().bold(), key.to_hex().as_str());
    println!("      {}          {}", "WIF".cyan().bold(), wif.green());
    println!();
}
