//! `keyseal seal` / `keyseal open`: password-sealed keys and seed phrases.

use clap::{Args, Subcommand, ValueEnum};
use colored::Colorize;
use keyseal::SealedBox;
use keyseal::sealed::{open_private_key, open_seed_phrase, seal_private_key, seal_seed_phrase};
use keyseal_btc::{Network, parse_private_key, wif};
use serde_json::json;

use super::{CommandResult, print_json};

/// How a sealed box is written out.
#[derive(Clone, Copy, ValueEnum)]
enum SealedFormat {
    /// Lowercase hex.
    Hex,
    /// Mnemonic words.
    Words,
}

/// Seal a private key or seed phrase under a password.
#[derive(Args)]
pub struct SealCommand {
    #[command(subcommand)]
    command: SealSubcommand,
}

#[derive(Subcommand)]
enum SealSubcommand {
    /// Seal a hex or WIF private key.
    Key {
        /// Private key as hex or WIF.
        key: String,

        /// Sealing password.
        #[arg(short, long, env = "KEYSEAL_PASSWORD", hide_env_values = true)]
        password: String,

        /// Output format.
        #[arg(short, long, value_enum, default_value = "words")]
        format: SealedFormat,
    },

    /// Seal a seed phrase or other text.
    Phrase {
        /// Seed phrase to seal.
        phrase: String,

        /// Sealing password.
        #[arg(short, long, env = "KEYSEAL_PASSWORD", hide_env_values = true)]
        password: String,

        /// Output format.
        #[arg(short, long, value_enum, default_value = "words")]
        format: SealedFormat,
    },
}

/// Open a sealed private key or seed phrase.
#[derive(Args)]
pub struct OpenCommand {
    #[command(subcommand)]
    command: OpenSubcommand,
}

#[derive(Subcommand)]
enum OpenSubcommand {
    /// Open a sealed private key.
    Key {
        /// Sealed box as hex or words.
        sealed: String,

        /// Sealing password.
        #[arg(short, long, env = "KEYSEAL_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Open a sealed seed phrase.
    Phrase {
        /// Sealed box as hex or words.
        sealed: String,

        /// Sealing password.
        #[arg(short, long, env = "KEYSEAL_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

impl SealCommand {
    /// Execute the seal command.
    pub fn execute(self, json: bool) -> CommandResult {
        let (sealed, format, what) = match self.command {
            SealSubcommand::Key {
                key,
                password,
                format,
            } => {
                let (key, _) = parse_private_key(&key)?;
                (seal_private_key(&key, &password)?, format, "key")
            }
            SealSubcommand::Phrase {
                phrase,
                password,
                format,
            } => (seal_seed_phrase(&phrase, &password)?, format, "phrase"),
        };

        let rendered = match format {
            SealedFormat::Hex => sealed.to_hex(),
            SealedFormat::Words => sealed.to_phrase().to_string(),
        };
        if json {
            return print_json(&json!({ "sealed": what, "output": rendered }));
        }
        print_sealed(what, &rendered);
        Ok(())
    }
}

impl OpenCommand {
    /// Execute the open command.
    pub fn execute(self, json: bool) -> CommandResult {
        match self.command {
            OpenSubcommand::Key { sealed, password } => {
                let key = open_private_key(&parse_sealed(&sealed)?, &password)?;
                let wif = wif::encode(&key, Network::Mainnet);
                if json {
                    return print_json(&json!({
                        "private_key": key.to_hex().as_str(),
                        "compressed": key.is_compressed(),
                        "wif": wif.as_str(),
                    }));
                }
                println!();
                println!("      {}  {}", "Private Key".cyan().bold(), key.to_hex().as_str());
                println!("      {}   {}", "Compressed".cyan().bold(), key.is_compressed());
                println!("      {}          {}", "WIF".cyan().bold(), wif.green());
                println!();
            }
            OpenSubcommand::Phrase { sealed, password } => {
                let phrase = open_seed_phrase(&parse_sealed(&sealed)?, &password)?;
                if json {
                    return print_json(&json!({ "phrase": phrase.as_str() }));
                }
                println!();
                println!("      {}  {}", "Phrase".cyan().bold(), phrase.green());
                println!();
            }
        }
        Ok(())
    }
}

/// Hex if the input is a single hex token, words otherwise.
fn parse_sealed(input: &str) -> keyseal::Result<SealedBox> {
    let input = input.trim();
    let body = input.strip_prefix("0x").unwrap_or(input);
    if !body.is_empty() && body.bytes().all(|b| b.is_ascii_hexdigit()) {
        SealedBox::from_hex(input)
    } else {
        SealedBox::from_phrase(input)
    }
}

#[rustfmt::skip]
fn print_sealed(what: &str, rendered: &str) {
    let words = rendered.split_whitespace().count();

    println!();
    println!("      {}    {}", "Sealed".cyan().bold(), what);
    if words > 1 {
        println!("      {}     {words} words", "Words".cyan().bold());
    }
    println!("      {}    {}", "Output".cyan().bold(), rendered.green());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sealed_picks_hex() {
        let hex = "00".repeat(48);
        assert!(parse_sealed(&hex).is_ok());
    }

    #[test]
    fn test_parse_sealed_picks_words() {
        let words = vec!["abandon"; 35].join(" ");
        assert!(parse_sealed(&words).is_ok());
    }

    #[test]
    fn test_uncompressed_wif_reopens_uncompressed() {
        let wif = "5HueCGU8rMjxEXxiPuD5BDku4MkFqeZyd4dZ1jvhTVqvbTLvyTJ";
        let (key, _) = parse_private_key(wif).unwrap();
        let words = seal_private_key(&key, "pw").unwrap().to_phrase().to_string();

        let opened = open_private_key(&parse_sealed(&words).unwrap(), "pw").unwrap();
        assert!(!opened.is_compressed());
        assert_eq!(wif::encode(&opened, Network::Mainnet).as_str(), wif);
    }
}
