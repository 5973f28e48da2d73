//! `keyseal phrase`: raw bytes ↔ words.

use clap::{Args, Subcommand};
use colored::Colorize;
use keyseal::encoding::decode_hex;
use keyseal::mnemonic::{bytes_to_phrase, phrase_to_bytes, words_for_len};
use serde_json::json;

use super::{CommandResult, print_json};

/// Pack raw bytes into words and back.
#[derive(Args)]
pub struct PhraseCommand {
    #[command(subcommand)]
    command: PhraseSubcommand,
}

#[derive(Subcommand)]
enum PhraseSubcommand {
    /// Encode hex bytes as words, 11 bits per word.
    Encode {
        /// Data as hex.
        hex: String,

        /// Number of words; defaults to the smallest lossless count.
        #[arg(short, long)]
        words: Option<usize>,
    },

    /// Decode words back to hex bytes.
    Decode {
        /// Space-separated words.
        phrase: String,
    },
}

impl PhraseCommand {
    /// Execute the phrase command.
    pub fn execute(self, json: bool) -> CommandResult {
        match self.command {
            PhraseSubcommand::Encode { hex, words } => {
                let data = decode_hex("phrase input", &hex)?;
                let count = words.unwrap_or_else(|| words_for_len(data.len()));
                let phrase = bytes_to_phrase(&data, count)?.to_string();
                if json {
                    return print_json(&json!({ "words": count, "phrase": phrase }));
                }
                println!();
                println!("      {}   {count}", "Words".cyan().bold());
                println!("      {}  {}", "Phrase".cyan().bold(), phrase.green());
                println!();
            }
            PhraseSubcommand::Decode { phrase } => {
                let bytes = hex::encode(phrase_to_bytes(&phrase)?);
                if json {
                    return print_json(&json!({ "hex": bytes }));
                }
                println!();
                println!("      {}  {}", "Hex".cyan().bold(), bytes.green());
                println!();
            }
        }
        Ok(())
    }
}
