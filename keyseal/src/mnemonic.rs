//! Mnemonic codec: bytes ↔ words, 11 bits per word.
//!
//! Words come from the BIP-39 English list shipped with the `bip39` crate.
//! The list is index-stable: a phrase written today must decode the same way
//! forever, so the list is pinned by that crate and never sorted or
//! filtered here.
//!
//! [`bytes_to_phrase`] treats its input as a big-endian bit stream. Input
//! shorter than `11 · word_count` bits is zero-padded at the end; longer
//! input is truncated after `11 · word_count` bits. [`phrase_to_bytes`]
//! returns `floor(11 · n / 8)` bytes and drops trailing bits that do not fill
//! a byte. No BIP-39 checksum is computed or verified by this codec; use
//! [`generate`] for real BIP-39 seed phrases.
//!
//! # Example
//!
//! ```
//! use keyseal::mnemonic;
//!
//! let phrase = mnemonic::bytes_to_phrase(&[0u8; 4], 3).unwrap();
//! assert_eq!(phrase.to_string(), "abandon abandon abandon");
//! assert_eq!(mnemonic::phrase_to_bytes("abandon abandon abandon").unwrap(), vec![0u8; 4]);
//! ```

use core::fmt;
use core::str::FromStr;

use bip39::{Language, Mnemonic};
use rand_core::{OsRng, RngCore};
use tracing::trace;
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// Bits carried by a single word.
pub const BITS_PER_WORD: usize = 11;

/// Number of words in the list.
pub const WORDLIST_LEN: usize = 1 << BITS_PER_WORD;

/// Word counts [`generate`] accepts.
pub const SEED_WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// The pinned 2048-word list.
pub fn wordlist() -> &'static [&'static str; WORDLIST_LEN] {
    Language::English.word_list()
}

/// Smallest word count that carries `byte_len` bytes without truncation.
pub const fn words_for_len(byte_len: usize) -> usize {
    (byte_len * 8).div_ceil(BITS_PER_WORD)
}

/// An ordered sequence of words from the pinned list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MnemonicPhrase {
    indices: Vec<u16>,
}

impl MnemonicPhrase {
    /// Parse whitespace-separated words. Matching is case-insensitive.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if the phrase has no words.
    /// - [`Error::UnknownWord`] naming the first word that is not in the list.
    pub fn parse(phrase: &str) -> Result<Self> {
        let list = wordlist();
        let indices = phrase
            .split_whitespace()
            .enumerate()
            .map(|(position, word)| {
                let lowered = word.to_lowercase();
                list.binary_search_by(|probe| (*probe).cmp(lowered.as_str()))
                    .map(|index| index as u16)
                    .map_err(|_| Error::UnknownWord {
                        word: word.to_string(),
                        position,
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        if indices.is_empty() {
            return Err(Error::invalid_input("mnemonic", "phrase has no words"));
        }
        Ok(Self { indices })
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Always false; a parsed phrase has at least one word.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The words, in order.
    pub fn words(&self) -> impl Iterator<Item = &'static str> + '_ {
        let list = wordlist();
        self.indices.iter().map(move |&i| list[usize::from(i)])
    }

    /// The 11-bit index of each word.
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Unpack the bit stream into `floor(11 · n / 8)` bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let byte_len = self.indices.len() * BITS_PER_WORD / 8;
        let mut out = vec![0u8; byte_len];
        for (w, &index) in self.indices.iter().enumerate() {
            for b in 0..BITS_PER_WORD {
                let pos = w * BITS_PER_WORD + b;
                if pos / 8 >= byte_len {
                    return out;
                }
                if (index >> (BITS_PER_WORD - 1 - b)) & 1 == 1 {
                    out[pos / 8] |= 0x80 >> (pos % 8);
                }
            }
        }
        out
    }
}

impl fmt::Display for MnemonicPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, word) in self.words().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(word)?;
        }
        Ok(())
    }
}

impl FromStr for MnemonicPhrase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Pack `data` into `word_count` words.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if `data` is empty or `word_count` is zero.
pub fn bytes_to_phrase(data: &[u8], word_count: usize) -> Result<MnemonicPhrase> {
    if data.is_empty() {
        return Err(Error::invalid_input("mnemonic", "data must not be empty"));
    }
    if word_count == 0 {
        return Err(Error::invalid_input("mnemonic", "word count must be positive"));
    }
    Ok(pack(data, word_count))
}

/// Bit-pack without precondition checks.
pub(crate) fn pack(data: &[u8], word_count: usize) -> MnemonicPhrase {
    trace!(bytes = data.len(), word_count, "packing bytes into words");
    let bit = |pos: usize| -> u16 {
        data.get(pos / 8)
            .map_or(0, |byte| u16::from((byte >> (7 - pos % 8)) & 1))
    };
    let indices = (0..word_count)
        .map(|w| {
            (0..BITS_PER_WORD).fold(0u16, |acc, b| (acc << 1) | bit(w * BITS_PER_WORD + b))
        })
        .collect();
    MnemonicPhrase { indices }
}

/// Decode a phrase back to bytes.
///
/// # Errors
///
/// - [`Error::InvalidInput`] if the phrase has no words.
/// - [`Error::UnknownWord`] naming the first word that is not in the list.
pub fn phrase_to_bytes(phrase: &str) -> Result<Vec<u8>> {
    Ok(MnemonicPhrase::parse(phrase)?.to_bytes())
}

/// Generate a fresh BIP-39 seed phrase with checksum from the OS CSPRNG.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] unless `word_count` is one of
/// [`SEED_WORD_COUNTS`].
pub fn generate(word_count: usize) -> Result<Zeroizing<String>> {
    if !SEED_WORD_COUNTS.contains(&word_count) {
        return Err(Error::invalid_input(
            "mnemonic",
            format!("word count must be one of 12, 15, 18, 21 or 24, got {word_count}"),
        ));
    }
    // 32 bits of entropy per 3 words; the remaining bits are the checksum.
    let mut entropy = Zeroizing::new(vec![0u8; word_count / 3 * 4]);
    OsRng.fill_bytes(&mut entropy);
    let mnemonic = Mnemonic::from_entropy_in(Language::English, &entropy)
        .map_err(|e| Error::invalid_input("mnemonic", e.to_string()))?;
    Ok(Zeroizing::new(mnemonic.to_string()))
}
