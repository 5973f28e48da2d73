//! Password-sealed payloads for seed phrases and private keys.
//!
//! A sealed box is `salt(16) ‖ iv(16) ‖ AES-256-CBC-PKCS7(plaintext)` with the
//! AES key derived as `PBKDF2-HMAC-SHA256(password, salt, 1 000 000, 32)`.
//! Salt and IV are fresh for every seal, so sealing the same plaintext twice
//! gives different boxes that both open with the same password.
//!
//! A box renders as raw bytes, hex, or a mnemonic phrase with
//! [`words_for_len`] words so it can be written down by hand.
//!
//! # Example
//!
//! ```no_run
//! use keyseal::sealed::{open_seed_phrase, seal_seed_phrase};
//!
//! let sealed = seal_seed_phrase("legal winner thank year wave sausage", "hunter2").unwrap();
//! let phrase = sealed.to_phrase().to_string();
//! let sealed = keyseal::sealed::SealedBox::from_phrase(&phrase).unwrap();
//! assert_eq!(open_seed_phrase(&sealed, "hunter2").unwrap().as_str(), "legal winner thank year wave sausage");
//! ```

use rand_core::{OsRng, RngCore};
use tracing::debug;
use zeroize::Zeroizing;

use crate::cipher::{self, BLOCK_LEN, IV_LEN, KEY_LEN, Mode};
use crate::encoding::decode_hex;
use crate::error::{Error, Result};
use crate::kdf::{self, KdfProfile, Pbkdf2Params};
use crate::keys::{PRIVATE_KEY_LEN, PrivateKey};
use crate::mnemonic::{self, BITS_PER_WORD, MnemonicPhrase, words_for_len};

/// Salt length in a sealed box.
pub const SALT_LEN: usize = Pbkdf2Params::SEALED.salt_len;

/// Smallest valid sealed box: salt, IV and one ciphertext block.
pub const MIN_SEALED_LEN: usize = SALT_LEN + IV_LEN + BLOCK_LEN;

/// Suffix on a sealed key scalar whose public key is used compressed.
pub const COMPRESSED_MARKER: u8 = 0x01;

/// Salt, IV and ciphertext of a sealed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedBox {
    salt: [u8; SALT_LEN],
    iv: [u8; IV_LEN],
    ciphertext: Vec<u8>,
}

impl SealedBox {
    /// Seal `plaintext` under `password` with a fresh random salt and IV.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Kdf`] if the password is empty.
    pub fn seal(plaintext: &[u8], password: &str) -> Result<Self> {
        let mut salt = [0u8; SALT_LEN];
        let mut iv = [0u8; IV_LEN];
        OsRng.fill_bytes(&mut salt);
        OsRng.fill_bytes(&mut iv);
        Self::seal_with(plaintext, password, salt, iv, &KdfProfile::SEALED)
    }

    pub(crate) fn seal_with(
        plaintext: &[u8],
        password: &str,
        salt: [u8; SALT_LEN],
        iv: [u8; IV_LEN],
        profile: &KdfProfile,
    ) -> Result<Self> {
        let key = derive_key(password, &salt, profile)?;
        let ciphertext = cipher::encrypt_block(&key, Mode::Cbc { iv: &iv }, plaintext)?;
        debug!(
            plaintext_len = plaintext.len(),
            ciphertext_len = ciphertext.len(),
            "sealed payload"
        );
        Ok(Self {
            salt,
            iv,
            ciphertext,
        })
    }

    /// Recover the plaintext.
    ///
    /// # Errors
    ///
    /// - [`Error::Kdf`] if the password is empty.
    /// - [`Error::Padding`] if the password is wrong or the box was altered.
    pub fn open(&self, password: &str) -> Result<Zeroizing<Vec<u8>>> {
        self.open_with(password, &KdfProfile::SEALED)
    }

    pub(crate) fn open_with(
        &self,
        password: &str,
        profile: &KdfProfile,
    ) -> Result<Zeroizing<Vec<u8>>> {
        let key = derive_key(password, &self.salt, profile)?;
        cipher::decrypt_block(&key, Mode::Cbc { iv: &self.iv }, &self.ciphertext)
            .map_err(|e| e.context("sealed payload"))
    }

    /// Concatenated `salt ‖ iv ‖ ciphertext`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SALT_LEN + IV_LEN + self.ciphertext.len());
        out.extend_from_slice(&self.salt);
        out.extend_from_slice(&self.iv);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Split `salt ‖ iv ‖ ciphertext`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] if the input is shorter than
    /// [`MIN_SEALED_LEN`] or the ciphertext is not block-aligned.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < MIN_SEALED_LEN {
            return Err(Error::format(
                "sealed payload",
                format!("expected at least {MIN_SEALED_LEN} bytes, got {}", bytes.len()),
            ));
        }
        let (salt, rest) = bytes.split_at(SALT_LEN);
        let (iv, ciphertext) = rest.split_at(IV_LEN);
        if ciphertext.len() % BLOCK_LEN != 0 {
            return Err(Error::format(
                "sealed payload",
                format!(
                    "ciphertext length {} is not a multiple of {BLOCK_LEN}",
                    ciphertext.len()
                ),
            ));
        }
        let mut salt_arr = [0u8; SALT_LEN];
        let mut iv_arr = [0u8; IV_LEN];
        salt_arr.copy_from_slice(salt);
        iv_arr.copy_from_slice(iv);
        Ok(Self {
            salt: salt_arr,
            iv: iv_arr,
            ciphertext: ciphertext.to_vec(),
        })
    }

    /// Lowercase hex of [`SealedBox::to_bytes`].
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Parse hex produced by [`SealedBox::to_hex`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] for bad hex or a malformed layout.
    pub fn from_hex(s: &str) -> Result<Self> {
        Self::from_bytes(&decode_hex("sealed payload hex", s)?)
    }

    /// Render as a phrase of [`words_for_len`] words.
    pub fn to_phrase(&self) -> MnemonicPhrase {
        let bytes = self.to_bytes();
        mnemonic::pack(&bytes, words_for_len(bytes.len()))
    }

    /// Parse a phrase produced by [`SealedBox::to_phrase`].
    ///
    /// Bit-packing can leave one zero byte past the payload plus the spare
    /// low bits of the last word. The longest block-aligned prefix is kept
    /// and everything after it must be zero.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownWord`] for a word outside the list.
    /// - [`Error::Format`] if the phrase is too short or carries non-zero
    ///   trailing bits.
    pub fn from_phrase(phrase: &str) -> Result<Self> {
        let parsed = MnemonicPhrase::parse(phrase)?;
        let bytes = parsed.to_bytes();
        if bytes.len() < MIN_SEALED_LEN {
            return Err(Error::format(
                "sealed phrase",
                format!(
                    "{} words carry too few bytes for a sealed payload",
                    parsed.len()
                ),
            ));
        }
        // Bits of the last word that do not fill a byte.
        let spare_bits = parsed.len() * BITS_PER_WORD % 8;
        let last = parsed.indices().last().copied().unwrap_or_default();
        let header = SALT_LEN + IV_LEN;
        let payload_len = header + (bytes.len() - header) / BLOCK_LEN * BLOCK_LEN;
        if last & ((1 << spare_bits) - 1) != 0 || bytes[payload_len..].iter().any(|&b| b != 0) {
            return Err(Error::format("sealed phrase", "non-zero trailing bits"));
        }
        Self::from_bytes(&bytes[..payload_len]).map_err(|e| e.context("sealed phrase"))
    }

    /// Ciphertext length in bytes.
    pub fn ciphertext_len(&self) -> usize {
        self.ciphertext.len()
    }
}

fn derive_key(
    password: &str,
    salt: &[u8; SALT_LEN],
    profile: &KdfProfile,
) -> Result<Zeroizing<[u8; KEY_LEN]>> {
    let derived = kdf::derive(password.as_bytes(), salt, profile)?;
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    if derived.len() != KEY_LEN {
        return Err(Error::kdf(
            profile.name(),
            format!("expected {KEY_LEN} bytes of key material, got {}", derived.len()),
        ));
    }
    key.copy_from_slice(&derived);
    Ok(key)
}

/// Seal a seed phrase (or any UTF-8 text).
///
/// # Errors
///
/// - [`Error::InvalidInput`] if `text` is blank.
/// - [`Error::Kdf`] if the password is empty.
pub fn seal_seed_phrase(text: &str, password: &str) -> Result<SealedBox> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::invalid_input("sealed phrase", "seed phrase must not be empty"));
    }
    SealedBox::seal(text.as_bytes(), password)
}

/// Open a box sealed with [`seal_seed_phrase`].
///
/// # Errors
///
/// - [`Error::Padding`] for a wrong password.
/// - [`Error::Format`] if the plaintext is not UTF-8.
pub fn open_seed_phrase(sealed: &SealedBox, password: &str) -> Result<Zeroizing<String>> {
    utf8_plaintext(&sealed.open(password)?)
}

fn utf8_plaintext(plaintext: &[u8]) -> Result<Zeroizing<String>> {
    let text = core::str::from_utf8(plaintext)
        .map_err(|_| Error::format("sealed phrase", "plaintext is not valid UTF-8"))?;
    Ok(Zeroizing::new(text.to_string()))
}

/// Seal a private key together with its compression flag.
///
/// The plaintext is the 32-byte scalar, followed by [`COMPRESSED_MARKER`]
/// when the key is used compressed, as in a WIF payload.
///
/// # Errors
///
/// Returns [`Error::Kdf`] if the password is empty.
pub fn seal_private_key(key: &PrivateKey, password: &str) -> Result<SealedBox> {
    SealedBox::seal(&key_payload(key), password)
}

fn key_payload(key: &PrivateKey) -> Zeroizing<Vec<u8>> {
    let mut payload = Zeroizing::new(key.to_bytes().to_vec());
    if key.is_compressed() {
        payload.push(COMPRESSED_MARKER);
    }
    payload
}

/// Open a box sealed with [`seal_private_key`], restoring the compression
/// flag it was sealed with.
///
/// # Errors
///
/// - [`Error::Padding`] for a wrong password.
/// - [`Error::Format`] if the plaintext is neither 32 bytes nor 33 bytes
///   ending in [`COMPRESSED_MARKER`].
/// - [`Error::InvalidKey`] if the scalar is out of range.
pub fn open_private_key(sealed: &SealedBox, password: &str) -> Result<PrivateKey> {
    key_plaintext(&sealed.open(password)?)
}

fn key_plaintext(plaintext: &[u8]) -> Result<PrivateKey> {
    let compressed = match plaintext.len() {
        PRIVATE_KEY_LEN => false,
        n if n == PRIVATE_KEY_LEN + 1 => {
            if plaintext[PRIVATE_KEY_LEN] != COMPRESSED_MARKER {
                return Err(Error::format(
                    "sealed key",
                    format!("invalid compression marker 0x{:02x}", plaintext[PRIVATE_KEY_LEN]),
                ));
            }
            true
        }
        n => {
            return Err(Error::format(
                "sealed key",
                format!("expected 32 or 33 bytes, got {n}"),
            ));
        }
    };
    PrivateKey::from_slice(&plaintext[..PRIVATE_KEY_LEN], compressed)
        .map_err(|e| e.context("sealed key"))
}
