//! BIP38 password-encrypted private keys (non-EC-multiply mode).
//!
//! Layout of the 39-byte payload before Base58Check:
//!
//! ```text
//! 0x01 0x42 | flag | address_hash[4] | encryptedhalf1[16] | encryptedhalf2[16]
//! ```
//!
//! - `flag` is `0xC0`, with `0x20` set when the key is used compressed.
//! - `address_hash` is the first four bytes of `SHA256(SHA256(address))`,
//!   where `address` is the ASCII mainnet P2PKH address of the key. It is
//!   both the scrypt salt and the check that the password was right.
//! - `scrypt(NFC(password), address_hash, N=16384, r=8, p=8, 64)` splits into
//!   `derivedhalf1 ‖ derivedhalf2`. Each half of the key is XORed with the
//!   matching half of `derivedhalf1` and encrypted with AES-256-ECB under
//!   `derivedhalf2`.
//!
//! EC-multiply payloads (`0x01 0x43`) are recognized and rejected.

use core::fmt;
use core::str::FromStr;

use keyseal::cipher::{self, KEY_LEN, Mode};
use keyseal::encoding::{base58check_decode, base58check_encode};
use keyseal::hash::{CHECKSUM_LEN, checksum};
use keyseal::kdf::{self, KdfProfile};
use keyseal::keys::PRIVATE_KEY_LEN;
use keyseal::{Error, PrivateKey, Result};
use tracing::debug;
use unicode_normalization::UnicodeNormalization;
use zeroize::Zeroizing;

use crate::{Network, P2pkhAddress};

/// Magic prefix of a non-EC-multiply payload.
pub const PREFIX: [u8; 2] = [0x01, 0x42];
/// Magic prefix of an EC-multiply payload.
pub const EC_MULTIPLY_PREFIX: [u8; 2] = [0x01, 0x43];
/// Payload length before the Base58Check checksum.
pub const PAYLOAD_LEN: usize = 39;

const FLAG_BASE: u8 = 0xc0;
const FLAG_COMPRESSED: u8 = 0x20;

/// A parsed BIP38 payload; the key itself stays encrypted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bip38Payload {
    compressed: bool,
    address_hash: [u8; CHECKSUM_LEN],
    encrypted: [u8; PRIVATE_KEY_LEN],
}

impl Bip38Payload {
    /// Parse a Base58Check BIP38 string without decrypting it.
    ///
    /// # Errors
    ///
    /// - [`Error::Format`] for bad Base58, a wrong length, an EC-multiply or
    ///   unknown prefix, or unknown flag bits.
    /// - [`Error::Checksum`] if the Base58Check checksum fails.
    pub fn parse(encoded: &str) -> Result<Self> {
        let data = base58check_decode(encoded.trim()).map_err(|e| e.context("bip38"))?;
        if data.len() != PAYLOAD_LEN {
            return Err(Error::format(
                "bip38",
                format!("payload must be {PAYLOAD_LEN} bytes, got {}", data.len()),
            ));
        }
        if data[..2] == EC_MULTIPLY_PREFIX {
            return Err(Error::format("bip38", "ec-multiply mode not supported"));
        }
        if data[..2] != PREFIX {
            return Err(Error::format(
                "bip38",
                format!("unknown prefix 0x{:02x}{:02x}", data[0], data[1]),
            ));
        }

        let flag = data[2];
        let compressed = match flag {
            FLAG_BASE => false,
            f if f == FLAG_BASE | FLAG_COMPRESSED => true,
            f => return Err(Error::format("bip38", format!("unsupported flag byte 0x{f:02x}"))),
        };

        let mut address_hash = [0u8; CHECKSUM_LEN];
        address_hash.copy_from_slice(&data[3..7]);
        let mut encrypted = [0u8; PRIVATE_KEY_LEN];
        encrypted.copy_from_slice(&data[7..]);
        Ok(Self {
            compressed,
            address_hash,
            encrypted,
        })
    }

    /// Whether the encrypted key is used compressed.
    pub const fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// Salt and password check: checksum of the key's mainnet address.
    pub const fn address_hash(&self) -> &[u8; CHECKSUM_LEN] {
        &self.address_hash
    }

    /// Decrypt with `password`.
    ///
    /// # Errors
    ///
    /// - [`Error::Kdf`] if the password is empty.
    /// - [`Error::Checksum`] with context `bip38 address hash` if the
    ///   password is wrong.
    pub fn decrypt(&self, password: &str) -> Result<PrivateKey> {
        let derived = derive(password, &self.address_hash)?;
        let (half1, half2) = split_derived(&derived);

        let mut plain = cipher::decrypt_block(&half2, Mode::Ecb, &self.encrypted)
            .map_err(|e| e.context("bip38"))?;
        xor_in_place(&mut plain, &half1);

        // Only a wrong password yields an out-of-range scalar here.
        let key = PrivateKey::from_slice(&plain, self.compressed).map_err(|_| Error::Checksum {
            context: "bip38 address hash",
        })?;
        if address_hash(&key) != self.address_hash {
            debug!("bip38 address hash mismatch");
            return Err(Error::Checksum {
                context: "bip38 address hash",
            });
        }
        Ok(key)
    }
}

impl fmt::Display for Bip38Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut data = [0u8; PAYLOAD_LEN];
        data[..2].copy_from_slice(&PREFIX);
        data[2] = if self.compressed {
            FLAG_BASE | FLAG_COMPRESSED
        } else {
            FLAG_BASE
        };
        data[3..7].copy_from_slice(&self.address_hash);
        data[7..].copy_from_slice(&self.encrypted);
        f.write_str(&base58check_encode(&data))
    }
}

impl FromStr for Bip38Payload {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Encrypt `key` under `password`. The key's compression flag is recorded.
///
/// # Errors
///
/// Returns [`Error::Kdf`] if the password is empty.
pub fn encrypt(key: &PrivateKey, password: &str) -> Result<String> {
    let salt = address_hash(key);
    let derived = derive(password, &salt)?;
    let (half1, half2) = split_derived(&derived);

    let mut block = Zeroizing::new(key.to_bytes().to_vec());
    xor_in_place(&mut block, &half1);
    let ciphertext =
        cipher::encrypt_block(&half2, Mode::Ecb, &block).map_err(|e| e.context("bip38"))?;

    let mut encrypted = [0u8; PRIVATE_KEY_LEN];
    encrypted.copy_from_slice(&ciphertext);
    debug!(compressed = key.is_compressed(), "bip38 encrypted");
    Ok(Bip38Payload {
        compressed: key.is_compressed(),
        address_hash: salt,
        encrypted,
    }
    .to_string())
}

/// Parse and decrypt a BIP38 string.
///
/// # Errors
///
/// Any error of [`Bip38Payload::parse`] or [`Bip38Payload::decrypt`].
pub fn decrypt(encoded: &str, password: &str) -> Result<PrivateKey> {
    Bip38Payload::parse(encoded)?.decrypt(password)
}

/// Whether `s` decodes as a well-formed non-EC BIP38 payload.
pub fn is_bip38(s: &str) -> bool {
    Bip38Payload::parse(s).is_ok()
}

fn address_hash(key: &PrivateKey) -> [u8; CHECKSUM_LEN] {
    let address = P2pkhAddress::from_public_key(&key.public_key(), Network::Mainnet);
    checksum(address.to_string().as_bytes())
}

fn derive(password: &str, salt: &[u8; CHECKSUM_LEN]) -> Result<Zeroizing<Vec<u8>>> {
    let normalized: Zeroizing<String> = Zeroizing::new(password.nfc().collect());
    kdf::derive(normalized.as_bytes(), salt, &KdfProfile::BIP38).map_err(|e| e.context("bip38"))
}

fn split_derived(derived: &[u8]) -> (Zeroizing<[u8; 32]>, Zeroizing<[u8; KEY_LEN]>) {
    let mut half1 = Zeroizing::new([0u8; 32]);
    let mut half2 = Zeroizing::new([0u8; KEY_LEN]);
    half1.copy_from_slice(&derived[..32]);
    half2.copy_from_slice(&derived[32..64]);
    (half1, half2)
}

fn xor_in_place(data: &mut [u8], mask: &[u8; 32]) {
    for (byte, m) in data.iter_mut().zip(mask) {
        *byte ^= m;
    }
}
