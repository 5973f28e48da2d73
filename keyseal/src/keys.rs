//! secp256k1 private and public keys.
//!
//! A key carries its compression flag with it. The flag changes the public
//! key encoding, the WIF payload, the BIP38 flag byte and the Bitcoin
//! address, so it travels through every codec alongside the scalar.

use k256::ecdsa::{SigningKey, VerifyingKey};
use rand_core::OsRng;
use tracing::trace;
use zeroize::Zeroizing;

use crate::encoding::decode_hex_array;
use crate::error::{Error, Result};
use crate::hash::hash160;

/// Length of a raw private key scalar.
pub const PRIVATE_KEY_LEN: usize = 32;
/// Length of a compressed SEC1 public key.
pub const COMPRESSED_PUBLIC_KEY_LEN: usize = 33;
/// Length of an uncompressed SEC1 public key.
pub const UNCOMPRESSED_PUBLIC_KEY_LEN: usize = 65;

/// secp256k1 private key: a scalar in `1..n` plus its compression flag.
#[derive(Clone)]
pub struct PrivateKey {
    inner: SigningKey,
    compressed: bool,
}

impl PrivateKey {
    /// Create from a raw 32-byte big-endian scalar.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if the scalar is zero or not below the curve order.
    pub fn from_bytes(bytes: &[u8; PRIVATE_KEY_LEN], compressed: bool) -> Result<Self> {
        let inner = SigningKey::from_slice(bytes).map_err(|_| Error::InvalidKey {
            context: "private key",
        })?;
        Ok(Self { inner, compressed })
    }

    /// Create from a byte slice that must be exactly 32 bytes long.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] on a wrong length and [`Error::InvalidKey`]
    /// on an out-of-range scalar.
    pub fn from_slice(bytes: &[u8], compressed: bool) -> Result<Self> {
        let array: &[u8; PRIVATE_KEY_LEN] = bytes.try_into().map_err(|_| {
            Error::format(
                "private key",
                format!("expected {PRIVATE_KEY_LEN} bytes, got {}", bytes.len()),
            )
        })?;
        Self::from_bytes(array, compressed)
    }

    /// Parse 64 hex digits, with or without a `0x` prefix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] for bad hex and [`Error::InvalidKey`] for an
    /// out-of-range scalar.
    pub fn from_hex(s: &str, compressed: bool) -> Result<Self> {
        let bytes = Zeroizing::new(decode_hex_array::<PRIVATE_KEY_LEN>("private key hex", s)?);
        Self::from_bytes(&bytes, compressed)
    }

    /// Generate a new key from the operating system's CSPRNG.
    pub fn random(compressed: bool) -> Self {
        Self {
            inner: SigningKey::random(&mut OsRng),
            compressed,
        }
    }

    /// Serialize to the raw 32-byte scalar (zeroized on drop).
    pub fn to_bytes(&self) -> Zeroizing<[u8; PRIVATE_KEY_LEN]> {
        Zeroizing::new(self.inner.to_bytes().into())
    }

    /// Lowercase hex of the scalar (zeroized on drop).
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(*self.to_bytes()))
    }

    /// Whether the matching public key is serialized compressed.
    pub const fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// The same scalar with a different compression flag.
    #[must_use]
    pub fn with_compressed(mut self, compressed: bool) -> Self {
        self.compressed = compressed;
        self
    }

    /// Derive the public key, serialized according to this key's flag.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            inner: *self.inner.verifying_key(),
            compressed: self.compressed,
        }
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.inner.verifying_key() == other.inner.verifying_key()
            && self.compressed == other.compressed
    }
}

impl Eq for PrivateKey {}

impl core::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "PrivateKey([REDACTED], compressed={})", self.compressed)
    }
}

/// Derive the public key for a raw scalar.
///
/// Scalar multiplication of the generator point by `private_key`, serialized
/// as 33 bytes when `compressed` and 65 bytes otherwise.
///
/// # Errors
///
/// Returns [`Error::InvalidKey`] if the scalar is zero or not below the curve order.
pub fn derive_public_key(private_key: &[u8; PRIVATE_KEY_LEN], compressed: bool) -> Result<PublicKey> {
    trace!(compressed, "deriving public key");
    Ok(PrivateKey::from_bytes(private_key, compressed)?.public_key())
}

/// secp256k1 public key plus the encoding it serializes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicKey {
    inner: VerifyingKey,
    compressed: bool,
}

impl PublicKey {
    /// Parse a SEC1 encoding: 33 bytes (`02`/`03` prefix) or 65 bytes (`04` prefix).
    ///
    /// The compression flag follows the input length.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] if the bytes are not a point on the curve.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self> {
        let compressed = match bytes.len() {
            COMPRESSED_PUBLIC_KEY_LEN => true,
            UNCOMPRESSED_PUBLIC_KEY_LEN => false,
            n => {
                return Err(Error::format(
                    "public key",
                    format!("expected 33 or 65 bytes, got {n}"),
                ));
            }
        };
        let inner = VerifyingKey::from_sec1_bytes(bytes)
            .map_err(|_| Error::format("public key", "not a valid secp256k1 point"))?;
        Ok(Self { inner, compressed })
    }

    /// Whether [`PublicKey::to_bytes`] yields the 33-byte form.
    pub const fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// Serialize per the compression flag.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.inner
            .to_encoded_point(self.compressed)
            .as_bytes()
            .to_vec()
    }

    /// Serialize to compressed bytes (33 bytes).
    pub fn to_compressed_bytes(&self) -> [u8; COMPRESSED_PUBLIC_KEY_LEN] {
        let point = self.inner.to_encoded_point(true);
        let mut result = [0u8; COMPRESSED_PUBLIC_KEY_LEN];
        result.copy_from_slice(point.as_bytes());
        result
    }

    /// Serialize to uncompressed bytes (65 bytes with `04` prefix).
    pub fn to_uncompressed_bytes(&self) -> [u8; UNCOMPRESSED_PUBLIC_KEY_LEN] {
        let point = self.inner.to_encoded_point(false);
        let mut result = [0u8; UNCOMPRESSED_PUBLIC_KEY_LEN];
        result.copy_from_slice(point.as_bytes());
        result
    }

    /// Lowercase hex of [`PublicKey::to_bytes`].
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Hash160 of the serialized key, as used by P2PKH addresses.
    pub fn hash160(&self) -> [u8; 20] {
        hash160(&self.to_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE: [u8; 32] =
        hex_literal::hex!("0000000000000000000000000000000000000000000000000000000000000001");

    /// secp256k1 group order n.
    const ORDER: [u8; 32] =
        hex_literal::hex!("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141");

    mod generator_tests {
        use super::*;

        #[test]
        fn test_key_one_is_generator_uncompressed() {
            let public = derive_public_key(&ONE, false).unwrap();
            assert_eq!(
                public.to_bytes(),
                hex_literal::hex!(
                    "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
                    "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"
                )
                .to_vec()
            );
        }

        #[test]
        fn test_key_one_is_generator_compressed() {
            let public = derive_public_key(&ONE, true).unwrap();
            assert_eq!(
                public.to_hex(),
                "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
            );
        }

        #[test]
        fn test_key_three_vector() {
            let three = hex_literal::hex!(
                "0000000000000000000000000000000000000000000000000000000000000003"
            );
            let public = derive_public_key(&three, true).unwrap();
            assert_eq!(
                public.to_hex(),
                "02f9308a019258c31049344f85f89d5229b531c845836f99b08601f113bce036f9"
            );
        }
    }

    mod range_tests {
        use super::*;

        #[test]
        fn test_zero_rejected() {
            let err = PrivateKey::from_bytes(&[0u8; 32], true).unwrap_err();
            assert_eq!(err.kind(), "InvalidKeyError");
        }

        #[test]
        fn test_order_rejected() {
            assert!(derive_public_key(&ORDER, true).is_err());
        }

        #[test]
        fn test_order_minus_one_accepted() {
            let mut max = ORDER;
            max[31] -= 1;
            assert!(PrivateKey::from_bytes(&max, false).is_ok());
        }

        #[test]
        fn test_short_slice_is_format_error() {
            let err = PrivateKey::from_slice(&[1u8; 31], true).unwrap_err();
            assert_eq!(err.kind(), "FormatError");
        }
    }

    mod serialization_tests {
        use super::*;

        #[test]
        fn test_hex_roundtrip() {
            let hex = "0c28fca386c7a227600b2fe50b7cae11ec86d3bf1fbe471be89827e19d72aa1d";
            let key = PrivateKey::from_hex(&format!("0x{hex}"), true).unwrap();
            assert_eq!(key.to_hex().as_str(), hex);
        }

        #[test]
        fn test_flag_controls_length() {
            let key = PrivateKey::from_bytes(&ONE, true).unwrap();
            assert_eq!(key.public_key().to_bytes().len(), 33);
            let key = key.with_compressed(false);
            assert_eq!(key.public_key().to_bytes().len(), 65);
        }

        #[test]
        fn test_sec1_parse_keeps_flag() {
            let key = PrivateKey::from_bytes(&ONE, false).unwrap();
            let bytes = key.public_key().to_uncompressed_bytes();
            let parsed = PublicKey::from_sec1_bytes(&bytes).unwrap();
            assert!(!parsed.is_compressed());
            assert_eq!(parsed.to_compressed_bytes(), key.public_key().to_compressed_bytes());
        }

        #[test]
        fn test_sec1_rejects_garbage() {
            let mut bytes = [0u8; 33];
            bytes[0] = 0x05;
            assert_eq!(
                PublicKey::from_sec1_bytes(&bytes).unwrap_err().kind(),
                "FormatError"
            );
        }

        #[test]
        fn test_debug_is_redacted() {
            let key = PrivateKey::from_bytes(&ONE, true).unwrap();
            assert_eq!(format!("{key:?}"), "PrivateKey([REDACTED], compressed=true)");
        }

        #[test]
        fn test_random_keys_differ() {
            assert_ne!(PrivateKey::random(true), PrivateKey::random(true));
        }
    }
}
