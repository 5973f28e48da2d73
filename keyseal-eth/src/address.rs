//! Ethereum address derivation with optional EIP-55 display.

use core::fmt;
use core::str::FromStr;

use keyseal::encoding::decode_hex_array;
use keyseal::hash::keccak256;
use keyseal::{Error, PublicKey, Result};
use tracing::trace;

/// Ethereum address (20 bytes).
///
/// The last 20 bytes of `keccak256(X ‖ Y)` over the uncompressed public key
/// without its `04` prefix. The key's compression flag has no effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EthAddress([u8; 20]);

impl EthAddress {
    /// Create from raw 20-byte address.
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Derive the address of a public key.
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        let uncompressed = public_key.to_uncompressed_bytes();
        let hash = keccak256(&uncompressed[1..]);
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&hash[12..]);
        trace!("derived ethereum address");
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Mixed-case EIP-55 rendering.
    pub fn to_checksum_string(&self) -> String {
        eip55_checksum(&self.0)
    }
}

/// Lowercase `0x`-prefixed hex.
impl fmt::Display for EthAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for EthAddress {
    type Err = Error;

    /// Parse 40 hex digits with an optional `0x` prefix.
    ///
    /// All-lowercase and all-uppercase input is accepted as is; mixed case
    /// must carry a valid EIP-55 checksum.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let bytes = decode_hex_array::<20>("ethereum address", s)?;
        let body = s.strip_prefix("0x").unwrap_or(s);
        let mixed = body.chars().any(|c| c.is_ascii_lowercase())
            && body.chars().any(|c| c.is_ascii_uppercase());
        if mixed && eip55_checksum(&bytes)[2..] != *body {
            return Err(Error::Checksum { context: "eip55" });
        }
        Ok(Self(bytes))
    }
}

impl AsRef<[u8]> for EthAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 20]> for EthAddress {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

/// EIP-55: uppercase each hex letter whose nibble in `keccak256(lowercase hex)` is ≥ 8.
fn eip55_checksum(address: &[u8; 20]) -> String {
    let hex_addr = hex::encode(address);
    let hash = keccak256(hex_addr.as_bytes());

    let mut result = String::with_capacity(42);
    result.push_str("0x");
    for (i, c) in hex_addr.chars().enumerate() {
        let nibble = if i % 2 == 0 {
            hash[i / 2] >> 4
        } else {
            hash[i / 2] & 0x0f
        };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            result.push(c.to_ascii_uppercase());
        } else {
            result.push(c);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyseal::PrivateKey;

    /// EIP-55 test address
    const TEST_ADDR_LOWER: &str = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed";
    const TEST_ADDR_CHECKSUM: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    mod derivation_tests {
        use super::*;

        #[test]
        fn test_key_one() {
            let key = PrivateKey::from_bytes(
                &hex_literal::hex!(
                    "0000000000000000000000000000000000000000000000000000000000000001"
                ),
                true,
            )
            .unwrap();
            let address = EthAddress::from_public_key(&key.public_key());
            assert_eq!(address.to_string(), "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf");
        }

        #[test]
        fn test_known_key() {
            let key = PrivateKey::from_hex(
                "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318",
                false,
            )
            .unwrap();
            let address = EthAddress::from_public_key(&key.public_key());
            assert_eq!(address.to_string(), "0x2c7536e3605d9c16a7a3d7b1898e529396a65c23");
        }

        #[test]
        fn test_compression_flag_ignored() {
            let key = PrivateKey::from_hex(
                "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318",
                true,
            )
            .unwrap();
            let compressed = EthAddress::from_public_key(&key.public_key());
            let key = key.with_compressed(false);
            assert_eq!(compressed, EthAddress::from_public_key(&key.public_key()));
        }
    }

    mod parsing_tests {
        use super::*;

        #[test]
        fn from_checksum_str() {
            let addr: EthAddress = TEST_ADDR_CHECKSUM.parse().unwrap();
            let expected = hex_literal::hex!("5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");
            assert_eq!(addr.as_bytes(), &expected);
        }

        #[test]
        fn from_lowercase_str() {
            let addr: EthAddress = TEST_ADDR_LOWER.parse().unwrap();
            assert_eq!(addr.to_string(), TEST_ADDR_LOWER);
        }

        #[test]
        fn bad_checksum_rejected() {
            let err = "0x5AAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
                .parse::<EthAddress>()
                .unwrap_err();
            assert_eq!(err, Error::Checksum { context: "eip55" });
        }

        #[test]
        fn wrong_length_rejected() {
            let err = "0x5aaeb6053f".parse::<EthAddress>().unwrap_err();
            assert_eq!(err.kind(), "FormatError");
        }
    }

    mod display_tests {
        use super::*;

        #[test]
        fn to_checksum_string() {
            let addr: EthAddress = TEST_ADDR_LOWER.parse().unwrap();
            assert_eq!(addr.to_checksum_string(), TEST_ADDR_CHECKSUM);
        }

        #[test]
        fn display_is_lowercase() {
            let addr: EthAddress = TEST_ADDR_CHECKSUM.parse().unwrap();
            assert_eq!(addr.to_string(), TEST_ADDR_LOWER);
        }

        #[test]
        fn checksum_more_vectors() {
            for expected in [
                "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
                "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
                "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
            ] {
                let addr: EthAddress = expected.to_lowercase().parse().unwrap();
                assert_eq!(addr.to_checksum_string(), expected);
            }
        }
    }
}
