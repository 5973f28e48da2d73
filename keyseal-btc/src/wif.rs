//! Wallet Import Format.
//!
//! `Base58Check(prefix ‖ key32 [‖ 0x01])`: the prefix names the network and
//! the trailing `0x01` marks a key whose public key is used compressed.

use keyseal::encoding::{base58check_decode, base58check_encode};
use keyseal::keys::PRIVATE_KEY_LEN;
use keyseal::{Error, PrivateKey, Result};
use tracing::trace;
use zeroize::Zeroizing;

use crate::Network;

/// Marker byte appended for compressed keys.
pub const COMPRESSED_MARKER: u8 = 0x01;

/// Encode a private key as WIF. The key's compression flag decides the marker.
pub fn encode(key: &PrivateKey, network: Network) -> Zeroizing<String> {
    let mut payload = Zeroizing::new(Vec::with_capacity(PRIVATE_KEY_LEN + 2));
    payload.push(network.wif_prefix());
    payload.extend_from_slice(key.to_bytes().as_slice());
    if key.is_compressed() {
        payload.push(COMPRESSED_MARKER);
    }
    Zeroizing::new(base58check_encode(&payload))
}

/// Decode WIF into a key (carrying its compression flag) and its network.
///
/// # Errors
///
/// - [`Error::Format`] for bad Base58, an unknown prefix, a wrong length, or
///   a 34-byte payload whose last byte is not `0x01`.
/// - [`Error::Checksum`] if the checksum does not match.
/// - [`Error::InvalidKey`] if the scalar is out of range.
pub fn decode(wif: &str) -> Result<(PrivateKey, Network)> {
    let payload = Zeroizing::new(base58check_decode(wif.trim()).map_err(|e| e.context("wif"))?);

    let compressed = match payload.len() {
        33 => false,
        34 if payload[33] == COMPRESSED_MARKER => true,
        34 => {
            return Err(Error::format(
                "wif",
                format!("invalid compression marker 0x{:02x}", payload[33]),
            ));
        }
        n => {
            return Err(Error::format(
                "wif",
                format!("payload must be 33 or 34 bytes, got {n}"),
            ));
        }
    };

    let network = Network::from_wif_prefix(payload[0]).ok_or_else(|| {
        Error::format("wif", format!("unknown network prefix 0x{:02x}", payload[0]))
    })?;

    trace!(%network, compressed, "decoded wif");
    let key = PrivateKey::from_slice(&payload[1..=PRIVATE_KEY_LEN], compressed)
        .map_err(|e| e.context("wif"))?;
    Ok((key, network))
}

/// Parse a private key given as WIF or as 64 hex digits.
///
/// Hex input has no compression marker and defaults to compressed on
/// mainnet.
///
/// # Errors
///
/// Returns [`Error::Format`] if the input is neither valid WIF nor valid hex,
/// plus any error [`decode`] reports for WIF-shaped input.
pub fn parse_private_key(input: &str) -> Result<(PrivateKey, Network)> {
    let input = input.trim();
    let hex_body = input.strip_prefix("0x").unwrap_or(input);
    if hex_body.len() == PRIVATE_KEY_LEN * 2 && hex_body.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Ok((PrivateKey::from_hex(hex_body, true)?, Network::Mainnet));
    }
    decode(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; 32] =
        hex_literal::hex!("0c28fca386c7a227600b2fe50b7cae11ec86d3bf1fbe471be89827e19d72aa1d");
    const WIF_UNCOMPRESSED: &str = "5HueCGU8rMjxEXxiPuD5BDku4MkFqeZyd4dZ1jvhTVqvbTLvyTJ";
    const WIF_COMPRESSED: &str = "KwdMAjGmerYanjeui5SHS7JkmpZvVipYvB2LJGU1ZxJwYvP98617";

    mod encode_tests {
        use super::*;

        #[test]
        fn test_wif_export_uncompressed() {
            let key = PrivateKey::from_bytes(&KEY, false).unwrap();
            assert_eq!(encode(&key, Network::Mainnet).as_str(), WIF_UNCOMPRESSED);
        }

        #[test]
        fn test_wif_export_compressed() {
            let key = PrivateKey::from_bytes(&KEY, true).unwrap();
            assert_eq!(encode(&key, Network::Mainnet).as_str(), WIF_COMPRESSED);
        }

        #[test]
        fn test_testnet_wif() {
            let key = PrivateKey::from_bytes(&KEY, true).unwrap();
            let wif = encode(&key, Network::Testnet);
            assert!(wif.starts_with('c'));
            let (recovered, network) = decode(&wif).unwrap();
            assert_eq!(network, Network::Testnet);
            assert_eq!(recovered, key);
        }
    }

    mod decode_tests {
        use super::*;

        #[test]
        fn test_wif_import_compressed() {
            let (key, network) = decode(WIF_COMPRESSED).unwrap();
            assert_eq!(network, Network::Mainnet);
            assert!(key.is_compressed());
            assert_eq!(*key.to_bytes(), KEY);
        }

        #[test]
        fn test_wif_import_uncompressed() {
            let (key, network) = decode(WIF_UNCOMPRESSED).unwrap();
            assert_eq!(network, Network::Mainnet);
            assert!(!key.is_compressed());
            assert_eq!(*key.to_bytes(), KEY);
        }

        #[test]
        fn test_bad_checksum() {
            let mut wif = WIF_COMPRESSED.to_string();
            wif.pop();
            wif.push('8');
            assert_eq!(decode(&wif).unwrap_err(), Error::Checksum { context: "wif" });
        }

        #[test]
        fn test_bad_marker() {
            let mut payload = vec![0x80];
            payload.extend_from_slice(&KEY);
            payload.push(0x02);
            let err = decode(&base58check_encode(&payload)).unwrap_err();
            assert_eq!(err, Error::format("wif", "invalid compression marker 0x02"));
        }

        #[test]
        fn test_unknown_prefix() {
            let mut payload = vec![0x00];
            payload.extend_from_slice(&KEY);
            let err = decode(&base58check_encode(&payload)).unwrap_err();
            assert_eq!(err.kind(), "FormatError");
        }

        #[test]
        fn test_wrong_length() {
            let err = decode(&base58check_encode(&[0x80; 20])).unwrap_err();
            assert_eq!(err.kind(), "FormatError");
        }

        #[test]
        fn test_zero_scalar() {
            let mut payload = vec![0x80];
            payload.extend_from_slice(&[0u8; 32]);
            let err = decode(&base58check_encode(&payload)).unwrap_err();
            assert_eq!(err, Error::InvalidKey { context: "wif" });
        }
    }

    proptest::proptest! {
        #[test]
        fn wif_roundtrip(
            bytes in proptest::array::uniform32(proptest::prelude::any::<u8>()),
            compressed in proptest::prelude::any::<bool>(),
            testnet in proptest::prelude::any::<bool>(),
        ) {
            let Ok(key) = PrivateKey::from_bytes(&bytes, compressed) else {
                return Ok(());
            };
            let network = if testnet { Network::Testnet } else { Network::Mainnet };
            let (decoded, decoded_network) = decode(&encode(&key, network)).unwrap();
            proptest::prop_assert_eq!(decoded, key);
            proptest::prop_assert_eq!(decoded_network, network);
        }
    }

    mod parse_tests {
        use super::*;

        #[test]
        fn test_parse_hex_defaults_compressed() {
            let (key, network) = parse_private_key(&format!("0x{}", hex::encode(KEY))).unwrap();
            assert!(key.is_compressed());
            assert_eq!(network, Network::Mainnet);
        }

        #[test]
        fn test_parse_wif() {
            let (key, _) = parse_private_key(WIF_UNCOMPRESSED).unwrap();
            assert!(!key.is_compressed());
        }

        #[test]
        fn test_parse_garbage() {
            assert!(parse_private_key("not a key").is_err());
        }
    }
}
