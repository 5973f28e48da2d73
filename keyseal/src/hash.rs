//! Hash functions behind checksums and address derivation.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use sha3::Keccak256;

/// Length of a Base58Check / BIP38 address-hash checksum.
pub const CHECKSUM_LEN: usize = 4;

/// Compute SHA-256 hash
#[inline]
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Compute double SHA-256 hash (used in Bitcoin)
#[inline]
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// First four bytes of `SHA256(SHA256(data))`.
///
/// This is both the Base58Check checksum and the BIP38 address hash.
#[inline]
pub fn checksum(data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = double_sha256(data);
    [digest[0], digest[1], digest[2], digest[3]]
}

/// Compute Hash160 (SHA-256 followed by RIPEMD-160, used in Bitcoin)
#[inline]
pub fn hash160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(sha256(data)).into()
}

/// Compute Keccak-256 hash (used in Ethereum)
///
/// This is the original Keccak padding, not NIST SHA3-256.
#[inline]
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    mod sha256_tests {
        use super::*;

        #[test]
        fn test_sha256_empty() {
            assert_eq!(
                hex::encode(sha256(b"")),
                "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
            );
        }

        #[test]
        fn test_double_sha256_empty() {
            assert_eq!(
                hex::encode(double_sha256(b"")),
                "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
            );
        }

        #[test]
        fn test_checksum_is_digest_prefix() {
            assert_eq!(checksum(b""), hex_literal::hex!("5df6e0e2"));
            assert_eq!(checksum(b"hello"), double_sha256(b"hello")[..4]);
        }
    }

    mod hash160_tests {
        use super::*;

        #[test]
        fn test_hash160_generator_point() {
            // Compressed encoding of the secp256k1 generator (private key 1).
            let pubkey = hex_literal::hex!(
                "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
            );
            assert_eq!(
                hash160(&pubkey),
                hex_literal::hex!("751e76e8199196d454941c45d1b3a323f1433bd6")
            );
        }

        #[test]
        fn test_hash160_empty() {
            assert_eq!(
                hex::encode(hash160(b"")),
                "b472a266d0bd89c13706a4132ccfb16f7c3b9fcb"
            );
        }
    }

    mod keccak256_tests {
        use super::*;

        #[test]
        fn test_keccak256_is_not_sha3() {
            // SHA3-256("") is a7ffc6f8...; Ethereum uses legacy Keccak.
            assert_eq!(
                hex::encode(keccak256(b"")),
                "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
            );
        }
    }
}
