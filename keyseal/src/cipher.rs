//! AES-256 in the two modes the key formats need.
//!
//! - ECB for BIP38, over exactly two 16-byte blocks. No padding: callers hand
//!   in block-aligned data and the length is fixed by the format.
//! - CBC with PKCS#7 for sealed payloads. PKCS#7 always appends padding, so a
//!   block-aligned plaintext grows by one full block.

use aes::Aes256;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit, generic_array::GenericArray};
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, block_padding::Pkcs7};
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// AES-256 key length.
pub const KEY_LEN: usize = 32;
/// AES block length.
pub const BLOCK_LEN: usize = 16;
/// CBC initialization vector length.
pub const IV_LEN: usize = 16;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Block cipher mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode<'a> {
    /// Electronic codebook, no IV, no padding.
    Ecb,
    /// Cipher block chaining with PKCS#7 padding.
    Cbc {
        /// Fresh per encryption; stored next to the ciphertext.
        iv: &'a [u8; IV_LEN],
    },
}

/// Encrypt `plaintext` with AES-256.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] in ECB mode if `plaintext` is empty or not
/// a multiple of [`BLOCK_LEN`]. CBC mode accepts any length.
pub fn encrypt_block(key: &[u8; KEY_LEN], mode: Mode<'_>, plaintext: &[u8]) -> Result<Vec<u8>> {
    match mode {
        Mode::Ecb => {
            check_ecb_len(plaintext.len()).map_err(|e| e.context("aes-ecb encrypt"))?;
            let cipher = Aes256::new(GenericArray::from_slice(key));
            let mut out = plaintext.to_vec();
            for block in out.chunks_exact_mut(BLOCK_LEN) {
                cipher.encrypt_block(GenericArray::from_mut_slice(block));
            }
            Ok(out)
        }
        Mode::Cbc { iv } => Ok(Aes256CbcEnc::new(&(*key).into(), &(*iv).into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
    }
}

/// Decrypt `ciphertext` with AES-256.
///
/// # Errors
///
/// - [`Error::InvalidInput`] in ECB mode for a non-block-aligned input.
/// - [`Error::Format`] in CBC mode for an empty or non-block-aligned input.
/// - [`Error::Padding`] in CBC mode if the PKCS#7 padding is invalid.
pub fn decrypt_block(
    key: &[u8; KEY_LEN],
    mode: Mode<'_>,
    ciphertext: &[u8],
) -> Result<Zeroizing<Vec<u8>>> {
    match mode {
        Mode::Ecb => {
            check_ecb_len(ciphertext.len()).map_err(|e| e.context("aes-ecb decrypt"))?;
            let cipher = Aes256::new(GenericArray::from_slice(key));
            let mut out = Zeroizing::new(ciphertext.to_vec());
            for block in out.chunks_exact_mut(BLOCK_LEN) {
                cipher.decrypt_block(GenericArray::from_mut_slice(block));
            }
            Ok(out)
        }
        Mode::Cbc { iv } => {
            if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
                return Err(Error::format(
                    "aes-cbc",
                    format!(
                        "ciphertext length {} is not a positive multiple of {BLOCK_LEN}",
                        ciphertext.len()
                    ),
                ));
            }
            Aes256CbcDec::new(&(*key).into(), &(*iv).into())
                .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
                .map(Zeroizing::new)
                .map_err(|_| Error::Padding { context: "aes-cbc" })
        }
    }
}

fn check_ecb_len(len: usize) -> Result<()> {
    if len == 0 || len % BLOCK_LEN != 0 {
        return Err(Error::invalid_input(
            "aes-ecb",
            format!("{len} bytes is not a positive multiple of {BLOCK_LEN}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIPS_KEY: [u8; 32] =
        hex_literal::hex!("000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f");

    mod ecb_tests {
        use super::*;

        #[test]
        fn test_fips197_vector() {
            let pt = hex_literal::hex!("00112233445566778899aabbccddeeff");
            let ct = encrypt_block(&FIPS_KEY, Mode::Ecb, &pt).unwrap();
            assert_eq!(ct, hex_literal::hex!("8ea2b7ca516745bfeafc49904b496089"));
            let back = decrypt_block(&FIPS_KEY, Mode::Ecb, &ct).unwrap();
            assert_eq!(back.as_slice(), pt);
        }

        #[test]
        fn test_blocks_are_independent() {
            let pt = [7u8; 32];
            let ct = encrypt_block(&FIPS_KEY, Mode::Ecb, &pt).unwrap();
            assert_eq!(ct[..16], ct[16..]);
        }

        #[test]
        fn test_unaligned_rejected() {
            let err = encrypt_block(&FIPS_KEY, Mode::Ecb, &[0u8; 17]).unwrap_err();
            assert_eq!(err.kind(), "InvalidInputError");
        }
    }

    mod cbc_tests {
        use super::*;

        const KEY: [u8; 32] = hex_literal::hex!(
            "603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4"
        );
        const IV: [u8; 16] = hex_literal::hex!("000102030405060708090a0b0c0d0e0f");

        #[test]
        fn test_sp800_38a_first_block() {
            let pt = hex_literal::hex!("6bc1bee22e409f96e93d7e117393172a");
            let ct = encrypt_block(&KEY, Mode::Cbc { iv: &IV }, &pt).unwrap();
            // Aligned input gains a full PKCS#7 block.
            assert_eq!(ct.len(), 32);
            assert_eq!(ct[..16], hex_literal::hex!("f58c4c04d6e5f1ba779eabfb5f7bfbd6"));
        }

        #[test]
        fn test_roundtrip_unaligned() {
            let pt = b"legal winner thank year wave sausage worth useful legal winner thank yellow";
            let ct = encrypt_block(&KEY, Mode::Cbc { iv: &IV }, pt).unwrap();
            assert_eq!(ct.len() % BLOCK_LEN, 0);
            let back = decrypt_block(&KEY, Mode::Cbc { iv: &IV }, &ct).unwrap();
            assert_eq!(back.as_slice(), pt.as_slice());
        }

        #[test]
        fn test_empty_plaintext_is_one_block() {
            let ct = encrypt_block(&KEY, Mode::Cbc { iv: &IV }, b"").unwrap();
            assert_eq!(ct.len(), BLOCK_LEN);
            assert!(decrypt_block(&KEY, Mode::Cbc { iv: &IV }, &ct).unwrap().is_empty());
        }

        #[test]
        fn test_bad_padding_detected() {
            let mut ct = encrypt_block(&KEY, Mode::Cbc { iv: &IV }, &[0u8; 16]).unwrap();
            // Flip the last byte of the padding block's plaintext via the previous block.
            ct[15] ^= 0x01;
            let err = decrypt_block(&KEY, Mode::Cbc { iv: &IV }, &ct).unwrap_err();
            assert_eq!(err, Error::Padding { context: "aes-cbc" });
        }

        #[test]
        fn test_truncated_ciphertext_rejected() {
            let err = decrypt_block(&KEY, Mode::Cbc { iv: &IV }, &[0u8; 15]).unwrap_err();
            assert_eq!(err.kind(), "FormatError");
        }
    }
}
