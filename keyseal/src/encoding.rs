//! Text encodings for keys and payloads: Base58Check and hex.

use tracing::trace;

use crate::error::{Error, Result};
use crate::hash::{CHECKSUM_LEN, checksum};

/// Encode bytes to Base58Check.
///
/// Appends `SHA256(SHA256(payload))[0..4]` and Base58-encodes the result.
/// Version bytes (WIF prefix, address version, BIP38 magic) are part of
/// `payload`.
pub fn base58check_encode(payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(payload.len() + CHECKSUM_LEN);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum(payload));

    bs58::encode(data).into_string()
}

/// Decode a Base58Check string and return the payload without its checksum.
///
/// # Errors
///
/// - [`Error::Format`] if the text is not Base58 or is shorter than a checksum.
/// - [`Error::Checksum`] if the trailing four bytes do not match.
pub fn base58check_decode(encoded: &str) -> Result<Vec<u8>> {
    let mut data = bs58::decode(encoded)
        .into_vec()
        .map_err(|e| Error::format("base58check", e.to_string()))?;

    if data.len() < CHECKSUM_LEN {
        return Err(Error::format(
            "base58check",
            format!("{} bytes is shorter than the checksum", data.len()),
        ));
    }

    let split = data.len() - CHECKSUM_LEN;
    if data[split..] != checksum(&data[..split]) {
        trace!(len = data.len(), "base58check checksum mismatch");
        return Err(Error::Checksum {
            context: "base58check",
        });
    }

    data.truncate(split);
    Ok(data)
}

/// Decode hex into a fixed-size array, accepting an optional `0x` prefix.
///
/// # Errors
///
/// Returns [`Error::Format`] on non-hex characters or a length other than `N` bytes.
pub fn decode_hex_array<const N: usize>(context: &'static str, s: &str) -> Result<[u8; N]> {
    let bytes = decode_hex(context, s)?;
    bytes.as_slice().try_into().map_err(|_| {
        Error::format(context, format!("expected {N} bytes, got {}", bytes.len()))
    })
}

/// Decode hex, accepting an optional `0x` prefix and surrounding whitespace.
///
/// # Errors
///
/// Returns [`Error::Format`] on non-hex characters or an odd digit count.
pub fn decode_hex(context: &'static str, s: &str) -> Result<Vec<u8>> {
    let s = s.trim();
    let s = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(s).map_err(|e| Error::format(context, e.to_string()))
}
