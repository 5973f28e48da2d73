//! Key report pipeline: decrypt → derive public key → derive addresses →
//! re-encrypt.
//!
//! Every step either succeeds or the whole report fails with the first
//! error; no partial report is returned.

use core::fmt;

use keyseal::{Error, PrivateKey, Result};
use keyseal_btc::{Network, P2pkhAddress, bip38, wif};
use keyseal_eth::EthAddress;
use serde::Serialize;
use tracing::{debug, info};
use zeroize::{Zeroize, Zeroizing};

/// Leading characters of every Base58Check BIP38 string.
const BIP38_LEAD: &str = "6P";

/// A private key as supplied by the caller.
pub enum KeyInput {
    /// 64 hex digits, optionally `0x`-prefixed. Treated as compressed mainnet.
    Hex(Zeroizing<String>),
    /// Wallet Import Format; carries network and compression.
    Wif(Zeroizing<String>),
    /// BIP38 payload and the password that unlocks it.
    Bip38 {
        /// Base58Check payload starting with `6P`.
        payload: String,
        /// Decryption password.
        password: Zeroizing<String>,
    },
}

impl KeyInput {
    /// Classify `text` as BIP38, hex or WIF.
    ///
    /// Anything starting with `6P` is treated as BIP38, so a damaged payload
    /// fails in the BIP38 codec rather than as a WIF.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `text` is BIP38 and no password was
    /// given.
    pub fn detect(text: &str, password: Option<&str>) -> Result<Self> {
        let text = text.trim();
        if text.starts_with(BIP38_LEAD) {
            let password = password.ok_or_else(|| {
                Error::invalid_input("bip38", "a password is required to decrypt this key")
            })?;
            return Ok(Self::Bip38 {
                payload: text.to_string(),
                password: Zeroizing::new(password.to_string()),
            });
        }
        let body = text.strip_prefix("0x").unwrap_or(text);
        if body.len() == 64 && body.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Ok(Self::Hex(Zeroizing::new(text.to_string())));
        }
        Ok(Self::Wif(Zeroizing::new(text.to_string())))
    }

    /// Short name of the input format.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Hex(_) => "hex",
            Self::Wif(_) => "wif",
            Self::Bip38 { .. } => "bip38",
        }
    }

    /// Decode (and decrypt, for BIP38) into a key and its network.
    ///
    /// # Errors
    ///
    /// Whatever the matching codec reports.
    pub fn resolve(&self) -> Result<(PrivateKey, Network)> {
        match self {
            Self::Hex(hex) => Ok((PrivateKey::from_hex(hex, true)?, Network::Mainnet)),
            Self::Wif(text) => wif::decode(text),
            Self::Bip38 { payload, password } => {
                Ok((bip38::decrypt(payload, password)?, Network::Mainnet))
            }
        }
    }
}

impl fmt::Debug for KeyInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyInput::{}([REDACTED])", self.kind())
    }
}

/// Overrides applied while building a report.
#[derive(Default)]
pub struct ReportOptions {
    /// Network for WIF and Bitcoin addresses; defaults to the input's.
    pub network: Option<Network>,
    /// Compression flag; defaults to the input's.
    pub compressed: Option<bool>,
    /// Password to re-encrypt the key with BIP38.
    pub reencrypt: Option<Zeroizing<String>>,
}

/// Every representation of one private key.
#[derive(Serialize)]
pub struct KeyReport {
    /// Input format the key came from.
    pub source: &'static str,
    /// Bitcoin network used for WIF and addresses.
    pub network: String,
    /// Whether the key is used compressed.
    pub compressed: bool,
    /// Raw scalar as hex.
    pub private_key: String,
    /// WIF honoring the compression flag.
    pub wif: String,
    /// WIF with the compression marker.
    pub wif_compressed: String,
    /// WIF without the compression marker.
    pub wif_uncompressed: String,
    /// SEC1 public key honoring the compression flag.
    pub public_key: String,
    /// 33-byte SEC1 public key.
    pub public_key_compressed: String,
    /// 65-byte SEC1 public key.
    pub public_key_uncompressed: String,
    /// P2PKH address honoring the compression flag.
    pub btc_address: String,
    /// P2PKH address of the compressed public key.
    pub btc_address_compressed: String,
    /// P2PKH address of the uncompressed public key.
    pub btc_address_uncompressed: String,
    /// Lowercase Ethereum address.
    pub eth_address: String,
    /// EIP-55 Ethereum address.
    pub eth_address_checksum: String,
    /// BIP38 re-encryption honoring the compression flag, if a password was
    /// supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bip38: Option<String>,
    /// BIP38 re-encryption of the compressed key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bip38_compressed: Option<String>,
    /// BIP38 re-encryption of the uncompressed key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bip38_uncompressed: Option<String>,
}

impl KeyReport {
    /// Run the pipeline.
    ///
    /// # Errors
    ///
    /// The first error from decoding, decryption or re-encryption.
    pub fn build(input: &KeyInput, options: &ReportOptions) -> Result<Self> {
        let (key, input_network) = input.resolve()?;
        let network = options.network.unwrap_or(input_network);
        let key = match options.compressed {
            Some(compressed) => key.with_compressed(compressed),
            None => key,
        };
        debug!(source = input.kind(), %network, compressed = key.is_compressed(), "building key report");

        let compressed_key = key.clone().with_compressed(true);
        let uncompressed_key = key.clone().with_compressed(false);
        let public = key.public_key();
        let eth = EthAddress::from_public_key(&public);

        let (bip38_compressed, bip38_uncompressed) = match &options.reencrypt {
            Some(password) => {
                let compressed = bip38::encrypt(&compressed_key, password)?;
                let uncompressed = bip38::encrypt(&uncompressed_key, password)?;
                info!("key re-encrypted with bip38");
                (Some(compressed), Some(uncompressed))
            }
            None => (None, None),
        };
        let bip38 = if key.is_compressed() {
            bip38_compressed.clone()
        } else {
            bip38_uncompressed.clone()
        };

        Ok(Self {
            source: input.kind(),
            network: network.to_string(),
            compressed: key.is_compressed(),
            private_key: key.to_hex().to_string(),
            wif: wif::encode(&key, network).to_string(),
            wif_compressed: wif::encode(&compressed_key, network).to_string(),
            wif_uncompressed: wif::encode(&uncompressed_key, network).to_string(),
            public_key: public.to_hex(),
            public_key_compressed: hex::encode(public.to_compressed_bytes()),
            public_key_uncompressed: hex::encode(public.to_uncompressed_bytes()),
            btc_address: P2pkhAddress::from_public_key(&public, network).to_string(),
            btc_address_compressed: P2pkhAddress::from_public_key(
                &compressed_key.public_key(),
                network,
            )
            .to_string(),
            btc_address_uncompressed: P2pkhAddress::from_public_key(
                &uncompressed_key.public_key(),
                network,
            )
            .to_string(),
            eth_address: eth.to_string(),
            eth_address_checksum: eth.to_checksum_string(),
            bip38,
            bip38_compressed,
            bip38_uncompressed,
        })
    }
}

impl Drop for KeyReport {
    fn drop(&mut self) {
        self.private_key.zeroize();
        self.wif.zeroize();
        self.wif_compressed.zeroize();
        self.wif_uncompressed.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_HEX: &str = "0c28fca386c7a227600b2fe50b7cae11ec86d3bf1fbe471be89827e19d72aa1d";

    #[test]
    fn test_detect_hex() {
        let input = KeyInput::detect(KEY_HEX, None).unwrap();
        assert_eq!(input.kind(), "hex");
        let input = KeyInput::detect(&format!("0x{KEY_HEX}"), None).unwrap();
        assert_eq!(input.kind(), "hex");
    }

    #[test]
    fn test_detect_wif() {
        let input =
            KeyInput::detect("5HueCGU8rMjxEXxiPuD5BDku4MkFqeZyd4dZ1jvhTVqvbTLvyTJ", None).unwrap();
        assert_eq!(input.kind(), "wif");
    }

    #[test]
    fn test_damaged_bip38_stays_bip38() {
        // Last character changed, so the Base58Check checksum no longer holds.
        let damaged = "6PRNFFkZc2NZ6dJqFfhRoFNMR9Lnyj7dYGrzdgXXVMXcxoKTePPX1dWByr";
        let input = KeyInput::detect(damaged, Some("Satoshi")).unwrap();
        assert_eq!(input.kind(), "bip38");
        let err = input.resolve().unwrap_err();
        assert_eq!(err, Error::Checksum { context: "bip38" });
    }

    #[test]
    fn test_bip38_requires_password() {
        let err = KeyInput::detect("6PRNFFkZc2NZ6dJqFfhRoFNMR9Lnyj7dYGrzdgXXVMXcxoKTePPX1dWByq", None)
            .unwrap_err();
        assert_eq!(err.kind(), "InvalidInputError");
    }

    #[test]
    fn test_debug_is_redacted() {
        let input = KeyInput::detect(KEY_HEX, None).unwrap();
        assert_eq!(format!("{input:?}"), "KeyInput::hex([REDACTED])");
    }

    #[test]
    fn test_types_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<KeyInput>();
        assert_send_sync::<KeyReport>();
        assert_send_sync::<ReportOptions>();
    }
}
