//! Legacy P2PKH addresses.

use core::fmt;

use keyseal::PublicKey;
use keyseal::encoding::base58check_encode;
use tracing::trace;

use crate::Network;

/// A Pay-to-Public-Key-Hash address.
///
/// `Base58Check(version ‖ HASH160(pubkey))`. The public key's compression
/// flag picks which serialization is hashed, so one scalar has two distinct
/// addresses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct P2pkhAddress {
    network: Network,
    hash: [u8; 20],
}

impl P2pkhAddress {
    /// Derive the address of `public_key` on `network`.
    pub fn from_public_key(public_key: &PublicKey, network: Network) -> Self {
        trace!(%network, compressed = public_key.is_compressed(), "deriving p2pkh address");
        Self {
            network,
            hash: public_key.hash160(),
        }
    }

    /// Network the address belongs to.
    pub const fn network(&self) -> Network {
        self.network
    }

    /// HASH160 of the serialized public key.
    pub const fn pubkey_hash(&self) -> &[u8; 20] {
        &self.hash
    }
}

impl fmt::Display for P2pkhAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut payload = [0u8; 21];
        payload[0] = self.network.p2pkh_version();
        payload[1..].copy_from_slice(&self.hash);
        f.write_str(&base58check_encode(&payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyseal::PrivateKey;

    const ONE: [u8; 32] =
        hex_literal::hex!("0000000000000000000000000000000000000000000000000000000000000001");

    #[test]
    fn test_key_one_compressed() {
        let key = PrivateKey::from_bytes(&ONE, true).unwrap();
        let address = P2pkhAddress::from_public_key(&key.public_key(), Network::Mainnet);
        assert_eq!(address.to_string(), "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH");
        assert_eq!(
            address.pubkey_hash(),
            &hex_literal::hex!("751e76e8199196d454941c45d1b3a323f1433bd6")
        );
    }

    #[test]
    fn test_key_one_uncompressed() {
        let key = PrivateKey::from_bytes(&ONE, false).unwrap();
        let address = P2pkhAddress::from_public_key(&key.public_key(), Network::Mainnet);
        assert_eq!(address.to_string(), "1EHNa6Q4Jz2uvNExL497mE43ikXhwF6kZm");
    }

    #[test]
    fn test_testnet_prefix() {
        let key = PrivateKey::from_bytes(&ONE, true).unwrap();
        let address = P2pkhAddress::from_public_key(&key.public_key(), Network::Testnet);
        assert_eq!(address.to_string(), "mrCDrCybB6J1vRfbwM5hemdJz73FwDBC8r");
    }
}
