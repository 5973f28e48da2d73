//! Bitcoin network types.

use core::fmt;
use core::str::FromStr;

/// Supported Bitcoin networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Network {
    /// Bitcoin mainnet.
    #[default]
    Mainnet,
    /// Bitcoin testnet.
    Testnet,
}

impl Network {
    /// Version byte that prefixes a WIF payload.
    #[inline]
    #[must_use]
    pub const fn wif_prefix(self) -> u8 {
        match self {
            Self::Mainnet => 0x80,
            Self::Testnet => 0xef,
        }
    }

    /// Version byte of a P2PKH address.
    #[inline]
    #[must_use]
    pub const fn p2pkh_version(self) -> u8 {
        match self {
            Self::Mainnet => 0x00,
            Self::Testnet => 0x6f,
        }
    }

    /// Network whose WIF prefix is `byte`, if any.
    #[inline]
    #[must_use]
    pub const fn from_wif_prefix(byte: u8) -> Option<Self> {
        match byte {
            0x80 => Some(Self::Mainnet),
            0xef => Some(Self::Testnet),
            _ => None,
        }
    }

    /// Get network name as string.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error returned when parsing an invalid network string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseNetworkError;

impl fmt::Display for ParseNetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid network, expected: mainnet or testnet")
    }
}

impl std::error::Error for ParseNetworkError {}

impl FromStr for Network {
    type Err = ParseNetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" | "main" | "bitcoin" => Ok(Self::Mainnet),
            "testnet" | "test" => Ok(Self::Testnet),
            _ => Err(ParseNetworkError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes() {
        assert_eq!(Network::Mainnet.wif_prefix(), 0x80);
        assert_eq!(Network::Testnet.wif_prefix(), 0xef);
        assert_eq!(Network::Mainnet.p2pkh_version(), 0x00);
        assert_eq!(Network::Testnet.p2pkh_version(), 0x6f);
    }

    #[test]
    fn test_from_wif_prefix() {
        assert_eq!(Network::from_wif_prefix(0x80), Some(Network::Mainnet));
        assert_eq!(Network::from_wif_prefix(0xef), Some(Network::Testnet));
        assert_eq!(Network::from_wif_prefix(0x00), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("Mainnet".parse::<Network>(), Ok(Network::Mainnet));
        assert_eq!("test".parse::<Network>(), Ok(Network::Testnet));
        assert_eq!("regtest".parse::<Network>(), Err(ParseNetworkError));
    }
}
