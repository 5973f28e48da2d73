//! Error types shared by every keyseal codec.

use core::fmt;

/// Errors that can occur while encoding, decoding, encrypting or deriving keys.
///
/// Every variant carries a `context` naming the codec or field that failed.
/// Lower layers set a generic context and callers re-label it with
/// [`Error::context`] as the error propagates.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Malformed encoding: bad alphabet, wrong prefix, length or magic bytes.
    Format {
        /// Codec or field being decoded.
        context: &'static str,
        /// What was wrong with it.
        reason: String,
    },
    /// A checksum was present but did not match.
    Checksum {
        /// Codec or field whose checksum failed.
        context: &'static str,
    },
    /// Block padding was invalid after decryption (usually a wrong password).
    Padding {
        /// Payload being decrypted.
        context: &'static str,
    },
    /// Scalar is zero or not below the secp256k1 group order.
    InvalidKey {
        /// Where the scalar came from.
        context: &'static str,
    },
    /// Invalid key-derivation inputs.
    Kdf {
        /// KDF profile in use.
        context: &'static str,
        /// What was wrong with the inputs.
        reason: String,
    },
    /// A mnemonic word is not in the wordlist.
    UnknownWord {
        /// The offending word, as given.
        word: String,
        /// Zero-based position in the phrase.
        position: usize,
    },
    /// Empty or oversized input violating a precondition.
    InvalidInput {
        /// Operation whose precondition failed.
        context: &'static str,
        /// The violated precondition.
        reason: String,
    },
}

impl Error {
    /// Shorthand for [`Error::Format`].
    pub fn format(context: &'static str, reason: impl Into<String>) -> Self {
        Self::Format {
            context,
            reason: reason.into(),
        }
    }

    /// Shorthand for [`Error::Kdf`].
    pub fn kdf(context: &'static str, reason: impl Into<String>) -> Self {
        Self::Kdf {
            context,
            reason: reason.into(),
        }
    }

    /// Shorthand for [`Error::InvalidInput`].
    pub fn invalid_input(context: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            context,
            reason: reason.into(),
        }
    }

    /// Re-label the failing codec, keeping the failure kind and details.
    ///
    /// `UnknownWord` has no context slot and is returned unchanged.
    #[must_use]
    pub fn context(self, context: &'static str) -> Self {
        match self {
            Self::Format { reason, .. } => Self::Format { context, reason },
            Self::Checksum { .. } => Self::Checksum { context },
            Self::Padding { .. } => Self::Padding { context },
            Self::InvalidKey { .. } => Self::InvalidKey { context },
            Self::Kdf { reason, .. } => Self::Kdf { context, reason },
            Self::InvalidInput { reason, .. } => Self::InvalidInput { context, reason },
            other @ Self::UnknownWord { .. } => other,
        }
    }

    /// Short, stable name of the failure kind.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Format { .. } => "FormatError",
            Self::Checksum { .. } => "ChecksumError",
            Self::Padding { .. } => "PaddingError",
            Self::InvalidKey { .. } => "InvalidKeyError",
            Self::Kdf { .. } => "KdfError",
            Self::UnknownWord { .. } => "UnknownWordError",
            Self::InvalidInput { .. } => "InvalidInputError",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format { context, reason } => write!(f, "{context}: malformed input: {reason}"),
            Self::Checksum { context } => write!(f, "{context}: checksum mismatch"),
            Self::Padding { context } => {
                write!(f, "{context}: invalid padding after decryption (wrong password?)")
            }
            Self::InvalidKey { context } => {
                write!(f, "{context}: private key is zero or not below the curve order")
            }
            Self::Kdf { context, reason } => write!(f, "{context}: key derivation failed: {reason}"),
            Self::UnknownWord { word, position } => {
                write!(f, "unknown mnemonic word \"{word}\" at position {}", position + 1)
            }
            Self::InvalidInput { context, reason } => write!(f, "{context}: {reason}"),
        }
    }
}

impl std::error::Error for Error {}

/// A convenient Result type alias for keyseal operations.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_relabels_but_keeps_kind() {
        let err = Error::Checksum {
            context: "base58check",
        }
        .context("wif");
        assert_eq!(err, Error::Checksum { context: "wif" });
        assert_eq!(err.kind(), "ChecksumError");
    }

    #[test]
    fn context_keeps_reason() {
        let err = Error::format("base58check", "bad character").context("bip38");
        assert_eq!(err.to_string(), "bip38: malformed input: bad character");
    }

    #[test]
    fn unknown_word_names_the_word() {
        let err = Error::UnknownWord {
            word: "bitcoinz".into(),
            position: 4,
        };
        assert_eq!(err.to_string(), "unknown mnemonic word \"bitcoinz\" at position 5");
        assert_eq!(err.clone().context("sealed phrase"), err);
    }
}
