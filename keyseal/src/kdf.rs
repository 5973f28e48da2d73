//! Password-based key derivation.
//!
//! Two profiles exist and call sites pick one explicitly:
//!
//! - [`KdfProfile::Scrypt`] with [`ScryptParams::BIP38`] (N=16384, r=8, p=8,
//!   4-byte address-hash salt, 64-byte output) for BIP38.
//! - [`KdfProfile::Pbkdf2Sha256`] with [`Pbkdf2Params::SEALED`]
//!   (1 000 000 iterations, 16-byte salt, 32-byte output) for sealed payloads.
//!
//! Both are deliberately slow. Encrypt and decrypt must use the same profile;
//! nothing in a payload records which parameters produced it.

use hmac::Hmac;
use sha2::Sha256;
use tracing::debug;
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// scrypt cost parameters together with the salt and output sizes they expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScryptParams {
    /// log2 of the CPU/memory cost N.
    pub log_n: u8,
    /// Block size.
    pub r: u32,
    /// Parallelism.
    pub p: u32,
    /// Required salt length in bytes.
    pub salt_len: usize,
    /// Derived key length in bytes.
    pub output_len: usize,
}

impl ScryptParams {
    /// BIP38 non-EC-multiply parameters.
    pub const BIP38: Self = Self {
        log_n: 14,
        r: 8,
        p: 8,
        salt_len: 4,
        output_len: 64,
    };
}

/// PBKDF2-HMAC-SHA256 parameters together with the salt and output sizes they expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pbkdf2Params {
    /// Iteration count.
    pub iterations: u32,
    /// Required salt length in bytes.
    pub salt_len: usize,
    /// Derived key length in bytes.
    pub output_len: usize,
}

impl Pbkdf2Params {
    /// Parameters for password-sealed payloads (AES-256 key).
    pub const SEALED: Self = Self {
        iterations: 1_000_000,
        salt_len: 16,
        output_len: 32,
    };
}

/// A key-derivation profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KdfProfile {
    /// scrypt, as used by BIP38.
    Scrypt(ScryptParams),
    /// PBKDF2 with HMAC-SHA256.
    Pbkdf2Sha256(Pbkdf2Params),
}

impl KdfProfile {
    /// The BIP38 scrypt profile.
    pub const BIP38: Self = Self::Scrypt(ScryptParams::BIP38);

    /// The sealed-payload PBKDF2 profile.
    pub const SEALED: Self = Self::Pbkdf2Sha256(Pbkdf2Params::SEALED);

    /// Profile name for logs and error context.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Scrypt(_) => "scrypt",
            Self::Pbkdf2Sha256(_) => "pbkdf2-hmac-sha256",
        }
    }

    /// Salt length the profile requires.
    pub const fn salt_len(&self) -> usize {
        match self {
            Self::Scrypt(p) => p.salt_len,
            Self::Pbkdf2Sha256(p) => p.salt_len,
        }
    }

    /// Length of the derived key.
    pub const fn output_len(&self) -> usize {
        match self {
            Self::Scrypt(p) => p.output_len,
            Self::Pbkdf2Sha256(p) => p.output_len,
        }
    }
}

/// Derive `profile.output_len()` bytes of key material from a password and salt.
///
/// # Errors
///
/// Returns [`Error::Kdf`] if the password is empty, the salt length does not
/// match the profile, or the underlying KDF rejects its parameters.
pub fn derive(password: &[u8], salt: &[u8], profile: &KdfProfile) -> Result<Zeroizing<Vec<u8>>> {
    let name = profile.name();
    if password.is_empty() {
        return Err(Error::kdf(name, "password must not be empty"));
    }
    if salt.len() != profile.salt_len() {
        return Err(Error::kdf(
            name,
            format!(
                "salt must be {} bytes, got {}",
                profile.salt_len(),
                salt.len()
            ),
        ));
    }

    let mut out = Zeroizing::new(vec![0u8; profile.output_len()]);
    match profile {
        KdfProfile::Scrypt(p) => {
            debug!(log_n = p.log_n, r = p.r, p = p.p, "deriving key with scrypt");
            let params = scrypt::Params::new(p.log_n, p.r, p.p, p.output_len)
                .map_err(|e| Error::kdf(name, e.to_string()))?;
            scrypt::scrypt(password, salt, &params, &mut out)
                .map_err(|e| Error::kdf(name, e.to_string()))?;
        }
        KdfProfile::Pbkdf2Sha256(p) => {
            debug!(iterations = p.iterations, "deriving key with pbkdf2");
            if p.iterations == 0 {
                return Err(Error::kdf(name, "iteration count must be positive"));
            }
            pbkdf2::pbkdf2::<Hmac<Sha256>>(password, salt, p.iterations, &mut out)
                .map_err(|e| Error::kdf(name, e.to_string()))?;
        }
    }
    Ok(out)
}
