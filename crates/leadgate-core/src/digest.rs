//! Digest computation for access-code verification.
//!
//! The gate never compares passphrases directly — it compares SHA-256
//! digests, so the correct code is not recoverable from the binary. The
//! provider is a trait because the digest capability is a runtime concern:
//! a host without one must surface [`GateError::CryptoUnavailable`] instead
//! of failing open or closed silently.

use sha2::{Digest, Sha256};

use crate::error::GateError;

/// A source of 256-bit cryptographic digests.
///
/// Implementations must render the digest as exactly 64 lowercase hex
/// characters (two per byte, zero-padded).
pub trait DigestProvider: Send + Sync {
    /// Compute the hex-encoded SHA-256 digest of `input`.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::CryptoUnavailable`] if the provider cannot
    /// perform the computation.
    fn digest_hex(&self, input: &[u8]) -> Result<String, GateError>;
}

/// The production digest provider, backed by the `sha2` crate.
///
/// Deterministic and infallible: `digest_hex` never returns an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Provider;

impl DigestProvider for Sha256Provider {
    fn digest_hex(&self, input: &[u8]) -> Result<String, GateError> {
        Ok(hex::encode(Sha256::digest(input)))
    }
}
