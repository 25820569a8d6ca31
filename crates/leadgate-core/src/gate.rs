//! Access gate for `Leadgate`.
//!
//! The whole page sits behind a single shared access code. The gate verifies
//! a user-supplied code by digest comparison and keeps a persisted boolean
//! session flag; callers render the login form until [`AccessGate::is_authenticated`]
//! reports `true`.
//!
//! # Security model
//!
//! - The correct code is never stored or compiled in — only its SHA-256
//!   digest is (see [`ACCESS_CODE_DIGEST`]).
//! - The session flag is a pure sentinel. It carries neither the code nor
//!   the digest.
//! - The sanitized code is held in a [`Zeroizing`] buffer and cleared from
//!   memory after hashing.
//! - Digest comparison is ordinary string equality, not constant-time. The
//!   gate protects a single shared demo code on the client side, not a
//!   per-user secret store; keep that posture in mind before reusing it.

use std::fmt;
use std::sync::Arc;

use leadgate_storage::StorageBackend;
use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::digest::{DigestProvider, Sha256Provider};
use crate::error::{GateError, LoginError};
use crate::sanitize::sanitize_access_code;

/// SHA-256 digest of the correct access code, 64 lowercase hex characters.
///
/// Rotating the code means recomputing and redeploying this constant, or
/// constructing the gate with [`AccessGate::with_reference_digest`].
pub const ACCESS_CODE_DIGEST: &str =
    "f0e4c2f76c58916ec252921922247a9e612811770051202c422476917e7423a6";

/// Storage key holding the session flag.
pub const SESSION_FLAG_KEY: &str = "authenticated-session-flag";

/// The only stored value that reads as logged in.
const SESSION_FLAG_SENTINEL: &str = "true";

/// Verifies access codes and manages the persisted session flag.
pub struct AccessGate {
    storage: Arc<dyn StorageBackend>,
    reference_digest: String,
    provider: Arc<dyn DigestProvider>,
}

impl AccessGate {
    /// Create a gate over the given storage, using [`ACCESS_CODE_DIGEST`]
    /// and the production SHA-256 provider.
    #[must_use]
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self {
            storage,
            reference_digest: ACCESS_CODE_DIGEST.to_owned(),
            provider: Arc::new(Sha256Provider),
        }
    }

    /// Replace the reference digest (code rotation, tests).
    #[must_use]
    pub fn with_reference_digest(mut self, digest_hex: impl Into<String>) -> Self {
        self.reference_digest = digest_hex.into();
        self
    }

    /// Replace the digest provider (tests, hosts with their own crypto).
    #[must_use]
    pub fn with_digest_provider(mut self, provider: Arc<dyn DigestProvider>) -> Self {
        self.provider = provider;
        self
    }

    /// Check whether `input_code` matches the reference digest.
    ///
    /// The code is sanitized (see [`sanitize_access_code`]) and hashed; the
    /// result is an exact string comparison of hex digests. No partial
    /// match, no case folding beyond what sanitization and hashing impose.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::CryptoUnavailable`] if the digest provider
    /// cannot run. Unlike [`login`](Self::login), this propagates directly.
    pub async fn verify(&self, input_code: &str) -> Result<bool, GateError> {
        let sanitized = Zeroizing::new(sanitize_access_code(input_code));
        let digest = self.provider.digest_hex(sanitized.as_bytes())?;
        Ok(digest == self.reference_digest)
    }

    /// Verify `input_code` and persist the session flag on success.
    ///
    /// # Errors
    ///
    /// - [`LoginError::InvalidCode`] if the code does not match. The flag is
    ///   left untouched.
    /// - [`LoginError::Gate`] if verification itself failed.
    /// - [`LoginError::Storage`] if the flag could not be persisted.
    pub async fn login(&self, input_code: &str) -> Result<(), LoginError> {
        let ok = self.verify(input_code).await?;
        if !ok {
            info!("login denied");
            return Err(LoginError::InvalidCode);
        }
        self.storage
            .put(SESSION_FLAG_KEY, SESSION_FLAG_SENTINEL)
            .await?;
        info!("login granted");
        Ok(())
    }

    /// Read the persisted session flag.
    ///
    /// Returns `false` when the flag is absent, when any value other than
    /// the exact `"true"` sentinel is stored, or when the storage read
    /// fails (logged as a warning — the gate fails closed).
    pub async fn is_authenticated(&self) -> bool {
        match self.storage.get(SESSION_FLAG_KEY).await {
            Ok(flag) => flag.as_deref() == Some(SESSION_FLAG_SENTINEL),
            Err(e) => {
                warn!(error = %e, "session flag read failed, treating as logged out");
                false
            }
        }
    }

    /// Clear the session flag. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Storage`] if the delete fails.
    pub async fn logout(&self) -> Result<(), GateError> {
        self.storage.delete(SESSION_FLAG_KEY).await?;
        info!("logged out");
        Ok(())
    }
}

impl fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessGate")
            .field("reference_digest", &self.reference_digest)
            .finish_non_exhaustive()
    }
}
