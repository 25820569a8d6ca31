//! Error types for `leadgate-core`.
//!
//! Each error variant carries enough context to diagnose the problem without
//! a debugger. No variant ever includes the passphrase, its digest, or a
//! lead's contact fields — only record ids and operation descriptions.

use leadgate_storage::StorageError;

use crate::validate::ValidationErrors;

/// Errors from the access gate.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// The runtime has no working cryptographic digest capability.
    #[error("crypto provider unavailable: {reason}")]
    CryptoUnavailable { reason: String },

    /// The underlying storage backend returned an error.
    #[error("gate storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Errors from a login attempt.
///
/// `login` never panics — every internal failure is folded into one of
/// these variants.
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// The supplied access code does not match the reference digest.
    #[error("invalid access code")]
    InvalidCode,

    /// Verification itself failed (e.g. no digest provider).
    #[error("login verification failed: {0}")]
    Gate(#[from] GateError),

    /// The session flag could not be persisted.
    #[error("login storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Errors from the lead store.
#[derive(Debug, thiserror::Error)]
pub enum LeadStoreError {
    /// The lead collection could not be serialized for writing.
    #[error("lead serialization failed: {reason}")]
    Serialization { reason: String },

    /// The underlying storage backend returned an error.
    #[error("lead storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Errors from the contact-form submission pipeline.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The draft failed field validation. All offending fields are reported
    /// together; the store was never touched.
    #[error("lead draft failed validation: {0}")]
    Invalid(ValidationErrors),

    /// The lead store failed to persist the record.
    #[error("lead store error: {0}")]
    Store(#[from] LeadStoreError),
}
