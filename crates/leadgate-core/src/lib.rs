//! Core library for `Leadgate`.
//!
//! Contains the access gate (passphrase normalization, SHA-256 digest
//! verification, persisted session flag), the lead store (an ordered JSON
//! collection of contact submissions under a single storage key), caller-side
//! field validation, and the contact-form submission pipeline. This crate
//! depends on `leadgate-storage` for the storage backend trait and knows
//! nothing about rendering or transport.

pub mod digest;
pub mod error;
pub mod gate;
pub mod intake;
pub mod lead;
pub mod sanitize;
pub mod validate;
