//! Caller-side field validation for contact-form drafts.
//!
//! Validation runs before the lead store is touched and collects every
//! failing field instead of stopping at the first, so a caller can surface
//! all errors next to their fields at once. Values are checked but never
//! rewritten — the store persists exactly what was submitted.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// The fields a contact form submits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeadDraft {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Per-field validation errors. `None` means the field passed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl ValidationErrors {
    /// True when every field passed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.message.is_none()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, error) in [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ] {
            if let Some(error) = error {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {error}")?;
                first = false;
            }
        }
        if first {
            write!(f, "no errors")?;
        }
        Ok(())
    }
}

/// Validate a draft, collecting errors for every failing field.
///
/// Rules:
/// - `name`: required, trimmed length ≥ 2 characters.
/// - `email`: required, must look like `local@domain.tld`.
/// - `message`: required, trimmed length ≥ 10 characters.
#[must_use]
pub fn validate_draft(draft: &LeadDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    let name = draft.name.trim();
    if name.is_empty() {
        errors.name = Some("name is required".to_owned());
    } else if name.chars().count() < 2 {
        errors.name = Some("name must be at least 2 characters".to_owned());
    }

    if draft.email.trim().is_empty() {
        errors.email = Some("email is required".to_owned());
    } else if !valid_email(&draft.email) {
        errors.email = Some("enter a valid email address".to_owned());
    }

    let message = draft.message.trim();
    if message.is_empty() {
        errors.message = Some("message is required".to_owned());
    } else if message.chars().count() < 10 {
        errors.message = Some("message must be at least 10 characters".to_owned());
    }

    errors
}

fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").is_ok_and(|regex| regex.is_match(email))
}
