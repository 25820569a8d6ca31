//! Contact-form submission pipeline.
//!
//! [`LeadIntake::submit`] drives the form's state machine:
//! `Idle -> Validating -> { Invalid | Saving -> Saved }`. Validation failure
//! reports every offending field and leaves the store untouched. A
//! successful save awaits an artificial delay (a stand-in for a real API
//! call, kept for the demonstration), appends the lead, and bumps a refresh
//! counter that dashboard-role observers watch to re-read the collection.
//!
//! The counter is a [`tokio::sync::watch`] channel: subscribers only ever
//! see the latest count, which is all a "re-read on change" consumer needs.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::sleep;

use crate::error::SubmitError;
use crate::lead::{Lead, LeadStore};
use crate::validate::{LeadDraft, validate_draft};

/// Artificial save delay, standing in for a real API round trip.
const DEFAULT_SAVE_DELAY: Duration = Duration::from_millis(800);

/// Validates drafts, saves them through a [`LeadStore`], and signals
/// observers after each save.
#[derive(Debug)]
pub struct LeadIntake {
    store: LeadStore,
    save_delay: Duration,
    refresh_tx: watch::Sender<u64>,
}

impl LeadIntake {
    /// Create an intake over the given store, with the default 800 ms
    /// save delay.
    #[must_use]
    pub fn new(store: LeadStore) -> Self {
        let (refresh_tx, _) = watch::channel(0);
        Self {
            store,
            save_delay: DEFAULT_SAVE_DELAY,
            refresh_tx,
        }
    }

    /// Replace the artificial save delay (tests use [`Duration::ZERO`]).
    #[must_use]
    pub fn with_save_delay(mut self, delay: Duration) -> Self {
        self.save_delay = delay;
        self
    }

    /// Subscribe to the refresh counter.
    ///
    /// The counter starts at 0 and increments once per saved lead. A
    /// dashboard-role observer awaits changes and re-reads
    /// [`LeadStore::list`] on each one.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.refresh_tx.subscribe()
    }

    /// Validate and save a draft, returning the stored lead.
    ///
    /// The save delay is awaited cooperatively — the task suspends, nothing
    /// blocks. Once started, a submission is not cancelled from within;
    /// dropping the future before completion simply never saves.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::Invalid`] with every failing field if validation
    ///   fails. The store is never touched and the counter does not move.
    /// - [`SubmitError::Store`] if persisting the lead fails.
    pub async fn submit(&self, draft: &LeadDraft) -> Result<Lead, SubmitError> {
        let errors = validate_draft(draft);
        if !errors.is_empty() {
            return Err(SubmitError::Invalid(errors));
        }

        sleep(self.save_delay).await;

        let lead = self.store.create(draft).await?;
        self.refresh_tx.send_modify(|count| *count += 1);
        Ok(lead)
    }
}
