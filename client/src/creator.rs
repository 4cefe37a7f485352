//! Poll creation.

use crate::{
    error::{Error, ValidationError},
    ledger::{Gateway, PendingTx},
    types::DraftPoll,
};
use tracing::{error, info};

/// Builds and submits new polls.
///
/// The creator owns the draft the user is editing. Submission is two-phase:
/// the write call yields a pending transaction handle, and the poll only
/// counts as created once that handle confirms. The draft resets to its
/// empty default on confirmation and stays intact on every failure, so the
/// user never loses entered data. Nothing is retried automatically.
#[derive(Debug)]
pub struct Creator<G: Gateway> {
    gateway: G,
    draft: DraftPoll,
}

impl<G: Gateway> Creator<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            draft: DraftPoll::default(),
        }
    }

    /// The draft being edited.
    pub fn draft(&self) -> &DraftPoll {
        &self.draft
    }

    /// Mutable access to the draft for form edits.
    pub fn draft_mut(&mut self) -> &mut DraftPoll {
        &mut self.draft
    }

    /// Check every client-side precondition without touching the network.
    ///
    /// Returns the schedule as epoch seconds on success. Whether the end
    /// precedes the start is not checked: the deployed contract is the
    /// authority on schedule ordering, and this client submits whatever the
    /// form holds (a known gap, kept for parity with the platform).
    fn validate(&self) -> Result<(i64, i64), ValidationError> {
        if self.draft.title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.draft.options.len() < 2 {
            return Err(ValidationError::TooFewOptions {
                count: self.draft.options.len(),
            });
        }
        if let Some(index) = self.draft.options.iter().position(|option| option.is_empty()) {
            return Err(ValidationError::EmptyOption { index });
        }
        self.draft.schedule_seconds()
    }

    /// Submit the draft as a new poll and wait for it to settle.
    pub async fn submit(&mut self) -> Result<(), Error> {
        let (start_time, end_time) = self.validate()?;

        let pending = match self
            .gateway
            .create_event(
                self.draft.title.clone(),
                self.draft.options.clone(),
                start_time,
                end_time,
            )
            .await
        {
            Ok(pending) => pending,
            Err(err) => {
                error!(?err, "poll submission rejected");
                return Err(Error::submission(err));
            }
        };
        if let Err(err) = pending.confirmed().await {
            error!(?err, "poll confirmation failed");
            return Err(Error::confirmation(err));
        }

        info!(title = %self.draft.title, "poll created");
        self.draft = DraftPoll::default();
        Ok(())
    }
}
