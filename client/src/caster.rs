//! Vote casting.

use crate::{
    directory::Directory,
    error::{Error, ValidationError},
    ledger::{Gateway, PendingTx},
    reader::fetch,
    types::{DraftVote, PollId, PollSummary},
};
use tracing::{error, info, warn};

/// Builds and submits votes.
///
/// The caster keeps its own copy of the summary for the poll the user is
/// voting in, fetched when the selection changes, so the chosen option is
/// always validated against the options of that exact poll. A confirmed
/// vote does not touch any displayed tally: the results view refetches on
/// its own schedule and is the only place the vote becomes visible.
#[derive(Debug)]
pub struct Caster<G: Gateway> {
    gateway: G,
    /// Poll count captured at startup; may lag the ledger.
    count: u64,
    /// Summary of the poll the draft targets, if one loaded successfully.
    loaded: Option<PollSummary>,
    draft: DraftVote,
}

impl<G: Gateway> Caster<G> {
    pub fn new(gateway: G, directory: Directory) -> Self {
        Self {
            gateway,
            count: directory.count(),
            loaded: None,
            draft: DraftVote::default(),
        }
    }

    /// The summary the draft is validated against, if one is loaded.
    pub fn loaded(&self) -> Option<&PollSummary> {
        self.loaded.as_ref()
    }

    /// The drafted vote.
    pub fn draft(&self) -> &DraftVote {
        &self.draft
    }

    /// Mutable access to the drafted vote.
    ///
    /// [Caster::submit] re-validates the draft against the loaded summary,
    /// so edits made here cannot smuggle a stale option index onto the
    /// ledger.
    pub fn draft_mut(&mut self) -> &mut DraftVote {
        &mut self.draft
    }

    /// Select the poll to vote in and fetch its options.
    ///
    /// On success the chosen option resets to the first one, so a choice
    /// made against a previously loaded poll can never carry over. On
    /// failure the previously loaded poll stays as it was.
    pub async fn load(&mut self, id: PollId) -> Result<(), Error> {
        if id >= self.count {
            return Err(ValidationError::UnknownPoll {
                id,
                count: self.count,
            }
            .into());
        }
        match fetch::summary(&self.gateway, id).await {
            Ok(summary) => {
                self.draft = DraftVote { poll_id: id, option: 0 };
                self.loaded = Some(summary);
                Ok(())
            }
            Err(err) => {
                warn!(id, ?err, "failed to load poll for voting");
                Err(err)
            }
        }
    }

    /// Choose the option to vote for.
    pub fn choose(&mut self, option: u32) -> Result<(), Error> {
        let summary = self.loaded.as_ref().ok_or(ValidationError::NoPollLoaded {
            id: self.draft.poll_id,
        })?;
        if (option as usize) >= summary.options.len() {
            return Err(ValidationError::OptionOutOfRange {
                option,
                len: summary.options.len(),
            }
            .into());
        }
        self.draft.option = option;
        Ok(())
    }

    /// Submit the drafted vote and wait for it to settle.
    ///
    /// Preconditions are checked before any network call: the poll must be
    /// known, its summary loaded, and the chosen option in range for that
    /// summary. On success no tally is updated locally.
    pub async fn submit(&mut self) -> Result<(), Error> {
        let DraftVote { poll_id, option } = self.draft;
        if poll_id >= self.count {
            return Err(ValidationError::UnknownPoll {
                id: poll_id,
                count: self.count,
            }
            .into());
        }
        let summary = self
            .loaded
            .as_ref()
            .filter(|summary| summary.id == poll_id)
            .ok_or(ValidationError::NoPollLoaded { id: poll_id })?;
        if (option as usize) >= summary.options.len() {
            return Err(ValidationError::OptionOutOfRange {
                option,
                len: summary.options.len(),
            }
            .into());
        }

        let pending = match self.gateway.cast_vote(poll_id, option).await {
            Ok(pending) => pending,
            Err(err) => {
                error!(?err, "vote submission rejected");
                return Err(Error::submission(err));
            }
        };
        if let Err(err) = pending.confirmed().await {
            error!(?err, "vote confirmation failed");
            return Err(Error::confirmation(err));
        }

        info!(poll_id, option, "vote cast");
        Ok(())
    }
}
