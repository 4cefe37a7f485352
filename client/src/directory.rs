//! Poll count discovery.

use crate::{ledger::Gateway, types::PollId};
use tracing::{debug, warn};

/// The number of polls known to exist, read from the ledger once when the
/// gateway becomes available.
///
/// The count only ever grows on the ledger, and it is not refreshed here: a
/// poll created after the read (by this client or any other) stays invisible
/// until the next session. Dependents treat ids in `0..count` as selectable
/// and degrade to "no polls" when the read failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Directory {
    count: u64,
}

impl Directory {
    /// Read the poll count.
    ///
    /// On failure the count stays at zero and the error is logged; the
    /// failure is reportable but never fatal.
    pub async fn load<G: Gateway>(gateway: &G) -> Self {
        match gateway.event_count().await {
            Ok(count) => {
                debug!(count, "read poll count");
                Self { count }
            }
            Err(err) => {
                warn!(?err, "failed to read poll count");
                Self::default()
            }
        }
    }

    /// Number of polls; ids run `0..count`.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Whether `id` references a known poll.
    pub fn contains(&self, id: PollId) -> bool {
        id < self.count
    }

    /// Upper bound for poll-selection inputs (`count - 1`), or `None` when
    /// no polls are known.
    pub fn last(&self) -> Option<PollId> {
        self.count.checked_sub(1)
    }
}
