//! Interfaces to the remote ledger service.
//!
//! The ledger is consumed, never implemented, here: the contract holding
//! poll state is reached through a [Gateway] capability obtained from the
//! wallet (see [crate::session]). Reads return plain values; writes return a
//! [PendingTx] that must be awaited before the operation counts as settled.

use crate::types::PollId;
use std::future::Future;

/// Raw poll metadata as returned by the ledger, schedule in seconds since
/// the epoch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetails {
    pub title: String,
    pub options: Vec<String>,
    pub start_time: i64,
    pub end_time: i64,
}

/// A submitted write operation the ledger has not yet finalized.
pub trait PendingTx: Send + 'static {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Resolve once the ledger reports the transaction final, or fail if it
    /// was dropped or reverted.
    ///
    /// No client-side timeout is applied; liveness belongs to the ledger.
    fn confirmed(self) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// Capability bound to an authenticated identity that reads poll state and
/// submits signed transactions.
///
/// Clones are shallow: every clone observes the same connection and signer.
/// The client shares one gateway across all components and never replaces it
/// after initialization.
pub trait Gateway: Clone + Send + Sync + 'static {
    type Error: std::error::Error + Send + Sync + 'static;
    type Pending: PendingTx<Error = Self::Error>;

    /// Number of polls ever created. Monotonically non-decreasing.
    fn event_count(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send;

    /// Metadata of the poll with the given id.
    fn event_details(
        &self,
        id: PollId,
    ) -> impl Future<Output = Result<EventDetails, Self::Error>> + Send;

    /// Votes recorded for one option of one poll.
    fn vote_count(
        &self,
        id: PollId,
        option: u32,
    ) -> impl Future<Output = Result<u64, Self::Error>> + Send;

    /// Submit a new poll.
    fn create_event(
        &self,
        title: String,
        options: Vec<String>,
        start_time: i64,
        end_time: i64,
    ) -> impl Future<Output = Result<Self::Pending, Self::Error>> + Send;

    /// Submit a vote for one option of one poll.
    fn cast_vote(
        &self,
        id: PollId,
        option: u32,
    ) -> impl Future<Output = Result<Self::Pending, Self::Error>> + Send;
}
