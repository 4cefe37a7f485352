//! Error types for the client.

use thiserror::Error;

/// External cause carried by an error variant.
pub type Source = Box<dyn std::error::Error + Send + Sync>;

/// Failures produced by the client.
///
/// Each variant corresponds to one phase of the client's interaction with
/// the wallet and the ledger. None of them crash the client: every failure
/// degrades a single view to its prior or empty state.
#[derive(Debug, Error)]
pub enum Error {
    /// The identity provider was unavailable or the user rejected the
    /// connection request. Terminal for the session: no gateway operation
    /// may be attempted until a fresh user-initiated connect.
    #[error("wallet connection failed: {0}")]
    Connection(#[source] Source),

    /// A gateway read failed. Local and non-fatal: the affected view keeps
    /// its last-good state.
    #[error("ledger read failed: {0}")]
    Read(#[source] Source),

    /// A client-side precondition was violated. No network call was made.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// The write call was rejected before a pending transaction handle was
    /// obtained. The draft that produced it is left untouched.
    #[error("transaction submission failed: {0}")]
    Submission(#[source] Source),

    /// A pending transaction handle was obtained but confirmation failed or
    /// the transaction reverted. The draft that produced it is left
    /// untouched.
    #[error("transaction confirmation failed: {0}")]
    Confirmation(#[source] Source),
}

impl Error {
    pub(crate) fn connection<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Connection(Box::new(err))
    }

    pub(crate) fn read<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Read(Box::new(err))
    }

    pub(crate) fn submission<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Submission(Box::new(err))
    }

    pub(crate) fn confirmation<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Confirmation(Box::new(err))
    }
}

/// Client-side precondition violations, surfaced before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The draft title is empty.
    #[error("title must not be empty")]
    EmptyTitle,

    /// A draft option is empty.
    #[error("option {index} must not be empty")]
    EmptyOption { index: usize },

    /// The draft holds fewer than two options.
    #[error("a poll needs at least two options (got {count})")]
    TooFewOptions { count: usize },

    /// A schedule field is missing or not a valid timestamp.
    #[error("{field} time {value:?} is not a valid timestamp")]
    UnparseableTime { field: &'static str, value: String },

    /// The referenced poll id is outside the known range.
    #[error("poll {id} does not exist (count is {count})")]
    UnknownPoll { id: u64, count: u64 },

    /// A vote was drafted before any poll was loaded.
    #[error("no poll loaded for id {id}")]
    NoPollLoaded { id: u64 },

    /// The chosen option does not index into the loaded poll's options.
    #[error("option {option} is out of range for a poll with {len} options")]
    OptionOutOfRange { option: u32, len: usize },
}

/// The ledger reported a schedule outside the representable time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("timestamp {0} is outside the representable range")]
pub struct TimestampOutOfRange(pub i64);
