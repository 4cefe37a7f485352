//! Core types shared across the client.

use crate::error::ValidationError;
use chrono::{DateTime, NaiveDateTime, Utc};

/// Identifier of a poll on the ledger.
///
/// Ids are dense: a ledger holding `count` polls answers for every id in
/// `0..count`.
pub type PollId = u64;

/// Per-option vote counts for one poll, indexed by option.
///
/// Always recomputed as a whole; an entry exists for every option of the
/// poll it was fetched for.
pub type TallySet = Vec<u64>;

/// Immutable metadata of a poll, normalized from the ledger's raw tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSummary {
    pub id: PollId,
    pub title: String,
    /// At least two options, in ballot order.
    pub options: Vec<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// A poll summary together with a complete tally.
///
/// Published as a unit: a view never pairs a summary with tallies from a
/// different fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollView {
    pub summary: PollSummary,
    pub tallies: TallySet,
}

/// User-entered state for a poll that has not been submitted yet.
///
/// Exists only while the user is editing; it is reset to [Default] once a
/// submission confirms and discarded on abandonment. The schedule fields
/// hold the raw `YYYY-MM-DDTHH:MM` strings the user typed, parsed only at
/// submission time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftPoll {
    pub title: String,
    /// Grows append-only via [DraftPoll::add_option]; entries are edited in
    /// place.
    pub options: Vec<String>,
    pub start: String,
    pub end: String,
}

impl Default for DraftPoll {
    /// An empty title, two empty options, and an empty schedule.
    fn default() -> Self {
        Self {
            title: String::new(),
            options: vec![String::new(), String::new()],
            start: String::new(),
            end: String::new(),
        }
    }
}

impl DraftPoll {
    /// Append an empty option slot to the ballot.
    pub fn add_option(&mut self) {
        self.options.push(String::new());
    }

    /// Replace the option at `index`.
    ///
    /// Panics if `index` is out of range; slots only exist for options the
    /// draft already holds.
    pub fn set_option(&mut self, index: usize, value: impl Into<String>) {
        self.options[index] = value.into();
    }

    /// Parse the schedule fields into seconds since the epoch.
    ///
    /// Both fields must be present and well-formed; strings are interpreted
    /// as UTC wall-clock times. Whether the end follows the start is not
    /// checked here — the ledger contract is the authority on schedule
    /// ordering.
    pub fn schedule_seconds(&self) -> Result<(i64, i64), ValidationError> {
        let start = parse_schedule("start", &self.start)?;
        let end = parse_schedule("end", &self.end)?;
        Ok((start, end))
    }
}

/// Parse one user-entered schedule field.
///
/// Accepts `YYYY-MM-DDTHH:MM`, optionally with seconds.
fn parse_schedule(field: &'static str, value: &str) -> Result<i64, ValidationError> {
    const MINUTES: &str = "%Y-%m-%dT%H:%M";
    const SECONDS: &str = "%Y-%m-%dT%H:%M:%S";
    NaiveDateTime::parse_from_str(value, MINUTES)
        .or_else(|_| NaiveDateTime::parse_from_str(value, SECONDS))
        .map(|time| time.and_utc().timestamp())
        .map_err(|_| ValidationError::UnparseableTime {
            field,
            value: value.to_string(),
        })
}

/// User-entered state for a vote that has not been submitted yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DraftVote {
    /// The poll being voted in.
    pub poll_id: PollId,
    /// Index of the chosen option.
    pub option: u32,
}
