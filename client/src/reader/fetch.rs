//! Raw read operations against the gateway.

use crate::{
    error::{Error, TimestampOutOfRange},
    ledger::Gateway,
    types::{PollId, PollSummary, TallySet},
};
use chrono::{DateTime, Utc};
use futures::future::try_join_all;

/// Fetch and normalize the metadata of one poll.
pub async fn summary<G: Gateway>(gateway: &G, id: PollId) -> Result<PollSummary, Error> {
    let details = gateway.event_details(id).await.map_err(Error::read)?;
    Ok(PollSummary {
        id,
        title: details.title,
        options: details.options,
        start_time: timestamp(details.start_time)?,
        end_time: timestamp(details.end_time)?,
    })
}

/// Fetch the complete tally for one poll.
///
/// One read per option, issued concurrently. The set is produced only once
/// every read has settled successfully, in option order; any single failure
/// fails the whole set, so a partial tally is never observable.
pub async fn tallies<G: Gateway>(
    gateway: &G,
    id: PollId,
    options: usize,
) -> Result<TallySet, Error> {
    let reads = (0..options as u32).map(|option| gateway.vote_count(id, option));
    try_join_all(reads).await.map_err(Error::read)
}

fn timestamp(seconds: i64) -> Result<DateTime<Utc>, Error> {
    DateTime::from_timestamp(seconds, 0).ok_or_else(|| Error::read(TimestampOutOfRange(seconds)))
}
