//! Fetch and publish poll state.
//!
//! # Overview
//!
//! The module has two layers. The [fetch] functions are the raw read
//! operations: one `event_details` read normalized into a
//! [PollSummary](crate::types::PollSummary), and one concurrent batch of
//! `vote_count` reads joined all-or-nothing into a
//! [TallySet](crate::types::TallySet). The [Engine] builds the results view
//! on top of them: it owns the currently selected poll id, refetches
//! whenever the selection changes, and publishes a
//! [PollView](crate::types::PollView) only when both stages succeed.
//!
//! The [Mailbox] is used to make requests to the [Engine]: `select` to move
//! the selection (issued whenever the caller's selected id changes,
//! including the initial default of id 0), `view` to read the currently
//! published state, and `subscribe` to be told about the next successful
//! publish.
//!
//! # Stale completions
//!
//! Fetches are not canceled when the selection moves on. Every fetch
//! carries the id it was issued for; a completion whose id no longer
//! matches the current selection is dropped, so the published view always
//! reflects the last requested id regardless of completion order. A fetch
//! failure leaves the previously published view in place — in particular, a
//! single failed tally read never yields a partially updated tally.

mod config;
pub use config::Config;
mod engine;
pub use engine::Engine;
pub mod fetch;
mod ingress;
pub use ingress::Mailbox;
pub(crate) use ingress::Message;
mod metrics;
