//! Synchronize poll state and submit transactions against an on-ledger
//! voting platform.
//!
//! # Overview
//!
//! The authoritative state of every poll lives in a remote ledger contract,
//! reached through a wallet-bound [Gateway]. This crate is the client side
//! of that arrangement: it acquires an authenticated [Session] exactly once
//! at startup, captures the poll count in a [Directory], and then drives
//! three independent panels over shared gateway clones:
//!
//! - The [reader](crate::reader) engine keeps the results view for the
//!   currently selected poll fresh, refetching on every selection change
//!   and discarding completions that arrive for a superseded selection.
//! - [Creator] owns the new-poll draft and its two-phase (submit, then
//!   await confirmation) write path.
//! - [Caster] owns the vote draft, validated against the summary of the
//!   exact poll it targets.
//!
//! The wallet, the ledger, and all presentation are consumed through
//! traits; nothing in this crate opens a socket or signs a transaction
//! itself. Every failure degrades a single panel to its prior or empty
//! state — a read failure keeps the last-good view, a write failure keeps
//! the draft, and only a connection failure is terminal (until the user
//! initiates a fresh connect).
//!
//! # Concurrency
//!
//! All long-lived work runs on a [commonware_runtime] context, so the same
//! code executes on the `tokio` runtime in production and on the
//! `deterministic` runtime in tests. The panels hold independent state
//! slices: editing one draft while another submission awaits confirmation
//! is safe, and nothing blocks user input elsewhere in the client.

pub mod caster;
pub mod creator;
pub mod directory;
pub mod error;
pub mod ledger;
pub mod reader;
pub mod session;
pub mod types;

#[cfg(test)]
pub mod mocks;

pub use caster::Caster;
pub use creator::Creator;
pub use directory::Directory;
pub use error::{Error, ValidationError};
pub use ledger::{EventDetails, Gateway, PendingTx};
pub use session::{Session, Wallet};
pub use types::{DraftPoll, DraftVote, PollId, PollSummary, PollView, TallySet};

use commonware_runtime::{Metrics, Spawner};
use tracing::info;

/// Configuration for [Client::init].
#[derive(Debug, Clone)]
pub struct Config {
    /// Forwarded to the results engine.
    pub mailbox_size: usize,
}

/// A fully wired client: one session, one poll count, and the three panels
/// sharing gateway clones.
#[derive(Debug)]
pub struct Client<G: Gateway> {
    session: Session<G>,
    directory: Directory,

    /// Poll creation panel.
    pub creator: Creator<G>,

    /// Vote casting panel.
    pub caster: Caster<G>,

    /// Results view.
    pub polls: reader::Mailbox,
}

impl<G: Gateway> Client<G> {
    /// Connect the wallet (one authorization prompt), read the poll count,
    /// and start the results engine.
    ///
    /// A connection failure is terminal: nothing is read from or written to
    /// the gateway and no component is constructed. Everything after the
    /// connect degrades per panel instead of failing initialization.
    pub async fn init<E, W>(context: E, wallet: &W, config: Config) -> Result<Self, Error>
    where
        E: Spawner + Metrics,
        W: Wallet<Gateway = G>,
    {
        let session = Session::connect(wallet).await?;
        let gateway = session.gateway().clone();

        let directory = Directory::load(&gateway).await;
        info!(
            address = %session.address(),
            polls = directory.count(),
            "client ready"
        );

        let creator = Creator::new(gateway.clone());
        let caster = Caster::new(gateway.clone(), directory);
        let (engine, polls) = reader::Engine::new(
            context.with_label("reader"),
            gateway,
            reader::Config {
                mailbox_size: config.mailbox_size,
            },
        );
        engine.start();

        Ok(Self {
            session,
            directory,
            creator,
            caster,
            polls,
        })
    }

    /// Address of the connected identity.
    pub fn address(&self) -> &str {
        self.session.address()
    }

    /// The poll count captured at startup.
    pub fn directory(&self) -> Directory {
        self.directory
    }
}
