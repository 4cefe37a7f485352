//! Mock implementations for testing.

use crate::{
    ledger::{EventDetails, Gateway, PendingTx},
    session::Wallet,
    types::PollId,
};
use commonware_runtime::Clock;
use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
    time::Duration,
};
use thiserror::Error;

/// Failure injected by a mock.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct MockError(pub &'static str);

/// A poll held by the [MockLedger].
#[derive(Debug, Clone)]
pub struct MockPoll {
    pub title: String,
    pub options: Vec<String>,
    pub start_time: i64,
    pub end_time: i64,
    pub tallies: Vec<u64>,
}

impl MockPoll {
    /// Create a poll with a fixed one-day schedule.
    pub fn new(title: &str, options: &[&str], tallies: &[u64]) -> Self {
        Self {
            title: title.into(),
            options: options.iter().map(|option| option.to_string()).collect(),
            start_time: 1_700_000_000,
            end_time: 1_700_086_400,
            tallies: tallies.to_vec(),
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    polls: Vec<MockPoll>,

    /// Artificial latency applied to detail reads, per poll id.
    detail_latency: HashMap<PollId, Duration>,

    // Injected failures
    fail_count: bool,
    fail_details: bool,
    fail_tallies: HashSet<(PollId, u32)>,
    fail_submit: bool,
    fail_confirm: bool,

    // Call counters, incremented on every invocation regardless of outcome
    reads: usize,
    writes: usize,
}

/// In-memory ledger with scripted contents and failures.
///
/// Detail reads can be delayed per poll id (against the runtime clock) to
/// exercise out-of-order completion. Writes apply immediately unless a
/// failure is injected; a failed confirmation leaves the ledger unchanged,
/// as a reverted transaction would.
#[derive(Clone)]
pub struct MockLedger<E: Clock> {
    context: E,
    inner: Arc<Mutex<Inner>>,
}

impl<E: Clock> std::fmt::Debug for MockLedger<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockLedger").finish_non_exhaustive()
    }
}

impl<E: Clock> MockLedger<E> {
    pub fn new(context: E) -> Self {
        Self {
            context,
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    /// Add a poll to the scripted contents.
    pub fn publish(&self, poll: MockPoll) {
        self.lock().polls.push(poll);
    }

    /// Overwrite one tally entry.
    pub fn set_tally(&self, id: PollId, option: u32, count: u64) {
        self.lock().polls[id as usize].tallies[option as usize] = count;
    }

    /// Delay detail reads for `id` by `latency`.
    pub fn set_detail_latency(&self, id: PollId, latency: Duration) {
        self.lock().detail_latency.insert(id, latency);
    }

    pub fn fail_count(&self, fail: bool) {
        self.lock().fail_count = fail;
    }

    pub fn fail_details(&self, fail: bool) {
        self.lock().fail_details = fail;
    }

    /// Make the tally read for one (poll, option) pair fail.
    pub fn fail_tally(&self, id: PollId, option: u32) {
        self.lock().fail_tallies.insert((id, option));
    }

    pub fn fail_submit(&self, fail: bool) {
        self.lock().fail_submit = fail;
    }

    pub fn fail_confirm(&self, fail: bool) {
        self.lock().fail_confirm = fail;
    }

    /// Number of read calls observed.
    pub fn reads(&self) -> usize {
        self.lock().reads
    }

    /// Number of write calls observed.
    pub fn writes(&self) -> usize {
        self.lock().writes
    }

    /// Current tally entry.
    pub fn tally(&self, id: PollId, option: u32) -> u64 {
        self.lock().polls[id as usize].tallies[option as usize]
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }
}

impl<E: Clock> Gateway for MockLedger<E> {
    type Error = MockError;
    type Pending = MockPending;

    async fn event_count(&self) -> Result<u64, MockError> {
        let mut inner = self.lock();
        inner.reads += 1;
        if inner.fail_count {
            return Err(MockError("count unavailable"));
        }
        Ok(inner.polls.len() as u64)
    }

    async fn event_details(&self, id: PollId) -> Result<EventDetails, MockError> {
        // Capture everything before sleeping; the guard must not be held
        // across an await.
        let (latency, result) = {
            let mut inner = self.lock();
            inner.reads += 1;
            let latency = inner.detail_latency.get(&id).copied();
            let result = if inner.fail_details {
                Err(MockError("details unavailable"))
            } else {
                inner
                    .polls
                    .get(id as usize)
                    .map(|poll| EventDetails {
                        title: poll.title.clone(),
                        options: poll.options.clone(),
                        start_time: poll.start_time,
                        end_time: poll.end_time,
                    })
                    .ok_or(MockError("no such poll"))
            };
            (latency, result)
        };
        if let Some(latency) = latency {
            self.context.sleep(latency).await;
        }
        result
    }

    async fn vote_count(&self, id: PollId, option: u32) -> Result<u64, MockError> {
        let mut inner = self.lock();
        inner.reads += 1;
        if inner.fail_tallies.contains(&(id, option)) {
            return Err(MockError("tally unavailable"));
        }
        inner
            .polls
            .get(id as usize)
            .and_then(|poll| poll.tallies.get(option as usize).copied())
            .ok_or(MockError("no such option"))
    }

    async fn create_event(
        &self,
        title: String,
        options: Vec<String>,
        start_time: i64,
        end_time: i64,
    ) -> Result<MockPending, MockError> {
        let mut inner = self.lock();
        inner.writes += 1;
        if inner.fail_submit {
            return Err(MockError("submission rejected"));
        }
        if inner.fail_confirm {
            return Ok(MockPending { ok: false });
        }
        let tallies = vec![0; options.len()];
        inner.polls.push(MockPoll {
            title,
            options,
            start_time,
            end_time,
            tallies,
        });
        Ok(MockPending { ok: true })
    }

    async fn cast_vote(&self, id: PollId, option: u32) -> Result<MockPending, MockError> {
        let mut inner = self.lock();
        inner.writes += 1;
        if inner.fail_submit {
            return Err(MockError("submission rejected"));
        }
        if inner.fail_confirm {
            return Ok(MockPending { ok: false });
        }
        let tally = inner
            .polls
            .get_mut(id as usize)
            .and_then(|poll| poll.tallies.get_mut(option as usize))
            .ok_or(MockError("no such option"))?;
        *tally += 1;
        Ok(MockPending { ok: true })
    }
}

/// Pending handle returned by the [MockLedger].
pub struct MockPending {
    ok: bool,
}

impl PendingTx for MockPending {
    type Error = MockError;

    async fn confirmed(self) -> Result<(), MockError> {
        if self.ok {
            Ok(())
        } else {
            Err(MockError("transaction reverted"))
        }
    }
}

/// Identity provider handing out a scripted address and gateway.
pub struct MockWallet<G: Gateway> {
    gateway: G,
    address: String,
    authorize: bool,
}

impl<G: Gateway> MockWallet<G> {
    pub fn new(gateway: G, address: &str) -> Self {
        Self {
            gateway,
            address: address.into(),
            authorize: true,
        }
    }

    /// A wallet whose user rejects the authorization prompt.
    pub fn rejecting(gateway: G, address: &str) -> Self {
        Self {
            authorize: false,
            ..Self::new(gateway, address)
        }
    }
}

impl<G: Gateway> Wallet for MockWallet<G> {
    type Gateway = G;
    type Error = MockError;

    async fn request_authorization(&self) -> Result<(), MockError> {
        if self.authorize {
            Ok(())
        } else {
            Err(MockError("user rejected the connection request"))
        }
    }

    async fn connected_address(&self) -> Result<String, MockError> {
        Ok(self.address.clone())
    }

    async fn bind(&self) -> Result<G, MockError> {
        Ok(self.gateway.clone())
    }
}
