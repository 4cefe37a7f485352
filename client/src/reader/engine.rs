use super::{fetch, metrics::Metrics, Config, Mailbox, Message};
use crate::{
    error::Error,
    ledger::Gateway,
    types::{PollId, PollView},
};
use commonware_macros::select;
use commonware_runtime::{
    telemetry::metrics::status::{CounterExt, Status},
    Handle, Metrics as RuntimeMetrics, Spawner,
};
use futures::{
    channel::{mpsc, oneshot},
    SinkExt, StreamExt,
};
use tracing::{debug, warn};

/// A fetch that ran to completion, tagged with the id it was issued for.
struct Fetched {
    id: PollId,
    result: Result<PollView, Error>,
}

/// Instance of the results engine.
///
/// It is responsible for:
/// - Tracking the currently selected poll id
/// - Fetching summary and tallies whenever the selection changes
/// - Publishing complete views and discarding stale completions
pub struct Engine<E: Spawner + RuntimeMetrics, G: Gateway> {
    context: E,
    gateway: G,

    /// The mailbox for receiving messages.
    mailbox_receiver: mpsc::Receiver<Message>,

    /// Completions of spawned fetch tasks. The engine keeps one sender so
    /// the channel stays open for its whole lifetime.
    fetched_sender: mpsc::Sender<Fetched>,
    fetched_receiver: mpsc::Receiver<Fetched>,

    /// The id requested most recently. Completions for any other id are
    /// stale and dropped.
    selected: Option<PollId>,

    /// The last successfully fetched view.
    view: Option<PollView>,

    /// Pending notifications for the next successful publish.
    subscribers: Vec<oneshot::Sender<PollView>>,

    metrics: Metrics,
}

impl<E: Spawner + RuntimeMetrics, G: Gateway> Engine<E, G> {
    /// Creates a new engine with the given context and configuration.
    /// Returns the engine and a mailbox for sending messages to the engine.
    pub fn new(context: E, gateway: G, cfg: Config) -> (Self, Mailbox) {
        let (mailbox_sender, mailbox_receiver) = mpsc::channel(cfg.mailbox_size);
        let (fetched_sender, fetched_receiver) = mpsc::channel(cfg.mailbox_size);
        let metrics = Metrics::init(context.clone());

        let engine = Self {
            context,
            gateway,
            mailbox_receiver,
            fetched_sender,
            fetched_receiver,
            selected: None,
            view: None,
            subscribers: Vec::new(),
            metrics,
        };

        (engine, Mailbox::new(mailbox_sender))
    }

    /// Starts the engine.
    pub fn start(mut self) -> Handle<()> {
        self.context.spawn_ref()(self.run())
    }

    /// Inner run loop called by `start`.
    async fn run(mut self) {
        let mut shutdown = self.context.stopped();

        loop {
            // Sweep subscribers whose receivers were dropped
            self.subscribers.retain(|waiter| !waiter.is_canceled());

            select! {
                // Handle shutdown signal
                _ = &mut shutdown => {
                    debug!("shutdown");
                    break;
                },

                // Handle mailbox messages
                mail = self.mailbox_receiver.next() => {
                    let Some(message) = mail else {
                        debug!("mailbox closed");
                        break;
                    };
                    match message {
                        Message::Select { id } => self.handle_select(id),
                        Message::View { responder } => {
                            let _ = responder.send(self.view.clone());
                        }
                        Message::Subscribe { responder } => {
                            self.subscribers.push(responder);
                        }
                    }
                },

                // Handle fetch completions
                fetched = self.fetched_receiver.next() => {
                    // Cannot be `None` while we hold a sender.
                    let Some(fetched) = fetched else {
                        break;
                    };
                    self.handle_fetched(fetched);
                },
            }
        }
    }

    /// Handles a selection change by starting a fetch for the new id.
    ///
    /// A previous fetch still in flight is left to complete; its completion
    /// is dropped as stale because the selected id moved on.
    fn handle_select(&mut self, id: PollId) {
        self.selected = Some(id);
        self.metrics.selects.inc();
        debug!(id, "selected");

        let gateway = self.gateway.clone();
        let mut completions = self.fetched_sender.clone();
        self.context.with_label("fetch").spawn(move |_| async move {
            let result = Self::fetch(&gateway, id).await;
            // The engine may have shut down; nothing left to report to.
            let _ = completions.send(Fetched { id, result }).await;
        });
    }

    /// The two-stage fetch pipeline: summary first, then every tally.
    async fn fetch(gateway: &G, id: PollId) -> Result<PollView, Error> {
        let summary = fetch::summary(gateway, id).await?;
        let tallies = fetch::tallies(gateway, id, summary.options.len()).await?;
        Ok(PollView { summary, tallies })
    }

    /// Handles a completed fetch.
    fn handle_fetched(&mut self, Fetched { id, result }: Fetched) {
        if self.selected != Some(id) {
            debug!(id, "dropping stale fetch");
            self.metrics.fetch.inc(Status::Dropped);
            return;
        }

        match result {
            Ok(view) => {
                self.metrics.fetch.inc(Status::Success);
                for subscriber in self.subscribers.drain(..) {
                    let _ = subscriber.send(view.clone());
                }
                self.view = Some(view);
            }
            Err(err) => {
                // Whatever was displayed before stays displayed.
                warn!(id, ?err, "fetch failed");
                self.metrics.fetch.inc(Status::Failure);
            }
        }
    }
}
