use crate::types::{PollId, PollView};
use futures::{
    channel::{mpsc, oneshot},
    SinkExt,
};

/// Message types that can be sent to the [Mailbox].
pub enum Message {
    /// Change the selected poll and start a fetch for it.
    Select { id: PollId },

    /// Read the currently published view.
    View {
        responder: oneshot::Sender<Option<PollView>>,
    },

    /// Be notified of the next successful publish.
    ///
    /// The request can be canceled by dropping the responder.
    Subscribe { responder: oneshot::Sender<PollView> },
}

/// Ingress mailbox for the [`Engine`](super::Engine).
#[derive(Debug, Clone)]
pub struct Mailbox {
    sender: mpsc::Sender<Message>,
}

impl Mailbox {
    pub(super) fn new(sender: mpsc::Sender<Message>) -> Self {
        Self { sender }
    }

    /// Select the poll to display, triggering a fetch.
    ///
    /// Selecting the id that is already displayed refetches it; this is the
    /// only mechanism by which a settled vote becomes visible.
    pub async fn select(&mut self, id: PollId) {
        self.sender
            .send(Message::Select { id })
            .await
            .expect("mailbox closed");
    }

    /// The currently published view, if any fetch has succeeded yet.
    pub async fn view(&mut self) -> Option<PollView> {
        let (responder, receiver) = oneshot::channel();
        self.sender
            .send(Message::View { responder })
            .await
            .expect("mailbox closed");
        receiver.await.expect("mailbox closed")
    }

    /// Resolves with the view published by the next successful fetch.
    pub async fn subscribe(&mut self) -> oneshot::Receiver<PollView> {
        let (responder, receiver) = oneshot::channel();
        self.sender
            .send(Message::Subscribe { responder })
            .await
            .expect("mailbox closed");
        receiver
    }
}
