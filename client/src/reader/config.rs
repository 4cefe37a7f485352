/// Configuration for the [`Engine`](super::Engine).
#[derive(Debug, Clone)]
pub struct Config {
    /// The maximum size of the mailbox backlog.
    pub mailbox_size: usize,
}
