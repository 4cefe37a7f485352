//! Wallet-mediated identity acquisition.

use crate::{error::Error, ledger::Gateway};
use std::future::Future;
use tracing::info;

/// Identity provider that can authorize the user and yield a gateway bound
/// to their signer.
pub trait Wallet: Send + Sync + 'static {
    type Gateway: Gateway;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Prompt the user to authorize this client.
    fn request_authorization(&self) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Address of the authorized identity.
    fn connected_address(&self) -> impl Future<Output = Result<String, Self::Error>> + Send;

    /// A gateway whose signer matches [Wallet::connected_address].
    fn bind(&self) -> impl Future<Output = Result<Self::Gateway, Self::Error>> + Send;
}

/// An authenticated connection to the ledger.
///
/// Exactly one session exists per running client; it is created once at
/// startup and lives until the process exits (there is no disconnect flow).
/// When [Session::connect] fails the client stays disconnected and must not
/// touch the gateway; retrying requires a fresh user-initiated connect,
/// which shows a new authorization prompt.
#[derive(Debug, Clone)]
pub struct Session<G: Gateway> {
    address: String,
    gateway: G,
}

impl<G: Gateway> Session<G> {
    /// Attempt the wallet handshake exactly once.
    ///
    /// Under normal operation this shows a single authorization prompt. Any
    /// failure (provider absent, user rejection, network error) maps to
    /// [Error::Connection] and is never retried automatically.
    pub async fn connect<W>(wallet: &W) -> Result<Self, Error>
    where
        W: Wallet<Gateway = G>,
    {
        wallet
            .request_authorization()
            .await
            .map_err(Error::connection)?;
        let address = wallet.connected_address().await.map_err(Error::connection)?;
        let gateway = wallet.bind().await.map_err(Error::connection)?;
        info!(address = %address, "wallet connected");
        Ok(Self { address, gateway })
    }

    /// Address of the connected identity.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The shared gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }
}
