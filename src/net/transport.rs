//! TCP connection setup.
//!
//! The hosting peer listens and waits a bounded time for the other to
//! connect; it then plays seat 0. The joining peer retries its connection
//! until the host is up and plays seat 1.

use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

use crate::core::config::NetConfig;
use crate::core::error::TransportError;
use crate::core::seat::Seat;

/// Which side of the connection this peer takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Listen and accept; plays seat 0.
    Host,
    /// Connect with retry; plays seat 1.
    Join,
}

impl Role {
    /// Seat played by this role.
    #[must_use]
    pub fn seat(self) -> Seat {
        match self {
            Role::Host => Seat::FIRST,
            Role::Join => Seat::SECOND,
        }
    }
}

/// Open the channel to the peer for `role`.
pub async fn open_channel(
    role: Role,
    config: &NetConfig,
) -> Result<(OwnedReadHalf, OwnedWriteHalf), TransportError> {
    let stream = match role {
        Role::Host => {
            let listener = bind_host(config).await?;
            accept_peer(&listener, config).await?
        }
        Role::Join => connect_peer(config).await?,
    };
    stream.set_nodelay(true)?;
    Ok(stream.into_split())
}

/// Listen on all interfaces at the configured port.
pub async fn bind_host(config: &NetConfig) -> Result<TcpListener, TransportError> {
    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!(addr = %listener.local_addr()?, "waiting for peer");
    Ok(listener)
}

/// Accept one peer, giving up after `accept_timeout`.
pub async fn accept_peer(listener: &TcpListener, config: &NetConfig) -> Result<TcpStream, TransportError> {
    match tokio::time::timeout(config.accept_timeout, listener.accept()).await {
        Ok(accepted) => {
            let (stream, addr) = accepted?;
            info!(%addr, "peer connected");
            Ok(stream)
        }
        Err(_) => {
            warn!(timeout = ?config.accept_timeout, "no peer connected");
            Err(TransportError::AcceptTimeout(config.accept_timeout))
        }
    }
}

/// Connect to the host, pausing `connect_retry` between failed attempts.
pub async fn connect_peer(config: &NetConfig) -> Result<TcpStream, TransportError> {
    let addr = config.peer_addr();
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        match TcpStream::connect(&addr).await {
            Ok(stream) => {
                info!(%addr, attempts, "connected to host");
                return Ok(stream);
            }
            Err(err) => {
                debug!(%addr, attempts, %err, "connection attempt failed");
                if config.connect_attempts.is_some_and(|max| attempts >= max) {
                    return Err(TransportError::ConnectExhausted { addr, attempts });
                }
                tokio::time::sleep(config.connect_retry).await;
            }
        }
    }
}
