//! The replication engine: handshake, then one task per direction.
//!
//! The read task applies every inbound move through
//! [`SeatPlayer::apply_remote`] and publishes a board event. The write task
//! drains the player's outbound queue. Neither has a timeout; the session
//! lasts until the stream closes, the peer sends an unknown opcode, or a
//! decode fails.

use std::io::ErrorKind;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::codec::{read_message, write_move};
use super::handshake::perform_handshake;
use crate::core::action::Move;
use crate::core::error::ProtocolError;
use crate::player::{BoardEvent, SeatPlayer};

/// A running session with the peer.
#[derive(Debug)]
pub struct ProtocolEngine {
    partner: String,
    read_task: JoinHandle<()>,
    write_task: JoinHandle<()>,
}

impl ProtocolEngine {
    /// Handshake over `reader`/`writer`, then spawn the session tasks.
    ///
    /// `SessionEstablished` is published only after the outbound queue is
    /// attached, so a subscriber may play as soon as it sees the event.
    /// A failed handshake is published as a fatal protocol error and
    /// returned; no tasks are left running.
    pub async fn start<R, W>(
        player: Arc<SeatPlayer>,
        mut reader: R,
        mut writer: W,
    ) -> Result<Self, ProtocolError>
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let partner = match perform_handshake(&player, &mut reader, &mut writer).await {
            Ok(partner) => partner,
            Err(err) => {
                error!(seat = %player.seat(), %err, "handshake failed");
                player.notify(BoardEvent::FatalProtocolError(err.to_string()));
                return Err(err);
            }
        };

        let (tx, rx) = unbounded_channel();
        player.attach_outbound(tx);

        let config = player.config();
        info!(
            seat = %player.seat(),
            %partner,
            hand_size = config.hand_size,
            chain_penalty = config.chain_penalty,
            recycle = ?config.recycle,
            draw_pile = player.draw_pile_size(),
            "session established"
        );
        if !config.is_standard() {
            warn!(
                seat = %player.seat(),
                "non-standard rules are not negotiated; the peer must run the same settings"
            );
        }
        player.session_established(&partner);

        let write_task = tokio::spawn(write_loop(Arc::clone(&player), writer, rx));
        let read_task = tokio::spawn(read_loop(player, reader));

        Ok(Self {
            partner,
            read_task,
            write_task,
        })
    }

    /// The peer's display name.
    #[must_use]
    pub fn partner(&self) -> &str {
        &self.partner
    }

    /// Whether the read loop has stopped.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.read_task.is_finished()
    }

    /// Wait for the session to end.
    pub async fn join(self) {
        if let Err(err) = self.read_task.await {
            warn!(%err, "read task did not finish cleanly");
        }
        if let Err(err) = self.write_task.await {
            warn!(%err, "write task did not finish cleanly");
        }
    }

    /// Stop both tasks without waiting for the peer.
    pub fn abort(&self) {
        self.read_task.abort();
        self.write_task.abort();
    }
}

async fn read_loop<R>(player: Arc<SeatPlayer>, mut reader: R)
where
    R: AsyncRead + Unpin,
{
    let seat = player.seat();
    loop {
        match read_message(&mut reader).await {
            Ok(mv) => {
                debug!(%seat, ?mv, "received move");
                match player.apply_remote(mv) {
                    Some(outcome) => {
                        player.notify(BoardEvent::BoardChanged);
                        if outcome.won {
                            info!(%seat, "peer emptied its hand");
                            player.notify(BoardEvent::OpponentWon);
                        }
                    }
                    None => {
                        error!(%seat, ?mv, "peer move does not fit the local table");
                        player.notify(BoardEvent::FatalProtocolError(
                            "peer drew from a pile that is empty here".to_string(),
                        ));
                        break;
                    }
                }
            }
            Err(ProtocolError::UnknownOpcode(opcode)) => {
                info!(%seat, opcode, "peer ended the session");
                player.notify(BoardEvent::SessionEnded);
                break;
            }
            Err(ProtocolError::Io(err)) if err.kind() == ErrorKind::UnexpectedEof => {
                info!(%seat, "peer closed the stream");
                player.notify(BoardEvent::SessionEnded);
                break;
            }
            Err(err) => {
                error!(%seat, %err, "fatal protocol error");
                player.notify(BoardEvent::FatalProtocolError(err.to_string()));
                break;
            }
        }
    }

    // Dropping the sender lets the write task drain and exit.
    player.detach_outbound();
}

async fn write_loop<W>(player: Arc<SeatPlayer>, mut writer: W, mut rx: UnboundedReceiver<Move>)
where
    W: AsyncWrite + Unpin,
{
    while let Some(mv) = rx.recv().await {
        if let Err(err) = write_move(&mut writer, &mv).await {
            error!(seat = %player.seat(), %err, "failed to send move");
            player.notify(BoardEvent::FatalProtocolError(err.to_string()));
            break;
        }
    }
    debug!(seat = %player.seat(), "write task finished");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameConfig;
    use crate::core::seat::Seat;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn test_unknown_opcode_ends_session() {
        let host = Arc::new(SeatPlayer::new("Alice", Seat::FIRST, GameConfig::new().with_seed(1)).unwrap());
        let mut events = host.subscribe();

        let (local, mut remote) = tokio::io::duplex(4096);
        let (rd, wr) = tokio::io::split(local);

        let peer = async move {
            remote.write_u16(3).await.unwrap();
            remote.write_all(b"Bob").await.unwrap();
            remote.write_u32(42).await.unwrap();
            remote
        };
        let (engine, _remote) = tokio::join!(ProtocolEngine::start(Arc::clone(&host), rd, wr), peer);
        let engine = engine.unwrap();
        assert_eq!(engine.partner(), "Bob");

        engine.join().await;

        assert_eq!(
            events.recv().await,
            Some(BoardEvent::SessionEstablished { partner: "Bob".to_string() })
        );
        assert_eq!(events.recv().await, Some(BoardEvent::SessionEnded));
    }
}
