//! Board events and subscriber fan-out.
//!
//! Each subscriber gets its own unbounded channel. Publishing only enqueues;
//! the read loop never waits on a subscriber.

use parking_lot::Mutex;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Something upper layers (renderers, command loops) may want to redraw for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoardEvent {
    /// The handshake finished; `partner` is the peer's display name.
    SessionEstablished { partner: String },

    /// A move from the peer was applied.
    BoardChanged,

    /// The peer played its last card.
    OpponentWon,

    /// The peer closed the stream or sent an unknown opcode.
    SessionEnded,

    /// The stream broke or carried garbage; the session is over.
    FatalProtocolError(String),
}

/// Fan-out of board events to any number of subscribers.
#[derive(Debug, Default)]
pub struct EventHub {
    subscribers: Mutex<Vec<UnboundedSender<BoardEvent>>>,
}

impl EventHub {
    /// Create a hub with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber.
    pub fn subscribe(&self) -> UnboundedReceiver<BoardEvent> {
        let (tx, rx) = unbounded_channel();
        self.subscribers.lock().push(tx);
        rx
    }

    /// Deliver `event` to every live subscriber, dropping closed ones.
    pub fn publish(&self, event: BoardEvent) {
        self.subscribers
            .lock()
            .retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Number of live subscribers as of the last publish.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}
