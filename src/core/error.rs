//! Error types.
//!
//! - `TableError`: pile failures, internal to the turn state machine
//! - `GameError`: rejected local moves, reported to the acting seat
//! - `ProtocolError`: wire failures, fatal to the session
//! - `TransportError`: connection setup failures

use thiserror::Error;

/// Pile failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TableError {
    /// The draw pile is empty and the discard pile has nothing to recycle.
    #[error("draw pile is empty and the discard pile cannot refill it")]
    EmptyDeck,

    /// The discard pile is empty; only possible before the initial deal.
    #[error("discard pile is empty")]
    NoDiscard,
}

/// A local move was rejected.
///
/// Apart from `ForcedTurnEnd`, none of these mutate state or send anything
/// to the peer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("it is not this seat's turn")]
    NotMyTurn,

    #[error("card is not in the hand")]
    CardNotHeld,

    #[error("card cannot be played on the current top card")]
    IllegalPlay,

    /// A jack was played without naming a color.
    #[error("a jack needs a wished color")]
    WishRequired,

    /// No card can be drawn even after recycling the discard pile.
    ///
    /// `can_still_play` tells the seat whether a card in hand still fits
    /// the top card; otherwise the seat is stuck until the peer moves.
    #[error("no card left to draw (can still play: {can_still_play})")]
    ForcedTurnEnd { can_still_play: bool },

    #[error("no game is in progress")]
    NotInGame,

    #[error(transparent)]
    Table(#[from] TableError),
}

/// Wire and session failures. All of these end the session.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown color code {0}")]
    UnknownColor(u32),

    #[error("unknown rank code {0}")]
    UnknownRank(u32),

    /// Not a play or draw. The peer uses this to end the session.
    #[error("unknown opcode {0}")]
    UnknownOpcode(u32),

    #[error("name is {0} bytes, longer than the 65535 the wire allows")]
    NameTooLong(usize),

    #[error("name is not valid UTF-8")]
    InvalidName(#[from] std::string::FromUtf8Error),

    #[error("handshake failed: {0}")]
    Handshake(String),

    #[error("local state rejected a handshake update: {0}")]
    State(#[from] GameError),
}

/// Connection setup failures.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("no peer connected within {0:?}")]
    AcceptTimeout(std::time::Duration),

    #[error("gave up connecting to {addr} after {attempts} attempts")]
    ConnectExhausted { addr: String, attempts: u32 },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
