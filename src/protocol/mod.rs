//! Replication protocol.
//!
//! - `codec`: fixed-width big-endian wire encoding of cards, names and moves
//! - `handshake`: name exchange and table synchronization
//! - `engine`: the session tasks that mirror moves between the peers

pub mod codec;
pub mod handshake;
pub mod engine;

pub use codec::{read_message, write_move, NO_WISH, OP_DRAW, OP_PLAY};
pub use engine::ProtocolEngine;
pub use handshake::perform_handshake;
