//! Core types: seats, configuration, RNG, moves, state and errors.
//!
//! Everything else in the crate builds on these. Nothing here knows about
//! locking or the wire.

pub mod seat;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;
pub mod error;

pub use seat::{Seat, SeatMap, SEAT_COUNT};
pub use rng::GameRng;
pub use config::{GameConfig, NetConfig, RecycleOrder, DEFAULT_PORT};
pub use action::{Move, MoveOutcome};
pub use state::{ConservationError, GameState, Hand, SharedSnapshot, TurnState};
pub use error::{GameError, ProtocolError, TableError, TransportError};
