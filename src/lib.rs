//! # maumau-link
//!
//! Two-peer Mau-Mau where each peer runs its own copy of the game and a small
//! binary protocol keeps the copies in lockstep.
//!
//! ## Design Principles
//!
//! 1. **No authority**: neither peer owns the game. Each applies its own
//!    moves after validating them and applies the peer's moves as received.
//!
//! 2. **One transition function**: local and replicated moves both go through
//!    `rules::apply_move`, so the two peers cannot compute different results
//!    from the same move.
//!
//! 3. **Deterministic shared state**: the dealing seat ships its shuffled
//!    draw pile during the handshake; everything after that, including the
//!    deal and discard recycling, is derived identically on both sides.
//!
//! ## Modules
//!
//! - `core`: seats, configuration, RNG, moves, state, errors
//! - `cards`: card catalog and rank effects
//! - `table`: draw and discard piles with recycling
//! - `rules`: play-legality verifier and move transition function
//! - `player`: the locked per-seat turn state machine and board events
//! - `protocol`: wire codec, handshake and session tasks
//! - `net`: TCP connection setup
//! - `telemetry`: tracing subscriber setup

pub mod core;
pub mod cards;
pub mod table;
pub mod rules;
pub mod player;
pub mod protocol;
pub mod net;
pub mod telemetry;

// Re-export commonly used types
pub use crate::core::{
    Seat, SeatMap, SEAT_COUNT,
    GameRng,
    GameConfig, NetConfig, RecycleOrder, DEFAULT_PORT,
    Move, MoveOutcome,
    GameState, Hand, SharedSnapshot, TurnState, ConservationError,
    GameError, ProtocolError, TableError, TransportError,
};

pub use crate::cards::{full_deck, Card, Color, ParseCardError, Rank, RankEffect, DECK_SIZE};

pub use crate::table::Table;

pub use crate::rules::{apply_move, can_play, can_still_play, has_fitting_card, validate_move};

pub use crate::player::{BoardEvent, EventHub, SeatPlayer};

pub use crate::protocol::ProtocolEngine;

pub use crate::net::{open_channel, Role};
