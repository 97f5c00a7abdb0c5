//! The seat player: one peer's turn state machine and its event fan-out.

pub mod events;
pub mod machine;

pub use events::{BoardEvent, EventHub};
pub use machine::SeatPlayer;
