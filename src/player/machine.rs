//! The per-seat turn state machine.
//!
//! A `SeatPlayer` wraps one peer's `GameState` in a single coarse lock. The
//! local request path (`request_draw`, `request_play`) and the replication
//! path (`apply_remote` and the handshake updates) both go through it, so
//! the command loop and the protocol read loop can share one instance behind
//! an `Arc`.
//!
//! Successful local moves are queued on the outbound channel while the lock
//! is still held, so the peer receives them in the order they were applied.

use parking_lot::Mutex;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use super::events::{BoardEvent, EventHub};
use crate::cards::{Card, Color};
use crate::core::action::{Move, MoveOutcome};
use crate::core::config::GameConfig;
use crate::core::error::{GameError, TableError};
use crate::core::seat::Seat;
use crate::core::state::{GameState, SharedSnapshot};
use crate::rules::{apply_move, can_still_play, validate_move};

/// One seat's view of the game plus its link to the peer.
#[derive(Debug)]
pub struct SeatPlayer {
    name: String,
    seat: Seat,
    state: Mutex<GameState>,
    outbound: Mutex<Option<UnboundedSender<Move>>>,
    partner: Mutex<Option<String>>,
    events: EventHub,
}

impl SeatPlayer {
    /// Create the player for `seat`. Seat 0 shuffles immediately.
    pub fn new(name: impl Into<String>, seat: Seat, config: GameConfig) -> Result<Self, GameError> {
        let state = GameState::new(seat, config)?;
        Ok(Self::from_state(name, state))
    }

    /// Wrap an existing state.
    #[must_use]
    pub fn from_state(name: impl Into<String>, state: GameState) -> Self {
        Self {
            name: name.into(),
            seat: state.seat(),
            state: Mutex::new(state),
            outbound: Mutex::new(None),
            partner: Mutex::new(None),
            events: EventHub::new(),
        }
    }

    // === Local requests ===

    /// Draw a card on this seat's turn.
    ///
    /// Fails with `NotInGame` until a session is attached. When the draw
    /// pile is exhausted and nothing can be recycled, fails with
    /// `ForcedTurnEnd`; nothing changes and nothing is sent.
    pub fn request_draw(&self) -> Result<Card, GameError> {
        let mut state = self.state.lock();
        let outbound = self.outbound.lock();
        let tx = outbound.as_ref().ok_or(GameError::NotInGame)?;
        validate_move(&state, self.seat, &Move::Draw)?;

        match apply_move(&mut state, self.seat, &Move::Draw) {
            Ok(outcome) => {
                self.send(tx, Move::Draw);
                outcome
                    .drawn
                    .first()
                    .copied()
                    .ok_or(GameError::Table(TableError::EmptyDeck))
            }
            Err(TableError::EmptyDeck) => {
                let can_still_play = can_still_play(&state, self.seat);
                info!(seat = %self.seat, can_still_play, "draw pile exhausted");
                Err(GameError::ForcedTurnEnd { can_still_play })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Play `card` on this seat's turn. `wish` is required for jacks and
    /// ignored otherwise.
    ///
    /// Fails with `NotInGame` until a session is attached. The returned
    /// outcome carries the win signal and any penalty cards drawn to
    /// resolve a seven chain.
    pub fn request_play(&self, card: Card, wish: Option<Color>) -> Result<MoveOutcome, GameError> {
        let wish = if card.is_jack() { wish } else { None };
        let mv = Move::Play { card, wish };

        let mut state = self.state.lock();
        let outbound = self.outbound.lock();
        let tx = outbound.as_ref().ok_or(GameError::NotInGame)?;
        validate_move(&state, self.seat, &mv)?;

        let outcome = apply_move(&mut state, self.seat, &mv)?;
        self.send(tx, mv);

        if outcome.won {
            info!(seat = %self.seat, name = %self.name, "hand emptied");
        }
        Ok(outcome)
    }

    // Called with the state lock held so the queue order is the apply order.
    fn send(&self, tx: &UnboundedSender<Move>, mv: Move) {
        if tx.send(mv).is_err() {
            warn!(seat = %self.seat, ?mv, "session writer is gone; move not replicated");
        }
    }

    // === Replication ===

    /// Attach the outbound queue the protocol writer drains. Local moves
    /// are accepted from here on.
    pub fn attach_outbound(&self, tx: UnboundedSender<Move>) {
        *self.outbound.lock() = Some(tx);
    }

    /// Drop the outbound queue. Local moves fail with `NotInGame` again.
    pub fn detach_outbound(&self) {
        self.outbound.lock().take();
    }

    /// Whether a session is attached and local moves are accepted.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.outbound.lock().is_some()
    }

    /// Apply a move received from the peer, without validation.
    ///
    /// Returns `None` if the peer's draw found no card here, which means the
    /// two tables have diverged.
    pub fn apply_remote(&self, mv: Move) -> Option<MoveOutcome> {
        let actor = self.seat.other();
        let mut state = self.state.lock();

        match apply_move(&mut state, actor, &mv) {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                warn!(seat = %self.seat, ?mv, %err, "peer move could not be applied");
                None
            }
        }
    }

    /// Cards the dealing seat sends during the handshake: the draw pile
    /// (bottom first) and the first discard.
    pub fn handshake_table(&self) -> Result<(Vec<Card>, Card), TableError> {
        let state = self.state.lock();
        let top = state.table.top_card()?;
        Ok((state.table.draw_pile().to_vec(), top))
    }

    /// Install the table received from the dealing seat.
    pub fn synchronize_table(&self, draw_pile: Vec<Card>, first_discard: Card) {
        let mut state = self.state.lock();
        debug!(seat = %self.seat, cards = draw_pile.len(), %first_discard, "synchronizing table");
        state.synchronize_table(draw_pile, first_discard);
    }

    /// Deal both hands from the synchronized draw pile.
    pub fn deal_hands(&self) -> Result<(), TableError> {
        self.state.lock().deal_hands()
    }

    /// Rules this seat plays by.
    #[must_use]
    pub fn config(&self) -> GameConfig {
        self.state.lock().config().clone()
    }

    /// Record the peer's name once the handshake is done.
    pub fn session_established(&self, partner: &str) {
        *self.partner.lock() = Some(partner.to_string());
        self.events.publish(BoardEvent::SessionEstablished {
            partner: partner.to_string(),
        });
    }

    /// Deliver an event to subscribers.
    pub fn notify(&self, event: BoardEvent) {
        self.events.publish(event);
    }

    /// Receive board events.
    pub fn subscribe(&self) -> UnboundedReceiver<BoardEvent> {
        self.events.subscribe()
    }

    // === Views ===

    /// This player's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// This player's seat.
    #[must_use]
    pub fn seat(&self) -> Seat {
        self.seat
    }

    /// The peer's display name, once known.
    #[must_use]
    pub fn partner_name(&self) -> Option<String> {
        self.partner.lock().clone()
    }

    /// Own hand, sorted by color then rank.
    #[must_use]
    pub fn hand(&self) -> Vec<Card> {
        let mut hand = self.state.lock().hand(self.seat).to_vec();
        hand.sort_unstable();
        hand
    }

    /// Current top of the discard pile.
    #[must_use]
    pub fn top_card(&self) -> Option<Card> {
        self.state.lock().table.top_card().ok()
    }

    /// Number of cards the peer holds.
    #[must_use]
    pub fn opponent_hand_size(&self) -> usize {
        self.state.lock().hand(self.seat.other()).len()
    }

    /// Cards left in the draw pile.
    #[must_use]
    pub fn draw_pile_size(&self) -> usize {
        self.state.lock().table.draw_pile_size()
    }

    /// Whether this seat may act.
    #[must_use]
    pub fn is_my_turn(&self) -> bool {
        self.state.lock().is_turn_of(self.seat)
    }

    /// Seat allowed to act.
    #[must_use]
    pub fn current_turn(&self) -> Seat {
        self.state.lock().turn.current_turn
    }

    /// Active wish, if a jack is on top.
    #[must_use]
    pub fn wished_color(&self) -> Option<Color> {
        self.state.lock().turn.wished_color
    }

    /// Unresolved sevens.
    #[must_use]
    pub fn pending_chain(&self) -> u32 {
        self.state.lock().turn.pending_chain
    }

    /// Whether this seat's hand is empty.
    #[must_use]
    pub fn has_won(&self) -> bool {
        self.state.lock().hand(self.seat).is_empty()
    }

    /// Whether the peer's hand is empty.
    #[must_use]
    pub fn opponent_has_won(&self) -> bool {
        self.state.lock().hand(self.seat.other()).is_empty()
    }

    /// Replicated state, for comparing peers.
    #[must_use]
    pub fn snapshot(&self) -> SharedSnapshot {
        self.state.lock().snapshot()
    }

    /// Run `f` against the locked state.
    pub fn with_state<T>(&self, f: impl FnOnce(&GameState) -> T) -> T {
        f(&self.state.lock())
    }
}
