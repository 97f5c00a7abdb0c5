//! Draw pile and discard pile.

use tracing::debug;

use crate::cards::{full_deck, Card};
use crate::core::config::RecycleOrder;
use crate::core::error::TableError;
use crate::core::rng::GameRng;

/// The shared table: a draw pile and a discard pile.
///
/// Both piles are stored bottom-first, so the top card of either pile is the
/// last element.
///
/// ```
/// use maumau_link::cards::{Card, Color, Rank};
/// use maumau_link::table::Table;
///
/// let a = Card::new(Color::Clubs, Rank::Two);
/// let b = Card::new(Color::Hearts, Rank::Nine);
/// let mut table = Table::from_piles(vec![], vec![a, b]);
///
/// // The draw pile is empty, so everything below the top card is recycled.
/// assert_eq!(table.draw(), Ok(a));
/// assert_eq!(table.discard_pile(), &[b]);
/// ```
#[derive(Clone, Debug)]
pub struct Table {
    draw_pile: Vec<Card>,
    discard_pile: Vec<Card>,
    recycle: RecycleOrder,
    recycle_rng: GameRng,
}

impl Default for Table {
    fn default() -> Self {
        Self::from_piles(Vec::new(), Vec::new())
    }
}

impl Table {
    /// Create a table with the full deck shuffled into the draw pile.
    #[must_use]
    pub fn shuffled(rng: &mut GameRng, recycle: RecycleOrder) -> Self {
        let mut deck = full_deck();
        rng.shuffle(&mut deck);
        Self::from_piles(deck, Vec::new()).with_recycle(recycle)
    }

    /// Create a table from explicit piles (bottom first).
    #[must_use]
    pub fn from_piles(draw_pile: Vec<Card>, discard_pile: Vec<Card>) -> Self {
        let mut table = Self {
            draw_pile,
            discard_pile,
            recycle: RecycleOrder::Preserve,
            recycle_rng: GameRng::new(0),
        };
        table.reseed_recycle();
        table
    }

    /// Set the recycle ordering.
    #[must_use]
    pub fn with_recycle(mut self, recycle: RecycleOrder) -> Self {
        self.recycle = recycle;
        self
    }

    /// Draw the top card of the draw pile, refilling it from the discard
    /// pile first if it is empty.
    ///
    /// The top discard card is never recycled.
    pub fn draw(&mut self) -> Result<Card, TableError> {
        if self.draw_pile.is_empty() {
            self.recycle_discards()?;
        }
        self.draw_pile.pop().ok_or(TableError::EmptyDeck)
    }

    /// Put a card on the discard pile. No legality check.
    pub fn play(&mut self, card: Card) {
        self.discard_pile.push(card);
    }

    /// The current top of the discard pile.
    pub fn top_card(&self) -> Result<Card, TableError> {
        self.discard_pile.last().copied().ok_or(TableError::NoDiscard)
    }

    /// Turn the top draw card face up as the first discard.
    pub fn flip_first_discard(&mut self) -> Result<Card, TableError> {
        let card = self.draw_pile.pop().ok_or(TableError::EmptyDeck)?;
        self.discard_pile.push(card);
        Ok(card)
    }

    /// Replace the draw pile wholesale (handshake only).
    pub fn replace_draw_pile(&mut self, draw_pile: Vec<Card>) {
        self.draw_pile = draw_pile;
    }

    /// Replace the discard pile with a single card (handshake only).
    pub fn replace_first_discard(&mut self, card: Card) {
        self.discard_pile.clear();
        self.discard_pile.push(card);
    }

    /// Seed the recycle RNG from the current piles.
    ///
    /// Called once the table is synchronized so both peers derive the same
    /// seed without sending it.
    pub fn reseed_recycle(&mut self) {
        let seed = self
            .draw_pile
            .iter()
            .chain(self.discard_pile.iter())
            .fold(0xcbf2_9ce4_8422_2325_u64, |acc, card| {
                let code = (u64::from(card.rank.face_value()) << 2) | card.color as u64;
                (acc ^ code).wrapping_mul(0x0100_0000_01b3)
            });
        self.recycle_rng = GameRng::new(seed);
    }

    /// Draw pile, bottom first.
    #[must_use]
    pub fn draw_pile(&self) -> &[Card] {
        &self.draw_pile
    }

    /// Discard pile, bottom first.
    #[must_use]
    pub fn discard_pile(&self) -> &[Card] {
        &self.discard_pile
    }

    /// Number of cards left to draw without recycling.
    #[must_use]
    pub fn draw_pile_size(&self) -> usize {
        self.draw_pile.len()
    }

    /// Recycle ordering in effect.
    #[must_use]
    pub fn recycle(&self) -> RecycleOrder {
        self.recycle
    }

    fn recycle_discards(&mut self) -> Result<(), TableError> {
        if self.discard_pile.len() <= 1 {
            return Err(TableError::EmptyDeck);
        }

        let top = self.discard_pile.len() - 1;
        let mut recycled: Vec<Card> = self.discard_pile.drain(..top).collect();

        match self.recycle {
            // Oldest discard ends up on top of the draw pile.
            RecycleOrder::Preserve => recycled.reverse(),
            RecycleOrder::Shuffle => self.recycle_rng.shuffle(&mut recycled),
        }

        debug!(recycled = recycled.len(), order = ?self.recycle, "refilled draw pile from discards");
        self.draw_pile = recycled;
        Ok(())
    }
}
