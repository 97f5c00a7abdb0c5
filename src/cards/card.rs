//! Card catalog: colors, ranks and the card value type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of cards in the single deck used for a game.
pub const DECK_SIZE: usize = 52;

/// Card color (suit).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Clubs,
    Spades,
    Hearts,
    Diamonds,
}

impl Color {
    /// All colors in catalog order.
    pub const ALL: [Color; 4] = [Color::Clubs, Color::Spades, Color::Hearts, Color::Diamonds];

    /// Lowercase display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Clubs => "clubs",
            Color::Spades => "spades",
            Color::Hearts => "hearts",
            Color::Diamonds => "diamonds",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing a color or rank name fails.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {input:?}")]
pub struct ParseCardError {
    kind: &'static str,
    input: String,
}

impl FromStr for Color {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clubs" | "club" => Ok(Color::Clubs),
            "spades" | "spade" => Ok(Color::Spades),
            "hearts" | "heart" => Ok(Color::Hearts),
            "diamonds" | "diamond" => Ok(Color::Diamonds),
            _ => Err(ParseCardError {
                kind: "color",
                input: s.to_string(),
            }),
        }
    }
}

/// Card rank, ordered 2 < 3 < ... < 10 < jack < queen < king < ace.
///
/// The order is for display and sorting only; legality never compares ranks
/// beyond equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// All ranks in ascending order.
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Face value: 2..=10 for number cards, then jack 11, queen 12,
    /// king 13, ace 14.
    #[must_use]
    pub const fn face_value(self) -> u32 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
            Rank::Ace => 14,
        }
    }

    /// Inverse of [`Rank::face_value`].
    #[must_use]
    pub fn from_face_value(value: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.face_value() == value)
    }

    /// Lowercase display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "jack",
            Rank::Queen => "queen",
            Rank::King => "king",
            Rank::Ace => "ace",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Rank {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let rank = match lowered.as_str() {
            "two" => Some(Rank::Two),
            "three" => Some(Rank::Three),
            "four" => Some(Rank::Four),
            "five" => Some(Rank::Five),
            "six" => Some(Rank::Six),
            "seven" => Some(Rank::Seven),
            "eight" => Some(Rank::Eight),
            "nine" => Some(Rank::Nine),
            "ten" => Some(Rank::Ten),
            "jack" | "j" => Some(Rank::Jack),
            "queen" | "q" => Some(Rank::Queen),
            "king" | "k" => Some(Rank::King),
            "ace" | "a" => Some(Rank::Ace),
            other => other
                .parse::<u32>()
                .ok()
                .filter(|v| (2..=10).contains(v))
                .and_then(Rank::from_face_value),
        };
        rank.ok_or(ParseCardError {
            kind: "rank",
            input: s.to_string(),
        })
    }
}

/// An immutable playing card.
///
/// Two cards are equal iff color and rank match. The derived ordering sorts
/// by color first, then rank, which is what hand views use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Card {
    pub color: Color,
    pub rank: Rank,
}

impl Card {
    /// Create a new card.
    #[must_use]
    pub const fn new(color: Color, rank: Rank) -> Self {
        Self { color, rank }
    }

    /// Check if this card is a jack.
    #[must_use]
    pub fn is_jack(self) -> bool {
        self.rank == Rank::Jack
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.rank, self.color)
    }
}

/// The full 52-card universe in catalog order (unshuffled).
#[must_use]
pub fn full_deck() -> Vec<Card> {
    Color::ALL
        .into_iter()
        .flat_map(|color| Rank::ALL.into_iter().map(move |rank| Card::new(color, rank)))
        .collect()
}
