//! Utilities for creating cards and decks

use std::fmt;
use std::str::FromStr;

pub const RANKS: u8 = 13;
pub const SUITS: usize = 4;
pub const DECK_SIZE: usize = RANKS as usize * SUITS;

pub const ACE: u8 = 1;
pub const KING: u8 = RANKS;

const RANK_STRINGS: [&str; RANKS as usize + 1] = [" ", "A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K"];

/// The color of a suit. Tableau runs must alternate between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black
}

/// The four French suits, in the order their foundations are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Hearts,
    Clubs,
    Diamonds,
    Spades
}

impl Suit {
    pub const ALL: [Suit; SUITS] = [Suit::Hearts, Suit::Clubs, Suit::Diamonds, Suit::Spades];

    pub fn color(self) -> Color {
        match self {
            Suit::Hearts | Suit::Diamonds => Color::Red,
            Suit::Clubs | Suit::Spades => Color::Black
        }
    }

    /// Position of this suit's foundation pile.
    pub fn index(self) -> usize {
        self as usize
    }

    fn symbol(self) -> &'static str {
        match self {
            Suit::Hearts => "♥",
            Suit::Clubs => "♣",
            Suit::Diamonds => "♦",
            Suit::Spades => "♠"
        }
    }
}

/// A struct representing a playing card with a rank and a suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Card {
    /// The rank of the card, from 1 (Ace) to 13 (King).
    pub rank: u8,

    /// The suit of the card.
    pub suit: Suit
}

impl Card {
    pub const fn new(rank: u8, suit: Suit) -> Card {
        Card { rank, suit }
    }

    pub fn color(self) -> Color {
        self.suit.color()
    }

    pub fn is_opposite_color(self, other: Card) -> bool {
        self.color() != other.color()
    }

    /// Whether this card can sit directly on top of `other` in a tableau run:
    /// opposite color and exactly one rank lower.
    pub fn stacks_on(self, other: Card) -> bool {
        self.is_opposite_color(other) && other.rank.checked_sub(1) == Some(self.rank)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = RANK_STRINGS.get(self.rank as usize).copied().unwrap_or("?");
        write!(f, "{}{}", rank, self.suit.symbol())
    }
}

/// Error returned when text cannot be read as a card.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("invalid card: {_0:?}")]
pub struct ParseCardError(String);

impl std::error::Error for ParseCardError {}

impl FromStr for Card {
    type Err = ParseCardError;

    /// Reads cards such as `10♦`, `Q♠`, `10D` or `TD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCardError(s.to_owned());
        let s = s.trim();
        let suit_char = s.chars().last().ok_or_else(err)?;
        let rank_str = &s[..s.len() - suit_char.len_utf8()];

        let suit = match suit_char {
            'H' | 'h' | '♥' => Suit::Hearts,
            'C' | 'c' | '♣' => Suit::Clubs,
            'D' | 'd' | '♦' => Suit::Diamonds,
            'S' | 's' | '♠' => Suit::Spades,
            _ => return Err(err())
        };
        let rank = match rank_str {
            "A" | "a" => ACE,
            "T" | "t" => 10,
            "J" | "j" => 11,
            "Q" | "q" => 12,
            "K" | "k" => KING,
            n => n.parse::<u8>().ok().filter(|r| (2..=10).contains(r)).ok_or_else(err)?
        };
        Ok(Card::new(rank, suit))
    }
}

/// Creates a standard 52-card deck.
///
/// # Returns
///
/// A vector holding every rank from Ace to King in every suit, grouped by suit
/// in the order of [`Suit::ALL`].
pub fn new_standard_deck() -> Vec<Card> {
    (0..DECK_SIZE).map(
        |i|
        Card {
            rank: (i % RANKS as usize) as u8 + 1,
            suit: Suit::ALL[i / RANKS as usize]
        }
    ).collect()
}
