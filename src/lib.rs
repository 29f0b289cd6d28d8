//! A Freecell solitaire rules engine.
//!
//! [`Game`] holds the board, validates and executes single-card moves and
//! multi-card supermoves, keeps an unlimited undo history and counts moves.
//! Drawing and input are left to the caller, which reads the board through
//! [`Game::state`] after each call.

pub mod cards;
pub mod error;
pub mod game;
pub mod rules;

#[cfg(test)]
mod test_util;

pub use cards::{Card, Color, Suit};
pub use error::MoveError;
pub use game::{Game, GameState, Location, Move};
pub use rules::{EmptyTableauRule, Rules};
