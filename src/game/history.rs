use std::fmt;

use crate::cards::{Card, Suit};

use super::state::Location;

/// One executed single-card move, as kept in the undo history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    TableauToTableau { from: usize, to: usize, card: Card },
    TableauToFreeCell { from: usize, cell: usize, card: Card },
    TableauToFoundation { from: usize, suit: Suit, card: Card },
    FreeCellToTableau { cell: usize, to: usize, card: Card },
    FreeCellToFoundation { cell: usize, suit: Suit, card: Card },
    FreeCellToFreeCell { from: usize, to: usize, card: Card }
}

impl Move {
    /// The move carrying `card` from `from` to `to`, if such a move exists.
    /// Nothing ever leaves a foundation.
    pub fn between(from: Location, to: Location, card: Card) -> Option<Move> {
        use Location::*;
        let mv = match (from, to) {
            (Tableau(from), Tableau(to)) => Move::TableauToTableau { from, to, card },
            (Tableau(from), FreeCell(cell)) => Move::TableauToFreeCell { from, cell, card },
            (Tableau(from), Foundation(suit)) => Move::TableauToFoundation { from, suit, card },
            (FreeCell(cell), Tableau(to)) => Move::FreeCellToTableau { cell, to, card },
            (FreeCell(cell), Foundation(suit)) => Move::FreeCellToFoundation { cell, suit, card },
            (FreeCell(from), FreeCell(to)) => Move::FreeCellToFreeCell { from, to, card },
            (Foundation(_), _) => return None
        };
        Some(mv)
    }

    pub fn card(&self) -> Card {
        match *self {
            Move::TableauToTableau { card, .. }
            | Move::TableauToFreeCell { card, .. }
            | Move::TableauToFoundation { card, .. }
            | Move::FreeCellToTableau { card, .. }
            | Move::FreeCellToFoundation { card, .. }
            | Move::FreeCellToFreeCell { card, .. } => card
        }
    }

    pub fn source(&self) -> Location {
        match *self {
            Move::TableauToTableau { from, .. }
            | Move::TableauToFreeCell { from, .. }
            | Move::TableauToFoundation { from, .. } => Location::Tableau(from),
            Move::FreeCellToTableau { cell, .. }
            | Move::FreeCellToFoundation { cell, .. } => Location::FreeCell(cell),
            Move::FreeCellToFreeCell { from, .. } => Location::FreeCell(from)
        }
    }

    pub fn destination(&self) -> Location {
        match *self {
            Move::TableauToTableau { to, .. }
            | Move::FreeCellToTableau { to, .. } => Location::Tableau(to),
            Move::TableauToFreeCell { cell, .. } => Location::FreeCell(cell),
            Move::FreeCellToFreeCell { to, .. } => Location::FreeCell(to),
            Move::TableauToFoundation { suit, .. }
            | Move::FreeCellToFoundation { suit, .. } => Location::Foundation(suit)
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} -> {:?}", self.card(), self.source(), self.destination())
    }
}

/// Every move executed since the deal, oldest first.
#[derive(Debug, Clone, Default)]
pub(crate) struct History {
    moves: Vec<Move>
}

impl History {
    pub fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    pub fn pop(&mut self) -> Option<Move> {
        self.moves.pop()
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }
}
