//! Placement rules and move validation.

use crate::cards::{Card, ACE, KING};
use crate::error::MoveError;
use crate::game::{GameState, Location, Move};

/// What may be placed on an empty tableau pile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyTableauRule {
    /// Any card may start an empty pile.
    #[default]
    AnyCard,
    /// Only a King may start an empty pile.
    KingOnly
}

/// Rule configuration for a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rules {
    pub empty_tableau: EmptyTableauRule
}

impl Rules {
    pub fn new(empty_tableau: EmptyTableauRule) -> Rules {
        Rules { empty_tableau }
    }

    /// Whether `card` may be placed on a tableau pile whose exposed card is
    /// `dest_top` (`None` for an empty pile).
    pub fn can_place_on_tableau(&self, card: Card, dest_top: Option<Card>) -> bool {
        match dest_top {
            Some(top) => card.stacks_on(top),
            None => match self.empty_tableau {
                EmptyTableauRule::AnyCard => true,
                EmptyTableauRule::KingOnly => card.rank == KING
            }
        }
    }

    /// Whether empty tableau piles can hold an arbitrary card while a run is
    /// being relocated.
    pub fn empty_piles_park_any_card(&self) -> bool {
        self.empty_tableau == EmptyTableauRule::AnyCard
    }

    /// Validates moving the exposed card at `from` onto `to` in `state`.
    ///
    /// Returns the move that would be executed, or the reason it is illegal.
    pub fn check(&self, state: &GameState, from: Location, to: Location) -> Result<Move, MoveError> {
        for location in [from, to] {
            if !state.is_valid_location(location) {
                return Err(match location {
                    Location::Tableau(pile) => MoveError::NoSuchTableau(pile),
                    Location::FreeCell(cell) => MoveError::NoSuchFreeCell(cell),
                    Location::Foundation(_) => MoveError::FromFoundation
                });
            }
        }
        if from == to {
            return Err(MoveError::SameLocation);
        }
        if let Location::Foundation(_) = from {
            return Err(MoveError::FromFoundation);
        }
        let card = state.top(from).ok_or(MoveError::EmptySource)?;

        match to {
            Location::Tableau(pile) => {
                if !self.can_place_on_tableau(card, state.top(to)) {
                    return Err(MoveError::CannotPlaceOnTableau { card, pile });
                }
            }
            Location::FreeCell(cell) => {
                if state.free_cell(cell).is_some() {
                    return Err(MoveError::FreeCellOccupied(cell));
                }
            }
            Location::Foundation(suit) => {
                if card.suit != suit || !can_place_on_foundation(card, state.foundation(suit)) {
                    return Err(MoveError::CannotPlaceOnFoundation(card));
                }
            }
        }

        Move::between(from, to, card).ok_or(MoveError::FromFoundation)
    }
}

/// Whether `card` may be placed on the foundation `pile`: an Ace on an empty
/// pile, otherwise the next rank of the same suit.
pub fn can_place_on_foundation(card: Card, pile: &[Card]) -> bool {
    match pile.last() {
        Some(top) => card.suit == top.suit && top.rank.checked_add(1) == Some(card.rank),
        None => card.rank == ACE
    }
}

/// Whether at least one free cell is empty.
pub fn can_place_on_free_cell(free_cells: &[Option<Card>]) -> bool {
    free_cells.iter().any(Option::is_none)
}
