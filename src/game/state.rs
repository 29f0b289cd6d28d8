use std::collections::HashSet;
use std::ops::Range;

use crate::cards::{Card, Suit, DECK_SIZE, KING, RANKS, SUITS};

pub const FREE_CELLS: usize = 4;
pub const TABLEAU_SIZE: usize = 8;

/// A container on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Tableau(usize),
    FreeCell(usize),
    Foundation(Suit)
}

/// The layout of every card: tableau piles, free cells and foundations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameState {
    tableau: [Vec<Card>; TABLEAU_SIZE],
    free_cells: [Option<Card>; FREE_CELLS],
    foundations: [Vec<Card>; SUITS]
}

impl GameState {
    /// A board with no cards anywhere.
    pub fn empty() -> GameState {
        GameState::default()
    }

    /// Deals `deck` round-robin across the tableau, so a full deck leaves
    /// 7 cards in each of the first four piles and 6 in the rest.
    pub fn deal(deck: Vec<Card>) -> GameState {
        let mut state = GameState::empty();
        for (i, card) in deck.into_iter().enumerate() {
            state.tableau[i % TABLEAU_SIZE].push(card);
        }
        state
    }

    /// Replaces tableau pile `pile` with `cards`, listed bottom to top.
    ///
    /// # Panics
    ///
    /// Panics if `pile` is not a tableau index.
    pub fn with_tableau(mut self, pile: usize, cards: &[Card]) -> GameState {
        self.tableau[pile] = cards.to_vec();
        self
    }

    /// Puts `card` in free cell `cell`.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is not a free cell index.
    pub fn with_free_cell(mut self, cell: usize, card: Card) -> GameState {
        self.free_cells[cell] = Some(card);
        self
    }

    /// Fills the foundation of `suit` from the Ace up to and including `rank`.
    pub fn with_foundation(mut self, suit: Suit, rank: u8) -> GameState {
        self.foundations[suit.index()] = (1..=rank.min(KING)).map(|r| Card::new(r, suit)).collect();
        self
    }

    pub fn tableau(&self) -> &[Vec<Card>; TABLEAU_SIZE] {
        &self.tableau
    }

    /// The cards of one tableau pile, bottom to top.
    pub fn tableau_pile(&self, pile: usize) -> Option<&[Card]> {
        self.tableau.get(pile).map(Vec::as_slice)
    }

    pub fn free_cells(&self) -> &[Option<Card>; FREE_CELLS] {
        &self.free_cells
    }

    pub fn free_cell(&self, cell: usize) -> Option<Card> {
        self.free_cells.get(cell).copied().flatten()
    }

    pub fn foundation(&self, suit: Suit) -> &[Card] {
        &self.foundations[suit.index()]
    }

    pub fn foundations(&self) -> &[Vec<Card>; SUITS] {
        &self.foundations
    }

    pub fn empty_free_cell_count(&self) -> usize {
        self.free_cells.iter().filter(|cell| cell.is_none()).count()
    }

    pub fn empty_tableau_count(&self) -> usize {
        self.tableau.iter().filter(|pile| pile.is_empty()).count()
    }

    /// The exposed card at `location`, if any.
    pub fn top(&self, location: Location) -> Option<Card> {
        match location {
            Location::Tableau(pile) => self.tableau.get(pile)?.last().copied(),
            Location::FreeCell(cell) => self.free_cell(cell),
            Location::Foundation(suit) => self.foundation(suit).last().copied()
        }
    }

    pub fn is_valid_location(&self, location: Location) -> bool {
        match location {
            Location::Tableau(pile) => pile < TABLEAU_SIZE,
            Location::FreeCell(cell) => cell < FREE_CELLS,
            Location::Foundation(_) => true
        }
    }

    /// Every card on the board, in no particular order.
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.tableau.iter().flatten().copied()
            .chain(self.free_cells.iter().flatten().copied())
            .chain(self.foundations.iter().flatten().copied())
    }

    pub fn card_count(&self) -> usize {
        self.cards().count()
    }

    /// Whether the board holds exactly one standard deck with no duplicates.
    pub fn is_complete_deck(&self) -> bool {
        let mut seen = HashSet::with_capacity(DECK_SIZE);
        self.cards().all(|card| (1..=RANKS).contains(&card.rank) && seen.insert(card))
            && seen.len() == DECK_SIZE
    }

    /// The maximal run ending at the exposed card of `pile`: each card above
    /// the run's first one is one rank lower and the opposite color of the
    /// card beneath it. Empty for an empty or unknown pile.
    pub fn movable_run(&self, pile: usize) -> Range<usize> {
        let Some(cards) = self.tableau.get(pile) else {
            return 0..0;
        };
        if cards.is_empty() {
            return 0..0;
        }
        let mut start = cards.len() - 1;
        while start > 0 && cards[start].stacks_on(cards[start - 1]) {
            start -= 1;
        }
        start..cards.len()
    }

    /// Removes and returns the exposed card at `location`.
    pub(crate) fn take(&mut self, location: Location) -> Option<Card> {
        match location {
            Location::Tableau(pile) => self.tableau.get_mut(pile)?.pop(),
            Location::FreeCell(cell) => self.free_cells.get_mut(cell)?.take(),
            Location::Foundation(suit) => self.foundations[suit.index()].pop()
        }
    }

    /// Places `card` at `location` without checking the rules.
    pub(crate) fn put(&mut self, location: Location, card: Card) {
        match location {
            Location::Tableau(pile) => self.tableau[pile].push(card),
            Location::FreeCell(cell) => {
                debug_assert!(self.free_cells[cell].is_none());
                self.free_cells[cell] = Some(card);
            }
            Location::Foundation(suit) => self.foundations[suit.index()].push(card)
        }
    }

    /// Moves the exposed card from `from` to `to` without checking the rules.
    pub(crate) fn transfer(&mut self, from: Location, to: Location) -> Option<Card> {
        let card = self.take(from)?;
        self.put(to, card);
        Some(card)
    }
}
