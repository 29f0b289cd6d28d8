use std::collections::BTreeMap;
use std::ops::Range;

use super::{Game, TABLEAU_SIZE};

/// `(free cells + 1) * 2^columns`: each free cell parks one card and each
/// empty column doubles what the others can shift.
pub(super) fn capacity(free_cells: usize, empty_columns: usize) -> usize {
    (free_cells + 1) << empty_columns
}

impl Game {
    /// Indices of the cards at the top of `pile` that form a run, bottom of
    /// the run first. Empty for an empty or unknown pile.
    pub fn movable_run(&self, pile: usize) -> Range<usize> {
        self.state.movable_run(pile)
    }

    /// How many cards can be moved as one run with the free cells and empty
    /// tableau piles currently available.
    pub fn max_movable_cards(&self) -> usize {
        capacity(self.state.empty_free_cell_count(), self.parking_columns())
    }

    /// Like [`Game::max_movable_cards`], but for a run headed to `dest`. An
    /// empty destination cannot also be used for parking, so it is left out.
    pub fn max_movable_cards_to(&self, dest: usize) -> usize {
        let dest_is_parking = self.rules.empty_piles_park_any_card()
            && self.state.tableau_pile(dest).is_some_and(|pile| pile.is_empty());
        capacity(self.state.empty_free_cell_count(), self.parking_columns() - usize::from(dest_is_parking))
    }

    /// For every other pile that can take part of the run at the top of
    /// `pile`, the largest number of cards it can take.
    pub fn destinations_with_capacity(&self, pile: usize) -> BTreeMap<usize, usize> {
        let mut destinations = BTreeMap::new();
        let run = self.movable_run(pile);
        let Some(cards) = self.state.tableau_pile(pile) else {
            return destinations;
        };

        for dest in (0..TABLEAU_SIZE).filter(|&dest| dest != pile) {
            let dest_top = self.state.tableau_pile(dest).and_then(|d| d.last().copied());
            let longest = run.len().min(self.max_movable_cards_to(dest));
            let fits = (1..=longest).rev()
                .find(|&len| self.rules.can_place_on_tableau(cards[cards.len() - len], dest_top));
            if let Some(len) = fits {
                destinations.insert(dest, len);
            }
        }
        destinations
    }

    fn parking_columns(&self) -> usize {
        if self.rules.empty_piles_park_any_card() {
            self.state.empty_tableau_count()
        } else {
            0
        }
    }
}
