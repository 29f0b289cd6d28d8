//! Moving a run of cards between tableau piles.
//!
//! A run is shifted as a series of legal single-card moves through empty free
//! cells and empty tableau piles. The legs are worked out on a scratch copy of
//! the board first, so a run that cannot be moved leaves the game untouched.

use log::{debug, trace};

use crate::error::MoveError;
use crate::rules::Rules;

use super::sequence::capacity;
use super::{Game, GameState, Location, Move, FREE_CELLS, TABLEAU_SIZE};

struct Planner<'a> {
    board: GameState,
    rules: &'a Rules,
    legs: Vec<Move>
}

impl Planner<'_> {
    fn step(&mut self, from: Location, to: Location) -> Result<(), MoveError> {
        let leg = self.rules.check(&self.board, from, to)?;
        self.board.transfer(from, to);
        trace!("supermove leg {}", leg);
        self.legs.push(leg);
        Ok(())
    }

    /// Moves the top `count` cards of pile `from` onto pile `to`, parking in
    /// the free cells `cells` and the empty piles `columns`.
    fn shift(&mut self, from: usize, to: usize, count: usize, cells: &[usize], columns: &[usize]) -> Result<(), MoveError> {
        if count == 0 {
            return Ok(());
        }

        if count - 1 <= cells.len() + columns.len() {
            // Enough single slots: park all but the leading card, free cells first
            let slots: Vec<Location> = cells.iter().map(|&cell| Location::FreeCell(cell))
                .chain(columns.iter().map(|&pile| Location::Tableau(pile)))
                .take(count - 1)
                .collect();
            for &slot in &slots {
                self.step(Location::Tableau(from), slot)?;
            }
            self.step(Location::Tableau(from), Location::Tableau(to))?;
            for &slot in slots.iter().rev() {
                self.step(slot, Location::Tableau(to))?;
            }
            return Ok(());
        }

        // Park the upper part of the run in an empty pile, move the rest, then
        // bring the parked part across
        let Some((&park, rest)) = columns.split_first() else {
            return Err(MoveError::InsufficientCapacity { requested: count, capacity: cells.len() + 1 });
        };
        let half = capacity(cells.len(), rest.len());
        if count > 2 * half {
            return Err(MoveError::InsufficientCapacity { requested: count, capacity: 2 * half });
        }
        let parked = half.min(count - 1);
        self.shift(from, park, parked, cells, rest)?;
        self.shift(from, to, count - parked, cells, rest)?;
        self.shift(park, to, parked, cells, rest)
    }
}

impl Game {
    /// Moves the cards at `card_indices` of pile `from` onto pile `to`.
    ///
    /// The indices must name a run at the top of the pile, bottom card first,
    /// as given by [`Game::movable_run`] or a suffix of it. The run is moved
    /// card by card through free cells and empty piles. Every leg goes into the
    /// history so undo takes the run back one leg at a time, and the legs are
    /// returned. Each card of the run counts as one move, but each undone leg
    /// also counts as one, so undoing the whole run adds the number of legs
    /// rather than the number of cards. If the run cannot be moved in full,
    /// nothing changes.
    pub fn move_sequence(&mut self, from: usize, to: usize, card_indices: &[usize]) -> Result<Vec<Move>, MoveError> {
        let result = self.shift_run(from, to, card_indices);
        if let Err(err) = &result {
            debug!("rejected sequence {:?} from pile {} to pile {}: {}", card_indices, from, to, err);
        }
        result
    }

    /// The single-card legs that would carry the top `count` cards of pile
    /// `from` onto pile `to`, parking moves included. Nothing is changed.
    pub fn supermove_plan(&self, from: usize, to: usize, count: usize) -> Result<Vec<Move>, MoveError> {
        self.check_piles(from, to)?;
        if count == 0 {
            return Err(MoveError::EmptySequence);
        }
        Ok(self.plan(from, to, count)?.legs)
    }

    fn shift_run(&mut self, from: usize, to: usize, card_indices: &[usize]) -> Result<Vec<Move>, MoveError> {
        self.check_piles(from, to)?;
        let pile_len = self.state.tableau()[from].len();
        let Some(&last) = card_indices.last() else {
            return Err(MoveError::EmptySequence);
        };
        let contiguous = card_indices.windows(2).all(|w| w[0].checked_add(1) == Some(w[1]));
        if !contiguous || Some(last) != pile_len.checked_sub(1) {
            return Err(MoveError::MalformedSequence);
        }

        let count = card_indices.len();
        if count == 1 {
            return self.tableau_to_tableau(from, to).map(|mv| vec![mv]);
        }

        let Planner { board, legs, .. } = self.plan(from, to, count)?;
        self.state = board;
        for &leg in &legs {
            self.undo_history.push(leg);
        }
        // Each card of the run counts once, however many legs it took
        self.move_count += count as u32;
        debug!("moved {} cards from pile {} to pile {} in {} legs", count, from, to, legs.len());
        Ok(legs)
    }

    fn check_piles(&self, from: usize, to: usize) -> Result<(), MoveError> {
        for pile in [from, to] {
            if pile >= TABLEAU_SIZE {
                return Err(MoveError::NoSuchTableau(pile));
            }
        }
        if from == to {
            return Err(MoveError::SameLocation);
        }
        Ok(())
    }

    /// Checks the run against the rules and the available space, then works
    /// out its legs on a copy of the board.
    fn plan(&self, from: usize, to: usize, count: usize) -> Result<Planner<'_>, MoveError> {
        if count > self.movable_run(from).len() {
            return Err(MoveError::NotARun);
        }
        let capacity = self.max_movable_cards_to(to);
        if count > capacity {
            return Err(MoveError::InsufficientCapacity { requested: count, capacity });
        }
        let pile = &self.state.tableau()[from];
        let leading = pile[pile.len() - count];
        let dest_top = self.state.tableau()[to].last().copied();
        if !self.rules.can_place_on_tableau(leading, dest_top) {
            return Err(MoveError::CannotPlaceOnTableau { card: leading, pile: to });
        }

        let cells: Vec<usize> = (0..FREE_CELLS)
            .filter(|&cell| self.state.free_cell(cell).is_none())
            .collect();
        let columns: Vec<usize> = if self.rules.empty_piles_park_any_card() {
            (0..TABLEAU_SIZE)
                .filter(|&pile| pile != from && pile != to && self.state.tableau()[pile].is_empty())
                .collect()
        } else {
            Vec::new()
        };

        let mut planner = Planner {
            board: self.state.clone(),
            rules: &self.rules,
            legs: Vec::with_capacity(2 * count)
        };
        planner.shift(from, to, count, &cells, &columns)?;
        Ok(planner)
    }
}
