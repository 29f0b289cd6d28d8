use log::{debug, info, trace};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::cards::{new_standard_deck, Card, KING, RANKS};
use crate::error::MoveError;
use crate::rules::Rules;

use history::History;

pub use history::Move;
pub use state::{GameState, Location, FREE_CELLS, TABLEAU_SIZE};

/// A game of Freecell: the board, its rules, the undo history and the move count.
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    rules: Rules,
    undo_history: History,
    move_count: u32
}

impl Game {
    /// Deals a new game with the default rules.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Game {
        Game::with_rules(Rules::default(), rng)
    }

    pub fn with_rules<R: Rng + ?Sized>(rules: Rules, rng: &mut R) -> Game {
        let mut game = Game::from_state(GameState::empty(), rules);
        game.start_new_game(rng);
        game
    }

    /// Starts from an arranged position with an empty history.
    pub fn from_state(state: GameState, rules: Rules) -> Game {
        Game {
            state,
            rules,
            undo_history: History::default(),
            move_count: 0
        }
    }

    /// Shuffles a fresh deck, deals it and forgets all previous moves.
    pub fn start_new_game<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut deck = new_standard_deck();
        deck.shuffle(rng);
        self.state = GameState::deal(deck);
        self.undo_history.clear();
        self.move_count = 0;
        info!("dealt a new game");
        trace!("deal:\n{}", self.state);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_history.is_empty()
    }

    /// Moves executed so far, oldest first.
    pub fn history(&self) -> &[Move] {
        self.undo_history.as_slice()
    }

    pub fn is_won(&self) -> bool {
        self.state.foundations().iter().all(|pile| {
            pile.len() == RANKS as usize && pile.last().is_some_and(|card| card.rank == KING)
        })
    }

    pub fn tableau_to_tableau(&mut self, from: usize, to: usize) -> Result<Move, MoveError> {
        self.try_move(Location::Tableau(from), Location::Tableau(to))
    }

    pub fn tableau_to_free_cell(&mut self, from: usize, cell: usize) -> Result<Move, MoveError> {
        self.try_move(Location::Tableau(from), Location::FreeCell(cell))
    }

    /// Moves the exposed card of `from` onto the foundation of its suit.
    pub fn tableau_to_foundation(&mut self, from: usize) -> Result<Move, MoveError> {
        let card = self.exposed(Location::Tableau(from))?;
        self.try_move(Location::Tableau(from), Location::Foundation(card.suit))
    }

    pub fn free_cell_to_tableau(&mut self, cell: usize, to: usize) -> Result<Move, MoveError> {
        self.try_move(Location::FreeCell(cell), Location::Tableau(to))
    }

    /// Moves the card in `cell` onto the foundation of its suit.
    pub fn free_cell_to_foundation(&mut self, cell: usize) -> Result<Move, MoveError> {
        let card = self.exposed(Location::FreeCell(cell))?;
        self.try_move(Location::FreeCell(cell), Location::Foundation(card.suit))
    }

    pub fn free_cell_to_free_cell(&mut self, from: usize, to: usize) -> Result<Move, MoveError> {
        self.try_move(Location::FreeCell(from), Location::FreeCell(to))
    }

    /// Moves one card from `from` to `to` if the rules allow it. On error the
    /// game is left untouched.
    pub fn try_move(&mut self, from: Location, to: Location) -> Result<Move, MoveError> {
        match self.rules.check(&self.state, from, to) {
            Ok(mv) => {
                self.execute(mv);
                Ok(mv)
            }
            Err(err) => {
                debug!("rejected move {:?} -> {:?}: {}", from, to, err);
                Err(err)
            }
        }
    }

    /// Takes back the most recent move and returns it, or `None` if there is
    /// nothing to undo. Undoing counts as a move.
    pub fn undo(&mut self) -> Option<Move> {
        let last_move = self.undo_history.pop()?;
        let card = self.state.transfer(last_move.destination(), last_move.source());
        debug_assert_eq!(card, Some(last_move.card()));
        self.move_count += 1;
        debug!("undid {}", last_move);
        Some(last_move)
    }

    /// Sends every exposed card that fits onto its foundation, repeating until
    /// nothing more fits. Each card goes as a separate move.
    pub fn auto_move_to_foundations(&mut self) -> Vec<Move> {
        let mut moves = Vec::new();
        let sources = (0..TABLEAU_SIZE).map(Location::Tableau)
            .chain((0..FREE_CELLS).map(Location::FreeCell))
            .collect::<Vec<_>>();

        'outer: loop {
            for &source in &sources {
                let Some(card) = self.state.top(source) else {
                    continue;
                };
                if let Ok(mv) = self.rules.check(&self.state, source, Location::Foundation(card.suit)) {
                    self.execute(mv);
                    moves.push(mv);
                    // The board changed, so look again from the start
                    continue 'outer;
                }
            }
            break;
        }
        moves
    }

    fn exposed(&self, location: Location) -> Result<Card, MoveError> {
        match location {
            Location::Tableau(pile) if pile >= TABLEAU_SIZE => Err(MoveError::NoSuchTableau(pile)),
            Location::FreeCell(cell) if cell >= FREE_CELLS => Err(MoveError::NoSuchFreeCell(cell)),
            _ => self.state.top(location).ok_or(MoveError::EmptySource)
        }
    }

    /// Applies an already validated move and records it.
    fn execute(&mut self, mv: Move) {
        self.state.transfer(mv.source(), mv.destination());
        self.undo_history.push(mv);
        self.move_count += 1;
        debug!("move {}: {}", self.move_count, mv);
    }
}

mod history;
mod print;
mod sequence;
mod state;
mod supermove;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;
    use crate::rules::EmptyTableauRule;
    use crate::test_util::{card, cards};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_game() -> Game {
        let state = GameState::empty()
            .with_tableau(0, &cards("KC QD"))
            .with_tableau(1, &cards("9S JS"))
            .with_tableau(2, &cards("2H AH"))
            .with_free_cell(0, card("AS"))
            .with_free_cell(1, card("10D"))
            .with_foundation(Suit::Clubs, 2);
        Game::from_state(state, Rules::default())
    }

    fn assert_undo_inverts(mut game: Game, mv: impl FnOnce(&mut Game) -> Result<Move, MoveError>) {
        let before = game.state().clone();
        let count = game.move_count();
        let executed = mv(&mut game).unwrap();
        assert_ne!(game.state(), &before);
        assert_eq!(game.history(), &[executed]);

        assert_eq!(game.undo(), Some(executed));
        assert_eq!(game.state(), &before);
        assert_eq!(game.move_count(), count + 2);
        assert!(!game.can_undo());
    }

    #[test]
    fn new_game_deals_a_full_deck() {
        let mut rng = StdRng::seed_from_u64(7);
        let game = Game::new(&mut rng);
        assert!(game.state().is_complete_deck());
        assert_eq!(game.move_count(), 0);
        assert!(!game.can_undo());
        assert!(!game.is_won());
    }

    #[test]
    fn same_seed_deals_same_game() {
        let a = Game::new(&mut StdRng::seed_from_u64(42));
        let b = Game::new(&mut StdRng::seed_from_u64(42));
        let c = Game::new(&mut StdRng::seed_from_u64(43));
        assert_eq!(a.state(), b.state());
        assert_ne!(a.state(), c.state());
    }

    #[test]
    fn start_new_game_clears_history_and_count() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut game = sample_game();
        game.tableau_to_free_cell(0, 2).unwrap();
        assert!(game.can_undo());

        game.start_new_game(&mut rng);
        assert_eq!(game.move_count(), 0);
        assert!(!game.can_undo());
        assert!(game.history().is_empty());
        assert!(game.state().is_complete_deck());
    }

    #[test]
    fn each_single_move_is_undone_exactly() {
        assert_undo_inverts(sample_game(), |g| g.tableau_to_tableau(1, 0));
        assert_undo_inverts(sample_game(), |g| g.tableau_to_free_cell(0, 3));
        assert_undo_inverts(sample_game(), |g| g.tableau_to_foundation(2));
        assert_undo_inverts(sample_game(), |g| g.free_cell_to_tableau(1, 3));
        assert_undo_inverts(sample_game(), |g| g.free_cell_to_foundation(0));
        assert_undo_inverts(sample_game(), |g| g.free_cell_to_free_cell(1, 2));
    }

    #[test]
    fn rejected_moves_change_nothing() {
        let mut game = sample_game();
        let before = game.state().clone();

        assert_eq!(game.tableau_to_tableau(0, 1), Err(MoveError::CannotPlaceOnTableau { card: card("QD"), pile: 1 }));
        assert_eq!(game.tableau_to_tableau(0, 0), Err(MoveError::SameLocation));
        assert_eq!(game.tableau_to_tableau(3, 0), Err(MoveError::EmptySource));
        assert_eq!(game.tableau_to_tableau(8, 0), Err(MoveError::NoSuchTableau(8)));
        assert_eq!(game.tableau_to_free_cell(0, 1), Err(MoveError::FreeCellOccupied(1)));
        assert_eq!(game.tableau_to_free_cell(0, 4), Err(MoveError::NoSuchFreeCell(4)));
        assert_eq!(game.tableau_to_foundation(0), Err(MoveError::CannotPlaceOnFoundation(card("QD"))));
        assert_eq!(game.tableau_to_foundation(9), Err(MoveError::NoSuchTableau(9)));
        assert_eq!(game.free_cell_to_foundation(1), Err(MoveError::CannotPlaceOnFoundation(card("10D"))));
        assert_eq!(game.free_cell_to_foundation(3), Err(MoveError::EmptySource));
        assert_eq!(game.free_cell_to_tableau(1, 0), Err(MoveError::CannotPlaceOnTableau { card: card("10D"), pile: 0 }));
        assert_eq!(game.free_cell_to_free_cell(0, 1), Err(MoveError::FreeCellOccupied(1)));

        assert_eq!(game.state(), &before);
        assert_eq!(game.move_count(), 0);
        assert!(!game.can_undo());
    }

    #[test]
    fn undo_with_empty_history_does_nothing() {
        let mut game = sample_game();
        let before = game.state().clone();
        assert_eq!(game.undo(), None);
        assert_eq!(game.state(), &before);
        assert_eq!(game.move_count(), 0);
    }

    #[test]
    fn undo_unwinds_in_reverse_order() {
        let mut game = sample_game();
        let before = game.state().clone();
        let first = game.tableau_to_free_cell(1, 2).unwrap();
        let second = game.tableau_to_free_cell(1, 3).unwrap();
        assert_eq!(game.move_count(), 2);

        assert_eq!(game.undo(), Some(second));
        assert_eq!(game.undo(), Some(first));
        assert_eq!(game.state(), &before);
        assert_eq!(game.move_count(), 4);
    }

    #[test]
    fn king_then_queen_onto_empty_pile() {
        let state = GameState::empty()
            .with_free_cell(0, card("KC"))
            .with_free_cell(1, card("QD"))
            .with_free_cell(2, card("QH"));
        let mut game = Game::from_state(state, Rules::default());

        game.free_cell_to_tableau(0, 1).unwrap();
        game.free_cell_to_tableau(1, 1).unwrap();
        assert_eq!(game.state().tableau_pile(1), Some(cards("KC QD").as_slice()));
        assert!(game.free_cell_to_tableau(2, 1).is_err());
        assert_eq!(game.move_count(), 2);
    }

    #[test]
    fn king_only_rule_refuses_other_cards_on_empty_pile() {
        let state = GameState::empty()
            .with_tableau(0, &cards("KC QD"))
            .with_free_cell(0, card("KH"));
        let mut game = Game::from_state(state, Rules::new(EmptyTableauRule::KingOnly));

        assert_eq!(game.tableau_to_tableau(0, 1), Err(MoveError::CannotPlaceOnTableau { card: card("QD"), pile: 1 }));
        assert!(game.free_cell_to_tableau(0, 1).is_ok());
    }

    #[test]
    fn win_needs_all_four_foundations_complete() {
        let mut state = GameState::empty();
        for suit in Suit::ALL {
            state = state.with_foundation(suit, KING);
        }
        assert!(Game::from_state(state, Rules::default()).is_won());

        let almost = GameState::empty()
            .with_foundation(Suit::Hearts, KING)
            .with_foundation(Suit::Clubs, KING)
            .with_foundation(Suit::Diamonds, KING)
            .with_foundation(Suit::Spades, 12)
            .with_free_cell(0, card("KS"));
        let mut game = Game::from_state(almost, Rules::default());
        assert_eq!(game.state().card_count(), 52);
        assert!(!game.is_won());

        game.free_cell_to_foundation(0).unwrap();
        assert!(game.is_won());
        game.undo();
        assert!(!game.is_won());
    }

    #[test]
    fn auto_move_sends_every_fitting_card_home() {
        let state = GameState::empty()
            .with_tableau(0, &cards("3H 2H"))
            .with_tableau(1, &cards("9C AH"))
            .with_free_cell(0, card("2C"))
            .with_foundation(Suit::Clubs, 1);
        let mut game = Game::from_state(state, Rules::default());

        let moves = game.auto_move_to_foundations();
        assert_eq!(moves.len(), 4);
        assert_eq!(game.state().foundation(Suit::Hearts), cards("AH 2H 3H").as_slice());
        assert_eq!(game.state().foundation(Suit::Clubs), cards("AC 2C").as_slice());
        assert_eq!(game.state().tableau_pile(1), Some(cards("9C").as_slice()));
        assert_eq!(game.move_count(), 4);
        assert_eq!(game.history(), moves.as_slice());
        assert!(game.auto_move_to_foundations().is_empty());
    }
}
