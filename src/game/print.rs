use std::fmt;

use crate::cards::Suit;

use super::{GameState, TABLEAU_SIZE};

const CARD_PRINT_WIDTH: usize = 4;
const EMPTY_SLOT: &str = "[ ]";

impl fmt::Display for GameState {
    /// Prints the board as plain text: foundations and free cells on the
    /// first line, then one line per tableau row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for suit in Suit::ALL {
            match self.foundation(suit).last() {
                Some(card) => write!(f, "{:<CARD_PRINT_WIDTH$}", card.to_string())?,
                None => write!(f, "{:<CARD_PRINT_WIDTH$}", EMPTY_SLOT)?
            }
        }
        write!(f, "| ")?;
        for cell in self.free_cells() {
            match cell {
                Some(card) => write!(f, "{:<CARD_PRINT_WIDTH$}", card.to_string())?,
                None => write!(f, "{:<CARD_PRINT_WIDTH$}", EMPTY_SLOT)?
            }
        }
        writeln!(f)?;

        let depth = self.tableau().iter().map(Vec::len).max().unwrap_or(0);
        for row in 0..depth {
            let mut line = String::new();
            for pile in 0..TABLEAU_SIZE {
                let text = self.tableau()[pile].get(row).map(ToString::to_string).unwrap_or_default();
                line.push_str(&format!("{:<CARD_PRINT_WIDTH$}", text));
            }
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{card, cards};

    #[test]
    fn prints_foundations_cells_and_columns() {
        let state = GameState::empty()
            .with_foundation(Suit::Clubs, 2)
            .with_free_cell(1, card("10D"))
            .with_tableau(0, &cards("KS QH"))
            .with_tableau(2, &cards("3C"));

        let expected = "\
[ ] 2♣  [ ] [ ] | [ ] 10♦ [ ] [ ] \n\
K♠      3♣\n\
Q♥\n";
        assert_eq!(state.to_string(), expected);
    }

    #[test]
    fn empty_board_prints_placeholders_only() {
        assert_eq!(GameState::empty().to_string(), "[ ] [ ] [ ] [ ] | [ ] [ ] [ ] [ ] \n");
    }
}
