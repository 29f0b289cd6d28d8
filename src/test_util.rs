use crate::cards::Card;

pub fn card(text: &str) -> Card {
    text.parse().unwrap()
}

/// Cards separated by whitespace, e.g. `"10C 9D 8C"`.
pub fn cards(text: &str) -> Vec<Card> {
    text.split_whitespace().map(card).collect()
}
