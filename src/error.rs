use crate::cards::Card;

/// Why a move was refused. A refused move never changes the game.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    #[display("there is no tableau pile {_0}")]
    NoSuchTableau(usize),

    #[display("there is no free cell {_0}")]
    NoSuchFreeCell(usize),

    #[display("source and destination are the same")]
    SameLocation,

    #[display("there is no card to move")]
    EmptySource,

    #[display("free cell {_0} is occupied")]
    FreeCellOccupied(usize),

    #[display("cards cannot be taken back off a foundation")]
    FromFoundation,

    #[display("{card} cannot be placed on tableau pile {pile}")]
    CannotPlaceOnTableau { card: Card, pile: usize },

    #[display("{_0} cannot be placed on its foundation")]
    CannotPlaceOnFoundation(Card),

    #[display("no cards were given to move")]
    EmptySequence,

    #[display("card indices must run contiguously up to the top of the pile")]
    MalformedSequence,

    #[display("the cards do not form a movable run")]
    NotARun,

    #[display("{requested} cards requested but only {capacity} can be moved")]
    InsufficientCapacity { requested: usize, capacity: usize }
}

impl std::error::Error for MoveError {}
