use thiserror::Error;

/// raised when a board cannot be set up from the requested parameters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// requested starting cells plus the seed patterns do not fit on the board.
    #[error(
        "too many starting cells: {requested} requested and {reserved} reserved for seed patterns, \
         but the board only holds {capacity}"
    )]
    TooManyCells {
        requested: usize,
        reserved: usize,
        capacity: usize,
    },

    /// the board is too large to be addressed.
    #[error("a {rows}x{cols} board is too large")]
    BoardTooLarge { rows: usize, cols: usize },
}
