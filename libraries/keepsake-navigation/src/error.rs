//! Error types for the page navigator

use thiserror::Error;

/// Deck construction errors
///
/// Only construction can fail; navigation itself clamps rather than
/// rejecting out-of-range requests.
#[derive(Debug, Error)]
pub enum DeckError {
    /// A deck needs at least a sealed-envelope page and one message page
    #[error("Deck has {0} pages, need at least 2")]
    TooFewPages(usize),

    /// The back floor must be a reachable page
    #[error("Back floor {floor} outside deck of {pages} pages")]
    InvalidBackFloor {
        /// Configured floor
        floor: u32,
        /// Deck size
        pages: usize,
    },
}

/// Result type for deck construction
pub type Result<T> = std::result::Result<T, DeckError>;
