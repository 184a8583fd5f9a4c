use thiserror::Error;

/// Failures of the game core. `InvalidPlay` is recoverable: the caller
/// re-prompts and the round does not count.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("best_of must be a positive odd number, got {best_of}")]
    InvalidConfiguration { best_of: i64 },

    #[error("invalid selection {0:?}, expected one of: \"rock\", \"paper\", or \"scissors\"")]
    InvalidPlay(String),

    #[error("series is already complete")]
    SeriesComplete,
}

pub type Result<T> = std::result::Result<T, GameError>;
