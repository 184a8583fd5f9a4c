use rps_common::error::GameError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("input closed before the series finished")]
    InputClosed,
}
