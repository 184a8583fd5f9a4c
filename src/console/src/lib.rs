pub mod error;
pub mod prompt;
