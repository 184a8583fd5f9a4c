use tracing::debug;

use crate::error::{GameError, Result};
use crate::model::game::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesPhase {
    InProgress,
    Complete,
}

/// Score of one best-of-N series. Ties are replayed and never counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesState {
    phase: SeriesPhase,
    player_wins: u32,
    rounds_played: u32,
    best_of: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesResult {
    pub player_wins: u32,
    pub rounds_played: u32,
    pub is_player_winning: bool,
    pub summary: String,
}

impl SeriesResult {
    pub fn message(&self) -> String {
        format!("Score: {}", self.summary)
    }
}

impl SeriesState {
    pub fn new(best_of: i64) -> Result<Self> {
        if best_of <= 0 || best_of % 2 == 0 {
            return Err(GameError::InvalidConfiguration { best_of });
        }
        let best_of =
            u32::try_from(best_of).map_err(|_| GameError::InvalidConfiguration { best_of })?;
        Ok(SeriesState {
            phase: SeriesPhase::InProgress,
            player_wins: 0,
            rounds_played: 0,
            best_of,
        })
    }

    /// Returns the state after `outcome`. The receiver is left as it was.
    pub fn record_round(&self, outcome: Outcome) -> Result<SeriesState> {
        if self.is_complete() {
            return Err(GameError::SeriesComplete);
        }
        let (player_wins, rounds_played) = match outcome {
            Outcome::Tie => {
                debug!("Tie, replaying round {}", self.rounds_played + 1);
                return Ok(*self);
            }
            Outcome::PlayerWin => (self.player_wins + 1, self.rounds_played + 1),
            Outcome::PlayerLoss => (self.player_wins, self.rounds_played + 1),
        };
        let phase = if rounds_played == self.best_of {
            SeriesPhase::Complete
        } else {
            SeriesPhase::InProgress
        };
        debug!(
            "Recorded {:?}: {}/{} of best of {}",
            outcome, player_wins, rounds_played, self.best_of
        );
        Ok(SeriesState {
            phase,
            player_wins,
            rounds_played,
            best_of: self.best_of,
        })
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.phase, SeriesPhase::Complete)
    }

    pub fn result(&self) -> SeriesResult {
        SeriesResult {
            player_wins: self.player_wins,
            rounds_played: self.rounds_played,
            // playerWins > roundsPlayed / 2, without integer truncation
            is_player_winning: 2 * u64::from(self.player_wins) > u64::from(self.rounds_played),
            summary: format!("{}/{}", self.player_wins, self.rounds_played),
        }
    }

    pub fn phase(&self) -> SeriesPhase {
        self.phase
    }

    pub fn player_wins(&self) -> u32 {
        self.player_wins
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn best_of(&self) -> u32 {
        self.best_of
    }
}
