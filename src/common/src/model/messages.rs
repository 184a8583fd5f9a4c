use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    game::{Outcome, Play},
    series::SeriesState,
};

#[derive(Debug, Hash, Eq, PartialEq, Clone, Copy)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        SessionId(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for SessionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let uuid = Uuid::parse_str(&s).map_err(serde::de::Error::custom)?;
        Ok(SessionId(uuid))
    }
}
impl Serialize for SessionId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

// REST messages
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct NewGameRequest {
    #[serde(default)]
    pub session_id: Option<SessionId>,
    #[serde(default)]
    pub best_of: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NewGameResponse {
    pub session_id: SessionId,
    pub best_of: u32,
}

// Raw text so an unknown play is reported as InvalidPlay, not a body rejection
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PlayRequest {
    pub play: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScoreResponse {
    pub player_wins: u32,
    pub rounds_played: u32,
    pub best_of: u32,
    pub complete: bool,
    pub is_player_winning: bool,
    pub summary: String,
    pub message: String,
}

impl From<&SeriesState> for ScoreResponse {
    fn from(state: &SeriesState) -> Self {
        let result = state.result();
        ScoreResponse {
            player_wins: result.player_wins,
            rounds_played: result.rounds_played,
            best_of: state.best_of(),
            complete: state.is_complete(),
            is_player_winning: result.is_player_winning,
            message: result.message(),
            summary: result.summary,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RoundResponse {
    pub outcome: Outcome,
    pub player_play: Play,
    pub computer_play: Play,
    pub message: String,
    pub score: ScoreResponse,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}
