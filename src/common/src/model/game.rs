use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Tie,
    PlayerWin,
    PlayerLoss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Play {
    Rock,
    Paper,
    Scissors,
}

impl Play {
    /// Every play, in the order the choice generator indexes them.
    pub const ALL: [Play; 3] = [Play::Rock, Play::Paper, Play::Scissors];

    pub fn as_str(&self) -> &'static str {
        match self {
            Play::Rock => "rock",
            Play::Paper => "paper",
            Play::Scissors => "scissors",
        }
    }

    /// `None` on a tie, otherwise whether `self` beats `other`.
    pub fn beats(&self, other: &Play) -> Option<bool> {
        if self == other {
            None
        } else {
            Some(matches!(
                (self, other),
                (Play::Rock, Play::Scissors)
                    | (Play::Scissors, Play::Paper)
                    | (Play::Paper, Play::Rock)
            ))
        }
    }
}

impl FromStr for Play {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "rock" => Ok(Play::Rock),
            "paper" => Ok(Play::Paper),
            "scissors" => Ok(Play::Scissors),
            _ => Err(GameError::InvalidPlay(s.to_owned())),
        }
    }
}

impl fmt::Display for Play {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Play::Rock => "Rock",
            Play::Paper => "Paper",
            Play::Scissors => "Scissors",
        };
        f.write_str(name)
    }
}

impl<'de> Deserialize<'de> for Play {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
impl Serialize for Play {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Compares the player's play against the computer's.
pub fn evaluate(player: Play, computer: Play) -> Outcome {
    match player.beats(&computer) {
        None => Outcome::Tie,
        Some(true) => Outcome::PlayerWin,
        Some(false) => Outcome::PlayerLoss,
    }
}

/// Parses free-text player input, then evaluates it. Invalid input never
/// reaches `evaluate`.
pub fn play_round(player: &str, computer: Play) -> Result<Outcome> {
    let player: Play = player.parse()?;
    Ok(evaluate(player, computer))
}

pub fn describe_round(outcome: Outcome, player: Play, computer: Play) -> String {
    match outcome {
        Outcome::Tie => "TIE game!".to_owned(),
        Outcome::PlayerWin => format!("You Win! {} beats {}", player, computer),
        Outcome::PlayerLoss => format!("You Lose! {} beats {}", computer, player),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_plays_tie() {
        for play in Play::ALL {
            assert_eq!(evaluate(play, play), Outcome::Tie);
        }
    }

    #[test]
    fn evaluate_is_antisymmetric() {
        for a in Play::ALL {
            for b in Play::ALL {
                match evaluate(a, b) {
                    Outcome::PlayerWin => assert_eq!(evaluate(b, a), Outcome::PlayerLoss),
                    Outcome::PlayerLoss => assert_eq!(evaluate(b, a), Outcome::PlayerWin),
                    Outcome::Tie => assert_eq!(a, b),
                }
            }
        }
    }

    #[test]
    fn lookup_table() {
        assert_eq!(evaluate(Play::Rock, Play::Scissors), Outcome::PlayerWin);
        assert_eq!(evaluate(Play::Scissors, Play::Paper), Outcome::PlayerWin);
        assert_eq!(evaluate(Play::Paper, Play::Rock), Outcome::PlayerWin);
        assert_eq!(evaluate(Play::Rock, Play::Paper), Outcome::PlayerLoss);
    }

    #[test]
    fn input_is_normalized() {
        assert_eq!(play_round("Rock ", Play::Scissors), Ok(Outcome::PlayerWin));
        assert_eq!("  PAPER\n".parse::<Play>(), Ok(Play::Paper));
    }

    #[test]
    fn unknown_play_is_rejected() {
        assert_eq!(
            "lizard".parse::<Play>(),
            Err(GameError::InvalidPlay("lizard".to_owned()))
        );
        assert!(play_round("", Play::Rock).is_err());
    }

    #[test]
    fn round_descriptions() {
        assert_eq!(
            describe_round(Outcome::PlayerWin, Play::Rock, Play::Scissors),
            "You Win! Rock beats Scissors"
        );
        assert_eq!(
            describe_round(Outcome::PlayerLoss, Play::Rock, Play::Paper),
            "You Lose! Paper beats Rock"
        );
        assert_eq!(
            describe_round(Outcome::Tie, Play::Paper, Play::Paper),
            "TIE game!"
        );
    }

    #[test]
    fn play_serde() {
        let play: Play = serde_json::from_str("\"Scissors \"").unwrap();
        assert_eq!(play, Play::Scissors);
        assert_eq!(serde_json::to_string(&Play::Rock).unwrap(), "\"rock\"");
        assert!(serde_json::from_str::<Play>("\"lizard\"").is_err());
    }
}
