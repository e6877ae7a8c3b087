use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Player decisions during the Playing phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerAction {
    Hit,
    Stand,
    Double,
    Split,
    Surrender,
}

impl From<blackjack::OptimalMove> for PlayerAction {
    fn from(m: blackjack::OptimalMove) -> Self {
        match m {
            blackjack::OptimalMove::Hit => PlayerAction::Hit,
            blackjack::OptimalMove::Stand => PlayerAction::Stand,
            blackjack::OptimalMove::Double => PlayerAction::Double,
            blackjack::OptimalMove::Split => PlayerAction::Split,
            blackjack::OptimalMove::Surrender => PlayerAction::Surrender,
        }
    }
}

impl FromStr for PlayerAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h" | "hit" => Ok(PlayerAction::Hit),
            "s" | "stand" => Ok(PlayerAction::Stand),
            "d" | "double" => Ok(PlayerAction::Double),
            "p" | "split" => Ok(PlayerAction::Split),
            "r" | "surrender" => Ok(PlayerAction::Surrender),
            other => Err(format!("Unknown action '{other}'")),
        }
    }
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlayerAction::Hit => "hit",
            PlayerAction::Stand => "stand",
            PlayerAction::Double => "double",
            PlayerAction::Split => "split",
            PlayerAction::Surrender => "surrender",
        })
    }
}

/// Emitted once per settled round for the economy, stats and challenge
/// collaborators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSummary {
    pub hands_played: u32,
    pub hands_won: u32,
    /// Winning natural blackjacks
    pub blackjacks: u32,
    /// Net coins across all hands; negative when the round lost money
    pub coins_won: i64,
}
