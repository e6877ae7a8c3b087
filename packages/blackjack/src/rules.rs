use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the dealer plays out their hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealerRuleset {
    /// Stands on every 17
    Conservative,
    /// Hits soft 17
    #[default]
    Standard,
    /// Hits soft 17 and sometimes hard 17/18
    Aggressive,
}

/// Payout schedule for winning hands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoutRuleset {
    Easy,
    #[default]
    Standard,
    Hard,
}

/// Payout multiplier as a ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutRatio {
    pub numerator: u16,
    pub denominator: u16,
}

impl PayoutRatio {
    pub const THREE_TO_TWO: Self = Self {
        numerator: 3,
        denominator: 2,
    };
    pub const SIX_TO_FIVE: Self = Self {
        numerator: 6,
        denominator: 5,
    };
    pub const EIGHT_TO_FIVE: Self = Self {
        numerator: 8,
        denominator: 5,
    };
    pub const ELEVEN_TO_TEN: Self = Self {
        numerator: 11,
        denominator: 10,
    };
    pub const SEVENTEEN_TO_TWENTY: Self = Self {
        numerator: 17,
        denominator: 20,
    };
    pub const ONE_TO_ONE: Self = Self {
        numerator: 1,
        denominator: 1,
    };

    pub fn new(numerator: u16, denominator: u16) -> Result<Self, ConfigError> {
        if denominator == 0 {
            return Err(ConfigError::Malformed(
                "Denominator cannot be zero".to_string(),
            ));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Floor of `bet * numerator / denominator`, exact for every bet.
    pub fn calculate_payout(&self, bet: u64) -> u64 {
        let scaled = bet as u128 * self.numerator as u128 / self.denominator as u128;
        u64::try_from(scaled).unwrap_or(u64::MAX)
    }
}

impl PayoutRuleset {
    pub fn blackjack_ratio(&self) -> PayoutRatio {
        match self {
            PayoutRuleset::Easy => PayoutRatio::EIGHT_TO_FIVE,
            PayoutRuleset::Standard => PayoutRatio::THREE_TO_TWO,
            PayoutRuleset::Hard => PayoutRatio::SIX_TO_FIVE,
        }
    }

    pub fn win_ratio(&self) -> PayoutRatio {
        match self {
            PayoutRuleset::Easy => PayoutRatio::ELEVEN_TO_TEN,
            PayoutRuleset::Standard => PayoutRatio::ONE_TO_ONE,
            PayoutRuleset::Hard => PayoutRatio::SEVENTEEN_TO_TWENTY,
        }
    }
}

impl FromStr for DealerRuleset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "conservative" => Ok(DealerRuleset::Conservative),
            "standard" => Ok(DealerRuleset::Standard),
            "aggressive" => Ok(DealerRuleset::Aggressive),
            _ => Err(ConfigError::UnknownDealerRuleset(s.to_string())),
        }
    }
}

impl FromStr for PayoutRuleset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(PayoutRuleset::Easy),
            "standard" => Ok(PayoutRuleset::Standard),
            "hard" => Ok(PayoutRuleset::Hard),
            _ => Err(ConfigError::UnknownPayoutRuleset(s.to_string())),
        }
    }
}

impl fmt::Display for DealerRuleset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DealerRuleset::Conservative => "conservative",
            DealerRuleset::Standard => "standard",
            DealerRuleset::Aggressive => "aggressive",
        })
    }
}

impl fmt::Display for PayoutRuleset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PayoutRuleset::Easy => "easy",
            PayoutRuleset::Standard => "standard",
            PayoutRuleset::Hard => "hard",
        })
    }
}

/// Table configuration chosen when a session is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TableRules {
    /// Number of decks in the shoe
    pub decks: u8,
    pub dealer_ruleset: DealerRuleset,
    pub payout_ruleset: PayoutRuleset,
}

impl Default for TableRules {
    fn default() -> Self {
        Self {
            decks: 6,
            dealer_ruleset: DealerRuleset::Standard,
            payout_ruleset: PayoutRuleset::Standard,
        }
    }
}

impl TableRules {
    pub fn new(
        decks: u8,
        dealer_ruleset: DealerRuleset,
        payout_ruleset: PayoutRuleset,
    ) -> Result<Self, ConfigError> {
        let rules = Self {
            decks,
            dealer_ruleset,
            payout_ruleset,
        };
        rules.validate()?;
        Ok(rules)
    }

    /// Single deck, dealer stands on all 17s, 3:2 blackjack
    pub fn single_deck() -> Self {
        Self {
            decks: 1,
            dealer_ruleset: DealerRuleset::Conservative,
            payout_ruleset: PayoutRuleset::Standard,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.decks == 0 {
            return Err(ConfigError::InvalidDecks(self.decks));
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration such as
    /// `{"decks": 6, "dealerRuleset": "standard", "payoutRuleset": "easy"}`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let rules: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        rules.validate()?;
        Ok(rules)
    }
}
