use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShoeError {
    /// Dealing from an exhausted shoe. Round-boundary reshuffling should make
    /// this unreachable, so callers treat it as fatal for the round.
    #[error("Shoe is empty")]
    EmptyShoe,
    #[error("Invalid deck count: {0}")]
    InvalidDeckCount(u8),
    #[error("Card not available in shoe: {0}")]
    CardNotInShoe(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Number of decks must be at least 1, got {0}")]
    InvalidDecks(u8),
    #[error("Unknown dealer ruleset '{0}' (expected conservative, standard or aggressive)")]
    UnknownDealerRuleset(String),
    #[error("Unknown payout ruleset '{0}' (expected easy, standard or hard)")]
    UnknownPayoutRuleset(String),
    #[error("Malformed configuration: {0}")]
    Malformed(String),
}
