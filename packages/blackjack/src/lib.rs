mod card;
pub mod counting;
mod dealer;
mod error;
mod guards;
mod hand;
mod outcome;
mod random;
mod rules;
pub mod shoe;
pub mod strategy;

pub use card::{Card, Rank, Suit};
pub use counting::{hi_lo_value, CountTracker, Deviation, DeviationKey, DeviationTable, DrillStats};
pub use dealer::{
    play_dealer_hand, should_dealer_hit, AGGRESSIVE_HARD_17_HIT_CHANCE,
    AGGRESSIVE_HARD_18_HIT_CHANCE,
};
pub use error::{ConfigError, ShoeError};
pub use guards::{can_double, can_split, can_surrender};
pub use hand::{calculate_total, is_blackjack, is_busted, is_pair, is_soft, Hand};
pub use outcome::{calculate_payout, determine_winner, surrender_payout, HandResult};
pub use random::{RandomSource, RngSource, ScriptedSource};
pub use rules::{DealerRuleset, PayoutRatio, PayoutRuleset, TableRules};
pub use shoe::{CardObserver, Shoe};
pub use strategy::{estimate_expected_value, optimal_action, optimal_move, OptimalMove, Situation};
