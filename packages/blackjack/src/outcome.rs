use crate::PayoutRuleset;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandResult {
    Win,
    Lose,
    Push,
}

/// Settles one hand against the dealer.
///
/// Precedence: player bust, dealer bust, blackjacks, then totals. A player
/// bust loses even when the dealer also busts.
pub fn determine_winner(
    player_total: u8,
    dealer_total: u8,
    player_blackjack: bool,
    dealer_blackjack: bool,
    player_bust: bool,
    dealer_bust: bool,
) -> HandResult {
    if player_bust {
        return HandResult::Lose;
    }
    if dealer_bust {
        return HandResult::Win;
    }
    match (player_blackjack, dealer_blackjack) {
        (true, true) => return HandResult::Push,
        (true, false) => return HandResult::Win,
        (false, true) => return HandResult::Lose,
        (false, false) => {}
    }
    match player_total.cmp(&dealer_total) {
        std::cmp::Ordering::Greater => HandResult::Win,
        std::cmp::Ordering::Less => HandResult::Lose,
        std::cmp::Ordering::Equal => HandResult::Push,
    }
}

/// Net coins for a settled hand: positive on a win, `-bet` on a loss.
/// Winning amounts are floored.
pub fn calculate_payout(
    bet: u64,
    result: HandResult,
    is_blackjack: bool,
    ruleset: PayoutRuleset,
) -> i64 {
    let bet_signed = i64::try_from(bet).unwrap_or(i64::MAX);
    match result {
        HandResult::Lose => -bet_signed,
        HandResult::Push => 0,
        HandResult::Win => {
            let ratio = if is_blackjack {
                ruleset.blackjack_ratio()
            } else {
                ruleset.win_ratio()
            };
            i64::try_from(ratio.calculate_payout(bet)).unwrap_or(i64::MAX)
        }
    }
}

/// Net coins for a surrendered hand; the player keeps half the bet, rounded down.
pub fn surrender_payout(bet: u64) -> i64 {
    let forfeited = bet - bet / 2;
    -i64::try_from(forfeited).unwrap_or(i64::MAX)
}
