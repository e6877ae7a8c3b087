//! Action guards. Callers check these before asking the session to act;
//! `balance` is what the player still has available beyond the stake
//! already on the table.

use crate::Hand;

/// Two untouched cards and enough balance to match the bet.
pub fn can_double(hand: &Hand, bet: u64, balance: u64) -> bool {
    hand.cards.len() == 2 && !hand.doubled && !hand.stood && !hand.surrendered && balance >= bet
}

/// A two-card pair and enough balance to stake the second hand.
pub fn can_split(hand: &Hand, bet: u64, balance: u64) -> bool {
    hand.is_pair() && !hand.from_split && !hand.stood && balance >= bet
}

/// Only the original two-card hand may be surrendered.
pub fn can_surrender(hand: &Hand) -> bool {
    hand.cards.len() == 2
        && !hand.from_split
        && !hand.doubled
        && !hand.stood
        && !hand.surrendered
}
