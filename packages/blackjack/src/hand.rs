use crate::Card;
use serde::{Deserialize, Serialize};

/// Best blackjack total for a hand.
///
/// Every Ace starts at 11; while the total is over 21 and an Ace is still
/// counted high, one Ace drops to 1. Returns the busted total if no
/// adjustment brings it to 21 or below.
pub fn calculate_total(cards: &[Card]) -> u8 {
    let mut total: u8 = 0;
    let mut aces = 0;

    for card in cards {
        if card.is_ace() {
            aces += 1;
        }
        total = total.saturating_add(card.value());
    }

    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    total
}

/// Sum with every Ace counted as 11.
fn unadjusted_total(cards: &[Card]) -> u16 {
    cards.iter().map(|c| c.value() as u16).sum()
}

/// A hand is soft when it holds an Ace and the sum with every Ace at 11
/// still fits in 21.
pub fn is_soft(cards: &[Card]) -> bool {
    cards.iter().any(|c| c.is_ace()) && unadjusted_total(cards) <= 21
}

/// Exactly two cards of the same rank label (K-K is a pair, K-Q is not).
pub fn is_pair(cards: &[Card]) -> bool {
    cards.len() == 2 && cards[0].rank == cards[1].rank
}

/// Exactly two cards totalling 21.
pub fn is_blackjack(cards: &[Card]) -> bool {
    cards.len() == 2 && calculate_total(cards) == 21
}

pub fn is_busted(cards: &[Card]) -> bool {
    calculate_total(cards) > 21
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    pub cards: Vec<Card>,
    pub doubled: bool,
    pub stood: bool,
    pub surrendered: bool,
    /// Hand was created by splitting; a two-card 21 here is not a natural.
    pub from_split: bool,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self {
            cards,
            ..Self::default()
        }
    }

    pub fn total(&self) -> u8 {
        calculate_total(&self.cards)
    }

    pub fn is_soft(&self) -> bool {
        is_soft(&self.cards)
    }

    pub fn is_pair(&self) -> bool {
        is_pair(&self.cards)
    }

    pub fn is_busted(&self) -> bool {
        is_busted(&self.cards)
    }

    pub fn is_blackjack(&self) -> bool {
        is_blackjack(&self.cards)
    }

    /// Two-card 21 on an unsplit hand.
    pub fn is_natural(&self) -> bool {
        !self.from_split && self.is_blackjack()
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn is_finished(&self) -> bool {
        self.stood || self.surrendered || self.total() >= 21
    }

    pub fn to_display(&self) -> String {
        self.cards
            .iter()
            .map(|c| c.to_display())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
