use crate::shoe::CARDS_PER_DECK;
use crate::{Card, CardObserver, OptimalMove, Rank};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

/// Hi-Lo tag: 2-6 count +1, 7-9 count 0, tens and aces count -1.
pub fn hi_lo_value(card: &Card) -> i32 {
    match card.rank {
        Rank::Two | Rank::Three | Rank::Four | Rank::Five | Rank::Six => 1,
        Rank::Seven | Rank::Eight | Rank::Nine => 0,
        Rank::Ten | Rank::Jack | Rank::Queen | Rank::King | Rank::Ace => -1,
    }
}

/// Snapshot of drill grading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrillStats {
    pub guesses: u32,
    pub correct: u32,
    /// Correct guesses as a percentage, 0 before the first guess
    pub accuracy: f64,
    /// Cards per second since the first card
    pub cards_per_second: f64,
}

/// Hi-Lo running/true count plus drill grading.
///
/// Fed by the shoe through [`CardObserver`]. The count survives round
/// boundaries and reshuffles; only [`CountTracker::reset_drill`] clears it.
#[derive(Debug, Clone)]
pub struct CountTracker {
    total_decks: u8,
    running_count: i32,
    cards_dealt: u32,
    first_card_at: Option<Instant>,
    guesses: u32,
    correct: u32,
}

impl CountTracker {
    pub fn new(total_decks: u8) -> Self {
        Self {
            total_decks,
            running_count: 0,
            cards_dealt: 0,
            first_card_at: None,
            guesses: 0,
            correct: 0,
        }
    }

    pub fn observe(&mut self, card: Card) {
        self.observe_at(card, Instant::now());
    }

    /// Counts `card` as dealt at `now`.
    pub fn observe_at(&mut self, card: Card, now: Instant) {
        if self.first_card_at.is_none() {
            self.first_card_at = Some(now);
        }
        self.running_count += hi_lo_value(&card);
        self.cards_dealt += 1;
    }

    pub fn running_count(&self) -> i32 {
        self.running_count
    }

    pub fn cards_dealt(&self) -> u32 {
        self.cards_dealt
    }

    pub fn total_decks(&self) -> u8 {
        self.total_decks
    }

    /// Never below half a deck, so the true count stays bounded.
    pub fn decks_remaining(&self) -> f64 {
        let used = self.cards_dealt as f64 / CARDS_PER_DECK as f64;
        (self.total_decks as f64 - used).max(0.5)
    }

    /// Running count per remaining deck, to one decimal place (ties round up).
    pub fn true_count(&self) -> f64 {
        let raw = self.running_count as f64 / self.decks_remaining();
        (raw * 10.0 + 0.5).floor() / 10.0
    }

    /// Grades a running-count guess against the count after the last card
    /// dealt. Returns whether the guess was right.
    pub fn record_guess(&mut self, value: i32) -> bool {
        let expected = self.running_count;
        let correct = value == expected;
        self.guesses += 1;
        if correct {
            self.correct += 1;
        }
        log::debug!(
            "Drill guess {} vs {} ({})",
            value,
            expected,
            if correct { "correct" } else { "wrong" }
        );
        correct
    }

    pub fn accuracy(&self) -> f64 {
        if self.guesses == 0 {
            return 0.0;
        }
        self.correct as f64 / self.guesses as f64 * 100.0
    }

    /// Cards per second between the first card and `now`.
    pub fn speed_at(&self, now: Instant) -> f64 {
        let Some(start) = self.first_card_at else {
            return 0.0;
        };
        let elapsed = now.saturating_duration_since(start).as_secs_f64();
        if elapsed <= 0.0 {
            return 0.0;
        }
        self.cards_dealt as f64 / elapsed
    }

    pub fn speed(&self) -> f64 {
        self.speed_at(Instant::now())
    }

    pub fn drill_stats_at(&self, now: Instant) -> DrillStats {
        DrillStats {
            guesses: self.guesses,
            correct: self.correct,
            accuracy: self.accuracy(),
            cards_per_second: self.speed_at(now),
        }
    }

    pub fn drill_stats(&self) -> DrillStats {
        self.drill_stats_at(Instant::now())
    }

    /// Clears the count and drill grading. The deck count is kept.
    pub fn reset_drill(&mut self) {
        *self = Self::new(self.total_decks);
    }

    /// Deviation from basic strategy justified by the current true count.
    pub fn deviation(
        &self,
        table: &DeviationTable,
        player_total: u8,
        dealer_upcard: u8,
    ) -> Option<OptimalMove> {
        table.get_deviation(player_total, dealer_upcard, self.true_count())
    }
}

impl CardObserver for CountTracker {
    fn on_card_dealt(&mut self, card: Card) {
        self.observe(card);
    }
}

/// Key for a count-based strategy deviation. Displays as `16v10`, with the
/// dealer up-card by label (`A` for an ace).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviationKey {
    pub player_total: u8,
    /// Dealer up-card value, 2..=11 with Ace = 11
    pub dealer_upcard: u8,
}

impl DeviationKey {
    pub fn new(player_total: u8, dealer_upcard: u8) -> Self {
        Self {
            player_total,
            dealer_upcard,
        }
    }
}

impl fmt::Display for DeviationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dealer_upcard == 11 {
            write!(f, "{}vA", self.player_total)
        } else {
            write!(f, "{}v{}", self.player_total, self.dealer_upcard)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Deviation {
    pub action: OptimalMove,
    /// Minimum true count at which the deviation applies
    pub threshold: f64,
}

#[derive(Debug, Clone, Default)]
pub struct DeviationTable {
    entries: HashMap<DeviationKey, Deviation>,
}

impl DeviationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index plays where a rising count favours standing or doubling.
    pub fn hi_lo() -> Self {
        let mut table = Self::new();
        for (total, up, action, threshold) in [
            (16, 10, OptimalMove::Stand, 0.0),
            (15, 10, OptimalMove::Stand, 4.0),
            (16, 9, OptimalMove::Stand, 5.0),
            (12, 3, OptimalMove::Stand, 2.0),
            (12, 2, OptimalMove::Stand, 3.0),
            (10, 10, OptimalMove::Double, 4.0),
            (10, 11, OptimalMove::Double, 4.0),
            (11, 11, OptimalMove::Double, 1.0),
            (9, 2, OptimalMove::Double, 1.0),
            (9, 7, OptimalMove::Double, 3.0),
        ] {
            table.insert(DeviationKey::new(total, up), action, threshold);
        }
        table
    }

    pub fn insert(&mut self, key: DeviationKey, action: OptimalMove, threshold: f64) {
        self.entries.insert(key, Deviation { action, threshold });
    }

    pub fn entry(&self, key: &DeviationKey) -> Option<&Deviation> {
        self.entries.get(key)
    }

    /// The deviated action when `true_count` reaches the threshold; `None`
    /// means play basic strategy.
    pub fn get_deviation(
        &self,
        player_total: u8,
        dealer_upcard: u8,
        true_count: f64,
    ) -> Option<OptimalMove> {
        self.entries
            .get(&DeviationKey::new(player_total, dealer_upcard))
            .filter(|d| true_count >= d.threshold)
            .map(|d| d.action)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
