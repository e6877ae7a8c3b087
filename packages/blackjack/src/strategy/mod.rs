use crate::hand::{calculate_total, is_pair, is_soft};
use crate::{Card, Rank};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod tables;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimalMove {
    Hit,
    Stand,
    Double,
    Split,
    Surrender,
}

impl OptimalMove {
    pub fn symbol(&self) -> &'static str {
        match self {
            OptimalMove::Hit => "H",
            OptimalMove::Stand => "S",
            OptimalMove::Double => "D",
            OptimalMove::Split => "P",
            OptimalMove::Surrender => "R",
        }
    }
}

impl fmt::Display for OptimalMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OptimalMove::Hit => "hit",
            OptimalMove::Stand => "stand",
            OptimalMove::Double => "double",
            OptimalMove::Split => "split",
            OptimalMove::Surrender => "surrender",
        })
    }
}

/// Everything the advisor needs about the player's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Situation {
    pub player_total: u8,
    pub is_soft: bool,
    /// Rank of a two-card pair, if the hand is one
    pub pair_rank: Option<Rank>,
    /// Dealer up-card value, 2..=11 with Ace = 11
    pub dealer_upcard: u8,
    pub can_double: bool,
    pub can_split: bool,
    pub can_surrender: bool,
}

impl Situation {
    pub fn from_cards(
        player_cards: &[Card],
        dealer_upcard: &Card,
        can_double: bool,
        can_split: bool,
        can_surrender: bool,
    ) -> Self {
        Self {
            player_total: calculate_total(player_cards),
            is_soft: is_soft(player_cards),
            pair_rank: is_pair(player_cards).then(|| player_cards[0].rank),
            dealer_upcard: dealer_upcard.value(),
            can_double,
            can_split,
            can_surrender,
        }
    }
}

fn dealer_column(upcard: u8) -> Option<usize> {
    (2..=11).contains(&upcard).then(|| (upcard - 2) as usize)
}

fn pair_row(rank: Rank) -> usize {
    match rank {
        Rank::Ace => 9,
        Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 8,
        other => (other.value() - 2) as usize,
    }
}

pub fn hard_entry(total: u8, dealer_upcard: u8) -> Option<OptimalMove> {
    if !(tables::HARD_MIN..=tables::HARD_MAX).contains(&total) {
        return None;
    }
    let col = dealer_column(dealer_upcard)?;
    Some(tables::HARD[(total - tables::HARD_MIN) as usize][col])
}

pub fn soft_entry(total: u8, dealer_upcard: u8) -> Option<OptimalMove> {
    if !(tables::SOFT_MIN..=tables::SOFT_MAX).contains(&total) {
        return None;
    }
    let col = dealer_column(dealer_upcard)?;
    Some(tables::SOFT[(total - tables::SOFT_MIN) as usize][col])
}

pub fn pair_entry(rank: Rank, dealer_upcard: u8) -> Option<OptimalMove> {
    let col = dealer_column(dealer_upcard)?;
    Some(tables::PAIRS[pair_row(rank)][col])
}

/// Basic-strategy action for a situation.
///
/// Pairs consult the pair chart only while splitting is allowed; otherwise
/// the hand is read as soft or hard. Any Double, Surrender or missing entry
/// the situation does not permit resolves to Hit.
pub fn optimal_action(situation: &Situation) -> OptimalMove {
    let up = situation.dealer_upcard;

    if let (Some(rank), true) = (situation.pair_rank, situation.can_split) {
        if let Some(entry) = pair_entry(rank, up) {
            return match entry {
                OptimalMove::Double if !situation.can_double => OptimalMove::Hit,
                other => other,
            };
        }
    }

    if situation.is_soft {
        return match soft_entry(situation.player_total, up) {
            Some(OptimalMove::Double) if !situation.can_double => OptimalMove::Hit,
            Some(entry) => entry,
            None => OptimalMove::Hit,
        };
    }

    match hard_entry(situation.player_total, up) {
        Some(OptimalMove::Double) if !situation.can_double => OptimalMove::Hit,
        Some(OptimalMove::Surrender) if !situation.can_surrender => OptimalMove::Hit,
        Some(entry) => entry,
        None => OptimalMove::Hit,
    }
}

/// Convenience form of [`optimal_action`] taking raw cards.
pub fn optimal_move(
    player_cards: &[Card],
    dealer_up_card: &Card,
    can_double: bool,
    can_split: bool,
    can_surrender: bool,
) -> OptimalMove {
    optimal_action(&Situation::from_cards(
        player_cards,
        dealer_up_card,
        can_double,
        can_split,
        can_surrender,
    ))
}

/// Rough expected value per unit bet, for display next to a hint.
///
/// Additive heuristic: a base value per action, nudged by how strong the
/// player total is and how weak the dealer up-card is. It is not a solved
/// EV and should not be used to pick actions.
pub fn estimate_expected_value(
    player_total: u8,
    dealer_upcard: u8,
    action: OptimalMove,
    is_soft: bool,
) -> f64 {
    if player_total > 21 {
        return -1.0;
    }
    let base = match action {
        OptimalMove::Stand => 0.0,
        OptimalMove::Hit => -0.1,
        OptimalMove::Double => -0.15,
        OptimalMove::Split => -0.05,
        OptimalMove::Surrender => return -0.5,
    };

    let dealer_adj = match dealer_upcard {
        2..=6 => 0.15,
        7..=9 => -0.05,
        _ => -0.2,
    };

    let total = player_total as f64;
    let player_adj = match action {
        OptimalMove::Stand => (total - 17.0) * 0.1,
        OptimalMove::Hit | OptimalMove::Double => {
            let mut adj = match player_total {
                0..=11 => 0.2,
                12..=16 => -0.1,
                _ => -0.4,
            };
            if is_soft {
                adj += 0.05;
            }
            adj
        }
        _ => 0.0,
    };

    let ev = base + dealer_adj + player_adj;
    match action {
        OptimalMove::Double => (ev * 2.0).clamp(-2.0, 2.0),
        _ => ev.clamp(-1.0, 1.5),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chart {
    Hard,
    Soft,
    Pairs,
}

/// Text rendering of one chart, one row per player hand.
pub fn render_chart(chart: Chart) -> String {
    let mut out = String::from("      2  3  4  5  6  7  8  9  10 A\n");
    let rows: Vec<(String, &[OptimalMove; 10])> = match chart {
        Chart::Hard => tables::HARD
            .iter()
            .enumerate()
            .map(|(i, row)| (format!("{}", tables::HARD_MIN as usize + i), row))
            .collect(),
        Chart::Soft => tables::SOFT
            .iter()
            .enumerate()
            .map(|(i, row)| (format!("A{}", tables::SOFT_MIN as usize + i - 11), row))
            .collect(),
        Chart::Pairs => tables::PAIRS
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let label = match i {
                    9 => "A-A".to_string(),
                    8 => "10-10".to_string(),
                    n => format!("{0}-{0}", n + 2),
                };
                (label, row)
            })
            .collect(),
    };
    for (label, row) in rows {
        let cells: Vec<&str> = row.iter().map(|m| m.symbol()).collect();
        out.push_str(&format!("{:<6}{}\n", label, cells.join("  ")));
    }
    out
}

#[cfg(test)]
mod tests;
