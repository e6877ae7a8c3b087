use super::*;
use crate::Suit;

fn card(label: &str) -> Card {
    Card::new(Rank::from_label(label).unwrap(), Suit::Diamonds)
}

fn cards(labels: &[&str]) -> Vec<Card> {
    labels.iter().map(|l| card(l)).collect()
}

#[test]
fn test_hard_16_vs_10_surrenders_when_allowed() {
    let player = cards(&["10", "6"]);
    assert_eq!(
        optimal_move(&player, &card("K"), true, false, true),
        OptimalMove::Surrender
    );
}

#[test]
fn test_hard_16_vs_10_falls_back_to_hit() {
    let player = cards(&["10", "6"]);
    assert_eq!(
        optimal_move(&player, &card("K"), true, false, false),
        OptimalMove::Hit
    );
}

#[test]
fn test_hard_double_falls_back_to_hit() {
    let player = cards(&["6", "5"]);
    assert_eq!(
        optimal_move(&player, &card("6"), true, false, false),
        OptimalMove::Double
    );
    assert_eq!(
        optimal_move(&player, &card("6"), false, false, false),
        OptimalMove::Hit
    );
}

#[test]
fn test_soft_double_falls_back_to_hit() {
    // A-7 vs 4 is a double; without doubling the chart falls back to Hit.
    let player = cards(&["A", "7"]);
    assert_eq!(
        optimal_move(&player, &card("4"), true, false, false),
        OptimalMove::Double
    );
    assert_eq!(
        optimal_move(&player, &card("4"), false, false, false),
        OptimalMove::Hit
    );
    assert_eq!(
        optimal_move(&player, &card("7"), false, false, false),
        OptimalMove::Stand
    );
}

#[test]
fn test_pairs_use_pair_chart_only_when_splitting() {
    let eights = cards(&["8", "8"]);
    assert_eq!(
        optimal_move(&eights, &card("10"), true, true, true),
        OptimalMove::Split
    );
    // Without splitting, 8-8 is hard 16 vs 10.
    assert_eq!(
        optimal_move(&eights, &card("10"), true, false, true),
        OptimalMove::Surrender
    );
    assert_eq!(
        optimal_move(&eights, &card("10"), true, false, false),
        OptimalMove::Hit
    );
}

#[test]
fn test_pair_of_fives_doubles_or_hits() {
    let fives = cards(&["5", "5"]);
    assert_eq!(
        optimal_move(&fives, &card("9"), true, true, false),
        OptimalMove::Double
    );
    assert_eq!(
        optimal_move(&fives, &card("9"), false, true, false),
        OptimalMove::Hit
    );
}

#[test]
fn test_ten_value_pairs_stand() {
    let kings = cards(&["K", "K"]);
    assert_eq!(
        optimal_move(&kings, &card("6"), true, true, false),
        OptimalMove::Stand
    );
    let nines = cards(&["9", "9"]);
    assert_eq!(
        optimal_move(&nines, &card("7"), true, true, false),
        OptimalMove::Stand
    );
    assert_eq!(
        optimal_move(&nines, &card("8"), true, true, false),
        OptimalMove::Split
    );
}

#[test]
fn test_unsplittable_aces_default_to_hit() {
    // A-A is neither soft (22 unadjusted) nor in the pair chart without
    // splitting, so it reads as hard 12.
    let aces = cards(&["A", "A"]);
    assert_eq!(
        optimal_move(&aces, &card("4"), true, false, false),
        OptimalMove::Stand
    );
    assert_eq!(
        optimal_move(&aces, &card("4"), true, true, false),
        OptimalMove::Split
    );
}

#[test]
fn test_no_matching_entry_defaults_to_hit() {
    let situation = Situation {
        player_total: 4,
        is_soft: false,
        pair_rank: None,
        dealer_upcard: 10,
        can_double: true,
        can_split: false,
        can_surrender: false,
    };
    assert_eq!(optimal_action(&situation), OptimalMove::Hit);

    let soft_12 = Situation {
        player_total: 12,
        is_soft: true,
        ..situation
    };
    assert_eq!(optimal_action(&soft_12), OptimalMove::Hit);
}

#[test]
fn test_table_lookup_bounds() {
    assert_eq!(hard_entry(4, 10), None);
    assert_eq!(hard_entry(22, 10), None);
    assert_eq!(hard_entry(16, 1), None);
    assert_eq!(hard_entry(16, 10), Some(OptimalMove::Surrender));
    assert_eq!(soft_entry(12, 5), None);
    assert_eq!(soft_entry(18, 11), Some(OptimalMove::Hit));
    assert_eq!(pair_entry(Rank::Queen, 5), Some(OptimalMove::Stand));
    assert_eq!(pair_entry(Rank::Ace, 11), Some(OptimalMove::Split));
}

#[test]
fn test_situation_from_cards() {
    let s = Situation::from_cards(&cards(&["10", "6"]), &card("9"), true, true, true);
    assert_eq!(s.player_total, 16);
    assert!(!s.is_soft);
    assert_eq!(s.pair_rank, None);
    assert_eq!(s.dealer_upcard, 9);

    let s = Situation::from_cards(&cards(&["A", "6"]), &card("A"), true, true, true);
    assert!(s.is_soft);
    assert_eq!(s.dealer_upcard, 11);
}

#[test]
fn test_expected_value_is_finite_everywhere() {
    for total in 4..=21u8 {
        for up in 2..=11u8 {
            for action in [
                OptimalMove::Hit,
                OptimalMove::Stand,
                OptimalMove::Double,
                OptimalMove::Split,
                OptimalMove::Surrender,
            ] {
                for soft in [false, true] {
                    assert!(estimate_expected_value(total, up, action, soft).is_finite());
                }
            }
        }
    }
}

#[test]
fn test_expected_value_signs_in_clear_cases() {
    assert!(estimate_expected_value(20, 6, OptimalMove::Stand, false) > 0.0);
    assert!(estimate_expected_value(12, 10, OptimalMove::Stand, false) < 0.0);
    assert!(estimate_expected_value(11, 5, OptimalMove::Double, false) > 0.0);
    assert!(estimate_expected_value(19, 11, OptimalMove::Hit, false) < 0.0);
    assert_eq!(
        estimate_expected_value(16, 10, OptimalMove::Surrender, false),
        -0.5
    );
    assert_eq!(estimate_expected_value(23, 10, OptimalMove::Stand, false), -1.0);
}

#[test]
fn test_render_chart_has_row_per_total() {
    let hard = render_chart(Chart::Hard);
    assert_eq!(hard.lines().count(), 1 + 17);
    assert!(hard.contains("16    S  S  S  S  S  H  H  R  R  R"));
    let soft = render_chart(Chart::Soft);
    assert!(soft.contains("A2"));
    assert!(soft.contains("A10"));
    let pairs = render_chart(Chart::Pairs);
    assert!(pairs.lines().any(|l| l.starts_with("A-A")));
}
