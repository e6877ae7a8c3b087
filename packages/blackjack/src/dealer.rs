use crate::hand::{calculate_total, is_soft};
use crate::{Card, CardObserver, DealerRuleset, RandomSource, Shoe, ShoeError};

/// Chance the aggressive dealer draws on hard 17.
pub const AGGRESSIVE_HARD_17_HIT_CHANCE: f64 = 0.35;
/// Chance the aggressive dealer draws on hard 18.
pub const AGGRESSIVE_HARD_18_HIT_CHANCE: f64 = 0.15;

/// Whether the dealer takes another card.
///
/// Only the aggressive ruleset consumes randomness, and only on hard 17 or
/// hard 18.
pub fn should_dealer_hit<R: RandomSource + ?Sized>(
    cards: &[Card],
    ruleset: DealerRuleset,
    rng: &mut R,
) -> bool {
    let total = calculate_total(cards);
    if total < 17 {
        return true;
    }
    let soft = is_soft(cards);

    match ruleset {
        DealerRuleset::Conservative => false,
        DealerRuleset::Standard => total == 17 && soft,
        DealerRuleset::Aggressive => match (total, soft) {
            (17, true) => true,
            (17, false) => rng.next_unit() < AGGRESSIVE_HARD_17_HIT_CHANCE,
            (18, false) => rng.next_unit() < AGGRESSIVE_HARD_18_HIT_CHANCE,
            _ => false,
        },
    }
}

/// Draws for the dealer until the policy says stand. Returns the final total.
pub fn play_dealer_hand<R, O>(
    dealer_cards: &mut Vec<Card>,
    shoe: &mut Shoe,
    ruleset: DealerRuleset,
    rng: &mut R,
    observer: &mut O,
) -> Result<u8, ShoeError>
where
    R: RandomSource + ?Sized,
    O: CardObserver + ?Sized,
{
    while should_dealer_hit(dealer_cards, ruleset, rng) {
        let card = shoe.deal_observed(observer)?;
        log::debug!("Dealer draws {}", card);
        dealer_cards.push(card);
    }
    Ok(calculate_total(dealer_cards))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Rank, ScriptedSource, Suit};

    fn hand(labels: &[&str]) -> Vec<Card> {
        labels
            .iter()
            .map(|l| Card::new(Rank::from_label(l).unwrap(), Suit::Hearts))
            .collect()
    }

    struct Ignore;

    impl CardObserver for Ignore {
        fn on_card_dealt(&mut self, _card: Card) {}
    }

    #[test]
    fn test_everyone_hits_below_17() {
        let mut rng = ScriptedSource::default();
        for ruleset in [
            DealerRuleset::Conservative,
            DealerRuleset::Standard,
            DealerRuleset::Aggressive,
        ] {
            assert!(should_dealer_hit(&hand(&["10", "6"]), ruleset, &mut rng));
            assert!(should_dealer_hit(&hand(&["A", "5"]), ruleset, &mut rng));
        }
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn test_conservative_stands_on_soft_17() {
        let mut rng = ScriptedSource::default();
        assert!(!should_dealer_hit(
            &hand(&["A", "6"]),
            DealerRuleset::Conservative,
            &mut rng
        ));
        assert!(!should_dealer_hit(
            &hand(&["10", "7"]),
            DealerRuleset::Conservative,
            &mut rng
        ));
    }

    #[test]
    fn test_standard_hits_soft_17_only() {
        let mut rng = ScriptedSource::default();
        assert!(should_dealer_hit(
            &hand(&["A", "6"]),
            DealerRuleset::Standard,
            &mut rng
        ));
        assert!(!should_dealer_hit(
            &hand(&["10", "7"]),
            DealerRuleset::Standard,
            &mut rng
        ));
        assert!(!should_dealer_hit(
            &hand(&["A", "7"]),
            DealerRuleset::Standard,
            &mut rng
        ));
    }

    #[test]
    fn test_aggressive_hard_17_uses_draw() {
        let hard_17 = hand(&["10", "7"]);
        let mut rng = ScriptedSource::new([0.34, 0.35, 0.0]);
        assert!(should_dealer_hit(&hard_17, DealerRuleset::Aggressive, &mut rng));
        assert!(!should_dealer_hit(&hard_17, DealerRuleset::Aggressive, &mut rng));
        assert!(should_dealer_hit(&hard_17, DealerRuleset::Aggressive, &mut rng));
        assert_eq!(rng.consumed(), 3);
    }

    #[test]
    fn test_aggressive_hard_18_uses_draw() {
        let hard_18 = hand(&["10", "8"]);
        let mut rng = ScriptedSource::new([0.14, 0.15]);
        assert!(should_dealer_hit(&hard_18, DealerRuleset::Aggressive, &mut rng));
        assert!(!should_dealer_hit(&hard_18, DealerRuleset::Aggressive, &mut rng));
    }

    #[test]
    fn test_aggressive_soft_totals() {
        let mut rng = ScriptedSource::default();
        assert!(should_dealer_hit(
            &hand(&["A", "6"]),
            DealerRuleset::Aggressive,
            &mut rng
        ));
        // soft 18 and hard 19 never draw
        assert!(!should_dealer_hit(
            &hand(&["A", "7"]),
            DealerRuleset::Aggressive,
            &mut rng
        ));
        assert!(!should_dealer_hit(
            &hand(&["10", "9"]),
            DealerRuleset::Aggressive,
            &mut rng
        ));
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn test_play_dealer_hand_draws_until_standing() {
        let top = hand(&["2", "3", "10"]);
        let mut shoe = Shoe::stacked(1, &top).unwrap();
        let mut rng = ScriptedSource::default();
        let mut dealer = vec![
            Card::new(Rank::Four, Suit::Clubs),
            Card::new(Rank::Six, Suit::Clubs),
        ];
        let total = play_dealer_hand(
            &mut dealer,
            &mut shoe,
            DealerRuleset::Standard,
            &mut rng,
            &mut Ignore,
        )
        .unwrap();
        // 10 -> 12 -> 15 -> 25
        assert_eq!(total, 25);
        assert_eq!(dealer.len(), 5);
    }
}
