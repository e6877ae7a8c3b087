use blackjack::{
    hi_lo_value, optimal_action, Card, DealerRuleset, HandResult, OptimalMove, PayoutRuleset,
    Rank, RngSource, ScriptedSource, Shoe, Situation, Suit, TableRules,
};
use juodzekas_trainer::{
    publish_summary, EngineError, GameSession, InMemoryStats, InMemoryWallet, PlayerAction,
    RoundPhase, SummarySink,
};
use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

fn card(rank: Rank, suit: Suit) -> Card {
    Card::new(rank, suit)
}

fn stacked_session(
    rules: TableRules,
    top: &[Card],
    rng: ScriptedSource,
) -> GameSession<ScriptedSource> {
    let shoe = Shoe::stacked(rules.decks, top).unwrap();
    GameSession::with_shoe(rules, shoe, rng).unwrap()
}

#[test]
fn test_sixteen_against_nine_prefers_surrender() {
    let top = [
        card(Rank::Ten, Suit::Hearts),
        card(Rank::Nine, Suit::Clubs),
        card(Rank::Six, Suit::Spades),
        card(Rank::Seven, Suit::Diamonds),
    ];
    let mut game = stacked_session(TableRules::single_deck(), &top, ScriptedSource::default());
    game.deal_initial_cards(10).unwrap();

    assert_eq!(game.phase(), RoundPhase::Playing);
    let hand = &game.round().hands[0].hand;
    assert_eq!(hand.total(), 16);
    assert!(!hand.is_soft());
    assert!(!hand.is_pair());
    assert_eq!(game.dealer_upcard().map(|c| c.value()), Some(9));

    assert_eq!(game.get_optimal_move(1_000), Some(OptimalMove::Surrender));

    let no_surrender = Situation::from_cards(
        &hand.cards,
        &card(Rank::Nine, Suit::Clubs),
        true,
        false,
        false,
    );
    assert_eq!(optimal_action(&no_surrender), OptimalMove::Hit);
}

#[test]
fn test_reshuffle_waits_for_next_round() {
    let named = [
        card(Rank::Two, Suit::Spades),
        card(Rank::Ten, Suit::Spades),
        card(Rank::Two, Suit::Hearts),
        card(Rank::Seven, Suit::Spades),
        card(Rank::Two, Suit::Diamonds),
        card(Rank::Two, Suit::Clubs),
        card(Rank::Three, Suit::Spades),
        card(Rank::Three, Suit::Hearts),
    ];
    let mut top: Vec<Card> = Card::deck()
        .into_iter()
        .filter(|c| !named.contains(c))
        .take(31)
        .collect();
    top.extend(named);

    let mut shoe = Shoe::stacked(1, &top).unwrap();
    for _ in 0..31 {
        shoe.deal_card().unwrap();
    }
    let rules = TableRules::single_deck();
    let mut game = GameSession::with_shoe(rules, shoe, ScriptedSource::default()).unwrap();

    // 21 cards is enough to start without reshuffling
    game.deal_initial_cards(10).unwrap();
    assert_eq!(game.shoe().shuffles(), 0);
    assert_eq!(game.shoe().remaining_cards(), 17);

    for _ in 0..4 {
        game.hit().unwrap();
    }
    assert_eq!(game.phase(), RoundPhase::Playing);
    assert_eq!(game.round().hands[0].hand.total(), 14);
    assert_eq!(game.shoe().remaining_cards(), 13);
    assert!(game.shoe().reshuffle_pending());
    assert_eq!(game.shoe().shuffles(), 0);
    assert_eq!(game.counter().running_count(), 5);

    game.reset_game();
    assert_eq!(game.phase(), RoundPhase::Betting);
    assert!(game.shoe().reshuffle_pending());
    assert_eq!(game.shoe().remaining_cards(), 13);

    game.deal_initial_cards(10).unwrap();
    assert_eq!(game.shoe().shuffles(), 1);
    assert!(!game.shoe().reshuffle_pending());
    assert_eq!(game.shoe().remaining_cards(), 48);

    // Known characteristic: the count carries across the reshuffle and only
    // a drill reset clears it.
    let dealt: i32 = game.round().hands[0]
        .hand
        .cards
        .iter()
        .chain(game.round().dealer_hand.iter())
        .map(hi_lo_value)
        .sum();
    assert_eq!(game.counter().running_count(), 5 + dealt);
    assert_eq!(game.counter().cards_dealt(), 12);

    game.reset_count();
    assert_eq!(game.counter().running_count(), 0);
}

#[test]
fn test_aggressive_dealer_hits_hard_17_on_low_draw() {
    let top = [
        card(Rank::Ten, Suit::Hearts),
        card(Rank::Ten, Suit::Clubs),
        card(Rank::Nine, Suit::Spades),
        card(Rank::Seven, Suit::Diamonds),
        card(Rank::Two, Suit::Diamonds),
    ];
    let rules = TableRules::new(1, DealerRuleset::Aggressive, PayoutRuleset::Standard).unwrap();

    let mut game = stacked_session(rules, &top, ScriptedSource::new([0.2]));
    game.deal_initial_cards(10).unwrap();
    game.stand().unwrap();
    assert_eq!(game.round().dealer_hand.len(), 3);
    assert_eq!(game.round().hands[0].result, Some(HandResult::Push));

    let mut game = stacked_session(rules, &top, ScriptedSource::new([0.5]));
    game.deal_initial_cards(10).unwrap();
    game.stand().unwrap();
    assert_eq!(game.round().dealer_hand.len(), 2);
    assert_eq!(game.round().hands[0].result, Some(HandResult::Win));
}

#[test]
fn test_payout_ruleset_applies_to_naturals() {
    let top = [
        card(Rank::Ace, Suit::Hearts),
        card(Rank::Five, Suit::Clubs),
        card(Rank::Queen, Suit::Spades),
        card(Rank::Nine, Suit::Diamonds),
    ];
    let rules = TableRules::from_json(r#"{"decks":1,"dealerRuleset":"standard","payoutRuleset":"hard"}"#)
        .unwrap();
    let mut game = stacked_session(rules, &top, ScriptedSource::default());
    game.deal_initial_cards(100).unwrap();
    assert_eq!(game.phase(), RoundPhase::GameOver);
    assert_eq!(game.take_summary().unwrap().coins_won, 120);

    let rules = TableRules::from_json(r#"{"decks":1,"dealerRuleset":"standard","payoutRuleset":"easy"}"#)
        .unwrap();
    let mut game = stacked_session(rules, &top, ScriptedSource::default());
    game.deal_initial_cards(100).unwrap();
    assert_eq!(game.take_summary().unwrap().coins_won, 160);
}

#[test]
fn test_invalid_config_rejected() {
    assert!(TableRules::from_json(r#"{"decks":0,"dealerRuleset":"standard","payoutRuleset":"easy"}"#).is_err());
    assert!(TableRules::from_json(r#"{"decks":2,"dealerRuleset":"lenient","payoutRuleset":"easy"}"#).is_err());

    let rules = TableRules {
        decks: 0,
        ..TableRules::default()
    };
    let result = GameSession::new(rules, RngSource::new(ChaCha8Rng::seed_from_u64(1)));
    assert!(matches!(result, Err(EngineError::Config(_))));
}

#[test]
fn test_reset_mid_round_keeps_count() {
    let mut game = GameSession::seeded(TableRules::default(), 11).unwrap();
    game.deal_initial_cards(10).unwrap();
    let count = game.counter().running_count();
    let remaining = game.shoe().remaining_cards();

    game.reset_game();
    assert_eq!(game.phase(), RoundPhase::Betting);
    assert!(game.round().hands.is_empty());
    assert!(!game.shoe().in_round());
    assert_eq!(game.counter().running_count(), count);
    assert_eq!(game.shoe().remaining_cards(), remaining);
}

#[test]
fn test_same_seed_replays_same_shoe() {
    let a = GameSession::seeded(TableRules::default(), 42).unwrap();
    let b = GameSession::seeded(TableRules::default(), 42).unwrap();
    let c = GameSession::seeded(TableRules::default(), 43).unwrap();
    assert_eq!(a.shoe().cards(), b.shoe().cards());
    assert_ne!(a.shoe().cards(), c.shoe().cards());
}

#[test]
fn test_basic_strategy_over_many_rounds() {
    let rng = RngSource::new(ChaCha8Rng::seed_from_u64(2024));
    let mut game = GameSession::new(TableRules::default(), rng).unwrap();
    let mut wallet = InMemoryWallet::new(10_000);
    let mut stats = InMemoryStats::default();
    let mut net = 0i64;

    for _ in 0..300 {
        game.deal_initial_cards(10).unwrap();
        let shuffles = game.shoe().shuffles();

        while game.phase() == RoundPhase::Playing {
            let best = game.get_optimal_move(wallet.balance()).unwrap();
            game.execute(PlayerAction::from(best)).unwrap();
            assert_eq!(game.shoe().shuffles(), shuffles);
        }

        assert_eq!(game.phase(), RoundPhase::GameOver);
        assert!(!game.shoe().in_round());
        let round = game.round();
        assert!(round.hands.iter().all(|h| h.result.is_some()));
        let payouts: i64 = round.hands.iter().map(|h| h.payout).sum();
        let hand_count = round.hands.len();

        let summary = game.take_summary().unwrap();
        assert_eq!(summary.coins_won, payouts);
        assert_eq!(summary.hands_played as usize, hand_count);
        net += summary.coins_won;

        let sinks: &mut [&mut dyn SummarySink] = &mut [&mut wallet, &mut stats];
        assert_eq!(publish_summary(&summary, sinks), 0);
    }

    assert_eq!(stats.rounds, 300);
    assert_eq!(stats.net_coins, net);
    assert_eq!(wallet.balance() as i64, 10_000 + net);
}
