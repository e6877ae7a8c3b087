use crate::error::EngineError;
use crate::msg::{PlayerAction, RoundSummary};
use crate::state::{PlayerHand, RoundPhase, RoundState};
use blackjack::{
    calculate_payout, calculate_total, can_double, can_split, can_surrender, determine_winner,
    estimate_expected_value, is_blackjack, optimal_action, play_dealer_hand, surrender_payout,
    Card, ConfigError, CountTracker, DeviationTable, HandResult, OptimalMove, RandomSource,
    RngSource, Shoe, ShoeError, Situation, TableRules,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// One player's game at one table.
///
/// Owns the shoe, the count tracker and the current round. Actions that do
/// not apply in the current phase are ignored; callers are expected to gate
/// them with the guard predicates. A shoe failure aborts the round and every
/// action returns [`EngineError::RoundAborted`] until [`GameSession::reset_game`].
pub struct GameSession<R: RandomSource> {
    rules: TableRules,
    shoe: Shoe,
    counter: CountTracker,
    deviations: DeviationTable,
    round: RoundState,
    rng: R,
    aborted: bool,
    last_summary: Option<RoundSummary>,
}

impl GameSession<RngSource<StdRng>> {
    /// Session shuffled from OS entropy.
    pub fn from_entropy(rules: TableRules) -> Result<Self, EngineError> {
        Self::new(rules, RngSource::new(StdRng::from_entropy()))
    }

    /// Reproducible session; the same seed replays the same shoe.
    pub fn seeded(rules: TableRules, seed: u64) -> Result<Self, EngineError> {
        Self::new(rules, RngSource::new(StdRng::seed_from_u64(seed)))
    }
}

impl<R: RandomSource> GameSession<R> {
    pub fn new(rules: TableRules, mut rng: R) -> Result<Self, EngineError> {
        rules.validate()?;
        let shoe = Shoe::new(rules.decks, &mut rng)?;
        Ok(Self::assemble(rules, shoe, rng))
    }

    /// Session over a prepared shoe, e.g. [`Shoe::stacked`] for replays.
    pub fn with_shoe(rules: TableRules, shoe: Shoe, rng: R) -> Result<Self, EngineError> {
        rules.validate()?;
        if shoe.num_decks() != rules.decks {
            return Err(ConfigError::Malformed(format!(
                "shoe holds {} decks but the table is configured for {}",
                shoe.num_decks(),
                rules.decks
            ))
            .into());
        }
        Ok(Self::assemble(rules, shoe, rng))
    }

    fn assemble(rules: TableRules, shoe: Shoe, rng: R) -> Self {
        log::info!(
            "New session: {} decks, {} dealer, {} payouts",
            rules.decks,
            rules.dealer_ruleset,
            rules.payout_ruleset
        );
        Self {
            counter: CountTracker::new(rules.decks),
            deviations: DeviationTable::hi_lo(),
            round: RoundState::default(),
            rules,
            shoe,
            rng,
            aborted: false,
            last_summary: None,
        }
    }

    /// Dispatches a player decision.
    pub fn execute(&mut self, action: PlayerAction) -> Result<(), EngineError> {
        match action {
            PlayerAction::Hit => self.hit(),
            PlayerAction::Stand => self.stand(),
            PlayerAction::Double => self.double(),
            PlayerAction::Split => self.split(),
            PlayerAction::Surrender => self.surrender(),
        }
    }

    /// Starts a round: two cards each, player first. Naturals settle at once.
    pub fn deal_initial_cards(&mut self, bet: u64) -> Result<(), EngineError> {
        self.ensure_not_aborted()?;
        if !matches!(self.round.phase, RoundPhase::Betting | RoundPhase::GameOver) {
            log::debug!("Ignoring deal during {:?}", self.round.phase);
            return Ok(());
        }

        self.round = RoundState::new(bet);
        self.shoe.start_new_round(&mut self.rng);
        log::info!(
            "Dealing round: bet {}, {} cards in shoe",
            bet,
            self.shoe.remaining_cards()
        );

        for _ in 0..2 {
            let card = self.draw()?;
            if let Some(player) = self.round.hands.first_mut() {
                player.hand.add_card(card);
            }
            let card = self.draw()?;
            self.round.dealer_hand.push(card);
        }
        self.round.phase = RoundPhase::Playing;

        let player_natural = self
            .round
            .hands
            .first()
            .is_some_and(|h| h.hand.is_natural());
        let dealer_natural = is_blackjack(&self.round.dealer_hand);
        if player_natural || dealer_natural {
            log::debug!(
                "Natural on the deal (player: {}, dealer: {})",
                player_natural,
                dealer_natural
            );
            self.round.phase = RoundPhase::DealerTurn;
            self.settle_round();
        }
        Ok(())
    }

    pub fn hit(&mut self) -> Result<(), EngineError> {
        self.ensure_not_aborted()?;
        if !self.can_act() {
            log::debug!("Ignoring hit");
            return Ok(());
        }
        let card = self.draw()?;
        if let Some(player) = self.round.active_hand_mut() {
            player.hand.add_card(card);
        }
        self.advance_if_finished()
    }

    pub fn stand(&mut self) -> Result<(), EngineError> {
        self.ensure_not_aborted()?;
        if !self.can_act() {
            log::debug!("Ignoring stand");
            return Ok(());
        }
        if let Some(player) = self.round.active_hand_mut() {
            player.hand.stood = true;
        }
        self.advance()
    }

    /// Doubles the stake, takes exactly one card and stands.
    pub fn double(&mut self) -> Result<(), EngineError> {
        self.ensure_not_aborted()?;
        let allowed = self.can_act()
            && self
                .round
                .active_hand()
                .is_some_and(|h| h.hand.cards.len() == 2 && !h.hand.doubled);
        if !allowed {
            log::debug!("Ignoring double");
            return Ok(());
        }
        let card = self.draw()?;
        if let Some(player) = self.round.active_hand_mut() {
            player.bet = player.bet.saturating_mul(2);
            player.hand.doubled = true;
            player.hand.add_card(card);
            player.hand.stood = true;
        }
        self.advance()
    }

    /// Splits a pair into two peer hands, each dealt one more card.
    pub fn split(&mut self) -> Result<(), EngineError> {
        self.ensure_not_aborted()?;
        let allowed = self.can_act()
            && !self.round.is_split()
            && self.round.active_hand().is_some_and(|h| h.hand.is_pair());
        if !allowed {
            log::debug!("Ignoring split");
            return Ok(());
        }

        let Some(first) = self.round.hands.first_mut() else {
            return Ok(());
        };
        let Some(moved) = first.hand.cards.pop() else {
            return Ok(());
        };
        first.hand.from_split = true;
        let mut second = PlayerHand::new(first.bet);
        second.hand.from_split = true;
        second.hand.add_card(moved);
        self.round.hands.push(second);
        self.round.active_hand_index = 0;

        for index in 0..self.round.hands.len() {
            let card = self.draw()?;
            self.round.hands[index].hand.add_card(card);
        }
        self.advance_if_finished()
    }

    /// Gives up the original hand for half the stake back.
    pub fn surrender(&mut self) -> Result<(), EngineError> {
        self.ensure_not_aborted()?;
        let allowed = self.can_act()
            && !self.round.is_split()
            && self
                .round
                .active_hand()
                .is_some_and(|h| can_surrender(&h.hand));
        if !allowed {
            log::debug!("Ignoring surrender");
            return Ok(());
        }
        if let Some(player) = self.round.active_hand_mut() {
            player.hand.surrendered = true;
        }
        self.advance()
    }

    /// Abandons the round. The shoe (including any pending reshuffle) and
    /// the count are left as they are.
    pub fn reset_game(&mut self) {
        if self.round.phase != RoundPhase::Betting {
            log::info!("Resetting round during {:?}", self.round.phase);
        }
        self.round = RoundState::default();
        self.aborted = false;
        self.shoe.end_round();
    }

    /// Basic-strategy hint for the active hand, given the player's remaining
    /// balance. `None` outside the Playing phase.
    pub fn get_optimal_move(&self, balance: u64) -> Option<OptimalMove> {
        self.situation(balance).map(|s| optimal_action(&s))
    }

    /// Count-based index play for the active hand, if the true count calls for one.
    pub fn count_deviation(&self) -> Option<OptimalMove> {
        if !self.can_act() {
            return None;
        }
        let player = self.round.active_hand()?;
        let up = self.round.dealer_upcard()?;
        self.counter
            .deviation(&self.deviations, player.hand.total(), up.value())
    }

    /// Advisory EV for taking `action` with the active hand.
    pub fn expected_value(&self, action: OptimalMove) -> Option<f64> {
        let player = self.round.active_hand()?;
        let up = self.round.dealer_upcard()?;
        Some(estimate_expected_value(
            player.hand.total(),
            up.value(),
            action,
            player.hand.is_soft(),
        ))
    }

    fn situation(&self, balance: u64) -> Option<Situation> {
        if !self.can_act() {
            return None;
        }
        let player = self.round.active_hand()?;
        let up = self.round.dealer_upcard()?;
        let first_hand = !self.round.is_split();
        Some(Situation::from_cards(
            &player.hand.cards,
            up,
            can_double(&player.hand, player.bet, balance),
            first_hand && can_split(&player.hand, player.bet, balance),
            first_hand && can_surrender(&player.hand),
        ))
    }

    /// Summary of the last settled round, handed over once.
    pub fn take_summary(&mut self) -> Option<RoundSummary> {
        self.last_summary.take()
    }

    pub fn record_count_guess(&mut self, value: i32) -> bool {
        self.counter.record_guess(value)
    }

    pub fn reset_count(&mut self) {
        self.counter.reset_drill();
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn phase(&self) -> RoundPhase {
        self.round.phase
    }

    pub fn rules(&self) -> &TableRules {
        &self.rules
    }

    pub fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    pub fn counter(&self) -> &CountTracker {
        &self.counter
    }

    pub fn dealer_upcard(&self) -> Option<&Card> {
        self.round.dealer_upcard()
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    fn can_act(&self) -> bool {
        !self.aborted
            && self.round.phase == RoundPhase::Playing
            && self
                .round
                .active_hand()
                .is_some_and(|h| !h.hand.is_finished())
    }

    fn ensure_not_aborted(&self) -> Result<(), EngineError> {
        if self.aborted {
            return Err(EngineError::RoundAborted);
        }
        Ok(())
    }

    fn draw(&mut self) -> Result<Card, EngineError> {
        match self.shoe.deal_observed(&mut self.counter) {
            Ok(card) => Ok(card),
            Err(e) => {
                self.abort(&e);
                Err(e.into())
            }
        }
    }

    fn abort(&mut self, err: &ShoeError) {
        log::error!(
            "Aborting round in {:?}: {}. Reset required",
            self.round.phase,
            err
        );
        self.aborted = true;
    }

    fn advance_if_finished(&mut self) -> Result<(), EngineError> {
        if self
            .round
            .active_hand()
            .is_some_and(|h| h.hand.is_finished())
        {
            self.advance()
        } else {
            Ok(())
        }
    }

    fn advance(&mut self) -> Result<(), EngineError> {
        if self.round.move_to_next_hand() {
            return Ok(());
        }
        self.round.phase = RoundPhase::DealerTurn;

        if self.round.hands.iter().any(|h| h.is_live()) {
            let played = play_dealer_hand(
                &mut self.round.dealer_hand,
                &mut self.shoe,
                self.rules.dealer_ruleset,
                &mut self.rng,
                &mut self.counter,
            );
            if let Err(e) = played {
                self.abort(&e);
                return Err(e.into());
            }
        }

        self.settle_round();
        Ok(())
    }

    fn settle_round(&mut self) {
        let dealer_total = calculate_total(&self.round.dealer_hand);
        let dealer_blackjack = is_blackjack(&self.round.dealer_hand);
        let dealer_bust = dealer_total > 21;
        let payout_ruleset = self.rules.payout_ruleset;

        let mut summary = RoundSummary::default();
        for player in &mut self.round.hands {
            let natural = player.hand.is_natural();
            let (result, payout) = if player.hand.surrendered {
                (HandResult::Lose, surrender_payout(player.bet))
            } else {
                let result = determine_winner(
                    player.hand.total(),
                    dealer_total,
                    natural,
                    dealer_blackjack,
                    player.hand.is_busted(),
                    dealer_bust,
                );
                (
                    result,
                    calculate_payout(player.bet, result, natural, payout_ruleset),
                )
            };
            player.result = Some(result);
            player.payout = payout;

            summary.hands_played += 1;
            if result == HandResult::Win {
                summary.hands_won += 1;
                if natural {
                    summary.blackjacks += 1;
                }
            }
            summary.coins_won += payout;
        }

        self.round.phase = RoundPhase::GameOver;
        self.shoe.end_round();
        log::info!(
            "Round settled: dealer {}, {}/{} hands won, net {}",
            dealer_total,
            summary.hands_won,
            summary.hands_played,
            summary.coins_won
        );
        self.last_summary = Some(summary);
    }
}
