use crate::error::CollaboratorError;
use crate::msg::RoundSummary;

/// Anything that consumes settled-round summaries: wallets, stats, challenges.
pub trait SummarySink {
    fn name(&self) -> &str;

    fn consume(&mut self, summary: &RoundSummary) -> Result<(), CollaboratorError>;
}

/// Hands a summary to every sink. A failing sink is logged and skipped; it
/// never affects the round. Returns the number of failures.
pub fn publish_summary(summary: &RoundSummary, sinks: &mut [&mut dyn SummarySink]) -> usize {
    let mut failures = 0;
    for sink in sinks.iter_mut() {
        if let Err(e) = sink.consume(summary) {
            log::warn!("Dropping round summary for {}: {}", sink.name(), e);
            failures += 1;
        }
    }
    failures
}

/// Coin balance that follows round results. Refuses summaries that would
/// take it below zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryWallet {
    balance: u64,
}

impl InMemoryWallet {
    pub fn new(balance: u64) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }
}

impl SummarySink for InMemoryWallet {
    fn name(&self) -> &str {
        "wallet"
    }

    fn consume(&mut self, summary: &RoundSummary) -> Result<(), CollaboratorError> {
        let delta = summary.coins_won;
        let updated = if delta >= 0 {
            self.balance.checked_add(delta.unsigned_abs())
        } else {
            self.balance.checked_sub(delta.unsigned_abs())
        };
        match updated {
            Some(balance) => {
                self.balance = balance;
                Ok(())
            }
            None => Err(CollaboratorError::new(
                self.name(),
                format!("balance {} cannot absorb {}", self.balance, delta),
            )),
        }
    }
}

/// Running totals across rounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InMemoryStats {
    pub rounds: u32,
    pub hands_played: u32,
    pub hands_won: u32,
    pub blackjacks: u32,
    pub net_coins: i64,
}

impl InMemoryStats {
    pub fn win_rate(&self) -> f64 {
        if self.hands_played == 0 {
            return 0.0;
        }
        self.hands_won as f64 / self.hands_played as f64
    }
}

impl SummarySink for InMemoryStats {
    fn name(&self) -> &str {
        "stats"
    }

    fn consume(&mut self, summary: &RoundSummary) -> Result<(), CollaboratorError> {
        self.rounds += 1;
        self.hands_played += summary.hands_played;
        self.hands_won += summary.hands_won;
        self.blackjacks += summary.blackjacks;
        self.net_coins = self.net_coins.saturating_add(summary.coins_won);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeGoal {
    HandsWon,
    Blackjacks,
    /// Net coins; losing rounds count against progress
    CoinsWon,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub goal: ChallengeGoal,
    pub target: i64,
    pub progress: i64,
}

impl Challenge {
    pub fn new(goal: ChallengeGoal, target: i64) -> Self {
        Self {
            goal,
            target,
            progress: 0,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= self.target
    }
}

/// Tracks progress towards a set of challenges. Completed challenges stop
/// accumulating.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryChallenges {
    challenges: Vec<Challenge>,
}

impl InMemoryChallenges {
    pub fn new(challenges: Vec<Challenge>) -> Self {
        Self { challenges }
    }

    pub fn challenges(&self) -> &[Challenge] {
        &self.challenges
    }

    pub fn completed(&self) -> usize {
        self.challenges.iter().filter(|c| c.is_complete()).count()
    }
}

impl SummarySink for InMemoryChallenges {
    fn name(&self) -> &str {
        "challenges"
    }

    fn consume(&mut self, summary: &RoundSummary) -> Result<(), CollaboratorError> {
        for challenge in self.challenges.iter_mut().filter(|c| !c.is_complete()) {
            let step = match challenge.goal {
                ChallengeGoal::HandsWon => i64::from(summary.hands_won),
                ChallengeGoal::Blackjacks => i64::from(summary.blackjacks),
                ChallengeGoal::CoinsWon => summary.coins_won,
            };
            challenge.progress = challenge.progress.saturating_add(step);
            if challenge.is_complete() {
                log::info!("Challenge {:?} completed", challenge.goal);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl SummarySink for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn consume(&mut self, _summary: &RoundSummary) -> Result<(), CollaboratorError> {
            Err(CollaboratorError::new("broken", "offline"))
        }
    }

    fn summary(coins_won: i64) -> RoundSummary {
        RoundSummary {
            hands_played: 1,
            hands_won: u32::from(coins_won > 0),
            blackjacks: 0,
            coins_won,
        }
    }

    #[test]
    fn test_failing_sink_does_not_block_others() {
        let mut wallet = InMemoryWallet::new(100);
        let mut broken = Broken;
        let mut stats = InMemoryStats::default();

        let failures = publish_summary(&summary(15), &mut [&mut wallet, &mut broken, &mut stats]);

        assert_eq!(failures, 1);
        assert_eq!(wallet.balance(), 115);
        assert_eq!(stats.rounds, 1);
        assert_eq!(stats.hands_won, 1);
    }

    #[test]
    fn test_wallet_rejects_overdraw() {
        let mut wallet = InMemoryWallet::new(10);
        let err = wallet.consume(&summary(-20)).unwrap_err();
        assert_eq!(err.collaborator, "wallet");
        assert_eq!(wallet.balance(), 10);

        wallet.consume(&summary(-10)).unwrap();
        assert_eq!(wallet.balance(), 0);
    }

    #[test]
    fn test_stats_win_rate() {
        let mut stats = InMemoryStats::default();
        assert_eq!(stats.win_rate(), 0.0);
        stats.consume(&summary(10)).unwrap();
        stats.consume(&summary(-10)).unwrap();
        assert_eq!(stats.win_rate(), 0.5);
        assert_eq!(stats.net_coins, 0);
    }

    #[test]
    fn test_challenges_complete_once() {
        let mut challenges = InMemoryChallenges::new(vec![
            Challenge::new(ChallengeGoal::HandsWon, 2),
            Challenge::new(ChallengeGoal::CoinsWon, 25),
        ]);
        challenges.consume(&summary(15)).unwrap();
        assert_eq!(challenges.completed(), 0);

        challenges.consume(&summary(15)).unwrap();
        assert_eq!(challenges.completed(), 2);

        challenges.consume(&summary(-40)).unwrap();
        assert_eq!(challenges.challenges()[1].progress, 30);
        assert_eq!(challenges.completed(), 2);
    }
}
