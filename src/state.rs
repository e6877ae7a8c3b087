use blackjack::{Card, Hand, HandResult};
use serde::{Deserialize, Serialize};

/// Round lifecycle. Moves strictly forward until the next deal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoundPhase {
    #[default]
    Betting,
    Playing,
    DealerTurn,
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerHand {
    pub hand: Hand,
    /// Stake on this hand; doubles when the hand doubles down
    pub bet: u64,
    pub result: Option<HandResult>,
    /// Net coins once settled
    pub payout: i64,
}

impl PlayerHand {
    pub fn new(bet: u64) -> Self {
        Self {
            hand: Hand::new(),
            bet,
            result: None,
            payout: 0,
        }
    }

    pub fn is_live(&self) -> bool {
        !self.hand.surrendered && !self.hand.is_busted()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub phase: RoundPhase,
    pub bet: u64,
    /// One hand, or two after a split
    pub hands: Vec<PlayerHand>,
    pub active_hand_index: usize,
    pub dealer_hand: Vec<Card>,
}

impl RoundState {
    pub fn new(bet: u64) -> Self {
        Self {
            phase: RoundPhase::Betting,
            bet,
            hands: vec![PlayerHand::new(bet)],
            active_hand_index: 0,
            dealer_hand: Vec::new(),
        }
    }

    pub fn active_hand(&self) -> Option<&PlayerHand> {
        self.hands.get(self.active_hand_index)
    }

    pub fn active_hand_mut(&mut self) -> Option<&mut PlayerHand> {
        self.hands.get_mut(self.active_hand_index)
    }

    /// Dealer's first card, the one the player sees.
    pub fn dealer_upcard(&self) -> Option<&Card> {
        self.dealer_hand.first()
    }

    pub fn is_split(&self) -> bool {
        self.hands.len() > 1
    }

    pub fn all_hands_finished(&self) -> bool {
        self.hands.iter().all(|h| h.hand.is_finished())
    }

    /// Moves to the next unfinished hand. Returns false when none is left.
    pub fn move_to_next_hand(&mut self) -> bool {
        while self.active_hand_index < self.hands.len() {
            if !self.hands[self.active_hand_index].hand.is_finished() {
                return true;
            }
            self.active_hand_index += 1;
        }
        false
    }
}
