use crate::{Card, RandomSource, ShoeError};
use serde::{Deserialize, Serialize};

pub const CARDS_PER_DECK: usize = 52;

/// Minimum cards left before a reshuffle is scheduled mid-round.
const CUT_FLOOR: f64 = 10.0;
const CUT_FRACTION: f64 = 0.25;
/// Minimum cards required to start a round without reshuffling.
const ROUND_START_FLOOR: f64 = 20.0;
const ROUND_START_FRACTION: f64 = 0.15;

/// Receives every card dealt from a shoe.
pub trait CardObserver {
    fn on_card_dealt(&mut self, card: Card);
}

/// The working set of cards for one session.
///
/// Cards are dealt from the end of the vector. The composition only changes
/// between rounds: crossing the cut threshold mid-round marks a reshuffle as
/// pending, and the next `start_new_round` performs it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shoe {
    cards: Vec<Card>,
    num_decks: u8,
    in_round: bool,
    reshuffle_pending: bool,
    shuffles: u32,
}

impl Shoe {
    pub fn new<R: RandomSource + ?Sized>(num_decks: u8, rng: &mut R) -> Result<Self, ShoeError> {
        let mut shoe = Self {
            cards: Vec::new(),
            num_decks,
            in_round: false,
            reshuffle_pending: false,
            shuffles: 0,
        };
        shoe.initialize(num_decks, rng)?;
        Ok(shoe)
    }

    /// Unshuffled shoe with `top` arranged so that `top[0]` is dealt first.
    /// Each listed card is taken out of the ordered decks, so the shoe still
    /// holds exactly `num_decks` full decks.
    pub fn stacked(num_decks: u8, top: &[Card]) -> Result<Self, ShoeError> {
        if num_decks == 0 {
            return Err(ShoeError::InvalidDeckCount(num_decks));
        }
        let mut cards = Self::ordered_cards(num_decks);
        for card in top {
            let pos = cards
                .iter()
                .position(|c| c == card)
                .ok_or_else(|| ShoeError::CardNotInShoe(card.to_display()))?;
            cards.remove(pos);
        }
        cards.extend(top.iter().rev().copied());

        Ok(Self {
            cards,
            num_decks,
            in_round: false,
            reshuffle_pending: false,
            shuffles: 0,
        })
    }

    fn ordered_cards(num_decks: u8) -> Vec<Card> {
        let mut cards = Vec::with_capacity(num_decks as usize * CARDS_PER_DECK);
        for _ in 0..num_decks {
            cards.extend(Card::deck());
        }
        cards
    }

    /// Rebuilds `num_decks` full decks and shuffles them.
    pub fn initialize<R: RandomSource + ?Sized>(
        &mut self,
        num_decks: u8,
        rng: &mut R,
    ) -> Result<(), ShoeError> {
        if num_decks == 0 {
            return Err(ShoeError::InvalidDeckCount(num_decks));
        }
        self.num_decks = num_decks;
        self.cards = Self::ordered_cards(num_decks);
        fisher_yates(&mut self.cards, rng);
        self.reshuffle_pending = false;
        self.shuffles += 1;
        log::info!(
            "Shoe shuffled: {} decks, {} cards (shuffle #{})",
            num_decks,
            self.cards.len(),
            self.shuffles
        );
        Ok(())
    }

    pub fn deal_card(&mut self) -> Result<Card, ShoeError> {
        let card = self.cards.pop().ok_or(ShoeError::EmptyShoe)?;

        if self.in_round
            && !self.reshuffle_pending
            && self.cards.len() as f64 <= self.cut_threshold()
        {
            self.reshuffle_pending = true;
            log::debug!(
                "Cut card reached with {} cards left; reshuffle deferred to next round",
                self.cards.len()
            );
        }

        Ok(card)
    }

    /// Deals a card and reports it to `observer`.
    pub fn deal_observed<O: CardObserver + ?Sized>(
        &mut self,
        observer: &mut O,
    ) -> Result<Card, ShoeError> {
        let card = self.deal_card()?;
        observer.on_card_dealt(card);
        Ok(card)
    }

    /// Marks the shoe as in use, reshuffling first if one is pending or the
    /// shoe is too thin to play a round.
    pub fn start_new_round<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        self.in_round = true;
        let too_thin = (self.cards.len() as f64) < self.round_start_minimum();
        if self.reshuffle_pending || too_thin {
            // num_decks was validated when the shoe was built
            let decks = self.num_decks.max(1);
            if let Err(e) = self.initialize(decks, rng) {
                log::error!("Reshuffle failed: {e}");
            }
        }
    }

    pub fn end_round(&mut self) {
        self.in_round = false;
    }

    pub fn remaining_cards(&self) -> usize {
        self.cards.len()
    }

    pub fn full_size(&self) -> usize {
        self.num_decks as usize * CARDS_PER_DECK
    }

    pub fn cut_threshold(&self) -> f64 {
        (self.full_size() as f64 * CUT_FRACTION).max(CUT_FLOOR)
    }

    fn round_start_minimum(&self) -> f64 {
        (self.full_size() as f64 * ROUND_START_FRACTION).max(ROUND_START_FLOOR)
    }

    pub fn num_decks(&self) -> u8 {
        self.num_decks
    }

    pub fn reshuffle_pending(&self) -> bool {
        self.reshuffle_pending
    }

    pub fn in_round(&self) -> bool {
        self.in_round
    }

    /// How many times the shoe has been (re)built.
    pub fn shuffles(&self) -> u32 {
        self.shuffles
    }

    /// Undealt cards, bottom first.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

/// Uniform in-place Fisher-Yates shuffle.
fn fisher_yates<R: RandomSource + ?Sized>(cards: &mut [Card], rng: &mut R) {
    for i in (1..cards.len()).rev() {
        let j = rng.next_index(i + 1);
        cards.swap(i, j);
    }
}
