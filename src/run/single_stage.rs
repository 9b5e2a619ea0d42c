//! Single-stage playtest: one Location 1 deck played through a lineup.
//!
//! Each step draws up to three cards. The policy may pay a Lux to peek at two
//! of them and shuffle dangerous ones back, drawing replacements. One lineup
//! card is then chosen at random and resolved; the rest go back into the
//! deck, which is reshuffled.

use crate::cards::{Card, Deck, Placement};
use crate::core::{GameRng, LuxSpend, PlayerState, RulesProfile, LINEUP_SIZE};
use crate::policy::{DecisionPolicy, ThresholdPolicy};
use crate::rules::resolve_card;

use super::outcome::{CardStep, PeekReport, RunTotals, StageRecord, StepEvent, TrialOutcome};
use super::Trial;

/// Cards a peek looks at.
pub const PEEK_INSPECT: usize = 2;

/// Most cards a peek can send back.
pub const PEEK_MAX_SHUFFLE_BACK: usize = 2;

/// One single-stage trial in progress.
#[derive(Clone, Debug)]
pub struct SingleStageRun<P: DecisionPolicy = ThresholdPolicy> {
    profile: RulesProfile,
    policy: P,
    rng: GameRng,
    state: PlayerState,
    deck: Deck,
    resolved: Vec<Card>,
    totals: RunTotals,
    record: StageRecord,
    deck_size: usize,
    finished: bool,
}

impl SingleStageRun<ThresholdPolicy> {
    /// Build the Location 1 deck (tool on top) and start a run.
    #[must_use]
    pub fn new(profile: RulesProfile, mut rng: GameRng) -> Self {
        let deck = Deck::build(1, &profile.tier_table(1), Placement::PinTool, &mut rng);
        Self::with_deck(profile, ThresholdPolicy, deck, rng)
    }
}

impl<P: DecisionPolicy> SingleStageRun<P> {
    /// Start a run on a prepared deck with a specific policy.
    #[must_use]
    pub fn with_deck(profile: RulesProfile, policy: P, deck: Deck, rng: GameRng) -> Self {
        let deck_size = deck.len();
        Self {
            profile,
            policy,
            rng,
            state: PlayerState::new(),
            deck,
            resolved: Vec::with_capacity(deck_size),
            totals: RunTotals::default(),
            record: StageRecord::new(1),
            deck_size,
            finished: false,
        }
    }

    /// Draw pile.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Cards resolved so far, in order.
    #[must_use]
    pub fn resolved(&self) -> &[Card] {
        &self.resolved
    }

    /// Cards the stage started with.
    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.deck_size
    }

    /// Spend a peek on the lineup.
    fn peek(&mut self, lineup: &mut Vec<Card>, draw_count: usize) -> PeekReport {
        let mut inspected = self.rng.sample_indices(lineup.len(), PEEK_INSPECT);
        inspected.sort_unstable();

        let flagged: Vec<usize> = inspected
            .iter()
            .copied()
            .filter(|&i| self.policy.should_shuffle_back(&self.state, &lineup[i]))
            .take(PEEK_MAX_SHUFFLE_BACK)
            .collect();

        let mut shuffled_back: Vec<Card> =
            flagged.iter().rev().map(|&i| lineup.remove(i)).collect();
        shuffled_back.reverse();
        self.deck.put_bottom(shuffled_back.iter().cloned());
        self.totals.shuffles_back += shuffled_back.len() as u32;

        while lineup.len() < draw_count {
            match self.deck.draw() {
                Some(card) => lineup.push(card),
                None => break,
            }
        }
        self.deck.shuffle(&mut self.rng);

        tracing::trace!(
            inspected = inspected.len(),
            shuffled_back = shuffled_back.len(),
            hp = self.state.hp,
            "lineup.peeked"
        );
        PeekReport {
            inspected: inspected.len(),
            shuffled_back,
        }
    }
}

impl<P: DecisionPolicy> Trial for SingleStageRun<P> {
    fn step(&mut self) -> Option<StepEvent> {
        if self.finished || !self.state.is_alive() || self.deck.is_empty() {
            self.finished = true;
            return None;
        }

        let mut lineup = self.deck.draw_up_to(LINEUP_SIZE);
        let draw_count = lineup.len();

        let peek = if self.policy.should_peek(&self.state) && self.state.spend_lux(LuxSpend::Peek) {
            Some(self.peek(&mut lineup, draw_count))
        } else {
            None
        };

        let Some(choice) = self.rng.choose_index(lineup.len()) else {
            self.finished = true;
            return None;
        };
        let card = lineup.remove(choice);
        self.deck.put_bottom(lineup);
        self.deck.shuffle(&mut self.rng);

        let hp_before = self.state.hp;
        let resolution =
            resolve_card(&mut self.state, &card, &self.profile, &self.policy, &mut self.rng);
        let hp_after = self.state.hp;

        self.totals.record_card(&card, hp_before, hp_after);
        self.record.record_card(hp_before, hp_after);
        self.resolved.push(card.clone());

        if !resolution.survived {
            self.finished = true;
        }

        debug_assert_eq!(
            self.deck.len() + self.resolved.len(),
            self.deck_size,
            "cards lost or duplicated"
        );

        Some(StepEvent::CardResolved(CardStep {
            stage: 1,
            card,
            resolution,
            hp_before,
            hp_after,
            peek,
        }))
    }

    fn state(&self) -> &PlayerState {
        &self.state
    }

    fn into_outcome(self) -> TrialOutcome {
        let survived = self.state.is_alive();
        let mut record = self.record;
        record.survived = survived;
        record.lux = self.state.ledger;

        let mut totals = self.totals;
        totals.lux = self.state.ledger;

        TrialOutcome {
            mode: self.profile.mode,
            survived,
            ending_hp: self.state.hp,
            totals,
            stages: vec![record],
        }
    }
}
