//! Nine-location campaign.
//!
//! The player starts holding the Empty Prism. Each stage builds its own
//! tiered deck with the Hollow among the last three cards, and cards are
//! drawn and resolved one at a time. Every stage after the first opens with a
//! full heal. Dying ends the campaign on the spot.

use crate::cards::{Card, Deck, Placement};
use crate::core::{GameRng, LuxLedger, PlayerState, RulesProfile, CAMPAIGN_STAGES};
use crate::policy::{DecisionPolicy, ThresholdPolicy};
use crate::rules::resolve_card;

use super::outcome::{CardStep, RunTotals, StageRecord, StepEvent, TrialOutcome};
use super::Trial;

/// One campaign trial in progress.
#[derive(Clone, Debug)]
pub struct CampaignRun<P: DecisionPolicy = ThresholdPolicy> {
    profile: RulesProfile,
    policy: P,
    rng: GameRng,
    state: PlayerState,
    /// Last stage started (0 before the first).
    stage: u8,
    deck: Deck,
    resolved: Vec<Card>,
    deck_size: usize,
    /// Record for the stage in progress.
    current: Option<StageRecord>,
    /// Ledger as it stood when the current stage began.
    stage_ledger_start: LuxLedger,
    stages: Vec<StageRecord>,
    totals: RunTotals,
    finished: bool,
}

impl CampaignRun<ThresholdPolicy> {
    /// Start a campaign with the default policy.
    #[must_use]
    pub fn new(profile: RulesProfile, rng: GameRng) -> Self {
        Self::with_policy(profile, ThresholdPolicy, rng)
    }
}

impl<P: DecisionPolicy> CampaignRun<P> {
    /// Start a campaign with a specific policy.
    #[must_use]
    pub fn with_policy(profile: RulesProfile, policy: P, rng: GameRng) -> Self {
        Self {
            profile,
            policy,
            rng,
            state: PlayerState::with_starting_prism(),
            stage: 0,
            deck: Deck::default(),
            resolved: Vec::new(),
            deck_size: 0,
            current: None,
            stage_ledger_start: LuxLedger::default(),
            stages: Vec::with_capacity(usize::from(CAMPAIGN_STAGES)),
            totals: RunTotals::default(),
            finished: false,
        }
    }

    /// Last stage started.
    #[must_use]
    pub fn stage(&self) -> u8 {
        self.stage
    }

    /// Draw pile of the current stage.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Cards resolved in the current stage.
    #[must_use]
    pub fn resolved(&self) -> &[Card] {
        &self.resolved
    }

    /// Cards the current stage started with.
    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.deck_size
    }

    /// Records of finished stages.
    #[must_use]
    pub fn stages(&self) -> &[StageRecord] {
        &self.stages
    }

    fn begin_next_stage(&mut self) -> Option<StepEvent> {
        if self.stage >= CAMPAIGN_STAGES {
            self.finished = true;
            return None;
        }

        self.stage += 1;
        if self.stage > 1 {
            self.state.full_heal();
        }
        self.state.current_stage = self.stage;

        let table = self.profile.tier_table(self.stage);
        self.deck = Deck::build(self.stage, &table, Placement::BossInLastThree, &mut self.rng);
        self.deck_size = self.deck.len();
        self.resolved.clear();
        self.current = Some(StageRecord::new(self.stage));
        self.stage_ledger_start = self.state.ledger;

        tracing::trace!(stage = self.stage, tier = table.tier, hp = self.state.hp, "stage.started");
        Some(StepEvent::StageStarted {
            stage: self.stage,
            hp: self.state.hp,
            max_hp: self.state.max_hp,
        })
    }

    fn close_stage(&mut self, survived: bool) {
        if let Some(mut record) = self.current.take() {
            record.survived = survived;
            record.lux = self.state.ledger.since(&self.stage_ledger_start);
            self.stages.push(record);
        }
    }
}

impl<P: DecisionPolicy> Trial for CampaignRun<P> {
    fn step(&mut self) -> Option<StepEvent> {
        if self.finished {
            return None;
        }
        if self.current.is_none() {
            return self.begin_next_stage();
        }

        let Some(card) = self.deck.draw() else {
            self.close_stage(true);
            return self.begin_next_stage();
        };

        let hp_before = self.state.hp;
        let resolution =
            resolve_card(&mut self.state, &card, &self.profile, &self.policy, &mut self.rng);
        let hp_after = self.state.hp;

        self.totals.record_card(&card, hp_before, hp_after);
        if let Some(record) = self.current.as_mut() {
            record.record_card(hp_before, hp_after);
        }
        self.resolved.push(card.clone());

        debug_assert_eq!(
            self.deck.len() + self.resolved.len(),
            self.deck_size,
            "cards lost or duplicated"
        );

        if !resolution.survived {
            self.close_stage(false);
            self.finished = true;
        }

        Some(StepEvent::CardResolved(CardStep {
            stage: self.stage,
            card,
            resolution,
            hp_before,
            hp_after,
            peek: None,
        }))
    }

    fn state(&self) -> &PlayerState {
        &self.state
    }

    fn into_outcome(mut self) -> TrialOutcome {
        // A run stopped early still reports the stage it was in
        if self.current.is_some() {
            let alive = self.state.is_alive();
            self.close_stage(alive);
        }

        let survived = self.state.is_alive()
            && self.stages.len() == usize::from(CAMPAIGN_STAGES)
            && self.stages.iter().all(|s| s.survived);

        let mut totals = self.totals;
        totals.lux = self.state.ledger;

        TrialOutcome {
            mode: self.profile.mode,
            survived,
            ending_hp: self.state.hp,
            totals,
            stages: self.stages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(seed: u64) -> TrialOutcome {
        CampaignRun::new(RulesProfile::campaign(), GameRng::new(seed)).run()
    }

    #[test]
    fn test_campaign_terminates() {
        for seed in 0..50 {
            let outcome = run(seed);

            assert!(!outcome.stages.is_empty());
            assert!(outcome.stages.len() <= 9);
            if outcome.survived {
                assert_eq!(outcome.stages.len(), 9);
                assert!(outcome.stages.iter().all(|s| s.survived));
                assert_eq!(outcome.death_stage(), None);
            } else {
                let last = outcome.stages.last().unwrap();
                assert!(!last.survived);
                assert_eq!(outcome.death_stage(), Some(last.stage));
                assert_eq!(outcome.ending_hp, 0);
            }
        }
    }

    #[test]
    fn test_stages_are_sequential() {
        let outcome = run(77);
        for (i, record) in outcome.stages.iter().enumerate() {
            assert_eq!(usize::from(record.stage), i + 1);
        }
    }

    #[test]
    fn test_first_step_starts_stage_one_at_full_hp() {
        let mut run = CampaignRun::new(RulesProfile::campaign(), GameRng::new(3));
        let event = run.step().unwrap();

        assert_eq!(event, StepEvent::StageStarted { stage: 1, hp: 20, max_hp: 20 });
        assert_eq!(run.deck().len(), 18);
        assert!(run.state().has_tool());
    }

    #[test]
    fn test_stage_start_heals_fully() {
        let mut run = CampaignRun::new(RulesProfile::campaign(), GameRng::new(5));
        run.step();

        // Pretend stage 4 just ended badly bruised
        run.stage = 4;
        run.state.hp = 3;
        run.current = None;
        run.deck = Deck::default();

        let event = run.step().unwrap();
        assert_eq!(event, StepEvent::StageStarted { stage: 5, hp: 20, max_hp: 20 });
        assert_eq!(run.state().current_stage, 5);
    }

    #[test]
    fn test_stage_ledgers_sum_to_trial_ledger() {
        for seed in 0..100 {
            let outcome = run(seed);

            let mut summed = LuxLedger::default();
            for record in &outcome.stages {
                summed.absorb(&record.lux);
            }
            assert_eq!(summed, outcome.totals.lux, "seed {seed}");
        }
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(run(2024), run(2024));
    }
}
