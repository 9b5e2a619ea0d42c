//! Per-trial result records.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::{LuxLedger, Mode};
use crate::rules::Resolution;

/// Counters for one whole trial.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTotals {
    pub cards_drawn: u32,
    pub combat_encounters: u32,
    /// Sum of hp lost over cards that left the player lower than before.
    pub damage_taken: u32,
    /// Sum of hp gained over cards that left the player higher than before.
    pub healing_used: u32,
    pub shuffles_back: u32,
    pub lux: LuxLedger,
}

impl RunTotals {
    /// Count one resolved card and its net hp change.
    pub fn record_card(&mut self, card: &Card, hp_before: u8, hp_after: u8) {
        self.cards_drawn += 1;
        if card.is_combat() {
            self.combat_encounters += 1;
        }
        let (damage, healing) = net_change(hp_before, hp_after);
        self.damage_taken += damage;
        self.healing_used += healing;
    }
}

/// How one stage went.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRecord {
    pub stage: u8,
    /// Deck emptied with the player alive.
    pub survived: bool,
    pub cards_drawn: u32,
    pub damage_taken: u32,
    pub healing_used: u32,
    /// Lux spent during this stage.
    pub lux: LuxLedger,
}

impl StageRecord {
    /// Empty record for a stage just started.
    #[must_use]
    pub fn new(stage: u8) -> Self {
        Self {
            stage,
            survived: false,
            cards_drawn: 0,
            damage_taken: 0,
            healing_used: 0,
            lux: LuxLedger::default(),
        }
    }

    /// Count one resolved card.
    pub fn record_card(&mut self, hp_before: u8, hp_after: u8) {
        self.cards_drawn += 1;
        let (damage, healing) = net_change(hp_before, hp_after);
        self.damage_taken += damage;
        self.healing_used += healing;
    }
}

/// (damage, healing) from a before/after hp pair.
fn net_change(before: u8, after: u8) -> (u32, u32) {
    if after < before {
        (u32::from(before - after), 0)
    } else {
        (0, u32::from(after - before))
    }
}

/// Result of one trial.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialOutcome {
    pub mode: Mode,
    /// Every card and stage was cleared alive.
    pub survived: bool,
    /// hp at the end (0 on a loss).
    pub ending_hp: u8,
    pub totals: RunTotals,
    /// One record per stage attempted, in order.
    pub stages: Vec<StageRecord>,
}

impl TrialOutcome {
    /// Stage the player died in, if they died.
    #[must_use]
    pub fn death_stage(&self) -> Option<u8> {
        self.stages.iter().find(|s| !s.survived).map(|s| s.stage)
    }
}

/// One observable step of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepEvent {
    /// A new campaign stage began, after its full heal.
    StageStarted { stage: u8, hp: u8, max_hp: u8 },
    /// One card was drawn and resolved.
    CardResolved(CardStep),
}

/// Details of one resolved card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardStep {
    pub stage: u8,
    pub card: Card,
    pub resolution: Resolution,
    pub hp_before: u8,
    pub hp_after: u8,
    /// Peek performed on the lineup this card came from.
    pub peek: Option<PeekReport>,
}

/// What a peek inspected and sent back.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PeekReport {
    /// Cards looked at.
    pub inspected: usize,
    /// Cards shuffled back into the deck.
    pub shuffled_back: Vec<Card>,
}
