//! # forward-sim
//!
//! Monte Carlo balance simulator for the solo card game FORWARD.
//!
//! A player with 20 hp and up to 3 Lux works through shuffled location
//! decks of Beasts, Hollows, Pits, Terrors, Snares, Blessings, Items,
//! Equipment, and Caesuras. Thousands of seeded trials are played by a fixed
//! threshold policy and summarized into win rates, ending-hp distributions,
//! and per-location clear and death rates.
//!
//! ## Design Principles
//!
//! 1. **Reproducible**: every random decision goes through one seeded
//!    `GameRng` per trial. Trial `i` of a batch always sees the same stream.
//!
//! 2. **Observable**: runs advance one card at a time through the `Trial`
//!    trait, so tests can check invariants between resolutions.
//!
//! 3. **Pluggable decisions**: Lux spending and peeking go through the
//!    `DecisionPolicy` trait; `ThresholdPolicy` is the playtest heuristic.
//!
//! ## Modules
//!
//! - `core`: constants, rules profiles, tier tables, RNG, player state
//! - `cards`: card kinds and tiered deck construction
//! - `rules`: dice, combat, Pit and Terror challenges, card resolution
//! - `policy`: decision policy trait and the threshold heuristic
//! - `run`: single-stage and campaign orchestrators
//! - `stats`: batch aggregation and reports
//! - `batch`: sequential and parallel batch runner

pub mod batch;
pub mod cards;
pub mod core;
pub mod error;
pub mod policy;
pub mod rules;
pub mod run;
pub mod stats;

pub use error::{Result, SimError};

pub use crate::core::{
    GameRng, LuxLedger, LuxSpend, Mode, PlayerState, RulesProfile, TierTable, CAMPAIGN_STAGES,
    LUX_CAP, MAX_HP,
};

pub use crate::cards::{Card, CardKind, Deck, EquipmentKind, Placement};

pub use crate::rules::{resolve_card, Effect, Resolution};

pub use crate::policy::{DecisionPolicy, ThresholdPolicy};

pub use crate::run::{run_trial, CampaignRun, SingleStageRun, StepEvent, Trial, TrialOutcome};

pub use crate::stats::{BatchStats, Report, Summary};

pub use crate::batch::{run_batch, run_outcomes, SimConfig};
