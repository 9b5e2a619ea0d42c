//! Core simulator types: RNG, rule constants, and player state.
//!
//! Nothing in here knows how a run is structured; the engines and
//! orchestrators build on these pieces.

pub mod config;
pub mod rng;
pub mod state;

pub use config::{
    tier_for_stage, Mode, RulesProfile, TierTable, CAMPAIGN_STAGES, EQUIPMENT_SLOTS, LINEUP_SIZE,
    LUX_CAP, MAX_HP, PIT_SUCCESS_ROLL, PIT_TARGET,
};
pub use rng::GameRng;
pub use state::{Equipment, LuxLedger, LuxSpend, PlayerState};
