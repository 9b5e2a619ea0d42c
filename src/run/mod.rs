//! Run orchestrators: one trial from first draw to victory or death.
//!
//! ## Modes
//!
//! - `SingleStageRun`: Location 1 with lineups and peeking
//! - `CampaignRun`: stages 1-9, one card at a time, full heal between stages
//!
//! Both implement [`Trial`], which exposes one card (or stage start) per
//! `step()` so callers can observe the state between resolutions.

pub mod campaign;
pub mod outcome;
pub mod single_stage;

pub use campaign::CampaignRun;
pub use outcome::{CardStep, PeekReport, RunTotals, StageRecord, StepEvent, TrialOutcome};
pub use single_stage::SingleStageRun;

use crate::core::{GameRng, Mode, PlayerState, RulesProfile};

/// A run that can be advanced one event at a time.
pub trait Trial {
    /// Advance by one event. `None` once the run is over.
    fn step(&mut self) -> Option<StepEvent>;

    /// Player state between steps.
    fn state(&self) -> &PlayerState;

    /// Finish and produce the outcome record.
    fn into_outcome(self) -> TrialOutcome
    where
        Self: Sized;

    /// Step until the run is over.
    fn run(mut self) -> TrialOutcome
    where
        Self: Sized,
    {
        while self.step().is_some() {}
        self.into_outcome()
    }
}

/// Run one trial of the profile's mode with the default policy.
pub fn run_trial(profile: &RulesProfile, rng: GameRng) -> TrialOutcome {
    let outcome = match profile.mode {
        Mode::SingleStage => SingleStageRun::new(profile.clone(), rng).run(),
        Mode::Campaign => CampaignRun::new(profile.clone(), rng).run(),
    };
    tracing::debug!(
        mode = %profile.mode,
        survived = outcome.survived,
        ending_hp = outcome.ending_hp,
        stages = outcome.stages.len(),
        "trial.finished"
    );
    outcome
}
