//! Batch runner: many independent trials folded into one `BatchStats`.
//!
//! Trial `i` always gets the RNG stream `GameRng::for_trial(seed, i)`, so a
//! batch gives the same statistics whether it runs sequentially or spread
//! over rayon's thread pool.

use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::{GameRng, Mode, RulesProfile};
use crate::error::{Result, SimError};
use crate::run::{run_trial, TrialOutcome};
use crate::stats::BatchStats;

/// Default trial count for single-stage batches.
pub const DEFAULT_SINGLE_RUNS: u64 = 1_000;

/// Default trial count for campaign batches.
pub const DEFAULT_CAMPAIGN_RUNS: u64 = 10_000;

/// Configuration for a batch of trials.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of trials.
    pub runs: u64,

    /// Batch seed. Each trial derives its own stream from it.
    pub seed: u64,

    /// Spread trials over the rayon pool.
    pub parallel: bool,

    /// Rules and mode.
    pub profile: RulesProfile,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::for_mode(Mode::SingleStage)
    }
}

impl SimConfig {
    /// Default configuration for a mode.
    #[must_use]
    pub fn for_mode(mode: Mode) -> Self {
        let runs = match mode {
            Mode::SingleStage => DEFAULT_SINGLE_RUNS,
            Mode::Campaign => DEFAULT_CAMPAIGN_RUNS,
        };
        Self {
            runs,
            seed: 0,
            parallel: true,
            profile: RulesProfile::for_mode(mode),
        }
    }

    #[must_use]
    pub fn with_runs(mut self, runs: u64) -> Self {
        self.runs = runs;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    #[must_use]
    pub fn with_profile(mut self, profile: RulesProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Reject configurations that can't produce a report.
    pub fn validate(&self) -> Result<()> {
        if self.runs == 0 {
            return Err(SimError::ZeroRuns);
        }
        Ok(())
    }

    /// Mode of the configured profile.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.profile.mode
    }

    fn trial(&self, index: u64) -> TrialOutcome {
        run_trial(&self.profile, GameRng::for_trial(self.seed, index))
    }
}

/// Run every trial of the batch and aggregate the outcomes.
pub fn run_batch(config: &SimConfig) -> Result<BatchStats> {
    config.validate()?;

    let mode = config.mode();
    tracing::info!(
        %mode,
        runs = config.runs,
        seed = config.seed,
        parallel = config.parallel,
        auto_heal = config.profile.auto_heal,
        "batch.started"
    );
    let start = Instant::now();

    let stats = if config.parallel {
        (0..config.runs)
            .into_par_iter()
            .fold(
                || BatchStats::new(mode),
                |mut acc, i| {
                    acc.record(&config.trial(i));
                    acc
                },
            )
            .reduce(|| BatchStats::new(mode), BatchStats::merged)
    } else {
        (0..config.runs).fold(BatchStats::new(mode), |mut acc, i| {
            acc.record(&config.trial(i));
            acc
        })
    };

    tracing::info!(
        %mode,
        runs = stats.runs,
        wins = stats.wins,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "batch.finished"
    );
    Ok(stats)
}

/// Run the batch and keep each trial's outcome, in trial order.
pub fn run_outcomes(config: &SimConfig) -> Result<Vec<TrialOutcome>> {
    config.validate()?;

    let outcomes = if config.parallel {
        (0..config.runs).into_par_iter().map(|i| config.trial(i)).collect()
    } else {
        (0..config.runs).map(|i| config.trial(i)).collect()
    };
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_runs_rejected() {
        let config = SimConfig::default().with_runs(0);
        assert!(matches!(run_batch(&config), Err(SimError::ZeroRuns)));
        assert!(matches!(run_outcomes(&config), Err(SimError::ZeroRuns)));
    }

    #[test]
    fn test_defaults_per_mode() {
        assert_eq!(SimConfig::for_mode(Mode::SingleStage).runs, 1_000);
        assert_eq!(SimConfig::for_mode(Mode::Campaign).runs, 10_000);
        assert_eq!(SimConfig::default().mode(), Mode::SingleStage);
    }

    #[test]
    fn test_batch_counts_every_run() {
        let config = SimConfig::default().with_runs(64).with_seed(9);
        let stats = run_batch(&config).unwrap();

        assert_eq!(stats.runs, 64);
        assert_eq!(stats.wins + stats.losses, 64);
        assert_eq!(stats.survivors(), stats.wins);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let config = SimConfig::for_mode(Mode::Campaign).with_runs(40).with_seed(17);

        let parallel = run_batch(&config).unwrap();
        let sequential = run_batch(&config.clone().with_parallel(false)).unwrap();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_outcomes_fold_to_batch() {
        let config = SimConfig::default().with_runs(30).with_seed(5);
        let outcomes = run_outcomes(&config).unwrap();

        assert_eq!(outcomes.len(), 30);
        let folded = BatchStats::from_outcomes(Mode::SingleStage, &outcomes);
        assert_eq!(folded, run_batch(&config).unwrap());
    }
}
