//! Folding trial outcomes into batch statistics.
//!
//! `BatchStats` only holds sums and counts, so `record` and `merge` commute:
//! trials can be folded in any order, on any number of threads, and merged
//! afterwards with the same result. The ending-hp distribution is kept as a
//! count per hp value, which is enough to recover buckets, median, min, and
//! max without storing individual trials.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{Mode, CAMPAIGN_STAGES, MAX_HP};
use crate::run::TrialOutcome;

/// Width of an ending-hp histogram bucket.
pub const HP_BUCKET_WIDTH: u8 = 5;

/// Per-stage counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageTally {
    pub attempts: u64,
    pub clears: u64,
    pub deaths: u64,
    pub damage_taken: u64,
    pub healing_used: u64,
    /// Lux spent in this stage, all purposes.
    pub lux_spent: u64,
}

impl StageTally {
    fn merge(&mut self, other: &Self) {
        self.attempts += other.attempts;
        self.clears += other.clears;
        self.deaths += other.deaths;
        self.damage_taken += other.damage_taken;
        self.healing_used += other.healing_used;
        self.lux_spent += other.lux_spent;
    }

    /// Fraction of attempts cleared. `None` without attempts.
    #[must_use]
    pub fn clear_rate(&self) -> Option<f64> {
        ratio(self.clears, self.attempts)
    }

    /// Damage per attempt. `None` without attempts.
    #[must_use]
    pub fn avg_damage(&self) -> Option<f64> {
        ratio(self.damage_taken, self.attempts)
    }

    /// Healing per attempt. `None` without attempts.
    #[must_use]
    pub fn avg_healing(&self) -> Option<f64> {
        ratio(self.healing_used, self.attempts)
    }

    /// Lux spent per attempt. `None` without attempts.
    #[must_use]
    pub fn avg_lux_spent(&self) -> Option<f64> {
        ratio(self.lux_spent, self.attempts)
    }
}

fn ratio(numerator: u64, denominator: u64) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(numerator as f64 / denominator as f64)
    }
}

/// Sums and counts over a batch of trials.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    pub mode: Mode,
    pub runs: u64,
    pub wins: u64,
    pub losses: u64,

    /// Survivors by ending hp (index = hp).
    pub ending_hp_counts: Vec<u64>,

    pub cards_drawn: u64,
    pub combat_encounters: u64,
    pub damage_taken: u64,
    pub healing_used: u64,
    pub shuffles_back: u64,

    pub lux_peek: u64,
    pub lux_heal: u64,
    pub lux_combat_reroll: u64,
    pub lux_pit_reroll: u64,
    pub lux_terror: u64,

    /// Index 0 is stage 1.
    pub stages: Vec<StageTally>,
}

impl BatchStats {
    /// Empty statistics for a mode.
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            runs: 0,
            wins: 0,
            losses: 0,
            ending_hp_counts: vec![0; usize::from(MAX_HP) + 1],
            cards_drawn: 0,
            combat_encounters: 0,
            damage_taken: 0,
            healing_used: 0,
            shuffles_back: 0,
            lux_peek: 0,
            lux_heal: 0,
            lux_combat_reroll: 0,
            lux_pit_reroll: 0,
            lux_terror: 0,
            stages: vec![StageTally::default(); usize::from(CAMPAIGN_STAGES)],
        }
    }

    /// Fold a batch of outcomes.
    pub fn from_outcomes<'a>(
        mode: Mode,
        outcomes: impl IntoIterator<Item = &'a TrialOutcome>,
    ) -> Self {
        let mut stats = Self::new(mode);
        for outcome in outcomes {
            stats.record(outcome);
        }
        stats
    }

    /// Fold in one trial.
    pub fn record(&mut self, outcome: &TrialOutcome) {
        debug_assert_eq!(outcome.mode, self.mode, "mixed modes in one batch");

        self.runs += 1;
        if outcome.survived {
            self.wins += 1;
            let hp = usize::from(outcome.ending_hp);
            if hp >= self.ending_hp_counts.len() {
                self.ending_hp_counts.resize(hp + 1, 0);
            }
            self.ending_hp_counts[hp] += 1;
        } else {
            self.losses += 1;
        }

        let totals = &outcome.totals;
        self.cards_drawn += u64::from(totals.cards_drawn);
        self.combat_encounters += u64::from(totals.combat_encounters);
        self.damage_taken += u64::from(totals.damage_taken);
        self.healing_used += u64::from(totals.healing_used);
        self.shuffles_back += u64::from(totals.shuffles_back);
        self.lux_peek += u64::from(totals.lux.peek);
        self.lux_heal += u64::from(totals.lux.heal);
        self.lux_combat_reroll += u64::from(totals.lux.combat_reroll);
        self.lux_pit_reroll += u64::from(totals.lux.pit_reroll);
        self.lux_terror += u64::from(totals.lux.terror);

        for record in &outcome.stages {
            let idx = usize::from(record.stage.saturating_sub(1));
            if idx >= self.stages.len() {
                self.stages.resize(idx + 1, StageTally::default());
            }
            let tally = &mut self.stages[idx];
            tally.attempts += 1;
            if record.survived {
                tally.clears += 1;
            } else {
                tally.deaths += 1;
            }
            tally.damage_taken += u64::from(record.damage_taken);
            tally.healing_used += u64::from(record.healing_used);
            tally.lux_spent += u64::from(record.lux.total());
        }
    }

    /// Combine with statistics from a disjoint batch.
    pub fn merge(&mut self, other: &Self) {
        debug_assert_eq!(other.mode, self.mode, "mixed modes in one batch");

        self.runs += other.runs;
        self.wins += other.wins;
        self.losses += other.losses;

        if other.ending_hp_counts.len() > self.ending_hp_counts.len() {
            self.ending_hp_counts.resize(other.ending_hp_counts.len(), 0);
        }
        for (mine, theirs) in self.ending_hp_counts.iter_mut().zip(&other.ending_hp_counts) {
            *mine += theirs;
        }

        self.cards_drawn += other.cards_drawn;
        self.combat_encounters += other.combat_encounters;
        self.damage_taken += other.damage_taken;
        self.healing_used += other.healing_used;
        self.shuffles_back += other.shuffles_back;
        self.lux_peek += other.lux_peek;
        self.lux_heal += other.lux_heal;
        self.lux_combat_reroll += other.lux_combat_reroll;
        self.lux_pit_reroll += other.lux_pit_reroll;
        self.lux_terror += other.lux_terror;

        if other.stages.len() > self.stages.len() {
            self.stages.resize(other.stages.len(), StageTally::default());
        }
        for (mine, theirs) in self.stages.iter_mut().zip(&other.stages) {
            mine.merge(theirs);
        }
    }

    /// Owned variant of [`merge`](Self::merge) for reductions.
    #[must_use]
    pub fn merged(mut self, other: Self) -> Self {
        self.merge(&other);
        self
    }

    /// Number of surviving trials.
    #[must_use]
    pub fn survivors(&self) -> u64 {
        self.ending_hp_counts.iter().sum()
    }

    /// Percentage of `count` over all runs (0.0 for an empty batch).
    #[must_use]
    pub fn percent_of_runs(&self, count: u64) -> f64 {
        ratio(count, self.runs).map_or(0.0, |r| r * 100.0)
    }

    /// Per-trial average of a total (0.0 for an empty batch).
    #[must_use]
    pub fn per_run(&self, total: u64) -> f64 {
        ratio(total, self.runs).unwrap_or(0.0)
    }

    /// Mean ending hp of survivors.
    #[must_use]
    pub fn average_ending_hp(&self) -> Option<f64> {
        let sum: u64 = self
            .ending_hp_counts
            .iter()
            .enumerate()
            .map(|(hp, &count)| hp as u64 * count)
            .sum();
        ratio(sum, self.survivors())
    }

    /// Upper median ending hp of survivors (element `n / 2` of the sorted list).
    #[must_use]
    pub fn median_ending_hp(&self) -> Option<u8> {
        self.nth_ending_hp(self.survivors() / 2)
    }

    /// Lowest ending hp of survivors.
    #[must_use]
    pub fn min_ending_hp(&self) -> Option<u8> {
        self.ending_hp_counts
            .iter()
            .position(|&c| c > 0)
            .map(|hp| hp as u8)
    }

    /// Highest ending hp of survivors.
    #[must_use]
    pub fn max_ending_hp(&self) -> Option<u8> {
        self.ending_hp_counts
            .iter()
            .rposition(|&c| c > 0)
            .map(|hp| hp as u8)
    }

    fn nth_ending_hp(&self, n: u64) -> Option<u8> {
        let mut seen = 0;
        for (hp, &count) in self.ending_hp_counts.iter().enumerate() {
            seen += count;
            if count > 0 && seen > n {
                return Some(hp as u8);
            }
        }
        None
    }

    /// Survivor counts by 5-hp bucket, lowest bucket first. Empty buckets are
    /// skipped.
    #[must_use]
    pub fn hp_buckets(&self) -> Vec<(u8, u64)> {
        let mut buckets: FxHashMap<u8, u64> = FxHashMap::default();
        for (hp, &count) in self.ending_hp_counts.iter().enumerate() {
            if count > 0 {
                let bucket = (hp as u8 / HP_BUCKET_WIDTH) * HP_BUCKET_WIDTH;
                *buckets.entry(bucket).or_insert(0) += count;
            }
        }

        let mut sorted: Vec<_> = buckets.into_iter().collect();
        sorted.sort_unstable_by_key(|&(bucket, _)| bucket);
        sorted
    }

    /// Deaths by stage, as `(stage, deaths)`, for stages with any deaths.
    #[must_use]
    pub fn death_locations(&self) -> Vec<(u8, u64)> {
        self.stages
            .iter()
            .enumerate()
            .filter(|(_, tally)| tally.deaths > 0)
            .map(|(i, tally)| (i as u8 + 1, tally.deaths))
            .collect()
    }

    /// Per-stage tallies with their stage number, skipping unattempted stages.
    pub fn attempted_stages(&self) -> impl Iterator<Item = (u8, &StageTally)> {
        self.stages
            .iter()
            .enumerate()
            .filter(|(_, tally)| tally.attempts > 0)
            .map(|(i, tally)| (i as u8 + 1, tally))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LuxLedger, LuxSpend};
    use crate::run::{RunTotals, StageRecord};

    fn outcome(survived: bool, hp: u8, stages_cleared: u8) -> TrialOutcome {
        let mut stages: Vec<StageRecord> = (1..=stages_cleared)
            .map(|s| {
                let mut lux = LuxLedger::default();
                lux.record(LuxSpend::Heal);
                StageRecord {
                    survived: true,
                    damage_taken: 4,
                    lux,
                    ..StageRecord::new(s)
                }
            })
            .collect();
        if !survived {
            stages.push(StageRecord::new(stages_cleared + 1));
        }

        TrialOutcome {
            mode: Mode::Campaign,
            survived,
            ending_hp: hp,
            totals: RunTotals {
                damage_taken: 10,
                ..RunTotals::default()
            },
            stages,
        }
    }

    #[test]
    fn test_record_counts() {
        let outcomes = vec![outcome(true, 14, 9), outcome(false, 0, 2), outcome(true, 6, 9)];
        let stats = BatchStats::from_outcomes(Mode::Campaign, &outcomes);

        assert_eq!(stats.runs, 3);
        assert_eq!(stats.wins, 2);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.survivors(), 2);
        assert_eq!(stats.damage_taken, 30);
        assert_eq!(stats.per_run(stats.damage_taken), 10.0);

        assert_eq!(stats.stages[0].attempts, 3);
        assert_eq!(stats.stages[2].attempts, 3);
        assert_eq!(stats.stages[2].deaths, 1);
        assert_eq!(stats.stages[3].attempts, 2);
        assert_eq!(stats.stages[0].lux_spent, 3);
        assert_eq!(stats.stages[2].lux_spent, 2);
        assert_eq!(stats.stages[8].lux_spent, 2);
        assert_eq!(stats.death_locations(), vec![(3, 1)]);
    }

    #[test]
    fn test_ending_hp_summary() {
        let outcomes: Vec<_> = [3, 7, 12, 12, 20].iter().map(|&hp| outcome(true, hp, 9)).collect();
        let stats = BatchStats::from_outcomes(Mode::Campaign, &outcomes);

        assert_eq!(stats.min_ending_hp(), Some(3));
        assert_eq!(stats.max_ending_hp(), Some(20));
        assert_eq!(stats.median_ending_hp(), Some(12));
        assert!((stats.average_ending_hp().unwrap() - 10.8).abs() < 1e-9);
        assert_eq!(stats.hp_buckets(), vec![(0, 1), (5, 1), (10, 2), (20, 1)]);
    }

    #[test]
    fn test_upper_median_on_even_count() {
        let outcomes: Vec<_> = [4, 10].iter().map(|&hp| outcome(true, hp, 9)).collect();
        let stats = BatchStats::from_outcomes(Mode::Campaign, &outcomes);
        assert_eq!(stats.median_ending_hp(), Some(10));
    }

    #[test]
    fn test_empty_batch_short_circuits() {
        let stats = BatchStats::new(Mode::SingleStage);

        assert_eq!(stats.percent_of_runs(0), 0.0);
        assert_eq!(stats.per_run(0), 0.0);
        assert_eq!(stats.average_ending_hp(), None);
        assert_eq!(stats.median_ending_hp(), None);
        assert_eq!(stats.min_ending_hp(), None);
        assert!(stats.hp_buckets().is_empty());
        assert_eq!(stats.attempted_stages().count(), 0);
        assert_eq!(stats.stages[0].clear_rate(), None);
    }

    #[test]
    fn test_merge_matches_single_fold() {
        let first = vec![outcome(true, 14, 9), outcome(false, 0, 0)];
        let second = vec![outcome(false, 0, 5), outcome(true, 2, 9), outcome(true, 19, 9)];

        let mut merged = BatchStats::from_outcomes(Mode::Campaign, &first);
        merged.merge(&BatchStats::from_outcomes(Mode::Campaign, &second));

        let all = BatchStats::from_outcomes(Mode::Campaign, first.iter().chain(&second));
        assert_eq!(merged, all);
    }

    #[test]
    fn test_stage_tally_rates() {
        let tally = StageTally {
            attempts: 4,
            clears: 3,
            deaths: 1,
            damage_taken: 10,
            healing_used: 6,
            lux_spent: 2,
        };

        assert_eq!(tally.clear_rate(), Some(0.75));
        assert_eq!(tally.avg_damage(), Some(2.5));
        assert_eq!(tally.avg_healing(), Some(1.5));
        assert_eq!(tally.avg_lux_spent(), Some(0.5));
    }
}
