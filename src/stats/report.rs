//! Text and JSON renderings of batch statistics.

use std::fmt;

use serde::Serialize;

use crate::core::Mode;

use super::aggregate::{BatchStats, StageTally, HP_BUCKET_WIDTH};

const SINGLE_WIDTH: usize = 60;
const CAMPAIGN_WIDTH: usize = 80;
const HISTOGRAM_BAR: f64 = 50.0;
const DEATH_BAR_PER_PERCENT: f64 = 2.0;

/// Human-readable report. Layout depends on the batch mode.
pub struct Report<'a> {
    stats: &'a BatchStats,
}

impl<'a> Report<'a> {
    #[must_use]
    pub fn new(stats: &'a BatchStats) -> Self {
        Self { stats }
    }

    fn fmt_single(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.stats;
        let rule = "=".repeat(SINGLE_WIDTH);

        writeln!(f, "{rule}")?;
        writeln!(f, "FORWARD - LOCATION 1 SIMULATION RESULTS")?;
        writeln!(f, "{rule}")?;
        writeln!(f)?;
        writeln!(f, "Total Simulations: {}", s.runs)?;
        writeln!(f, "Wins: {} ({:.1}%)", s.wins, s.percent_of_runs(s.wins))?;
        writeln!(f, "Losses: {} ({:.1}%)", s.losses, s.percent_of_runs(s.losses))?;

        self.fmt_survivors(f)?;
        self.fmt_averages(f)?;

        writeln!(f)?;
        writeln!(f, "{rule}")
    }

    fn fmt_campaign(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.stats;
        let rule = "=".repeat(CAMPAIGN_WIDTH);

        writeln!(f, "{rule}")?;
        writeln!(f, "FORWARD - FULL 9-LOCATION CAMPAIGN SIMULATION")?;
        writeln!(f, "{rule}")?;
        writeln!(f)?;
        writeln!(f, "Total Runs: {}", s.runs)?;
        writeln!(f, "Full Campaign Victories: {} ({:.1}%)", s.wins, s.percent_of_runs(s.wins))?;
        writeln!(f, "Died Before Completion: {} ({:.1}%)", s.losses, s.percent_of_runs(s.losses))?;

        self.fmt_survivors(f)?;
        self.fmt_averages(f)?;

        writeln!(f)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "PER-LOCATION STATISTICS")?;
        writeln!(f, "{rule}")?;
        writeln!(
            f,
            "{:<12} {:<10} {:<10} {:<10} {:<12} {:<10} {:<10}",
            "Location", "Attempts", "Clears", "Deaths", "Clear %", "Avg Dmg", "Avg Heal"
        )?;
        writeln!(f, "{}", "-".repeat(CAMPAIGN_WIDTH))?;
        for (stage, tally) in s.attempted_stages() {
            fmt_stage_row(f, stage, tally)?;
        }

        writeln!(f)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "WHERE PLAYERS DIED")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "{:<15} {:<10} Percentage", "Location", "Deaths")?;
        writeln!(f, "{}", "-".repeat(40))?;
        for (stage, deaths) in s.death_locations() {
            let pct = s.percent_of_runs(deaths);
            let bar = "#".repeat((pct * DEATH_BAR_PER_PERCENT) as usize);
            writeln!(f, "Location {stage:<6} {deaths:<10} {pct:>5.1}%  {bar}")?;
        }

        writeln!(f)?;
        writeln!(f, "Completed All 9:  {} ({:.1}%)", s.wins, s.percent_of_runs(s.wins))?;
        writeln!(f)?;
        writeln!(f, "{rule}")
    }

    fn fmt_survivors(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.stats;
        let survivors = s.survivors();
        if survivors == 0 {
            return Ok(());
        }

        writeln!(f)?;
        writeln!(f, "--- ENDING HP (survivors only) ---")?;
        if let Some(avg) = s.average_ending_hp() {
            writeln!(f, "Average: {avg:.1} HP")?;
        }
        if let Some(median) = s.median_ending_hp() {
            writeln!(f, "Median: {:.1} HP", f64::from(median))?;
        }
        if let (Some(min), Some(max)) = (s.min_ending_hp(), s.max_ending_hp()) {
            writeln!(f, "Min: {min} HP")?;
            writeln!(f, "Max: {max} HP")?;
        }

        writeln!(f)?;
        writeln!(f, "--- HP DISTRIBUTION (survivors) ---")?;
        for (bucket, count) in s.hp_buckets() {
            let width = (count as f64 / survivors as f64 * HISTOGRAM_BAR) as usize;
            writeln!(
                f,
                "{:>2}-{:>2} HP: {} ({count})",
                bucket,
                bucket + HP_BUCKET_WIDTH - 1,
                "#".repeat(width)
            )?;
        }
        Ok(())
    }

    fn fmt_averages(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.stats;
        writeln!(f)?;
        writeln!(f, "--- AVERAGES PER GAME ---")?;
        writeln!(f, "Damage taken: {:.1} HP", s.per_run(s.damage_taken))?;
        writeln!(f, "Healing used: {:.1} HP", s.per_run(s.healing_used))?;
        writeln!(f, "Combat encounters: {:.1}", s.per_run(s.combat_encounters))?;
        writeln!(f, "Lux spent on peek: {:.1}", s.per_run(s.lux_peek))?;
        writeln!(f, "Lux spent on heal: {:.1}", s.per_run(s.lux_heal))?;
        if s.mode == Mode::Campaign {
            let rerolls = s.lux_combat_reroll + s.lux_pit_reroll;
            writeln!(f, "Lux spent on rerolls: {:.1}", s.per_run(rerolls))?;
            writeln!(f, "Lux spent on terror: {:.1}", s.per_run(s.lux_terror))?;
        }
        writeln!(f, "Cards shuffled back: {:.1}", s.per_run(s.shuffles_back))
    }
}

fn fmt_stage_row(f: &mut fmt::Formatter<'_>, stage: u8, tally: &StageTally) -> fmt::Result {
    let clear_pct = tally.clear_rate().unwrap_or(0.0) * 100.0;
    let avg_dmg = tally.avg_damage().unwrap_or(0.0);
    let avg_heal = tally.avg_healing().unwrap_or(0.0);
    writeln!(
        f,
        "Location {stage:<3} {:<10} {:<10} {:<10} {clear_pct:>5.1}%       \
         {avg_dmg:<10.1} {avg_heal:<10.1}",
        tally.attempts, tally.clears, tally.deaths
    )
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stats.mode {
            Mode::SingleStage => self.fmt_single(f),
            Mode::Campaign => self.fmt_campaign(f),
        }
    }
}

/// Machine-readable summary for `--json`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub mode: Mode,
    pub runs: u64,
    pub wins: u64,
    pub losses: u64,
    pub win_rate: f64,
    pub ending_hp: Option<EndingHp>,
    pub per_run: PerRun,
    pub hp_buckets: Vec<(u8, u64)>,
    pub stages: Vec<StageSummary>,
}

/// Survivor ending-hp figures.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EndingHp {
    pub average: f64,
    pub median: u8,
    pub min: u8,
    pub max: u8,
}

/// Per-trial averages.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PerRun {
    pub damage_taken: f64,
    pub healing_used: f64,
    pub combat_encounters: f64,
    pub cards_drawn: f64,
    pub shuffles_back: f64,
    pub lux_peek: f64,
    pub lux_heal: f64,
    pub lux_combat_reroll: f64,
    pub lux_pit_reroll: f64,
    pub lux_terror: f64,
}

/// One row of the per-location table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StageSummary {
    pub stage: u8,
    #[serde(flatten)]
    pub tally: StageTally,
    pub clear_rate: f64,
    pub avg_lux_spent: f64,
}

impl Summary {
    #[must_use]
    pub fn from_stats(s: &BatchStats) -> Self {
        let ending_hp = match (
            s.average_ending_hp(),
            s.median_ending_hp(),
            s.min_ending_hp(),
            s.max_ending_hp(),
        ) {
            (Some(average), Some(median), Some(min), Some(max)) => Some(EndingHp {
                average,
                median,
                min,
                max,
            }),
            _ => None,
        };

        Self {
            mode: s.mode,
            runs: s.runs,
            wins: s.wins,
            losses: s.losses,
            win_rate: s.percent_of_runs(s.wins) / 100.0,
            ending_hp,
            per_run: PerRun {
                damage_taken: s.per_run(s.damage_taken),
                healing_used: s.per_run(s.healing_used),
                combat_encounters: s.per_run(s.combat_encounters),
                cards_drawn: s.per_run(s.cards_drawn),
                shuffles_back: s.per_run(s.shuffles_back),
                lux_peek: s.per_run(s.lux_peek),
                lux_heal: s.per_run(s.lux_heal),
                lux_combat_reroll: s.per_run(s.lux_combat_reroll),
                lux_pit_reroll: s.per_run(s.lux_pit_reroll),
                lux_terror: s.per_run(s.lux_terror),
            },
            hp_buckets: s.hp_buckets(),
            stages: s
                .attempted_stages()
                .map(|(stage, tally)| StageSummary {
                    stage,
                    tally: *tally,
                    clear_rate: tally.clear_rate().unwrap_or(0.0),
                    avg_lux_spent: tally.avg_lux_spent().unwrap_or(0.0),
                })
                .collect(),
        }
    }
}
