//! Batch statistics and reports.
//!
//! - `BatchStats`: mergeable sums over many trials
//! - `Report`: the text report printed by the CLI
//! - `Summary`: the same figures as a serializable struct

pub mod aggregate;
pub mod report;

pub use aggregate::{BatchStats, StageTally, HP_BUCKET_WIDTH};
pub use report::{EndingHp, PerRun, Report, StageSummary, Summary};
