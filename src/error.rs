//! Error types for the simulator

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Batch must contain at least one run")]
    ZeroRuns,

    #[error("Invalid stage: {0} (expected 1-9)")]
    InvalidStage(u8),
}

pub type Result<T> = std::result::Result<T, SimError>;
