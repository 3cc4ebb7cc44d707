use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StriderError {
    #[error("calibration stalled: {collected}/{required} samples after {polls} polls")]
    CalibrationStalled {
        collected: u32,
        required: u32,
        polls: u64,
    },
    #[error("invalid state: {0}")]
    State(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = eyre::Result<T>;
