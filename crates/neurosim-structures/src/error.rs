use thiserror::Error;

/// Common error type for NeuroSim data operations.
///
/// Missing-data and malformed-input conditions during analysis are resolved to
/// documented defaults and never surface here; this type covers construction
/// and validation of the data structures themselves.
#[derive(Error, Debug, Clone)]
pub enum DataError {
    /// A raw layer id outside `1..=14`
    #[error("Invalid ONI layer id {0}: must be in 1..=14")]
    InvalidLayerId(i64),

    /// Invalid parameters provided to a function
    #[error("Bad parameters: {0}")]
    BadParameters(String),
}

/// Result type for NeuroSim data operations
pub type DataResult<T> = Result<T, DataError>;
