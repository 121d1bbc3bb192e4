//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),

    /// An action that can not be mapped onto the structured action of the environment.
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// An observation that can not be mapped back onto the structured state.
    #[error("Invalid observation: {0}")]
    InvalidObservation(String),
}
