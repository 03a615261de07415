//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug, PartialEq)]
pub enum EnvError {
    /// A configured observation key is absent from the observation of the simulator.
    #[error("Observation key not found: {0}")]
    MissingObservationKey(String),

    /// The environment has been closed.
    #[error("Environment has already been closed")]
    Closed,

    /// The action is not in the action space.
    #[error("Invalid action: {0}")]
    InvalidAction(i64),

    /// The simulator returned a value of an unexpected shape.
    #[error("Unexpected return value of {method}: {detail}")]
    UnexpectedReturn {
        /// Name of the method of the simulator.
        method: String,
        /// What was found.
        detail: String,
    },

    /// A value which cannot be represented on the other side of the bridge.
    #[error("Unsupported value: {0}")]
    UnsupportedValue(String),

    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),
}
