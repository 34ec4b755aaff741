//! Errors in the library.
use crate::DivergedField;
use thiserror::Error;

/// Errors raised when reading values from a [`Record`](crate::record::Record).
#[derive(Error, Debug)]
pub enum RecordError {
    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),
}

/// Errors raised while checking an environment against its clone.
#[derive(Error, Debug)]
pub enum CloneCheckError {
    /// The original and the clone produced different outputs.
    ///
    /// `step` is the number of actions applied before the mismatch was found;
    /// 0 means the environments differed before the first action.
    #[error("{field} diverged at step {step}: original = {original}, clone = {clone}")]
    Divergence {
        /// The number of actions applied.
        step: usize,

        /// The output that differed.
        field: DivergedField,

        /// Debug rendering of the original's value.
        original: String,

        /// Debug rendering of the clone's value.
        clone: String,
    },

    /// An environment call failed.
    #[error(transparent)]
    Env(#[from] anyhow::Error),
}
