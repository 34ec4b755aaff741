//! Errors of the grid world.
use thiserror::Error;

/// Errors of [`GridEnv`](crate::GridEnv) and level parsing.
#[derive(Error, Debug, PartialEq)]
pub enum GridError {
    /// The level has no cells.
    #[error("Level is empty")]
    EmptyLevel,

    /// A row of the level has a different width than the first row.
    #[error("Row {y} has width {found}, expected {expected}")]
    RaggedRow {
        /// Row index.
        y: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of this row.
        found: usize,
    },

    /// The level contains a character that is not a known object.
    #[error("Unknown character {ch:?} at ({x}, {y})")]
    UnknownCharacter {
        /// The character.
        ch: char,
        /// Column.
        x: usize,
        /// Row.
        y: usize,
    },

    /// The action id is out of range.
    #[error("Invalid action id: {0}")]
    InvalidAction(u32),

    /// The action name is not supported by the grid.
    #[error("Unknown action name: {0}")]
    UnknownActionName(String),
}
