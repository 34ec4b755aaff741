//! Configuration of [`GridEnv`](super::GridEnv).
use crate::SOKOBAN_LEVEL;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{default::Default, path::Path};

/// Configurations of [`GridEnv`](super::GridEnv).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GridEnvConfig {
    pub(super) level: String,
    pub(super) player_id: u32,
    pub(super) slip_probability: f64,
    pub(super) max_steps: Option<u64>,
}

impl Default for GridEnvConfig {
    fn default() -> Self {
        Self {
            level: SOKOBAN_LEVEL.to_string(),
            player_id: 1,
            slip_probability: 0.0,
            max_steps: None,
        }
    }
}

impl GridEnvConfig {
    /// Sets the level map.
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Reads the level map from a file.
    pub fn level_from_path(self, path: impl AsRef<Path>) -> Result<Self> {
        let level = std::fs::read_to_string(path)?;
        Ok(self.level(level))
    }

    /// Sets the player controlled by the actions.
    pub fn player_id(mut self, v: u32) -> Self {
        self.player_id = v;
        self
    }

    /// Sets the probability that a move is replaced by a no-op.
    pub fn slip_probability(mut self, v: f64) -> Self {
        self.slip_probability = v.clamp(0.0, 1.0);
        self
    }

    /// Sets the number of ticks after which an episode is truncated.
    pub fn max_steps(mut self, v: Option<u64>) -> Self {
        self.max_steps = v;
        self
    }
}
