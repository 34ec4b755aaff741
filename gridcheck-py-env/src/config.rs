//! Configuration of [`GriddlyEnv`](crate::GriddlyEnv).
use serde::{Deserialize, Serialize};

/// Configuration of [`GriddlyEnv`](crate::GriddlyEnv).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GriddlyEnvConfig {
    pub(crate) name: String,
    pub(crate) level: Option<u32>,
    pub(crate) max_steps: Option<usize>,
}

impl Default for GriddlyEnvConfig {
    fn default() -> Self {
        Self {
            name: "GDY-Sokoban-v0".to_string(),
            level: None,
            max_steps: None,
        }
    }
}

impl GriddlyEnvConfig {
    /// Set the name of the environment, e.g. `GDY-Sokoban-v0`.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the level passed to `gym.make()`.
    pub fn level(mut self, v: Option<u32>) -> Self {
        self.level = v;
        self
    }

    /// Set the maximum number of steps in an episode.
    ///
    /// The episode is truncated on the Rust side when the count is reached.
    pub fn max_steps(mut self, v: Option<usize>) -> Self {
        self.max_steps = v;
        self
    }
}
