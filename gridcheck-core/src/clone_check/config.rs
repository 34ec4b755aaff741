//! Configuration of [`run_clone_check`](super::run_clone_check).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`run_clone_check`](super::run_clone_check).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
#[serde(default)]
pub struct CloneCheckConfig {
    /// The number of actions sampled up front and applied to both environments.
    pub n_steps: usize,

    /// The player whose available actions are inspected.
    pub player_id: u32,

    /// Seed used to build the original environment.
    pub seed: i64,

    /// If `false`, info payloads are not compared.
    pub compare_info: bool,
}

impl Default for CloneCheckConfig {
    fn default() -> Self {
        Self {
            n_steps: 10_000,
            player_id: 1,
            seed: 0,
            compare_info: true,
        }
    }
}

impl CloneCheckConfig {
    /// Sets the number of steps.
    pub fn n_steps(mut self, v: usize) -> Self {
        self.n_steps = v;
        self
    }

    /// Sets the player id.
    pub fn player_id(mut self, v: u32) -> Self {
        self.player_id = v;
        self
    }

    /// Sets the seed.
    pub fn seed(mut self, v: i64) -> Self {
        self.seed = v;
        self
    }

    /// Enables or disables the comparison of info payloads.
    pub fn compare_info(mut self, v: bool) -> Self {
        self.compare_info = v;
        self
    }

    /// Constructs [`CloneCheckConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`CloneCheckConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
