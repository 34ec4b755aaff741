//! Environment.
use super::{Act, ActionIds, AvailableActions, EnvState, Info, Location, Obs, StateHash, Step};
use anyhow::Result;

/// Represents an environment, typically an MDP.
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Observation of the environment.
    type Obs: Obs;

    /// Action of the environment.
    type Act: Act;

    /// Information in the [`Step`] object.
    type Info: Info;

    /// Builds an environment with a given random seed.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// Resets the environment and returns the initial observation.
    fn reset(&mut self) -> Result<Self::Obs>;

    /// Performes an environment step.
    fn step(&mut self, a: &Self::Act) -> Result<Step<Self>>
    where
        Self: Sized;
}

/// An environment that can be copied into an independently steppable instance.
///
/// The clone is expected to behave identically to the original under identical
/// actions from the moment it was taken. [`CloneEnv::state`] exposes a hash of
/// the internal state which serves as a coarse equality oracle.
pub trait CloneEnv: Env {
    /// Returns a copy of the environment in its current state.
    fn clone_env(&self) -> Result<Self>
    where
        Self: Sized;

    /// Inspects the internal state of the environment.
    fn state(&self) -> Result<EnvState>;

    /// Returns the hash of the internal state.
    fn state_hash(&self) -> Result<StateHash> {
        Ok(self.state()?.hash)
    }
}

/// Enumerates and samples the actions of an environment.
pub trait ActionSpace: Env {
    /// Returns the action names available at each location for objects
    /// owned by `player_id`.
    fn available_actions(&self, player_id: u32) -> Result<AvailableActions>;

    /// Returns the ids of the given actions that can be performed at `location`.
    fn available_action_ids(
        &self,
        location: &Location,
        action_names: &[String],
    ) -> Result<ActionIds>;

    /// Samples an action from the action space.
    fn sample_action(&mut self) -> Result<Self::Act>;
}
