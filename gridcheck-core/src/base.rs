//! Core functionalities.
mod env;
mod state;
mod step;
pub use env::{ActionSpace, CloneEnv, Env};
pub use state::{ActionIds, AvailableActions, EnvState, Location, StateHash};
use std::fmt::Debug;
pub use step::{Info, Step};

/// An observation of an environment.
///
/// Observations of an environment and its clone are compared for exact
/// equality, hence the [`PartialEq`] bound.
pub trait Obs: Clone + Debug + PartialEq {}

/// An action of the environment.
///
/// The same action object is applied to an environment and its clone.
pub trait Act: Clone + Debug {}
