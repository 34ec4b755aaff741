#![warn(missing_docs)]
//! Environment traits and clone-determinism checks.
//!
//! An environment implementing [`CloneEnv`] and [`ActionSpace`] can be cloned
//! and checked with [`run_clone_check`]: the original and its clone are stepped
//! with the same pre-sampled actions and every observation, reward, termination
//! flag, info payload and state hash is compared.
pub mod error;
pub mod record;

mod base;
pub use base::{
    ActionIds, ActionSpace, Act, AvailableActions, CloneEnv, Env, EnvState, Info, Location, Obs,
    StateHash, Step,
};

mod clone_check;
pub use clone_check::{
    check_clone, inspect_actions, run_clone_check, ActionInspection, CloneCheckConfig,
    CloneCheckReport, ClonePair, DivergedField,
};

#[cfg(test)]
mod dummy;
