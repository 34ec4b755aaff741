//! A wrapper of [Griddly](https://griddly.readthedocs.io) environments on Python.
//!
//! [`GriddlyEnv`] drives a gym environment created with `gym.make()` after
//! `import griddly`, based on [`PyO3`](https://github.com/PyO3/pyo3). Besides
//! `reset` and `step`, it exposes the operations Griddly provides for cloning
//! and inspecting a game:
//!
//! * `env.clone()` for [`CloneEnv::clone_env`]
//! * `env.get_state()["Hash"]` for [`CloneEnv::state`]
//! * `env.game.get_available_actions(player)` and
//!   `env.game.get_available_action_ids(location, names)` for [`ActionSpace`]
//! * `env.action_space.sample()` for [`ActionSpace::sample_action`]
//!
//! ## Observation
//!
//! Observations are numpy arrays of `uint8`, converted to [`ndarray::ArrayD`]
//! and wrapped in [`GriddlyObs`].
//!
//! ## Action
//!
//! Actions sampled from the action space are either a single integer or an
//! array of integers, depending on the game. [`GriddlyAct`] keeps the form so
//! that it can be given back to `env.step()` as it was sampled.
//!
//! ## Info
//!
//! The info dictionary returned by `env.step()` is serialized with Python's
//! `json` module and parsed into a [`serde_json::Value`], which makes it
//! comparable on the Rust side.
//!
//! [`CloneEnv::clone_env`]: gridcheck_core::CloneEnv::clone_env
//! [`CloneEnv::state`]: gridcheck_core::CloneEnv::state
//! [`ActionSpace`]: gridcheck_core::ActionSpace
//! [`ActionSpace::sample_action`]: gridcheck_core::ActionSpace::sample_action
mod act;
mod base;
mod config;
mod obs;
pub mod util;
pub use act::GriddlyAct;
pub use base::{GriddlyEnv, GriddlyInfo};
pub use config::GriddlyEnvConfig;
pub use obs::GriddlyObs;
