//! An in-process grid world for [`gridcheck-core`](gridcheck_core).
//!
//! [`GridEnv`] is a small Sokoban-style game: the avatar of player 1 pushes
//! boxes into holes. It implements [`CloneEnv`](gridcheck_core::CloneEnv) and
//! [`ActionSpace`](gridcheck_core::ActionSpace), so it can be checked with
//! [`run_clone_check`](gridcheck_core::run_clone_check) without a Python runtime.
//!
//! Levels are character maps:
//!
//! | char | object |
//! |---|---|
//! | `w` | wall |
//! | `A` | avatar of player 1 |
//! | `b` | box |
//! | `h` | hole |
//! | `.` | empty cell |
//!
//! ```
//! use anyhow::Result;
//! use gridcheck_core::{record::NullRecorder, run_clone_check, CloneCheckConfig};
//! use gridcheck_grid_env::{GridEnv, GridEnvConfig};
//!
//! fn main() -> Result<()> {
//!     let env_config = GridEnvConfig::default().slip_probability(0.1);
//!     let config = CloneCheckConfig::default().n_steps(100).seed(42);
//!     let report = run_clone_check::<GridEnv, _>(&env_config, &config, &mut NullRecorder::new())?;
//!     assert_eq!(report.steps, 100);
//!     Ok(())
//! }
//! ```
mod act;
mod env;
mod error;
mod grid;
mod level;
mod obs;
pub use act::GridAct;
pub use env::{GridEnv, GridEnvConfig, GridInfo, PlayerResult};
pub use error::GridError;
pub use grid::{Direction, Grid, Move, Object, ObjectKind};
pub use level::{Level, SOKOBAN_LEVEL};
pub use obs::GridObs;
