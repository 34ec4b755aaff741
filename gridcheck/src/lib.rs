//! Clone-determinism checks for grid-world environments.
//!
//! The workspace consists of the following crates:
//!
//! * `gridcheck-core` defines the environment traits and [`run_clone_check`],
//!   which drives an environment and its clone with the same actions and stops
//!   at the first output that differs.
//! * `gridcheck-grid-env` is a Sokoban-like grid world implemented in Rust. It
//!   needs nothing but the crate itself and is what the tests run against.
//! * `gridcheck-py-env` wraps [Griddly](https://griddly.readthedocs.io)
//!   environments created in Python, e.g. `GDY-Sokoban-v0`.
//!
//! This crate provides the `clone_check` binary, its console output and the
//! CSV trace of a check.
//!
//! ```bash
//! cargo run --bin clone_check -- --steps 1000 --slip 0.1 --trace trace.csv
//! cargo run --bin clone_check --features griddly -- --backend griddly
//! ```
//!
//! [`run_clone_check`]: gridcheck_core::run_clone_check
mod output;
mod trace;
pub use output::{check_and_print, write_inspection};
pub use trace::{write_trace, TraceRecord};
