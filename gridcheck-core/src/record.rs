//! Types and traits for recording the steps of a clone check.
//!
//! Every step checked by [`check_clone`](crate::check_clone) is written to a
//! [`Recorder`] as a [`Record`] with the following keys:
//!
//! * `step` - the number of actions applied so far
//! * `episode` - the index of the current episode
//! * `reward` - the rewards of the step
//! * `done` - 1 if the episode ended at the step, otherwise 0
//! * `hash` - the state hash of the original after the step, in hex
//!
//! ```rust
//! use gridcheck_core::record::{Record, RecordValue};
//!
//! let mut record = Record::empty();
//! record.insert("step", RecordValue::Scalar(1.0));
//! record.insert("hash", RecordValue::String("0x0000000000000001".to_string()));
//! assert_eq!(record.get_scalar("step").unwrap(), 1.0);
//! ```
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::Recorder;
