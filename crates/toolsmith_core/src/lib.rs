//! TOOLSMITH Core Types
//!
//! This crate contains pure types and logic with no I/O.
//! Shared by the tool pipeline and the command-line front end.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod id;
pub mod time;

// Re-exports
pub use error::{CoreError, CoreResult};
pub use id::{ClockIdSource, IdSource, SequentialIdSource};
pub use time::Timestamp;
