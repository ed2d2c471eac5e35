//! Scripting module - runs user scripts on the Rhai runtime
//!
//! `Executor` is the seam the editor and menu talk to; `RhaiExecutor` is the
//! real engine and `RecordingExecutor` stands in for it under test.

mod engine;
mod executor;

pub use engine::RhaiExecutor;
#[cfg(test)]
pub use executor::RecordingExecutor;
pub use executor::{Executor, Outcome};
