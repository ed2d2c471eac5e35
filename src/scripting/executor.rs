/// Result of running a piece of source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Description of the first unhandled fault
    Failure(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

/// Runs source text in a fresh, empty namespace.
///
/// Implementations block until the script finishes or faults. Faults are
/// reported through [`Outcome::Failure`] and never escape as panics or errors.
pub trait Executor {
    fn execute(&mut self, source: &str) -> Outcome;
}

#[cfg(test)]
pub use fake::RecordingExecutor;
