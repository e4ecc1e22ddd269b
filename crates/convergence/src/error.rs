//! Wait errors.

use thiserror::Error;

/// Errors surfaced by a convergence wait.
#[derive(Debug, Error)]
pub enum WaitError {
    /// Malformed or missing wait option
    #[error("invalid wait options: {0}")]
    Configuration(String),

    /// Snapshot source handle could not be established
    #[error("store creation error: {0}")]
    SourceOpen(String),

    /// Snapshot source failed mid-wait
    #[error("store read error: {0}")]
    SourceRead(String),

    /// Convergence did not happen before the deadline
    #[error("{caller}: {selector}: timeout while waiting for {desired} {kind}: last status: {summary}")]
    Timeout {
        /// Name of the measurement that ran the wait.
        caller: String,
        /// Plural kind label of the waited-for objects, e.g. "pods".
        kind: String,
        /// Rendering of the observed selector.
        selector: String,
        /// Number of objects the wait expected in the target state.
        desired: usize,
        /// Final readiness summary rendering.
        summary: String,
    },
}

impl WaitError {
    /// True for the did-not-converge-in-time outcome.
    ///
    /// Callers that treat a missed deadline differently from
    /// configuration or source failures branch on this.
    pub fn is_timeout(&self) -> bool {
        matches!(self, WaitError::Timeout { .. })
    }
}
