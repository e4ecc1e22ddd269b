//! Readiness policies.
//!
//! A policy defines what "ready" means for one resource kind: how the
//! readiness summary is seeded and updated across polls, when the wait
//! is complete, and what the timeout error looks like. The wait loop is
//! policy-agnostic; callers pick the policy for their kind up front.

mod phase;
mod pods;
mod pvcs;
#[cfg(test)]
mod phase_test;

pub use phase::{PhasePolicy, PhaseSummary};
pub use pods::running_pods;
pub use pvcs::bound_claims;

use std::sync::Arc;

use crate::error::WaitError;
use crate::options::WaitOptions;

/// Extracts the lifecycle phase a policy judges objects by.
pub trait ObservedPhase {
    /// Reported phase, if the object has one.
    fn phase(&self) -> Option<&str>;
}

/// Defines convergence for one resource kind.
///
/// Policies are stateless; all per-wait accumulation lives in the
/// summary value owned by the wait loop for the wait's duration.
pub trait ReadinessPolicy: Send + Sync {
    /// Observed object type.
    type Object: kube::Resource + Send + Sync;
    /// Accumulator carried across the polls of a single wait.
    type Summary: Send;

    /// Plural kind label used in log lines, e.g. "pods".
    fn kind(&self) -> &'static str;

    /// Seeds the accumulator before the first poll.
    fn new_summary(
        &self,
        options: &WaitOptions,
        initial: &[Arc<Self::Object>],
    ) -> Self::Summary;

    /// Folds the latest snapshot into the accumulator.
    ///
    /// Called once per poll; cumulative fields must survive later calls.
    fn update_summary(&self, summary: &mut Self::Summary, current: &[Arc<Self::Object>]);

    /// Judges convergence against the latest snapshot.
    fn is_complete(&self, current: &[Arc<Self::Object>], summary: &Self::Summary) -> bool;

    /// Renders the accumulator for the per-poll progress line.
    fn describe(&self, summary: &Self::Summary) -> String;

    /// Builds the error returned when the deadline fires first.
    fn timeout_error(&self, options: &WaitOptions, summary: &Self::Summary) -> WaitError;
}
