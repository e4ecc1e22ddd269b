//! Resource Convergence Core
//!
//! Polls a selector-identified collection of Kubernetes objects until a
//! pluggable readiness policy reports convergence, subject to a deadline.
//! The poll loop tolerates expected membership churn while a collection
//! scales toward its desired size and reports the churn it cannot
//! explain.
//!
//! # Example
//!
//! ```no_run
//! use convergence::policy::running_pods;
//! use convergence::{Selector, SnapshotSource, WaitError, WaitOptions, wait_for_convergence};
//! use k8s_openapi::api::core::v1::Pod;
//!
//! async fn wait_for_pods<S>(source: &S) -> Result<(), WaitError>
//! where
//!     S: SnapshotSource<Pod>,
//! {
//!     let selector = Selector::namespaced("load-test".to_string());
//!     let mut options = WaitOptions::new("WaitForRunningPods", selector, 3);
//!     options.timeout = std::time::Duration::from_secs(120);
//!
//!     wait_for_convergence(source, &running_pods(), &options).await
//! }
//! ```
//!
//! # Components
//!
//! - **Policies**: what "ready" means per resource kind, with shipped
//!   policies for running pods and bound volume claims
//! - **Diffing**: membership changes between consecutive snapshots
//! - **Scaling direction**: classifies the expected trend once per wait
//!   and silences the churn it licenses
//! - **Snapshot sources**: the interface a watch-backed store implements

pub mod diff;
pub mod error;
pub mod options;
pub mod policy;
pub mod scaling;
pub mod selector;
pub mod store;
pub mod wait;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

#[cfg(test)]
mod test_utils;


pub use diff::{SnapshotDiff, compute_diff, object_id};
pub use error::WaitError;
pub use options::{DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT, Params, WaitOptions};
pub use policy::{ObservedPhase, PhasePolicy, PhaseSummary, ReadinessPolicy};
pub use scaling::ScalingDirection;
pub use selector::Selector;
pub use store::{SnapshotSource, SnapshotStore};
pub use wait::wait_for_convergence;
#[cfg(any(test, feature = "test-util"))]
pub use mock::{ScriptedSource, ScriptedStep, ScriptedStore};
