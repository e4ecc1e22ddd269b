//! Pod readiness.

use k8s_openapi::api::core::v1::Pod;

use crate::policy::{ObservedPhase, PhasePolicy};

impl ObservedPhase for Pod {
    fn phase(&self) -> Option<&str> {
        self.status.as_ref().and_then(|status| status.phase.as_deref())
    }
}

/// Policy for pods converging on the `Running` phase.
///
/// Succeeded and failed pods are inactive leftovers (e.g. evictions)
/// and do not block convergence.
pub fn running_pods() -> PhasePolicy<Pod> {
    PhasePolicy::new("pods", "Running", &["Succeeded", "Failed"])
}
