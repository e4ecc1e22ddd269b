//! Persistent volume claim readiness.

use k8s_openapi::api::core::v1::PersistentVolumeClaim;

use crate::policy::{ObservedPhase, PhasePolicy};

impl ObservedPhase for PersistentVolumeClaim {
    fn phase(&self) -> Option<&str> {
        self.status.as_ref().and_then(|status| status.phase.as_deref())
    }
}

/// Policy for volume claims converging on the `Bound` phase.
///
/// Lost claims are inactive leftovers and do not block convergence.
pub fn bound_claims() -> PhasePolicy<PersistentVolumeClaim> {
    PhasePolicy::new("PVCs", "Bound", &["Lost"])
}
