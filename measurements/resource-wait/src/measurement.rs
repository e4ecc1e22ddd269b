//! Convergence measurements and their parameter assembly.
//!
//! Each measurement builds wait options from a params document and drives
//! the convergence loop with the matching readiness policy. The params
//! document comes from an optional YAML file, with individual keys
//! overridable through environment variables.

use std::env;

use convergence::policy::{bound_claims, running_pods};
use convergence::{Params, SnapshotSource, WaitOptions, wait_for_convergence};
use k8s_openapi::api::core::v1::{PersistentVolumeClaim, Pod};
use serde_json::Value;

use crate::error::MeasurementError;

/// Caller name under which the pod measurement logs and reports.
pub const WAIT_FOR_RUNNING_PODS: &str = "WaitForRunningPods";

/// Caller name under which the PVC measurement logs and reports.
pub const WAIT_FOR_RUNNING_PVCS: &str = "WaitForRunningPVCs";

/// Environment variables recognized as overrides, with the params key
/// each one feeds. Values are inserted as strings, so counts and
/// durations go through the same coercions as file-supplied strings.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("NAMESPACE", "namespace"),
    ("LABEL_SELECTOR", "labelSelector"),
    ("FIELD_SELECTOR", "fieldSelector"),
    ("DESIRED_COUNT", "desiredCount"),
    ("TIMEOUT", "timeout"),
    ("POLL_INTERVAL", "pollInterval"),
];

/// Waits until the selected pods have converged on `desiredCount` running.
pub async fn wait_for_running_pods<S>(source: &S, params: &Params) -> Result<(), MeasurementError>
where
    S: SnapshotSource<Pod>,
{
    let options = WaitOptions::from_params(WAIT_FOR_RUNNING_PODS, params)?;
    wait_for_convergence(source, &running_pods(), &options).await?;
    Ok(())
}

/// Waits until the selected claims have converged on `desiredCount` bound.
pub async fn wait_for_running_pvcs<S>(source: &S, params: &Params) -> Result<(), MeasurementError>
where
    S: SnapshotSource<PersistentVolumeClaim>,
{
    let options = WaitOptions::from_params(WAIT_FOR_RUNNING_PVCS, params)?;
    wait_for_convergence(source, &bound_claims(), &options).await?;
    Ok(())
}

/// Builds the params document from an optional YAML text plus overrides.
///
/// Overrides are applied after the document, so they win for keys
/// present in both.
pub fn assemble_params(
    document: Option<&str>,
    overrides: &[(String, String)],
) -> Result<Params, MeasurementError> {
    let mut params = match document {
        Some(text) => {
            let value: Value = serde_yaml::from_str(text)?;
            Params::from_value(value)?
        }
        None => Params::new(),
    };
    for (key, value) in overrides {
        params.set(key, Value::String(value.clone()));
    }
    Ok(params)
}

/// Collects recognized override values from the process environment.
pub fn environment_overrides() -> Vec<(String, String)> {
    ENV_OVERRIDES
        .iter()
        .filter_map(|(variable, key)| env::var(variable).ok().map(|value| (key.to_string(), value)))
        .collect()
}
