//! Resource Wait Measurement
//!
//! Watches one selector-identified collection of cluster objects and
//! blocks until it converges on the desired count of ready objects:
//! - pods: `desiredCount` running, leftovers finished
//! - pvcs: `desiredCount` bound, leftovers lost
//!
//! Parameters come from an optional YAML params file plus environment
//! variable overrides, mirroring how load test measurements are driven.

mod error;
mod measurement;


use crate::error::MeasurementError;
use kube::Client;
use resource_store::ClusterSource;
use std::env;
use std::fs;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), MeasurementError> {
    tracing_subscriber::fmt::init();

    info!("Starting resource wait measurement");

    // Load configuration from environment variables
    let resource = env::var("RESOURCE").unwrap_or_else(|_| "pods".to_string());
    let params_file = env::var("PARAMS_FILE").ok();

    let document = match params_file.as_deref() {
        Some(path) => Some(fs::read_to_string(path)?),
        None => None,
    };
    let overrides = measurement::environment_overrides();
    let params = measurement::assemble_params(document.as_deref(), &overrides)?;

    info!("Configuration:");
    info!("  Resource: {}", resource);
    info!(
        "  Params file: {}",
        params_file.as_deref().unwrap_or("<none>")
    );
    info!("  Environment overrides: {}", overrides.len());

    let client = Client::try_default().await?;
    let source = ClusterSource::new(client);

    match resource.as_str() {
        "pods" => measurement::wait_for_running_pods(&source, &params).await?,
        "pvcs" => measurement::wait_for_running_pvcs(&source, &params).await?,
        other => {
            return Err(MeasurementError::InvalidConfig(format!(
                "RESOURCE must be 'pods' or 'pvcs', got '{}'",
                other
            )));
        }
    }

    info!("Measurement complete");

    Ok(())
}
