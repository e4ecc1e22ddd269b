//! Measurement-specific error types.
//!
//! This module defines error types specific to the resource wait runner
//! that are not covered by upstream library errors.

use convergence::WaitError;
use kube::Error as KubeError;
use thiserror::Error;

/// Errors that can occur in the resource wait measurement.
#[derive(Debug, Error)]
pub enum MeasurementError {
    /// Kubernetes API error
    #[error("Kubernetes error: {0}")]
    Kube(#[from] KubeError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Params document could not be parsed
    #[error("Params error: {0}")]
    Params(#[from] serde_yaml::Error),

    /// Params file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Convergence wait did not succeed
    #[error("Wait failed: {0}")]
    Wait(#[from] WaitError),
}
