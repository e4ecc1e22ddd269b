//! Watch-backed snapshot stores for convergence waits.
//!
//! This crate connects the convergence loop to a Kubernetes cluster. A
//! [`ClusterSource`] opens one [`ResourceStore`] per wait; the store keeps a
//! watch-fed local mirror of the selected collection, so every poll is an
//! in-memory read instead of an API server round trip.
//!
//! # Example
//!
//! ```no_run
//! use convergence::policy::running_pods;
//! use convergence::{Selector, WaitOptions, wait_for_convergence};
//! use resource_store::ClusterSource;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = kube::Client::try_default().await?;
//! let source = ClusterSource::new(client);
//!
//! let selector = Selector::namespaced("load-test".to_string());
//! let options = WaitOptions::new("WaitForRunningPods", selector, 10);
//! wait_for_convergence(&source, &running_pods(), &options).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod store;

#[cfg(test)]
mod store_test;

pub use error::StoreError;
pub use store::{ClusterSource, ResourceStore};
