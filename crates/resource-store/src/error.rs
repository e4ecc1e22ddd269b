use thiserror::Error;

/// Errors that can occur while establishing a resource store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("initial sync failed: {0}")]
    InitialSync(String),
}
