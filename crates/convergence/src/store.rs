//! Snapshot source abstraction.
//!
//! The wait loop never talks to a cluster directly; it opens a snapshot
//! store through these traits and only reads from it. Production
//! implementations mirror a remote collection in the background, test
//! implementations replay scripted snapshots.

use std::sync::Arc;

use crate::error::WaitError;
use crate::selector::Selector;

/// Read handle over a live local mirror of an observed collection.
///
/// Dropping the handle releases the mirror and terminates its background
/// updates.
pub trait SnapshotStore<K>: Send + Sync {
    /// Returns the most recently observed set of matching objects.
    ///
    /// Non-blocking; the result reflects eventually-consistent state. An
    /// error means the mirror has failed terminally and the wait must
    /// abort.
    fn list(&self) -> Result<Vec<Arc<K>>, WaitError>;
}

/// Opens snapshot mirrors for selector-identified collections.
#[async_trait::async_trait]
pub trait SnapshotSource<K>: Send + Sync {
    /// Handle type produced by [`open`](Self::open).
    type Store: SnapshotStore<K>;

    /// Establishes a live mirror of the objects matching `selector`.
    ///
    /// Returns once the mirror has observed the collection, so the first
    /// `list` call on the handle is meaningful.
    async fn open(&self, selector: &Selector) -> Result<Self::Store, WaitError>;
}
