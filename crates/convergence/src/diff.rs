//! Snapshot membership diffing.
//!
//! Snapshots are treated as sets keyed by object identifier; the diff of
//! two consecutive snapshots is what appeared and what disappeared.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use kube::Resource;

/// Identifiers that changed between two consecutive snapshots.
///
/// Both sides are sorted lexicographically so log output is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotDiff {
    /// Identifiers present in the current snapshot but not the previous.
    pub added: Vec<String>,
    /// Identifiers present in the previous snapshot but not the current.
    pub removed: Vec<String>,
}

impl SnapshotDiff {
    /// True when membership did not change.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

impl fmt::Display for SnapshotDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "added: [{}], removed: [{}]",
            self.added.join(", "),
            self.removed.join(", ")
        )
    }
}

/// Stable identifier for an observed object: `namespace/name` for
/// namespaced objects, the bare name otherwise.
pub fn object_id<K: Resource>(object: &K) -> String {
    let meta = object.meta();
    let name = meta.name.as_deref().unwrap_or("<unknown>");
    match meta.namespace.as_deref() {
        Some(namespace) => format!("{}/{}", namespace, name),
        None => name.to_string(),
    }
}

/// Computes the identifiers added and removed between two snapshots.
///
/// Identifiers are assumed unique within a snapshot.
pub fn compute_diff<K: Resource>(previous: &[Arc<K>], current: &[Arc<K>]) -> SnapshotDiff {
    let previous_ids: HashSet<String> = previous.iter().map(|o| object_id(o.as_ref())).collect();
    let current_ids: HashSet<String> = current.iter().map(|o| object_id(o.as_ref())).collect();

    let mut added: Vec<String> = current_ids.difference(&previous_ids).cloned().collect();
    let mut removed: Vec<String> = previous_ids.difference(&current_ids).cloned().collect();
    added.sort();
    removed.sort();

    SnapshotDiff { added, removed }
}
