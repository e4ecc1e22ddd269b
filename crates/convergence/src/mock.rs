//! Scripted snapshot source for unit testing waits
//!
//! This module provides an in-memory implementation of the snapshot
//! source traits that replays a scripted sequence of list results, so
//! wait behavior can be exercised without a running cluster.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::WaitError;
use crate::selector::Selector;
use crate::store::{SnapshotSource, SnapshotStore};

/// One scripted outcome of a `list` call.
pub type ScriptedStep<K> = Result<Vec<Arc<K>>, WaitError>;

/// Snapshot source replaying a scripted sequence of list results.
///
/// Each `list` call on the opened handle consumes the next step; once
/// the script is exhausted the latest successful snapshot repeats. The
/// source records the opened selector, the number of list calls and
/// whether the handle was dropped, so wait behavior is assertable. An
/// optional open delay models slow store establishment.
pub struct ScriptedSource<K> {
    script: Mutex<Option<VecDeque<ScriptedStep<K>>>>,
    open_failure: Option<String>,
    open_delay: Duration,
    opened_selector: Mutex<Option<Selector>>,
    list_calls: Arc<AtomicUsize>,
    dropped: Arc<AtomicBool>,
}

impl<K> ScriptedSource<K> {
    /// Creates a source that serves `steps` in order, one per list call.
    pub fn new(steps: Vec<ScriptedStep<K>>) -> Self {
        Self {
            script: Mutex::new(Some(steps.into_iter().collect())),
            open_failure: None,
            open_delay: Duration::ZERO,
            opened_selector: Mutex::new(None),
            list_calls: Arc::new(AtomicUsize::new(0)),
            dropped: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Creates a source whose `open` fails with the given message.
    pub fn failing_open(message: &str) -> Self {
        Self {
            script: Mutex::new(None),
            open_failure: Some(message.to_string()),
            open_delay: Duration::ZERO,
            opened_selector: Mutex::new(None),
            list_calls: Arc::new(AtomicUsize::new(0)),
            dropped: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Makes `open` spend `delay` before returning.
    pub fn with_open_delay(mut self, delay: Duration) -> Self {
        self.open_delay = delay;
        self
    }

    /// Selector passed to `open`, if it was called.
    pub fn opened_selector(&self) -> Option<Selector> {
        self.opened_selector.lock().unwrap().clone()
    }

    /// Number of `list` calls served so far.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// True once the opened handle has been dropped.
    pub fn store_dropped(&self) -> bool {
        self.dropped.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl<K> SnapshotSource<K> for ScriptedSource<K>
where
    K: Send + Sync,
{
    type Store = ScriptedStore<K>;

    async fn open(&self, selector: &Selector) -> Result<Self::Store, WaitError> {
        if !self.open_delay.is_zero() {
            tokio::time::sleep(self.open_delay).await;
        }
        if let Some(message) = &self.open_failure {
            return Err(WaitError::SourceOpen(message.clone()));
        }
        *self.opened_selector.lock().unwrap() = Some(selector.clone());
        let script = self.script.lock().unwrap().take().ok_or_else(|| {
            WaitError::SourceOpen("script already consumed by an earlier open".to_string())
        })?;
        Ok(ScriptedStore {
            script: Mutex::new(script),
            latest: Mutex::new(None),
            list_calls: Arc::clone(&self.list_calls),
            dropped: Arc::clone(&self.dropped),
        })
    }
}

/// Handle produced by [`ScriptedSource::open`].
pub struct ScriptedStore<K> {
    script: Mutex<VecDeque<ScriptedStep<K>>>,
    latest: Mutex<Option<Vec<Arc<K>>>>,
    list_calls: Arc<AtomicUsize>,
    dropped: Arc<AtomicBool>,
}

impl<K> SnapshotStore<K> for ScriptedStore<K>
where
    K: Send + Sync,
{
    fn list(&self) -> Result<Vec<Arc<K>>, WaitError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        match self.script.lock().unwrap().pop_front() {
            Some(Ok(snapshot)) => {
                *self.latest.lock().unwrap() = Some(snapshot.clone());
                Ok(snapshot)
            }
            Some(Err(error)) => Err(error),
            None => Ok(self.latest.lock().unwrap().clone().unwrap_or_default()),
        }
    }
}

impl<K> Drop for ScriptedStore<K> {
    fn drop(&mut self) {
        self.dropped.store(true, Ordering::SeqCst);
    }
}
