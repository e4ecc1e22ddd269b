//! Watch-backed snapshot stores.
//!
//! This module keeps a local mirror of one selector-identified collection
//! current from a background watch and serves reads from memory.

use crate::error::StoreError;
use convergence::{Selector, SnapshotSource, SnapshotStore, WaitError};
use futures::{Stream, TryStreamExt};
use kube::api::Api;
use kube::core::NamespaceResourceScope;
use kube::{Client, Resource};
use kube_runtime::reflector;
use kube_runtime::reflector::{Lookup, Store};
use kube_runtime::watcher;
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::{Arc, OnceLock};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Opens watch-backed stores against the cluster a client points at.
#[derive(Clone)]
pub struct ClusterSource {
    client: Client,
}

impl ClusterSource {
    /// Creates a new source that opens stores through `client`.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl<K> SnapshotSource<K> for ClusterSource
where
    K: Resource<Scope = NamespaceResourceScope>
        + Clone
        + DeserializeOwned
        + Debug
        + Send
        + Sync
        + 'static,
    K::DynamicType: Default + Eq + Hash + Clone + Send + Sync,
{
    type Store = ResourceStore<K>;

    async fn open(&self, selector: &Selector) -> Result<Self::Store, WaitError> {
        ResourceStore::open(self.client.clone(), selector)
            .await
            .map_err(|e| WaitError::SourceOpen(e.to_string()))
    }
}

/// Local mirror of the objects matching one selector.
///
/// A background task drives a reflector so every [`SnapshotStore::list`] call
/// is an in-memory read. Dropping the store aborts the task.
pub struct ResourceStore<K>
where
    K: Lookup + Clone + 'static,
    K::DynamicType: Hash + Eq,
{
    reader: Store<K>,
    failure: Arc<OnceLock<String>>,
    driver: JoinHandle<()>,
}

impl<K> ResourceStore<K>
where
    K: Resource<Scope = NamespaceResourceScope>
        + Clone
        + DeserializeOwned
        + Debug
        + Send
        + Sync
        + 'static,
    K::DynamicType: Default + Eq + Hash + Clone + Send + Sync,
{
    /// Starts the watch for `selector` and waits for the initial sync.
    pub async fn open(client: Client, selector: &Selector) -> Result<Self, StoreError> {
        let api: Api<K> = match selector.namespace.as_deref() {
            Some(namespace) => Api::namespaced(client, namespace),
            None => Api::all(client),
        };

        let (reader, writer) = reflector::store::<K>();
        let failure: Arc<OnceLock<String>> = Arc::new(OnceLock::new());

        debug!("Starting watch for {}", selector);

        let stream = Box::pin(reflector(writer, watcher(api, watch_config(selector))));
        let driver = tokio::spawn(drive_stream(
            stream,
            Arc::clone(&failure),
            selector.to_string(),
        ));

        if let Err(ready_error) = reader.wait_until_ready().await {
            driver.abort();
            let message = match failure.get() {
                Some(recorded) => recorded.clone(),
                None => ready_error.to_string(),
            };
            return Err(StoreError::InitialSync(message));
        }

        Ok(Self {
            reader,
            failure,
            driver,
        })
    }
}

impl<K> SnapshotStore<K> for ResourceStore<K>
where
    K: Lookup + Clone + Send + Sync + 'static,
    K::DynamicType: Hash + Eq + Clone + Send + Sync,
{
    fn list(&self) -> Result<Vec<Arc<K>>, WaitError> {
        if let Some(error) = read_failure(&self.failure) {
            return Err(error);
        }
        Ok(self.reader.state())
    }
}

impl<K> Drop for ResourceStore<K>
where
    K: Lookup + Clone + 'static,
    K::DynamicType: Hash + Eq,
{
    fn drop(&mut self) {
        self.driver.abort();
    }
}

/// Drains reflector events until the watch fails or ends, recording the
/// terminal outcome for later reads.
pub(crate) async fn drive_stream<K, S>(
    mut stream: S,
    failure: Arc<OnceLock<String>>,
    selector: String,
) where
    S: Stream<Item = Result<watcher::Event<K>, watcher::Error>> + Unpin,
{
    loop {
        match stream.try_next().await {
            Ok(Some(_)) => {}
            Ok(None) => {
                warn!("Watch stream for {} ended", selector);
                let _ = failure.set("watch stream ended".to_string());
                break;
            }
            Err(e) => {
                warn!("Watch stream for {} failed: {}", selector, e);
                let _ = failure.set(e.to_string());
                break;
            }
        }
    }
}

/// Maps a recorded terminal watch failure to the error later reads report.
///
/// A broken watch means the mirror may be arbitrarily stale, so reads
/// surface the failure instead of serving the frozen state.
pub(crate) fn read_failure(failure: &OnceLock<String>) -> Option<WaitError> {
    failure
        .get()
        .map(|message| WaitError::SourceRead(message.clone()))
}

/// Maps a selector onto the watch parameters, leaving empty parts unset.
pub(crate) fn watch_config(selector: &Selector) -> watcher::Config {
    let mut config = watcher::Config::default();
    if !selector.label_selector.is_empty() {
        config.label_selector = Some(selector.label_selector.clone());
    }
    if !selector.field_selector.is_empty() {
        config.field_selector = Some(selector.field_selector.clone());
    }
    config
}
