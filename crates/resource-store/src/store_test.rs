//! Unit tests for the store module

#[cfg(test)]
mod tests {
    use std::sync::{Arc, OnceLock};

    use crate::store::{drive_stream, read_failure, watch_config};
    use convergence::{Selector, WaitError};
    use futures::stream;
    use k8s_openapi::api::core::v1::Pod;
    use kube::core::ErrorResponse;
    use kube_runtime::watcher;

    #[test]
    fn test_watch_config_empty_selector_sets_nothing() {
        let config = watch_config(&Selector::everything());

        assert_eq!(config.label_selector, None);
        assert_eq!(config.field_selector, None);
    }

    #[test]
    fn test_watch_config_namespace_is_not_a_watch_parameter() {
        let config = watch_config(&Selector::namespaced("load-test".to_string()));

        assert_eq!(config.label_selector, None);
        assert_eq!(config.field_selector, None);
    }

    #[test]
    fn test_watch_config_maps_label_and_field_selectors() {
        let selector = Selector::new(
            Some("load-test".to_string()),
            "app=nginx".to_string(),
            "status.phase=Running".to_string(),
        );

        let config = watch_config(&selector);

        assert_eq!(config.label_selector.as_deref(), Some("app=nginx"));
        assert_eq!(config.field_selector.as_deref(), Some("status.phase=Running"));
    }

    #[tokio::test]
    async fn test_drive_stream_records_stream_end() {
        // An ended watch leaves the mirror frozen, so it must poison reads
        let failure = Arc::new(OnceLock::new());
        let events: Vec<Result<watcher::Event<Pod>, watcher::Error>> =
            vec![Ok(watcher::Event::Init), Ok(watcher::Event::InitDone)];

        drive_stream(
            stream::iter(events),
            Arc::clone(&failure),
            "everything".to_string(),
        )
        .await;

        assert_eq!(failure.get().map(String::as_str), Some("watch stream ended"));
    }

    #[tokio::test]
    async fn test_drive_stream_records_watch_error() {
        let failure = Arc::new(OnceLock::new());
        let events: Vec<Result<watcher::Event<Pod>, watcher::Error>> = vec![
            Ok(watcher::Event::Init),
            Err(watcher::Error::WatchError(ErrorResponse {
                status: "Failure".to_string(),
                message: "too old resource version".to_string(),
                reason: "Expired".to_string(),
                code: 410,
            })),
        ];

        drive_stream(
            stream::iter(events),
            Arc::clone(&failure),
            "everything".to_string(),
        )
        .await;

        let recorded = failure.get().cloned().unwrap_or_default();
        assert!(
            recorded.contains("too old resource version"),
            "got: {}",
            recorded
        );
    }

    #[test]
    fn test_read_failure_surfaces_recorded_message() {
        let failure = OnceLock::new();
        assert!(read_failure(&failure).is_none());

        failure.set("watch stream ended".to_string()).unwrap();

        let error = match read_failure(&failure) {
            Some(error) => error,
            None => panic!("recorded failure must surface"),
        };
        assert!(matches!(error, WaitError::SourceRead(_)));
        assert!(error.to_string().contains("watch stream ended"));
    }
}
