//! Unit tests for the phase policy

#[cfg(test)]
mod tests {
    use crate::error::WaitError;
    use crate::options::WaitOptions;
    use crate::policy::{ReadinessPolicy, bound_claims, running_pods};
    use crate::selector::Selector;
    use crate::test_utils::*;

    fn options(desired: usize) -> WaitOptions {
        WaitOptions::new("WaitForRunningPods", Selector::namespaced("default".to_string()), desired)
    }

    #[test]
    fn test_new_summary_seeds_expected_and_tallies() {
        let policy = running_pods();
        let initial = vec![
            create_test_pod("web-0", "Running"),
            create_test_pod("web-1", "Pending"),
        ];

        let summary = policy.new_summary(&options(3), &initial);
        assert_eq!(summary.expected, 3);
        assert_eq!(summary.active, 1);
        assert_eq!(summary.waiting, 1);
        assert_eq!(summary.peak_active, 1);
    }

    #[test]
    fn test_completion_tolerates_inactive_stragglers() {
        // Three running plus two allow-listed leftovers is converged
        let policy = running_pods();
        let current = vec![
            create_test_pod("web-0", "Running"),
            create_test_pod("web-1", "Running"),
            create_test_pod("web-2", "Running"),
            create_test_pod("job-0", "Succeeded"),
            create_test_pod("job-1", "Failed"),
        ];

        let summary = policy.new_summary(&options(3), &current);
        assert!(policy.is_complete(&current, &summary));
    }

    #[test]
    fn test_completion_blocked_by_waiting_object() {
        // A non-allow-listed phase keeps the wait open
        let policy = running_pods();
        let current = vec![
            create_test_pod("web-0", "Running"),
            create_test_pod("web-1", "Running"),
            create_test_pod("web-2", "Running"),
            create_test_pod("web-3", "Pending"),
        ];

        let summary = policy.new_summary(&options(3), &current);
        assert!(!policy.is_complete(&current, &summary));
    }

    #[test]
    fn test_completion_requires_exact_active_count() {
        let policy = running_pods();
        let current = vec![
            create_test_pod("web-0", "Running"),
            create_test_pod("web-1", "Running"),
            create_test_pod("web-2", "Running"),
            create_test_pod("web-3", "Running"),
        ];

        let summary = policy.new_summary(&options(3), &current);
        assert!(
            !policy.is_complete(&current, &summary),
            "More active objects than desired is not convergence"
        );
    }

    #[test]
    fn test_missing_status_counts_as_waiting() {
        let policy = running_pods();
        let current = vec![
            create_test_pod("web-0", "Running"),
            create_test_pod_without_status("web-1"),
        ];

        let mut summary = policy.new_summary(&options(1), &[]);
        policy.update_summary(&mut summary, &current);
        assert_eq!(summary.active, 1);
        assert_eq!(summary.waiting, 1);
        assert_eq!(summary.by_phase.get("Unknown"), Some(&1));
        assert!(!policy.is_complete(&current, &summary));
    }

    #[test]
    fn test_peak_active_is_monotone() {
        // The peak survives a later drop in the active count
        let policy = running_pods();
        let mut summary = policy.new_summary(&options(2), &[]);

        policy.update_summary(
            &mut summary,
            &[
                create_test_pod("web-0", "Running"),
                create_test_pod("web-1", "Running"),
            ],
        );
        assert_eq!(summary.peak_active, 2);

        policy.update_summary(&mut summary, &[create_test_pod("web-0", "Running")]);
        assert_eq!(summary.active, 1);
        assert_eq!(summary.peak_active, 2);
    }

    #[test]
    fn test_describe_format() {
        let policy = running_pods();
        let current = vec![
            create_test_pod("web-0", "Running"),
            create_test_pod("web-1", "Pending"),
            create_test_pod("job-0", "Failed"),
        ];

        let summary = policy.new_summary(&options(2), &current);
        assert_eq!(
            policy.describe(&summary),
            "1/2 Running (peak 1), 1 inactive, 1 waiting [Failed: 1, Pending: 1, Running: 1]"
        );
    }

    #[test]
    fn test_describe_empty_snapshot() {
        let policy = running_pods();
        let summary = policy.new_summary(&options(2), &[]);
        assert_eq!(policy.describe(&summary), "0/2 Running (peak 0), 0 inactive, 0 waiting");
    }

    #[test]
    fn test_bound_claims_tolerates_lost() {
        let policy = bound_claims();
        let current = vec![
            create_test_pvc("data-0", "Bound"),
            create_test_pvc("data-1", "Bound"),
            create_test_pvc("data-2", "Lost"),
        ];

        let summary = policy.new_summary(&options(2), &current);
        assert!(policy.is_complete(&current, &summary));
        assert_eq!(policy.kind(), "PVCs");
    }

    #[test]
    fn test_bound_claims_blocked_by_pending() {
        let policy = bound_claims();
        let current = vec![
            create_test_pvc("data-0", "Bound"),
            create_test_pvc("data-1", "Pending"),
        ];

        let summary = policy.new_summary(&options(1), &current);
        assert!(!policy.is_complete(&current, &summary));
    }

    #[test]
    fn test_timeout_error_carries_wait_context() {
        let policy = running_pods();
        let options = options(3);
        let summary = policy.new_summary(&options, &[create_test_pod("web-0", "Running")]);

        let error = policy.timeout_error(&options, &summary);
        assert!(error.is_timeout());
        let message = error.to_string();
        assert!(message.contains("WaitForRunningPods"), "got: {}", message);
        assert!(message.contains("namespace(default)"), "got: {}", message);
        assert!(message.contains("3 pods"), "got: {}", message);
        assert!(message.contains("1/3 Running"), "got: {}", message);
        match error {
            WaitError::Timeout { desired, kind, .. } => {
                assert_eq!(desired, 3);
                assert_eq!(kind, "pods");
            }
            other => panic!("expected timeout error, got {}", other),
        }
    }
}
