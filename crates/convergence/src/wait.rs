//! The convergence wait loop.

use std::sync::Arc;

use tracing::{error, info};

use crate::diff::compute_diff;
use crate::error::WaitError;
use crate::options::WaitOptions;
use crate::policy::ReadinessPolicy;
use crate::scaling::ScalingDirection;
use crate::store::{SnapshotSource, SnapshotStore};

/// Polls `source` until `policy` reports convergence or the deadline
/// fires.
///
/// The deadline is armed before the snapshot handle is opened, so time
/// spent establishing the source counts against the timeout. The handle
/// is released on every exit path. The first poll classifies the scaling
/// direction instead of diffing; later polls report membership changes
/// the direction does not license. A snapshot read error aborts the
/// wait. When the deadline and the next poll are ready together, the
/// deadline wins and the policy's timeout error is returned.
pub async fn wait_for_convergence<S, P>(
    source: &S,
    policy: &P,
    options: &WaitOptions,
) -> Result<(), WaitError>
where
    P: ReadinessPolicy,
    S: SnapshotSource<P::Object>,
{
    options.validate()?;

    // Armed before the store opens so initial sync time counts against it.
    let deadline = tokio::time::sleep(options.timeout);
    tokio::pin!(deadline);

    let store = source.open(&options.selector).await?;

    let mut summary = policy.new_summary(options, &[]);
    let mut direction = ScalingDirection::Unclassified;
    let mut previous: Vec<Arc<P::Object>> = Vec::new();

    loop {
        tokio::select! {
            biased;
            _ = &mut deadline => {
                return Err(policy.timeout_error(options, &summary));
            }
            _ = tokio::time::sleep(options.poll_interval) => {
                let current = store.list()?;
                policy.update_summary(&mut summary, &current);
                if direction.is_classified() {
                    let changes = compute_diff(&previous, &current);
                    if !changes.removed.is_empty() && !direction.expects_removals() {
                        error!(
                            "{}: {}: {} {} disappeared: {}",
                            options.caller,
                            options.selector,
                            changes.removed.len(),
                            policy.kind(),
                            changes.removed.join(", ")
                        );
                        info!("{}: {}", options.caller, changes);
                    }
                    if !changes.added.is_empty() && !direction.expects_additions() {
                        error!(
                            "{}: {}: {} {} appeared: {}",
                            options.caller,
                            options.selector,
                            changes.added.len(),
                            policy.kind(),
                            changes.added.join(", ")
                        );
                        info!("{}: {}", options.caller, changes);
                    }
                } else {
                    direction = ScalingDirection::classify(current.len(), options.desired_count);
                }
                if options.enable_logging {
                    info!(
                        "{}: {}: {}: {}",
                        options.caller,
                        options.selector,
                        policy.kind(),
                        policy.describe(&summary)
                    );
                }
                if policy.is_complete(&current, &summary) {
                    return Ok(());
                }
                previous = current;
            }
        }
    }
}
