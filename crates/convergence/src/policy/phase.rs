//! Phase-counting readiness policy.

use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;

use kube::Resource;

use crate::error::WaitError;
use crate::options::WaitOptions;
use crate::policy::{ObservedPhase, ReadinessPolicy};

/// Phase bucket for objects that report no phase.
const UNKNOWN_PHASE: &str = "Unknown";

/// Counts objects whose reported phase equals a target phase.
///
/// Convergence holds when the target-phase count equals the desired
/// count and every other observed object is in one of the allow-listed
/// inactive phases. Inactive leftovers never block convergence; anything
/// else waiting does.
#[derive(Debug)]
pub struct PhasePolicy<K> {
    kind: &'static str,
    target_phase: &'static str,
    inactive_phases: &'static [&'static str],
    _object: PhantomData<fn() -> K>,
}

impl<K> PhasePolicy<K> {
    /// Creates a policy for `kind` objects converging on `target_phase`.
    ///
    /// Objects in any of `inactive_phases` are tolerated without
    /// counting toward the desired number.
    pub fn new(
        kind: &'static str,
        target_phase: &'static str,
        inactive_phases: &'static [&'static str],
    ) -> Self {
        Self {
            kind,
            target_phase,
            inactive_phases,
            _object: PhantomData,
        }
    }

    fn classify_phase(&self, phase: &str) -> PhaseClass {
        if phase == self.target_phase {
            PhaseClass::Active
        } else if self.inactive_phases.contains(&phase) {
            PhaseClass::Inactive
        } else {
            PhaseClass::Waiting
        }
    }
}

enum PhaseClass {
    Active,
    Inactive,
    Waiting,
}

/// Latest-poll tallies plus cumulative progress for one wait.
///
/// Membership fields reflect the latest snapshot only; the peak count is
/// monotone across the wait.
#[derive(Debug, Clone)]
pub struct PhaseSummary {
    /// Number of objects the wait expects in the target phase.
    pub expected: usize,
    /// Target-phase count in the latest snapshot.
    pub active: usize,
    /// Allow-listed inactive count in the latest snapshot.
    pub inactive: usize,
    /// Count neither active nor inactive in the latest snapshot.
    pub waiting: usize,
    /// Highest target-phase count observed during the wait.
    pub peak_active: usize,
    /// Phase breakdown of the latest snapshot.
    pub by_phase: BTreeMap<String, usize>,
}

impl<K> ReadinessPolicy for PhasePolicy<K>
where
    K: Resource + ObservedPhase + Send + Sync,
{
    type Object = K;
    type Summary = PhaseSummary;

    fn kind(&self) -> &'static str {
        self.kind
    }

    fn new_summary(&self, options: &WaitOptions, initial: &[Arc<K>]) -> PhaseSummary {
        let mut summary = PhaseSummary {
            expected: options.desired_count,
            active: 0,
            inactive: 0,
            waiting: 0,
            peak_active: 0,
            by_phase: BTreeMap::new(),
        };
        self.update_summary(&mut summary, initial);
        summary
    }

    fn update_summary(&self, summary: &mut PhaseSummary, current: &[Arc<K>]) {
        summary.active = 0;
        summary.inactive = 0;
        summary.waiting = 0;
        summary.by_phase.clear();
        for object in current {
            let phase = object.phase().unwrap_or(UNKNOWN_PHASE);
            *summary.by_phase.entry(phase.to_string()).or_insert(0) += 1;
            match self.classify_phase(phase) {
                PhaseClass::Active => summary.active += 1,
                PhaseClass::Inactive => summary.inactive += 1,
                PhaseClass::Waiting => summary.waiting += 1,
            }
        }
        if summary.active > summary.peak_active {
            summary.peak_active = summary.active;
        }
    }

    // Completion is re-tallied from the snapshot itself so a stale
    // summary can never claim convergence.
    fn is_complete(&self, current: &[Arc<K>], summary: &PhaseSummary) -> bool {
        let mut active = 0;
        let mut inactive = 0;
        for object in current {
            match self.classify_phase(object.phase().unwrap_or(UNKNOWN_PHASE)) {
                PhaseClass::Active => active += 1,
                PhaseClass::Inactive => inactive += 1,
                PhaseClass::Waiting => {}
            }
        }
        active == summary.expected && active + inactive == current.len()
    }

    fn describe(&self, summary: &PhaseSummary) -> String {
        let breakdown = if summary.by_phase.is_empty() {
            String::new()
        } else {
            let phases: Vec<String> = summary
                .by_phase
                .iter()
                .map(|(phase, count)| format!("{}: {}", phase, count))
                .collect();
            format!(" [{}]", phases.join(", "))
        };
        format!(
            "{}/{} {} (peak {}), {} inactive, {} waiting{}",
            summary.active,
            summary.expected,
            self.target_phase,
            summary.peak_active,
            summary.inactive,
            summary.waiting,
            breakdown
        )
    }

    fn timeout_error(&self, options: &WaitOptions, summary: &PhaseSummary) -> WaitError {
        WaitError::Timeout {
            caller: options.caller.clone(),
            kind: self.kind.to_string(),
            selector: options.selector.to_string(),
            desired: options.desired_count,
            summary: self.describe(summary),
        }
    }
}
