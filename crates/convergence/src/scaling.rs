//! Scaling direction classification.

use std::cmp::Ordering;

/// Overall trend of the watched collection relative to the desired count.
///
/// Classified once per wait, on the first poll, then held for the wait's
/// duration. The classification decides which sides of a membership diff
/// are reported as anomalies: removals are expected while scaling down,
/// additions while scaling up, and neither under a stable collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalingDirection {
    /// No poll has been observed yet.
    Unclassified,
    /// First observation was below the desired count.
    Up,
    /// First observation was above the desired count.
    Down,
    /// First observation already matched the desired count.
    Stable,
}

impl ScalingDirection {
    /// Classifies the trend from the first observed count.
    pub fn classify(observed: usize, desired: usize) -> Self {
        match observed.cmp(&desired) {
            Ordering::Equal => Self::Stable,
            Ordering::Less => Self::Up,
            Ordering::Greater => Self::Down,
        }
    }

    /// True once the first poll has classified the trend.
    pub fn is_classified(self) -> bool {
        self != Self::Unclassified
    }

    /// True when removals are expected rather than anomalous.
    pub fn expects_removals(self) -> bool {
        self == Self::Down
    }

    /// True when additions are expected rather than anomalous.
    pub fn expects_additions(self) -> bool {
        self == Self::Up
    }
}
