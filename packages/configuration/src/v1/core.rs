use serde::{Deserialize, Serialize};

use crate::TrackerPolicy;

/// Swarm bookkeeping on the tracker side.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Core {
    /// Interval in seconds between two runs of the job that removes stale
    /// peers and empty swarms. `0` disables the job, and peers are then
    /// never expired.
    #[serde(default = "Core::default_inactive_peer_cleanup_interval")]
    pub inactive_peer_cleanup_interval: u64,

    // Tracker policy configuration.
    #[serde(default = "Core::default_tracker_policy")]
    pub tracker_policy: TrackerPolicy,
}

impl Default for Core {
    fn default() -> Self {
        Self {
            inactive_peer_cleanup_interval: Self::default_inactive_peer_cleanup_interval(),
            tracker_policy: Self::default_tracker_policy(),
        }
    }
}

impl Core {
    fn default_inactive_peer_cleanup_interval() -> u64 {
        60
    }

    fn default_tracker_policy() -> TrackerPolicy {
        TrackerPolicy::default()
    }
}
