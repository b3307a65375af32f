use std::sync::Arc;

use lanswarm_primitives::content_hash::ContentHash;
use lanswarm_primitives::swarm_metrics::SwarmsMetrics;
use lanswarm_primitives::{peer, DurationSinceUnixEpoch};

pub mod rw_lock_std;

/// What an expiry sweep removed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Removed {
    pub peers: u64,
    pub swarms: u64,
}

pub trait Repository<T>: Default + 'static {
    fn get_peers(&self, key: &ContentHash) -> Option<Vec<Arc<peer::Peer>>>;
    fn get_metrics(&self) -> SwarmsMetrics;

    /// Removes the peers not seen since `current_cutoff` and the swarms left
    /// without peers, in one exclusive pass.
    fn remove_inactive_peers(&self, current_cutoff: DurationSinceUnixEpoch) -> Removed;

    /// Inserts or refreshes `peer` in the swarm of `key`, creating the swarm
    /// if needed. Returns true if the peer was new to the swarm.
    fn upsert_peer(&self, key: &ContentHash, peer: &peer::Peer) -> bool;
}
