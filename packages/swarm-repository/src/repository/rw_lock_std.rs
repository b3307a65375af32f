use std::collections::BTreeMap;
use std::sync::Arc;

use lanswarm_primitives::content_hash::ContentHash;
use lanswarm_primitives::swarm_metrics::SwarmsMetrics;
use lanswarm_primitives::{peer, DurationSinceUnixEpoch};

use super::{Removed, Repository};
use crate::entry::Entry;
use crate::{EntrySingle, SwarmsRwLockStd};

/// Swarms behind a single `std::sync::RwLock`: lookups share the read lock,
/// announces and sweeps take the write lock.
#[derive(Default, Debug)]
pub struct RwLockStd<T> {
    pub(crate) swarms: std::sync::RwLock<BTreeMap<ContentHash, T>>,
}

impl SwarmsRwLockStd {
    // Every mutation is a single map operation, so a poisoned lock still
    // guards a consistent map.
    fn get_swarms(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<ContentHash, EntrySingle>> {
        self.swarms.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn get_swarms_mut(&self) -> std::sync::RwLockWriteGuard<'_, BTreeMap<ContentHash, EntrySingle>> {
        self.swarms.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Repository<EntrySingle> for SwarmsRwLockStd
where
    EntrySingle: Entry,
{
    fn upsert_peer(&self, key: &ContentHash, peer: &peer::Peer) -> bool {
        let mut db = self.get_swarms_mut();

        let entry = db.entry(*key).or_default();

        entry.upsert_peer(peer)
    }

    fn get_peers(&self, key: &ContentHash) -> Option<Vec<Arc<peer::Peer>>> {
        let db = self.get_swarms();
        db.get(key).map(Entry::get_peers)
    }

    fn get_metrics(&self) -> SwarmsMetrics {
        let mut metrics = SwarmsMetrics::default();

        for entry in self.get_swarms().values() {
            metrics += SwarmsMetrics {
                swarms: 1,
                peers: entry.get_peers_len() as u64,
            };
        }

        metrics
    }

    fn remove_inactive_peers(&self, current_cutoff: DurationSinceUnixEpoch) -> Removed {
        let mut db = self.get_swarms_mut();

        let mut removed = Removed::default();

        for entry in db.values_mut() {
            removed.peers += entry.remove_inactive_peers(current_cutoff) as u64;
        }

        let before = db.len();

        db.retain(|_, entry| entry.is_good());

        removed.swarms = (before - db.len()) as u64;

        removed
    }
}
