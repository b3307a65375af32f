use std::sync::Arc;

use lanswarm_primitives::{peer, DurationSinceUnixEpoch};

use super::Entry;
use crate::EntrySingle;

impl Entry for EntrySingle {
    fn is_good(&self) -> bool {
        !self.peers.is_empty()
    }

    fn peers_is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    fn get_peers_len(&self) -> usize {
        self.peers.len()
    }

    fn get_peers(&self) -> Vec<Arc<peer::Peer>> {
        self.peers.get_peers()
    }

    fn upsert_peer(&mut self, peer: &peer::Peer) -> bool {
        self.peers.insert(peer.id.clone(), Arc::new(peer.clone())).is_none()
    }

    fn remove_inactive_peers(&mut self, current_cutoff: DurationSinceUnixEpoch) -> usize {
        let before = self.peers.len();

        self.peers.retain(|_, peer| !peer.is_stale(current_cutoff));

        before - self.peers.len()
    }
}
