use std::sync::Arc;

use lanswarm_primitives::{peer, DurationSinceUnixEpoch};

use self::peer_list::PeerList;

pub mod peer_list;
pub mod single;

pub trait Entry {
    /// Returns True if the swarm still has peers and must be kept.
    fn is_good(&self) -> bool;

    /// Returns True if the Peers is Empty
    fn peers_is_empty(&self) -> bool;

    /// Returns the number of Peers
    fn get_peers_len(&self) -> usize;

    /// Get all swarm peers.
    fn get_peers(&self) -> Vec<Arc<peer::Peer>>;

    /// Inserts the peer or replaces the record with the same id. Returns
    /// true if the peer was not in the swarm before.
    fn upsert_peer(&mut self, peer: &peer::Peer) -> bool;

    /// Removes the peers not seen since `current_cutoff` and returns how
    /// many were removed.
    fn remove_inactive_peers(&mut self, current_cutoff: DurationSinceUnixEpoch) -> usize;
}

/// The peers holding one content hash, keyed by peer id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Swarm {
    pub(crate) peers: PeerList,
}
