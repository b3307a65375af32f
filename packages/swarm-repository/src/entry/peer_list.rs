use std::sync::Arc;

use lanswarm_primitives::peer;

#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeerList {
    peers: std::collections::BTreeMap<peer::Id, Arc<peer::Peer>>,
}

impl PeerList {
    #[must_use]
    pub fn len(&self) -> usize {
        self.peers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    pub fn insert(&mut self, key: peer::Id, value: Arc<peer::Peer>) -> Option<Arc<peer::Peer>> {
        self.peers.insert(key, value)
    }

    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&peer::Id, &mut Arc<peer::Peer>) -> bool,
    {
        self.peers.retain(f);
    }

    #[must_use]
    pub fn get_peers(&self) -> Vec<Arc<peer::Peer>> {
        self.peers.values().cloned().collect()
    }
}
