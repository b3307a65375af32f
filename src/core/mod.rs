//! The core `tracker` module contains the swarm logic, independent of the
//! delivery layer.
//!
//! ```text
//! Delivery layer     Domain layer
//!
//!     HTTP tracker |> Core tracker
//! ```
//!
//! # Table of contents
//!
//! - [Tracker](#tracker)
//!   - [Announce](#announce)
//!   - [Want](#want)
//!   - [Expiry](#expiry)
//! - [Configuration](#configuration)
//!
//! # Tracker
//!
//! The `Tracker` keeps, for every content hash, the swarm of peers that
//! announced it. The state lives only in memory behind a single lock: all
//! mutations are exclusive and reads run concurrently.
//!
//! ## Announce
//!
//! A peer announces every content hash it can serve. The tracker stores the
//! peer with the current time as `last_seen`. Announcing again only refreshes
//! that time, so re-announcing is the heartbeat.
//!
//! ```rust,no_run
//! use std::net::{IpAddr, Ipv4Addr, SocketAddr};
//!
//! use lanswarm::core::Tracker;
//! use lanswarm_configuration::Core;
//! use lanswarm_primitives::content_hash::ContentHash;
//! use lanswarm_primitives::{peer, DurationSinceUnixEpoch};
//!
//! let tracker = Tracker::new(&Core::default());
//!
//! let content_hash = "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
//!     .parse::<ContentHash>()
//!     .unwrap();
//!
//! let mut peer = peer::Peer {
//!     id: peer::Id::new("3f1c5b0e-4a9d-4c1e-9f0a-2b7d8e6c5a41"),
//!     addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 20)), 4040),
//!     last_seen: DurationSinceUnixEpoch::ZERO,
//! };
//!
//! tracker.announce(&content_hash, &mut peer);
//!
//! assert_eq!(tracker.want(&content_hash).unwrap().len(), 1);
//! ```
//!
//! ## Want
//!
//! A peer that wants some content asks for the swarm. The tracker returns
//! every known peer, in no particular order, or an error if nobody is
//! sharing it.
//!
//! ## Expiry
//!
//! Peers that stop announcing are removed after `max_peer_timeout` seconds by
//! the [`swarm_cleanup`](crate::bootstrap::jobs::swarm_cleanup) job. Swarms
//! left without peers are removed in the same pass.
//!
//! # Configuration
//!
//! ```toml
//! [core]
//! inactive_peer_cleanup_interval = 60
//!
//! [core.tracker_policy]
//! max_peer_timeout = 300
//! ```
pub mod error;
pub mod services;

use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use lanswarm_clock::clock::Time;
use lanswarm_configuration::{Core, TrackerPolicy};
use lanswarm_primitives::content_hash::ContentHash;
use lanswarm_primitives::peer;
use lanswarm_primitives::swarm_metrics::SwarmsMetrics;
use lanswarm_swarm_repository::repository::{Removed, Repository};
use lanswarm_swarm_repository::SwarmsRwLockStd;
use tracing::debug;

use self::error::Error;
use crate::CurrentClock;

/// The domain layer tracker service.
///
/// Its main responsibility is to keep the swarm membership for every content
/// hash. The delivery layer is the [`tracker`](crate::servers::tracker) HTTP
/// server.
pub struct Tracker {
    policy: TrackerPolicy,
    swarms: Arc<SwarmsRwLockStd>,
}

impl Tracker {
    #[must_use]
    pub fn new(config: &Core) -> Tracker {
        Tracker {
            policy: config.tracker_policy,
            swarms: Arc::default(),
        }
    }

    /// Inserts the peer into the swarm of `content_hash`, or refreshes it if
    /// it was already there. The peer `last_seen` is set to now.
    ///
    /// Returns `true` if the peer was new to the swarm.
    pub fn announce(&self, content_hash: &ContentHash, peer: &mut peer::Peer) -> bool {
        peer.last_seen = CurrentClock::now();

        let is_new = self.swarms.upsert_peer(content_hash, peer);

        debug!(content_hash = %content_hash, peer_id = %peer.id, is_new, "announce");

        is_new
    }

    /// Every peer known to share `content_hash`.
    ///
    /// # Errors
    ///
    /// Will return `Error::SwarmNotFound` if no peer is sharing the content.
    pub fn want(&self, content_hash: &ContentHash) -> Result<Vec<Arc<peer::Peer>>, Error> {
        self.swarms.get_peers(content_hash).ok_or(Error::SwarmNotFound {
            content_hash: *content_hash,
            location: Location::caller(),
        })
    }

    /// Removes the peers that did not announce in the last `max_peer_timeout`
    /// seconds, and the swarms left without peers.
    pub fn expire_stale(&self) -> Removed {
        let current_cutoff = CurrentClock::cutoff(&Duration::from_secs(self.policy.max_peer_timeout));

        self.swarms.remove_inactive_peers(current_cutoff)
    }

    #[must_use]
    pub fn get_metrics(&self) -> SwarmsMetrics {
        self.swarms.get_metrics()
    }
}
