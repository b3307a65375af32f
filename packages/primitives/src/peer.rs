//! Peer struct used by the core `Tracker`.
//!
//! A sample peer:
//!
//! ```rust
//! use std::net::{IpAddr, Ipv4Addr, SocketAddr};
//!
//! use lanswarm_primitives::peer;
//! use lanswarm_primitives::DurationSinceUnixEpoch;
//!
//! let peer = peer::Peer {
//!     id: peer::Id::new("3f1c5b0e-4a9d-4c1e-9f0a-2b7d8e6c5a41"),
//!     addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 20)), 8081),
//!     last_seen: DurationSinceUnixEpoch::new(1_669_397_478_934, 0),
//! };
//!
//! assert_eq!(peer.id.to_string(), "3f1c5b0e-4a9d-4c1e-9f0a-2b7d8e6c5a41");
//! ```
use std::net::{IpAddr, SocketAddr};

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::DurationSinceUnixEpoch;

/// A member of a swarm: the address where it serves chunks and the last time
/// the tracker heard from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Peer {
    /// Opaque identifier, unique per process lifetime.
    pub id: Id,
    /// The IP and port the peer transfer server listens on.
    pub addr: SocketAddr,
    /// The last time the tracker received an announce from this peer.
    pub last_seen: DurationSinceUnixEpoch,
}

impl Peer {
    #[must_use]
    pub fn ip(&self) -> IpAddr {
        self.addr.ip()
    }

    /// Whether the peer has not announced since `cutoff`.
    #[must_use]
    pub fn is_stale(&self, cutoff: DurationSinceUnixEpoch) -> bool {
        self.last_seen < cutoff
    }
}

impl Ord for Peer {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id.cmp(&other.id)
    }
}

impl PartialOrd for Peer {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Peer identifier.
///
/// Generated once at start-up. The tracker only requires it to be non-empty.
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for Id {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for Id {
    fn from(id: String) -> Self {
        Self(id)
    }
}

pub mod fixture {
    use std::net::{IpAddr, Ipv4Addr, SocketAddr};

    use super::{Id, Peer};
    use crate::DurationSinceUnixEpoch;

    #[derive(PartialEq, Debug)]
    pub struct PeerBuilder {
        peer: Peer,
    }

    #[allow(clippy::derivable_impls)]
    impl Default for PeerBuilder {
        fn default() -> Self {
            Self { peer: Peer::default() }
        }
    }

    impl PeerBuilder {
        #[allow(dead_code)]
        #[must_use]
        pub fn with_id(mut self, id: &str) -> Self {
            self.peer.id = Id::new(id);
            self
        }

        #[allow(dead_code)]
        #[must_use]
        pub fn with_addr(mut self, addr: &SocketAddr) -> Self {
            self.peer.addr = *addr;
            self
        }

        #[allow(dead_code)]
        #[must_use]
        pub fn with_port(mut self, port: u16) -> Self {
            self.peer.addr.set_port(port);
            self
        }

        #[allow(dead_code)]
        #[must_use]
        pub fn last_seen_on(mut self, last_seen: DurationSinceUnixEpoch) -> Self {
            self.peer.last_seen = last_seen;
            self
        }

        #[allow(dead_code)]
        #[must_use]
        pub fn build(self) -> Peer {
            self.peer
        }
    }

    impl Default for Peer {
        fn default() -> Self {
            Self {
                id: Id::default(),
                addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 8081),
                last_seen: DurationSinceUnixEpoch::new(1_669_397_478_934, 0),
            }
        }
    }

    impl Default for Id {
        fn default() -> Self {
            Self::new("00000000-0000-4000-8000-000000000000")
        }
    }
}
