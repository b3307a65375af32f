//! Tracker request bodies, shared by the server and the
//! [tracker client](crate::clients::tracker).
use std::net::{IpAddr, SocketAddr};

use lanswarm_clock::conv::timestamp_to_rfc3339;
use lanswarm_primitives::content_hash::ContentHash;
use lanswarm_primitives::{peer, DurationSinceUnixEpoch};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A peer as it travels on the wire.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PeerInfo {
    pub id: peer::Id,
    pub ip: IpAddr,
    pub port: u16,
    /// RFC 3339 time of the last announce. Only set in responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<String>,
}

impl PeerInfo {
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.ip, self.port)
    }

    /// The peer the tracker stores. The tracker sets `last_seen` itself.
    #[must_use]
    pub fn to_peer(&self) -> peer::Peer {
        peer::Peer {
            id: self.id.clone(),
            addr: self.addr(),
            last_seen: DurationSinceUnixEpoch::ZERO,
        }
    }
}

impl From<&peer::Peer> for PeerInfo {
    fn from(peer: &peer::Peer) -> Self {
        Self {
            id: peer.id.clone(),
            ip: peer.ip(),
            port: peer.addr.port(),
            last_seen: timestamp_to_rfc3339(peer.last_seen),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AnnounceRequest {
    pub file_hash: ContentHash,
    pub peer_info: PeerInfo,
}

impl AnnounceRequest {
    /// Checks what the types alone do not.
    ///
    /// # Errors
    ///
    /// Will return an error if the peer id is empty or the port is zero.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.peer_info.id.is_empty() {
            return Err(ValidationError::EmptyPeerId);
        }

        if self.peer_info.port == 0 {
            return Err(ValidationError::ZeroPort);
        }

        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WantRequest {
    pub file_hash: ContentHash,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("the peer id must not be empty")]
    EmptyPeerId,
    #[error("the peer port must not be zero")]
    ZeroPort,
}
