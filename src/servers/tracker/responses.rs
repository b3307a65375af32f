//! Tracker response bodies.
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use lanswarm_primitives::peer;
use serde::{Deserialize, Serialize};

use super::requests::PeerInfo;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WantResponse {
    pub peers: Vec<PeerInfo>,
}

impl From<Vec<Arc<peer::Peer>>> for WantResponse {
    fn from(peers: Vec<Arc<peer::Peer>>) -> Self {
        Self {
            peers: peers.iter().map(|peer| PeerInfo::from(peer.as_ref())).collect(),
        }
    }
}

/// Body of every non-2xx response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub error: String,
}

impl Error {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

#[must_use]
pub fn bad_request(reason: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(Error::new(reason))).into_response()
}

#[must_use]
pub fn not_found(reason: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(Error::new(reason))).into_response()
}
