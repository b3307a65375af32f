//! Axum handlers for the tracker requests.
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::requests::{AnnounceRequest, WantRequest};
use super::responses::{self, WantResponse};
use super::TRACKER_LOG_TARGET;
use crate::core::error::Error;
use crate::core::Tracker;

/// It handles the `announce` request.
pub async fn announce(State(tracker): State<Arc<Tracker>>, payload: Result<Json<AnnounceRequest>, JsonRejection>) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return responses::bad_request(&rejection.body_text()),
    };

    if let Err(err) = request.validate() {
        return responses::bad_request(&err.to_string());
    }

    let mut peer = request.peer_info.to_peer();

    tracker.announce(&request.file_hash, &mut peer);

    tracing::info!(target: TRACKER_LOG_TARGET, "Announce: Peer {} has file {}", peer.id, request.file_hash.short());

    StatusCode::OK.into_response()
}

/// It handles the `want` request.
pub async fn want(State(tracker): State<Arc<Tracker>>, payload: Result<Json<WantRequest>, JsonRejection>) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return responses::bad_request(&rejection.body_text()),
    };

    match tracker.want(&request.file_hash) {
        Ok(peers) => {
            let response = WantResponse::from(peers);

            tracing::info!(target: TRACKER_LOG_TARGET, "Want: Sent {} peers for file {}", response.peers.len(), request.file_hash.short());

            Json(response).into_response()
        }
        Err(Error::SwarmNotFound { content_hash, .. }) => responses::not_found(&format!("file not found: {content_hash}")),
    }
}
