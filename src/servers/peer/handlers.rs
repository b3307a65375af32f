//! Axum handlers for the peer transfer requests.
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use lanswarm_primitives::content_hash::ContentHash;
use lanswarm_primitives::PROBE_PAYLOAD_SIZE;

use super::responses;
use super::PEER_SERVER_LOG_TARGET;
use crate::registry::{self, ContentRegistry};

lazy_static! {
    static ref PROBE_PAYLOAD: Vec<u8> = vec![0u8; PROBE_PAYLOAD_SIZE];
}

/// It handles the `metadata` request.
pub async fn metadata(State(registry): State<Arc<ContentRegistry>>, Path(hash): Path<String>) -> Response {
    let Ok(content_hash) = hash.parse::<ContentHash>() else {
        return responses::bad_request(&format!("invalid content hash: {hash}"));
    };

    let Some(path) = registry.lookup(&content_hash) else {
        return responses::not_found();
    };

    match registry.describe_metadata(&path).await {
        Ok(metadata) => Json(metadata).into_response(),
        Err(err) => {
            tracing::error!(target: PEER_SERVER_LOG_TARGET, "Could not describe {}: {err}", content_hash.short());
            responses::internal_server_error("could not get file metadata")
        }
    }
}

/// It handles the `chunk` request.
pub async fn chunk(State(registry): State<Arc<ContentRegistry>>, Path((hash, index)): Path<(String, String)>) -> Response {
    let Ok(content_hash) = hash.parse::<ContentHash>() else {
        return responses::bad_request(&format!("invalid content hash: {hash}"));
    };

    let Ok(index) = index.parse::<u64>() else {
        return responses::bad_request("invalid chunk index");
    };

    let Some(path) = registry.lookup(&content_hash) else {
        return responses::not_found();
    };

    match registry.read_chunk(&path, index).await {
        Ok(chunk) => ([(header::CONTENT_TYPE, "application/octet-stream")], chunk).into_response(),
        Err(err @ registry::Error::ChunkOutOfRange { .. }) => responses::bad_request(&err.to_string()),
        Err(err) => {
            tracing::error!(target: PEER_SERVER_LOG_TARGET, "Could not read chunk {index} of {}: {err}", content_hash.short());
            responses::internal_server_error("failed to read chunk")
        }
    }
}

/// It handles the throughput probe. The payload is the same for every
/// request and must not be cached by intermediaries.
pub async fn speedtest() -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/octet-stream"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        Bytes::from_static(PROBE_PAYLOAD.as_slice()),
    )
        .into_response()
}
