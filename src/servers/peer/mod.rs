//! Peer transfer server.
//!
//! Every peer runs one to serve the content in its
//! [registry](crate::registry). It only speaks HTTPS: with the configured
//! certificate, or a self-signed one generated at start-up. ALPN negotiates
//! HTTP/2, so the parallel chunk requests of a download are multiplexed on a
//! single connection.
//!
//! Endpoint | Response
//! ---|---
//! `GET /metadata/:hash` | JSON [`ContentMetadata`](lanswarm_primitives::metadata::ContentMetadata)
//! `GET /chunk/:hash/:index` | The chunk bytes, `application/octet-stream`
//! `GET /speedtest` | 1 MiB of filler used to measure the throughput
//!
//! Errors:
//!
//! - `400 Bad Request`: malformed hash, malformed or out of range index.
//! - `404 Not Found`: the hash is not registered.
//! - `500 Internal Server Error`: the registered file can no longer be read.
//!
//! The server never modifies the registry.
pub mod handlers;
pub mod responses;
pub mod routes;

pub const PEER_SERVER_LOG_TARGET: &str = "PEER SERVER";
