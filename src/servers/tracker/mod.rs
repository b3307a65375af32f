//! Tracker HTTP server.
//!
//! It exposes the core [`Tracker`](crate::core::Tracker) over two JSON
//! endpoints.
//!
//! ## Announce
//!
//! `POST /announce`
//!
//! ```json
//! {
//!   "file_hash": "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08",
//!   "peer_info": { "id": "3f1c5b0e-4a9d-4c1e-9f0a-2b7d8e6c5a41", "ip": "192.168.1.20", "port": 4040 }
//! }
//! ```
//!
//! Answers `200 OK` with an empty body.
//!
//! ## Want
//!
//! `POST /want`
//!
//! ```json
//! { "file_hash": "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08" }
//! ```
//!
//! Answers `200 OK` with the swarm:
//!
//! ```json
//! {
//!   "peers": [
//!     {
//!       "id": "3f1c5b0e-4a9d-4c1e-9f0a-2b7d8e6c5a41",
//!       "ip": "192.168.1.20",
//!       "port": 4040,
//!       "last_seen": "2024-06-25T12:36:25Z"
//!     }
//!   ]
//! }
//! ```
//!
//! or `404 Not Found` if no peer is sharing the content.
//!
//! ## Errors
//!
//! Malformed requests (bad JSON, missing fields, invalid hash, empty peer id
//! or zero port) get a `400 Bad Request` with a JSON body:
//!
//! ```json
//! { "error": "..." }
//! ```
pub mod handlers;
pub mod requests;
pub mod responses;
pub mod routes;

pub const TRACKER_LOG_TARGET: &str = "TRACKER";
