//! Primitive types for [LAN Swarm](https://docs.rs/lanswarm).
//!
//! These structures are shared by the tracker, the content registry and the
//! peer transfer protocol, on both sides of the wire.
use std::time::Duration;

pub mod content_hash;
pub mod metadata;
pub mod peer;
pub mod swarm_metrics;

/// Duration since the Unix Epoch.
pub type DurationSinceUnixEpoch = Duration;

/// Size of the unit of transfer and addressing: 1 MiB.
///
/// Servers report it in [`metadata::ContentMetadata::chunk_size`] and clients
/// use the reported value.
pub const CHUNK_SIZE: u64 = 1024 * 1024;

/// Size of the filler payload returned by the throughput probe endpoint.
pub const PROBE_PAYLOAD_SIZE: usize = 1024 * 1024;
