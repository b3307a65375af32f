//! **LAN Swarm** shares files between computers on the same local network.
//!
//! A set of peers announce which files they hold to a tracker, and transfer
//! those files to one another directly, in fixed-size chunks, over HTTPS
//! (TLS with HTTP/2 multiplexing). Before downloading, a peer probes the
//! candidates the tracker returned and picks the fastest one.
//!
//! # Table of contents
//!
//! - [Components](#components)
//! - [Running](#running)
//! - [Configuration](#configuration)
//! - [Tracker protocol](#tracker-protocol)
//! - [Peer transfer protocol](#peer-transfer-protocol)
//!
//! # Components
//!
//! The tracker decides *who*, the transfer protocol decides *how* and the
//! registry decides *what*:
//!
//! - [`registry`]: maps content hashes to local files, computes hashes and
//!   reads chunks.
//! - [`core`]: the tracker domain. An in-memory directory of swarms keyed by
//!   content hash with `announce`, `want` and expiry.
//! - [`servers::tracker`]: the tracker HTTP API on top of [`core::Tracker`].
//! - [`servers::peer`]: the peer transfer server. It serves metadata, chunks
//!   and a throughput probe for registered content.
//! - [`clients::peer`]: peer selection and the parallel chunk downloader.
//! - [`clients::tracker`]: the tracker RPC client used to announce and to ask
//!   for peers.
//! - [`bootstrap::jobs`]: the long running jobs (servers, swarm cleanup and
//!   heartbeat) started by the [`app`].
//!
//! # Running
//!
//! ```text
//! lanswarm tracker
//! lanswarm share ./movie.mkv
//! lanswarm get 9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08 ./movie.mkv
//! ```
//!
//! `share` registers and announces the file, then seeds it until the process
//! is stopped. `get` downloads the file, verifies it, and seeds it afterwards.
//!
//! # Configuration
//!
//! Refer to the [`lanswarm-configuration`](https://docs.rs/lanswarm-configuration)
//! package. The default file is `./share/default/config/lanswarm.toml`.
//!
//! # Tracker protocol
//!
//! Two JSON endpoints:
//!
//! - `POST /announce` with `{ "file_hash": "...", "peer_info": { "id": "...", "ip": "...", "port": 4040 } }`.
//! - `POST /want` with `{ "file_hash": "..." }`, answered with `{ "peers": [...] }`.
//!
//! Peers that do not re-announce within `max_peer_timeout` are removed.
//!
//! # Peer transfer protocol
//!
//! - `GET /metadata/:hash`
//! - `GET /chunk/:hash/:index`
//! - `GET /speedtest`
pub mod app;
pub mod bootstrap;
pub mod clients;
pub mod core;
pub mod discovery;
pub mod registry;
pub mod servers;
pub mod shared;

#[macro_use]
extern crate lazy_static;

/// This code needs to be copied into each crate.
/// Working version, for production.
#[cfg(not(test))]
#[allow(dead_code)]
pub(crate) type CurrentClock = lanswarm_clock::clock::Working;

/// Stopped version, for testing.
#[cfg(test)]
#[allow(dead_code)]
pub(crate) type CurrentClock = lanswarm_clock::clock::Stopped;
