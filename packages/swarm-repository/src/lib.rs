//! Swarm storage for the [LAN Swarm](https://docs.rs/lanswarm) tracker.
//!
//! A swarm is the set of peers that announced the same content hash. The
//! repository maps every content hash to its swarm and never keeps a swarm
//! without peers.
use repository::rw_lock_std::RwLockStd;

pub mod entry;
pub mod repository;

// Swarm Entry

pub type EntrySingle = entry::Swarm;

// Repos

pub type SwarmsRwLockStd = RwLockStd<EntrySingle>;

/// Working version, for production.
#[cfg(not(test))]
#[allow(dead_code)]
pub(crate) type CurrentClock = lanswarm_clock::clock::Working;

/// Stopped version, for testing.
#[cfg(test)]
#[allow(dead_code)]
pub(crate) type CurrentClock = lanswarm_clock::clock::Stopped;
