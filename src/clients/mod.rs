//! Clients of the LAN Swarm services.
//!
//! - [`tracker`]: announces content and asks for the peers sharing it.
//! - [`peer`]: picks the best peer and downloads content from it.
pub mod peer;
pub mod tracker;
