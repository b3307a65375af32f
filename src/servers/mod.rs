//! Servers. Services that can be started and stopped.
pub mod http;
pub mod logging;
pub mod peer;
pub mod signals;
pub mod tracker;
