//! Testing helpers for [LAN Swarm](https://docs.rs/lanswarm).
//!
//! A collection of functions and types to make testing easier.
pub mod configuration;
pub mod random;
