//! Application bootstrapping.
//!
//! This module includes all the functions to build the application, its
//! dependencies, and run the jobs.
//!
//! Jobs are tasks executed concurrently: the tracker server and its swarm
//! cleanup on the tracker, the peer transfer server and the announce
//! heartbeat on every peer.
pub mod app;
pub mod config;
pub mod jobs;
pub mod logging;
