//! Where the time comes from.
//!
//! Swarm expiry compares a peer's `last_seen` against "now". Controlling the
//! source of "now" lets tests move time forward without sleeping: production
//! code reads the [`clock::Working`] clock and tests read the thread local
//! [`clock::Stopped`] clock, which they can set and advance.
//!
//! Clocks return a `DurationSinceUnixEpoch`, a `std::time::Duration` since the
//! Unix Epoch. It does not depend on the system time zone.
//!
//! Each crate selects its clock with the same two aliases:
//!
//! ```text
//! #[cfg(not(test))]
//! pub(crate) type CurrentClock = lanswarm_clock::clock::Working;
//!
//! #[cfg(test)]
//! pub(crate) type CurrentClock = lanswarm_clock::clock::Stopped;
//! ```
pub mod clock;
pub mod conv;
pub mod static_time;

#[macro_use]
extern crate lazy_static;

/// Working version, for production.
#[cfg(not(test))]
#[allow(dead_code)]
pub(crate) type CurrentClock = clock::Working;

/// Stopped version, for testing.
#[cfg(test)]
#[allow(dead_code)]
pub(crate) type CurrentClock = clock::Stopped;
