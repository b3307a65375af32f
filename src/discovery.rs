//! How a peer finds the tracker.
//!
//! Peers only need the tracker's base URL. [`Static`] takes it from the
//! configuration; other implementations (for example a service browser on
//! the local network) can be plugged in behind the [`Discovery`] trait.
use lanswarm_configuration::Peer;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("no tracker found, set `peer.tracker_url` in the configuration")]
    TrackerNotFound,
}

pub trait Discovery {
    /// Returns the base URL of the tracker.
    ///
    /// # Errors
    ///
    /// Will return `Error::TrackerNotFound` if no tracker can be located.
    fn discover_tracker(&self) -> Result<Url, Error>;
}

/// A tracker whose location is known in advance.
#[derive(Debug, Clone, Default)]
pub struct Static {
    tracker_url: Option<Url>,
}

impl Static {
    #[must_use]
    pub fn new(tracker_url: Option<Url>) -> Self {
        Self { tracker_url }
    }
}

impl From<&Peer> for Static {
    fn from(config: &Peer) -> Self {
        Self::new(config.tracker_url.clone())
    }
}

impl Discovery for Static {
    fn discover_tracker(&self) -> Result<Url, Error> {
        self.tracker_url.clone().ok_or(Error::TrackerNotFound)
    }
}
