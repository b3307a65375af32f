//! Tracker domain services.
use lanswarm_configuration::Configuration;

use crate::core::Tracker;

/// It returns a new tracker building its dependencies.
#[must_use]
pub fn tracker_factory(config: &Configuration) -> Tracker {
    Tracker::new(&config.core)
}
