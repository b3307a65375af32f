//! Setup for the main application.
//!
//! The [`setup`] function loads the configuration and initializes the
//! global services (static values and logging). The domain services of each
//! role are built afterwards by the [`app`](crate::app) module.
use std::sync::Arc;

use lanswarm_configuration::Configuration;

use super::config::initialize_configuration;
use crate::bootstrap;
use crate::core::services::tracker_factory;
use crate::core::Tracker;
use crate::registry::ContentRegistry;

/// Loads the configuration and initializes the global services.
///
/// # Errors
///
/// Will return an error if the configuration cannot be loaded.
pub fn setup() -> Result<Configuration, lanswarm_configuration::Error> {
    let configuration = initialize_configuration()?;

    initialize_global_services(&configuration);

    Ok(configuration)
}

/// Initializes the static values and the logging.
pub fn initialize_global_services(configuration: &Configuration) {
    initialize_static();
    initialize_logging(configuration);
}

/// It initializes the stateless services.
pub fn initialize_static() {
    // Set the time the app started
    lazy_static::initialize(&lanswarm_clock::static_time::TIME_AT_APP_START);
}

/// It builds the tracker domain service.
#[must_use]
pub fn initialize_tracker(config: &Configuration) -> Arc<Tracker> {
    Arc::new(tracker_factory(config))
}

/// It builds an empty content registry.
#[must_use]
pub fn initialize_registry() -> Arc<ContentRegistry> {
    Arc::new(ContentRegistry::default())
}

pub fn initialize_logging(config: &Configuration) {
    bootstrap::logging::setup(config);
}
