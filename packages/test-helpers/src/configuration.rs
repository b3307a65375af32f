//! Configurations for tests.
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use lanswarm_configuration::{Configuration, Threshold};

/// This configuration is used for testing. Every server binds to an
/// ephemeral loopback port so several environments can run at once.
///
/// Logging is off; set the threshold to `debug` when debugging a test.
#[must_use]
pub fn ephemeral() -> Configuration {
    let mut config = Configuration::default();

    config.logging.threshold = Threshold::Off;

    let loopback = IpAddr::V4(Ipv4Addr::LOCALHOST);

    config.tracker.bind_address = SocketAddr::new(loopback, 0);

    config.peer.bind_address = SocketAddr::new(loopback, 0);
    config.peer.advertised_ip = Some(loopback);
    config.peer.request_timeout = 5;

    // Retries should not slow the test suite down.
    config.peer.download.retry_base_delay = 10;

    config
}

/// Ephemeral configuration whose peer downloads with `workers` workers.
#[must_use]
pub fn ephemeral_with_workers(workers: usize) -> Configuration {
    let mut config = ephemeral();

    config.peer.download.workers = workers;

    config
}
