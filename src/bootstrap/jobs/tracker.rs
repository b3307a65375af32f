//! Tracker server job starter.
//!
//! The function [`tracker::start_job`](crate::bootstrap::jobs::tracker::start_job)
//! starts the tracker HTTP server. It speaks plain HTTP unless a certificate
//! is configured.
//!
//! Refer to the [configuration documentation](https://docs.rs/lanswarm-configuration) for the configuration options.
use std::sync::Arc;

use lanswarm_configuration::TrackerServer;

use super::{make_rust_tls, Error};
use crate::core;
use crate::servers::http::server::{HttpServer, Launcher, RunningHttpServer};
use crate::servers::logging::STARTED_ON;
use crate::servers::tracker::routes::router;
use crate::servers::tracker::TRACKER_LOG_TARGET;

/// It starts a new tracker server with the provided configuration.
///
/// # Errors
///
/// Will return an error if the TLS configuration is wrong or the server
/// cannot bind to the configured address.
pub async fn start_job(config: &TrackerServer, tracker: Arc<core::Tracker>) -> Result<RunningHttpServer, Error> {
    let tls = make_rust_tls(&config.tsl_config).await.transpose()?;

    let launcher = Launcher::new("tracker", config.bind_address, tls);
    let protocol = launcher.protocol();

    let server = HttpServer::new(launcher)
        .start(|addr| router(tracker, addr))
        .await
        .map_err(|source| Error::UnableToStartServer { source })?;

    tracing::info!(target: TRACKER_LOG_TARGET, "{STARTED_ON}: {protocol}://{}", server.state.binding);

    Ok(server)
}
