//! Peer transfer server job starter.
//!
//! The server always speaks HTTPS. Without a configured certificate a
//! self-signed one is generated for `localhost`, the loopback address and the
//! advertised address.
use std::sync::Arc;
use std::time::Duration;

use axum_server::tls_rustls::RustlsConfig;
use lanswarm_configuration::Peer;

use super::{make_rust_tls, Error};
use crate::registry::ContentRegistry;
use crate::servers::http::server::{HttpServer, Launcher, RunningHttpServer};
use crate::servers::logging::STARTED_ON;
use crate::servers::peer::routes::router;
use crate::servers::peer::PEER_SERVER_LOG_TARGET;
use crate::shared::crypto::tls;

/// It starts the peer transfer server for the content in `registry`.
///
/// # Errors
///
/// Will return an error if the TLS configuration cannot be loaded or
/// generated, or the server cannot bind to the configured address.
pub async fn start_job(config: &Peer, registry: Arc<ContentRegistry>) -> Result<RunningHttpServer, Error> {
    let tls = match make_rust_tls(&config.tsl_config).await {
        Some(tls) => tls?,
        None => self_signed(config).await?,
    };

    let timeout = Duration::from_secs(config.request_timeout);

    let launcher = Launcher::new("peer server", config.bind_address, Some(tls));

    let server = HttpServer::new(launcher)
        .start(|addr| router(registry, timeout, addr))
        .await
        .map_err(|source| Error::UnableToStartServer { source })?;

    tracing::info!(target: PEER_SERVER_LOG_TARGET, "{STARTED_ON}: https://{}", server.state.binding);

    Ok(server)
}

async fn self_signed(config: &Peer) -> Result<RustlsConfig, Error> {
    let mut subject_alt_names = vec!["localhost".to_string(), "127.0.0.1".to_string()];

    if let Some(ip) = config.advertised_ip {
        subject_alt_names.push(ip.to_string());
    }

    tracing::info!(target: PEER_SERVER_LOG_TARGET, "Using a self-signed certificate for {subject_alt_names:?}");

    tls::self_signed(subject_alt_names)
        .await
        .map_err(|source| Error::SelfSigned { source })
}
