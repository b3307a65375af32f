//! Application jobs launchers.
//!
//! The main application setup has only two main stages:
//!
//! 1. Setup the domain layer: the core tracker or the content registry.
//! 2. Launch all the application services as concurrent jobs.
//!
//! This modules contains all the functions needed to start those jobs.
//!
//! Servers are returned as [`RunningHttpServer`](crate::servers::http::server::RunningHttpServer)s;
//! background loops as a [`Job`], a task with the channel that halts it.
pub mod heartbeat;
pub mod peer_server;
pub mod swarm_cleanup;
pub mod tracker;

use std::panic::Location;
use std::sync::Arc;

use axum_server::tls_rustls::RustlsConfig;
use lanswarm_configuration::TslConfig;
use lanswarm_located_error::{DynError, LocatedError};
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::servers::http::server;
use crate::servers::signals::Halted;
use crate::shared::crypto::tls;

/// This is the message that the "launcher" spawned task sends to the main
/// application process to notify the service was successfully started.
///
#[derive(Debug)]
pub struct Started {
    pub address: std::net::SocketAddr,
}

/// A background loop.
#[derive(Debug)]
pub struct Job {
    pub halt_task: oneshot::Sender<Halted>,
    pub task: JoinHandle<()>,
}

impl Job {
    /// Starts the loop built by `start` with a new halt channel.
    pub fn start<F>(start: F) -> Self
    where
        F: FnOnce(oneshot::Receiver<Halted>) -> JoinHandle<()>,
    {
        let (halt_task, rx_halt) = oneshot::channel::<Halted>();

        Self {
            halt_task,
            task: start(rx_halt),
        }
    }

    /// Waits until the loop ends on its own, on the global shutdown signal.
    pub async fn wait(self) {
        let Job { halt_task, task } = self;

        if let Err(err) = task.await {
            tracing::error!("Job failed: {err}");
        }

        drop(halt_task);
    }

    /// Halts the loop and waits until it ends.
    pub async fn stop(self) {
        // The loop may have ended already.
        let _ = self.halt_task.send(Halted::Normal);

        if let Err(err) = self.task.await {
            tracing::error!("Job failed: {err}");
        }
    }
}

/// Loads the certificate and key configured in `opt_tsl_config`. Returns
/// `None` when TLS is not configured.
pub async fn make_rust_tls(opt_tsl_config: &Option<TslConfig>) -> Option<Result<RustlsConfig, Error>> {
    match opt_tsl_config {
        Some(tsl_config) => {
            let cert = tsl_config.ssl_cert_path.clone();
            let key = tsl_config.ssl_key_path.clone();

            if !cert.exists() || !key.exists() {
                return Some(Err(Error::MissingTlsConfig {
                    location: Location::caller(),
                }));
            }

            tracing::info!("Using https: cert path: {cert}.");
            tracing::info!("Using https: key path: {key}.");

            tls::install_crypto_provider();

            Some(
                RustlsConfig::from_pem_file(cert, key)
                    .await
                    .map_err(|err| Error::BadTlsConfig {
                        source: (Arc::new(err) as DynError).into(),
                    }),
            )
        }
        None => None,
    }
}


/// Error returned by the Bootstrap Process.
#[derive(Error, Debug)]
pub enum Error {
    /// Enabled tls but missing config.
    #[error("tls config missing")]
    MissingTlsConfig { location: &'static Location<'static> },

    /// Unable to parse tls Config.
    #[error("bad tls config: {source}")]
    BadTlsConfig {
        source: LocatedError<'static, dyn std::error::Error + Send + Sync>,
    },

    #[error("unable to generate the server certificate: {source}")]
    SelfSigned { source: tls::Error },

    #[error("unable to start the server: {source}")]
    UnableToStartServer { source: server::Error },
}
