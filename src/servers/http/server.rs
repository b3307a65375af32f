//! Module to handle the HTTP server instances.
//!
//! It contains two main structs: `HttpServer` and `Launcher`.
//!
//! `HttpServer` is a state machine: a stopped server owns a `Launcher` and
//! starting it spawns a task that serves the router until it receives the
//! halt message.
//!
//! 1. `HttpServer::start` -> binds the socket and spawns a new asynchronous task.
//! 2. `Launcher::serve` -> serves the router on the spawned task with graceful shutdown.
//!
//! The socket is bound before the task is spawned, so binding errors are
//! returned to the caller instead of being lost in the task.
use std::net::SocketAddr;

use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use derive_more::Constructor;
use futures::future::BoxFuture;
use futures::FutureExt as _;
use lanswarm_located_error::{Located, LocatedError};
use thiserror::Error;
use tokio::sync::oneshot::{self, Receiver, Sender};
use tokio::task::JoinHandle;

use crate::bootstrap::jobs::Started;
use crate::servers::signals::{graceful_shutdown, Halted};

/// Error that can occur when starting or stopping a HTTP server.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unable to bind to {addr}: {source}")]
    UnableToBindToSocket {
        addr: SocketAddr,
        source: LocatedError<'static, std::io::Error>,
    },

    #[error("Unable to get the local address of the socket: {source}")]
    UnableToGetLocalAddress { source: LocatedError<'static, std::io::Error> },

    #[error("The server task ended before it started serving")]
    NotStarted,

    #[error("Unable to send the halt message, the server has already stopped")]
    UnableToSendHaltingMessage,

    #[error("The server task failed: {source}")]
    TaskFailed {
        source: LocatedError<'static, tokio::task::JoinError>,
    },
}

/// A stopped HTTP server.
#[allow(clippy::module_name_repetitions)]
pub type StoppedHttpServer = HttpServer<Stopped>;

/// A running HTTP server.
#[allow(clippy::module_name_repetitions)]
pub type RunningHttpServer = HttpServer<Running>;

/// A HTTP server controller.
///
/// It's an state machine. The launcher keeps the bind address and the TLS
/// configuration, so the server can be started again after it was stopped.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug)]
pub struct HttpServer<S> {
    /// The state of the server: `running` or `stopped`.
    pub state: S,
}

/// A stopped HTTP server state.
#[derive(Debug)]
pub struct Stopped {
    launcher: Launcher,
}

/// A running HTTP server state.
#[derive(Debug, Constructor)]
pub struct Running {
    /// The address where the server is bound.
    pub binding: SocketAddr,
    pub halt_task: Sender<Halted>,
    pub task: JoinHandle<Launcher>,
}

impl HttpServer<Stopped> {
    #[must_use]
    pub fn new(launcher: Launcher) -> Self {
        Self {
            state: Stopped { launcher },
        }
    }

    /// Binds the socket and starts serving the router built by `router` for
    /// the bound address.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the socket cannot be bound, or if the server task
    /// ends before it starts serving.
    pub async fn start<F>(self, router: F) -> Result<HttpServer<Running>, Error>
    where
        F: FnOnce(&SocketAddr) -> Router,
    {
        let (tx_start, rx_start) = oneshot::channel::<Started>();
        let (tx_halt, rx_halt) = oneshot::channel::<Halted>();

        let launcher = self.state.launcher;

        let listener = launcher.bind()?;

        let address = listener.local_addr().map_err(|e| Error::UnableToGetLocalAddress {
            source: Located(e).into(),
        })?;

        let router = router(&address);

        let task = tokio::spawn(async move {
            launcher.serve(listener, router, tx_start, rx_halt).await;

            launcher
        });

        let binding = rx_start.await.map_err(|_| Error::NotStarted)?.address;

        Ok(HttpServer {
            state: Running {
                binding,
                halt_task: tx_halt,
                task,
            },
        })
    }
}

impl HttpServer<Running> {
    /// Sends the halt message and waits until the server has drained its
    /// connections.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the server task has already finished or it failed.
    pub async fn stop(self) -> Result<HttpServer<Stopped>, Error> {
        self.state
            .halt_task
            .send(Halted::Normal)
            .map_err(|_| Error::UnableToSendHaltingMessage)?;

        let launcher = self.state.task.await.map_err(|e| Error::TaskFailed {
            source: Located(e).into(),
        })?;

        Ok(HttpServer {
            state: Stopped { launcher },
        })
    }
}

/// Knows how to serve a router with graceful shutdown, over plain HTTP or
/// over TLS.
#[derive(Constructor, Clone, Debug)]
pub struct Launcher {
    /// Service name, for the log lines.
    pub name: &'static str,
    pub bind_to: SocketAddr,
    pub tls: Option<RustlsConfig>,
}

impl Launcher {
    #[must_use]
    pub fn protocol(&self) -> &'static str {
        match self.tls {
            Some(_) => "https",
            None => "http",
        }
    }

    fn bind(&self) -> Result<std::net::TcpListener, Error> {
        let listener = std::net::TcpListener::bind(self.bind_to).map_err(|e| Error::UnableToBindToSocket {
            addr: self.bind_to,
            source: Located(e).into(),
        })?;

        listener.set_nonblocking(true).map_err(|e| Error::UnableToBindToSocket {
            addr: self.bind_to,
            source: Located(e).into(),
        })?;

        Ok(listener)
    }

    async fn serve(&self, listener: std::net::TcpListener, router: Router, tx_start: Sender<Started>, rx_halt: Receiver<Halted>) {
        let Ok(address) = listener.local_addr() else {
            tracing::error!("{}: unable to get the local address of the socket", self.name);
            return;
        };

        let handle = axum_server::Handle::new();

        tokio::task::spawn(graceful_shutdown(
            handle.clone(),
            rx_halt,
            format!("Shutting down {} on {}://{address}", self.name, self.protocol()),
        ));

        let make_service = router.into_make_service_with_connect_info::<SocketAddr>();

        let running: BoxFuture<'static, std::io::Result<()>> = match self.tls.clone() {
            Some(tls) => axum_server::from_tcp_rustls(listener, tls)
                .handle(handle)
                .serve(make_service)
                .boxed(),
            None => axum_server::from_tcp(listener).handle(handle).serve(make_service).boxed(),
        };

        if tx_start.send(Started { address }).is_err() {
            tracing::warn!("{}: nobody is waiting for the server on {address} to start", self.name);
        }

        match running.await {
            Ok(()) => tracing::info!("{}: stopped serving on {}://{address}", self.name, self.protocol()),
            Err(err) => tracing::error!("{}: failed serving on {}://{address}: {err}", self.name, self.protocol()),
        }
    }
}
