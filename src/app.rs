//! LAN Swarm application.
//!
//! The same binary runs in one of three roles. Each role is a container for
//! jobs:
//!
//! - **Tracker**: the tracker server and, if its interval is not zero, the
//!   swarm cleanup job.
//! - **Share**: registers a local file, serves it with the peer transfer
//!   server and announces it to the tracker, then keeps it alive with the
//!   announce heartbeat.
//! - **Get**: downloads a file from the swarm and then seeds it like `share`
//!   does.
//!
//! Every job runs until the process receives Ctrl-C or `SIGTERM`.
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use lanswarm_configuration::Configuration;
use lanswarm_primitives::content_hash::ContentHash;
use lanswarm_primitives::metadata::ContentMetadata;
use thiserror::Error;

use crate::bootstrap::app::initialize_registry;
use crate::bootstrap::jobs::{self, heartbeat, peer_server, swarm_cleanup, Job};
use crate::clients::peer::{Downloader, PeerClient};
use crate::clients::tracker::{local_peer_info, TrackerClient};
use crate::discovery::{Discovery, Static};
use crate::registry::ContentRegistry;
use crate::servers::http::server::{Running, RunningHttpServer};
use crate::servers::tracker::requests::PeerInfo;
use crate::{clients, core, discovery, registry};

#[derive(Error, Debug)]
pub enum Error {
    #[error("unable to start a job: {source}")]
    Job { source: jobs::Error },

    #[error("unable to register the shared file: {source}")]
    Registry { source: registry::Error },

    #[error("unable to find the tracker: {source}")]
    Discovery { source: discovery::Error },

    #[error("tracker request failed: {source}")]
    Tracker { source: clients::tracker::Error },

    #[error("download failed: {source}")]
    Download { source: clients::peer::Error },
}

/// The jobs a process runs.
#[derive(Debug, Default)]
pub struct Jobs {
    servers: Vec<RunningHttpServer>,
    loops: Vec<Job>,
}

impl Jobs {
    /// The addresses the servers are bound to.
    #[must_use]
    pub fn bindings(&self) -> Vec<SocketAddr> {
        self.servers.iter().map(|server| server.state.binding).collect()
    }

    /// Waits until every job has finished, on the global shutdown signal.
    pub async fn wait(self) {
        let servers = self.servers.into_iter().map(|server| async move {
            let Running { halt_task, task, .. } = server.state;

            if let Err(err) = task.await {
                tracing::error!("Server failed: {err}");
            }

            drop(halt_task);
        });

        let loops = self.loops.into_iter().map(Job::wait);

        tokio::join!(join_all(servers), join_all(loops));
    }

    /// Halts every job and waits until they have finished.
    pub async fn stop(self) {
        for job in self.loops {
            job.stop().await;
        }

        for server in self.servers {
            if let Err(err) = server.stop().await {
                tracing::error!("Unable to stop server: {err}");
            }
        }
    }
}

/// A process that seeds the content of its registry.
#[derive(Debug)]
pub struct Seeder {
    pub registry: Arc<ContentRegistry>,
    pub tracker: Arc<TrackerClient>,
    pub jobs: Jobs,
}

impl Seeder {
    /// The peer announced to the tracker.
    #[must_use]
    pub fn peer_info(&self) -> &PeerInfo {
        self.tracker.peer_info()
    }

    async fn announce(&self, content_hash: &ContentHash) -> Result<(), Error> {
        self.tracker
            .announce(content_hash)
            .await
            .map_err(|source| Error::Tracker { source })
    }

    fn start_heartbeat(&mut self, config: &Configuration) {
        let interval = Duration::from_secs(config.peer.announce_interval);

        let job = Job::start(|rx_halt| heartbeat::start_job(self.tracker.clone(), self.registry.clone(), interval, rx_halt));

        self.jobs.loops.push(job);
    }
}

/// Starts the tracker server and, unless its interval is `0`, the swarm
/// cleanup job.
///
/// # Errors
///
/// Will return an error if the tracker server cannot be started.
pub async fn start_tracker(config: &Configuration, tracker: Arc<core::Tracker>) -> Result<Jobs, Error> {
    let mut services = Jobs::default();

    services.servers.push(
        jobs::tracker::start_job(&config.tracker, tracker.clone())
            .await
            .map_err(|source| Error::Job { source })?,
    );

    if config.core.inactive_peer_cleanup_interval > 0 {
        services
            .loops
            .push(Job::start(|rx_halt| swarm_cleanup::start_job(&config.core, &tracker, rx_halt)));
    }

    Ok(services)
}

/// Registers the file at `path` and starts seeding it.
///
/// # Errors
///
/// Will return an error if the file cannot be hashed, the peer server cannot
/// be started, or the first announce fails.
pub async fn share(config: &Configuration, path: &Path) -> Result<(ContentHash, Seeder), Error> {
    let registry = initialize_registry();

    let content_hash = registry.add_file(path).await.map_err(|source| Error::Registry { source })?;

    let mut seeder = start_seeder(config, registry).await?;

    seeder.announce(&content_hash).await?;

    seeder.start_heartbeat(config);

    Ok((content_hash, seeder))
}

/// Downloads `content_hash` into `output` and starts seeding it.
///
/// # Errors
///
/// Will return an error if the peer server cannot be started, the tracker
/// knows no peer for the content, or the download fails.
pub async fn get(config: &Configuration, content_hash: &ContentHash, output: &Path) -> Result<(ContentMetadata, Seeder), Error> {
    let registry = initialize_registry();

    let mut seeder = start_seeder(config, registry.clone()).await?;

    let candidates = seeder
        .tracker
        .want(content_hash)
        .await
        .map_err(|source| Error::Tracker { source })?;

    tracing::info!("Found {} peers with file {}", candidates.len(), content_hash.short());

    let client = PeerClient::new(Duration::from_secs(config.peer.request_timeout)).map_err(|source| Error::Download { source })?;

    let metadata = Downloader::new(client, registry, &config.peer.download)
        .download(content_hash, &candidates, output)
        .await
        .map_err(|source| Error::Download { source })?;

    // The file is already downloaded; the heartbeat retries the announce.
    if let Err(err) = seeder.announce(content_hash).await {
        tracing::warn!("{err}");
    }

    seeder.start_heartbeat(config);

    Ok((metadata, seeder))
}

/// Starts the peer transfer server for `registry` and builds the tracker
/// client that announces it.
async fn start_seeder(config: &Configuration, registry: Arc<ContentRegistry>) -> Result<Seeder, Error> {
    let tracker_url = Static::from(&config.peer)
        .discover_tracker()
        .map_err(|source| Error::Discovery { source })?;

    let server = peer_server::start_job(&config.peer, registry.clone())
        .await
        .map_err(|source| Error::Job { source })?;

    let peer_info = local_peer_info(config.peer.advertised_ip, server.state.binding.port())
        .map_err(|source| Error::Tracker { source })?;

    let tracker = TrackerClient::new(tracker_url, peer_info, Duration::from_secs(config.peer.request_timeout))
        .map_err(|source| Error::Tracker { source })?;

    Ok(Seeder {
        registry,
        tracker: Arc::new(tracker),
        jobs: Jobs {
            servers: vec![server],
            loops: vec![],
        },
    })
}
