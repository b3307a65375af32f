//! Peer transfer client.
//!
//! It talks to the [peer transfer server](crate::servers::peer) of other
//! peers. [`PeerClient`] issues the single requests; [`Downloader`] drives a
//! whole download:
//!
//! 1. Probes every candidate and ranks them by throughput
//!    ([`selection`]).
//! 2. Asks for the metadata, starting with the fastest peer and falling back
//!    to the next one when a peer fails or sends inconsistent metadata.
//! 3. Fetches the chunks in parallel from that peer ([`download`]).
//! 4. Verifies the whole file and registers it, so this process seeds it
//!    afterwards.
//!
//! Peers use self-signed certificates, so the client does not verify them.
//! The content hash check at the end is what guarantees the data.
pub mod download;
pub mod error;
pub mod selection;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Bytes;
use futures::future::BoxFuture;
use futures::FutureExt as _;
use lanswarm_configuration::Download;
use lanswarm_located_error::Located;
use lanswarm_primitives::content_hash::ContentHash;
use lanswarm_primitives::metadata::ContentMetadata;
use reqwest::StatusCode;

use self::download::{ChunkSource, Settings};
pub use self::error::Error;
use self::selection::{Probe, PeerSpeedSample};
use crate::registry::ContentRegistry;
use crate::servers::tracker::requests::PeerInfo;

pub const PEER_CLIENT_LOG_TARGET: &str = "PEER CLIENT";

/// HTTPS client for the peer transfer protocol.
#[derive(Debug, Clone)]
pub struct PeerClient {
    reqwest: reqwest::Client,
}

impl PeerClient {
    /// # Errors
    ///
    /// Will return an error if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let reqwest = reqwest::Client::builder()
            .use_rustls_tls()
            .danger_accept_invalid_certs(true)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Client {
                source: Located(e).into(),
            })?;

        Ok(Self { reqwest })
    }

    /// Downloads the probe payload from `addr` and returns the throughput in
    /// megabits per second.
    ///
    /// # Errors
    ///
    /// Will return an error if the request fails or the peer does not
    /// answer `200 OK`.
    pub async fn speedtest(&self, addr: &SocketAddr) -> Result<f64, Error> {
        let url = format!("https://{addr}/speedtest");

        let start = Instant::now();
        let payload = self.get(&url).await?;
        let elapsed = start.elapsed();

        Ok(selection::mbps(payload.len(), elapsed))
    }

    /// # Errors
    ///
    /// Will return an error if the request fails, the peer does not answer
    /// `200 OK` or the body is not valid metadata.
    pub async fn metadata(&self, addr: &SocketAddr, content_hash: &ContentHash) -> Result<ContentMetadata, Error> {
        let url = format!("https://{addr}/metadata/{content_hash}");

        let response = self.send(&url).await?;

        response.json::<ContentMetadata>().await.map_err(|e| Error::Network {
            url,
            source: Located(e).into(),
        })
    }

    /// # Errors
    ///
    /// Will return an error if the request fails or the peer does not
    /// answer `200 OK`.
    pub async fn chunk(&self, addr: &SocketAddr, content_hash: &ContentHash, index: u64) -> Result<Bytes, Error> {
        self.get(&format!("https://{addr}/chunk/{content_hash}/{index}")).await
    }

    async fn get(&self, url: &str) -> Result<Bytes, Error> {
        let response = self.send(url).await?;

        response.bytes().await.map_err(|e| Error::Network {
            url: url.to_string(),
            source: Located(e).into(),
        })
    }

    async fn send(&self, url: &str) -> Result<reqwest::Response, Error> {
        let response = self.reqwest.get(url).send().await.map_err(|e| Error::Network {
            url: url.to_string(),
            source: Located(e).into(),
        })?;

        if response.status() != StatusCode::OK {
            return Err(Error::UnexpectedStatus {
                url: url.to_string(),
                status: response.status(),
            });
        }

        Ok(response)
    }
}

impl Probe for PeerClient {
    fn probe<'a>(&'a self, peer: &'a PeerInfo) -> BoxFuture<'a, Result<f64, Error>> {
        async move { self.speedtest(&peer.addr()).await }.boxed()
    }
}

/// The chunks of one content on one remote peer.
#[derive(Debug, Clone)]
pub struct RemoteChunks {
    client: PeerClient,
    addr: SocketAddr,
    content_hash: ContentHash,
}

impl ChunkSource for RemoteChunks {
    fn fetch_chunk(&self, index: u64) -> BoxFuture<'_, Result<Bytes, Error>> {
        async move { self.client.chunk(&self.addr, &self.content_hash, index).await }.boxed()
    }
}

/// Downloads content from the swarm and registers it once verified.
pub struct Downloader {
    client: PeerClient,
    registry: Arc<ContentRegistry>,
    settings: Settings,
}

impl Downloader {
    #[must_use]
    pub fn new(client: PeerClient, registry: Arc<ContentRegistry>, settings: &Download) -> Self {
        Self {
            client,
            registry,
            settings: Settings::from(settings),
        }
    }

    /// Downloads `content_hash` from the fastest of `candidates` into
    /// `output`.
    ///
    /// # Errors
    ///
    /// Will return `Error::NoPeersAvailable` if no candidate answers the
    /// probe, the error of the last peer tried if none serves valid
    /// metadata, or the download error.
    pub async fn download(
        &self,
        content_hash: &ContentHash,
        candidates: &[PeerInfo],
        output: &Path,
    ) -> Result<ContentMetadata, Error> {
        let ranking = selection::rank_peers(&self.client, candidates).await?;

        let (source, metadata) = self.metadata_from_fastest(&ranking, content_hash).await?;

        tracing::info!(
            target: PEER_CLIENT_LOG_TARGET,
            "Downloading {} ({} bytes) from {}",
            metadata.name,
            metadata.size,
            source.peer.addr()
        );

        let chunks = Arc::new(RemoteChunks {
            client: self.client.clone(),
            addr: source.peer.addr(),
            content_hash: *content_hash,
        });

        download::fetch_file(chunks, &metadata, &self.settings, output).await?;

        self.registry
            .add_verified_file(*content_hash, output.to_path_buf())
            .await
            .map_err(|source| Error::Registering { source })?;

        Ok(metadata)
    }

    async fn metadata_from_fastest<'a>(
        &self,
        ranking: &'a [PeerSpeedSample],
        content_hash: &ContentHash,
    ) -> Result<(&'a PeerSpeedSample, ContentMetadata), Error> {
        let mut last_error = Error::NoPeersAvailable;

        for sample in ranking {
            let result = self
                .client
                .metadata(&sample.peer.addr(), content_hash)
                .await
                .and_then(|metadata| {
                    metadata
                        .validate_for(content_hash)
                        .map(|()| metadata)
                        .map_err(|source| Error::InvalidMetadata { source })
                });

            match result {
                Ok(metadata) => return Ok((sample, metadata)),
                Err(err) => {
                    tracing::warn!(
                        target: PEER_CLIENT_LOG_TARGET,
                        "Peer {} did not serve the metadata: {err}",
                        sample.peer.addr()
                    );
                    last_error = err;
                }
            }
        }

        Err(last_error)
    }
}
