//! Tracker client.
//!
//! It posts the [tracker requests](crate::servers::tracker::requests) on
//! behalf of this process. The announced peer is built once at start-up with
//! [`local_peer_info`]: a random id, the LAN address of the host and the port
//! of the peer transfer server.
//!
//! URL components in this context:
//!
//! ```text
//! http://192.168.1.10:8080/announce
//! \______________________/\______/
//!            |                |
//!         base url          path
//! ```
pub mod error;

use std::net::IpAddr;
use std::time::Duration;

use lanswarm_located_error::Located;
use lanswarm_primitives::content_hash::ContentHash;
use lanswarm_primitives::peer;
use reqwest::{Response, StatusCode};
use serde::Serialize;
use tracing::instrument;
use url::Url;

pub use self::error::Error;
use crate::servers::tracker::requests::{AnnounceRequest, PeerInfo, WantRequest};
use crate::servers::tracker::responses::WantResponse;

/// Describes this process as a peer: a new UUID v4 id, `advertised_ip` or
/// the detected LAN address, and `port`.
///
/// # Errors
///
/// Will return an error if no address is configured and none can be
/// detected, or the address is unspecified.
pub fn local_peer_info(advertised_ip: Option<IpAddr>, port: u16) -> Result<PeerInfo, Error> {
    let ip = match advertised_ip {
        Some(ip) => ip,
        None => local_ip_address::local_ip().map_err(|e| Error::LocalIp {
            source: Located(e).into(),
        })?,
    };

    if ip.is_unspecified() {
        return Err(Error::UnroutableIp { ip });
    }

    Ok(PeerInfo {
        id: peer::Id::new(uuid::Uuid::new_v4().to_string()),
        ip,
        port,
        last_seen: None,
    })
}

/// Tracker HTTP client.
#[derive(Debug, Clone)]
pub struct TrackerClient {
    base_url: Url,
    reqwest: reqwest::Client,
    peer_info: PeerInfo,
}

impl TrackerClient {
    /// # Errors
    ///
    /// Will return an error if the HTTP client cannot be built.
    pub fn new(base_url: Url, peer_info: PeerInfo, timeout: Duration) -> Result<Self, Error> {
        let reqwest = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Client {
                source: Located(e).into(),
            })?;

        Ok(Self {
            base_url,
            reqwest,
            peer_info,
        })
    }

    /// The peer this client announces.
    #[must_use]
    pub fn peer_info(&self) -> &PeerInfo {
        &self.peer_info
    }

    /// Tells the tracker this peer shares `content_hash`.
    ///
    /// # Errors
    ///
    /// Will return an error if the tracker cannot be reached or rejects the
    /// announce.
    #[instrument(skip(self), fields(peer_id = %self.peer_info.id), err)]
    pub async fn announce(&self, content_hash: &ContentHash) -> Result<(), Error> {
        let request = AnnounceRequest {
            file_hash: *content_hash,
            peer_info: self.peer_info.clone(),
        };

        let (url, response) = self.post("announce", &request).await?;

        if response.status() != StatusCode::OK {
            return Err(unexpected_status(url, response).await);
        }

        tracing::info!("Announced file {} to tracker", content_hash.short());

        Ok(())
    }

    /// Asks the tracker for the peers sharing `content_hash`.
    ///
    /// # Errors
    ///
    /// Will return `Error::ContentNotFound` if nobody is sharing it, or
    /// another error if the tracker cannot be reached or answers something
    /// else.
    #[instrument(skip(self), err)]
    pub async fn want(&self, content_hash: &ContentHash) -> Result<Vec<PeerInfo>, Error> {
        let request = WantRequest {
            file_hash: *content_hash,
        };

        let (url, response) = self.post("want", &request).await?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => {
                return Err(Error::ContentNotFound {
                    content_hash: *content_hash,
                })
            }
            _ => return Err(unexpected_status(url, response).await),
        }

        let want: WantResponse = response.json().await.map_err(|e| Error::InvalidResponse {
            url,
            source: Located(e).into(),
        })?;

        Ok(want.peers)
    }

    async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<(String, Response), Error> {
        let url = self.base_url.join(path).map_err(|source| Error::InvalidUrl { source })?;

        let response = self
            .reqwest
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Network {
                url: url.to_string(),
                source: Located(e).into(),
            })?;

        Ok((url.to_string(), response))
    }
}

async fn unexpected_status(url: String, response: Response) -> Error {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    Error::UnexpectedStatus { url, status, body }
}
