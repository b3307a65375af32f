use std::net::IpAddr;

use lanswarm_located_error::LocatedError;
use lanswarm_primitives::content_hash::ContentHash;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("could not reach the tracker at {url}: {source}")]
    Network {
        url: String,
        source: LocatedError<'static, reqwest::Error>,
    },

    #[error("no peer is sharing {content_hash}")]
    ContentNotFound { content_hash: ContentHash },

    #[error("the tracker answered {status} to {url}: {body}")]
    UnexpectedStatus { url: String, status: StatusCode, body: String },

    #[error("could not decode the tracker response from {url}: {source}")]
    InvalidResponse {
        url: String,
        source: LocatedError<'static, reqwest::Error>,
    },

    #[error("invalid tracker url: {source}")]
    InvalidUrl { source: url::ParseError },

    #[error("could not build the HTTP client: {source}")]
    Client { source: LocatedError<'static, reqwest::Error> },

    #[error("could not detect the local IP address: {source}")]
    LocalIp {
        source: LocatedError<'static, local_ip_address::Error>,
    },

    #[error("{ip} is not an address other peers can reach")]
    UnroutableIp { ip: IpAddr },
}
