use std::path::PathBuf;

use lanswarm_located_error::LocatedError;
use lanswarm_primitives::content_hash::ContentHash;
use lanswarm_primitives::metadata::MetadataError;
use reqwest::StatusCode;
use thiserror::Error;

use crate::registry;

/// Errors of the peer transfer client. `NoPeersAvailable`, `ChunkFailed`
/// and `Integrity` always abort the download.
#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        source: LocatedError<'static, reqwest::Error>,
    },

    #[error("the peer answered {status} to {url}")]
    UnexpectedStatus { url: String, status: StatusCode },

    #[error("could not build the HTTP client: {source}")]
    Client { source: LocatedError<'static, reqwest::Error> },

    #[error("no peer answered the throughput probe")]
    NoPeersAvailable,

    #[error("invalid metadata: {source}")]
    InvalidMetadata { source: MetadataError },

    #[error("chunk {index} should be {expected} bytes long, received {received}")]
    ShortChunk { index: u64, expected: u64, received: u64 },

    #[error("chunk {index} failed after {attempts} attempts: {source}")]
    ChunkFailed { index: u64, attempts: u32, source: Box<Error> },

    #[error("downloaded content hashes to {actual}, expected {expected}")]
    Integrity { expected: ContentHash, actual: ContentHash },

    #[error("could not write {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: LocatedError<'static, std::io::Error>,
    },

    #[error("could not hash the downloaded content: {source}")]
    Hashing { source: registry::Error },

    #[error("could not register the downloaded content: {source}")]
    Registering { source: registry::Error },

    #[error("a download worker crashed: {source}")]
    Worker {
        source: LocatedError<'static, tokio::task::JoinError>,
    },
}

impl Error {
    #[track_caller]
    pub(crate) fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source: lanswarm_located_error::Located(err).into(),
        }
    }
}
