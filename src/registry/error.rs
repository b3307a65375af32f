use std::path::PathBuf;

use lanswarm_located_error::LocatedError;
use thiserror::Error;

/// Errors reading registered content from disk.
#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("could not access {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: LocatedError<'static, std::io::Error>,
    },

    #[error("chunk {index} is out of range, the file has {chunk_count} chunks")]
    ChunkOutOfRange { index: u64, chunk_count: u64 },

    #[error("{path:?} does not name a file")]
    NoFileName { path: PathBuf },
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
