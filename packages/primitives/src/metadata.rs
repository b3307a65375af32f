//! Description of a shared file as served by the peer transfer protocol.
//!
//! ```rust
//! use lanswarm_primitives::content_hash::ContentHash;
//! use lanswarm_primitives::metadata::ContentMetadata;
//! use lanswarm_primitives::CHUNK_SIZE;
//!
//! let metadata = ContentMetadata::new("movie.mkv".to_string(), CHUNK_SIZE + 1, ContentHash::default(), CHUNK_SIZE);
//!
//! assert_eq!(metadata.chunk_count, 2);
//! assert_eq!(metadata.chunk_len(1), Some(1));
//! ```
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::content_hash::ContentHash;

/// Derived on demand from a registered file, never persisted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ContentMetadata {
    #[serde(rename = "file_name")]
    pub name: String,
    #[serde(rename = "file_size")]
    pub size: u64,
    #[serde(rename = "file_hash")]
    pub content_hash: ContentHash,
    pub chunk_size: u64,
    #[serde(rename = "num_chunks")]
    pub chunk_count: u64,
}

impl ContentMetadata {
    #[must_use]
    pub fn new(name: String, size: u64, content_hash: ContentHash, chunk_size: u64) -> Self {
        Self {
            name,
            size,
            content_hash,
            chunk_size,
            chunk_count: chunk_count(size, chunk_size),
        }
    }

    /// Byte offset of the chunk `index`.
    #[must_use]
    pub fn chunk_offset(&self, index: u64) -> u64 {
        index * self.chunk_size
    }

    /// Length of the chunk `index`, or `None` when the index is out of range.
    ///
    /// Every chunk is `chunk_size` long except the last one, which holds the
    /// remainder when `size` is not a multiple of `chunk_size`.
    #[must_use]
    pub fn chunk_len(&self, index: u64) -> Option<u64> {
        if index >= self.chunk_count {
            return None;
        }
        Some(std::cmp::min(self.chunk_size, self.size - self.chunk_offset(index)))
    }

    /// Checks the metadata a remote peer sent for the content we asked for.
    ///
    /// # Errors
    ///
    /// Will return an error if the hash is not the requested one, the chunk
    /// size is zero, or the chunk count does not match the size.
    pub fn validate_for(&self, requested: &ContentHash) -> Result<(), MetadataError> {
        if self.content_hash != *requested {
            return Err(MetadataError::HashMismatch {
                requested: *requested,
                received: self.content_hash,
            });
        }

        if self.chunk_size == 0 {
            return Err(MetadataError::ZeroChunkSize);
        }

        let expected = chunk_count(self.size, self.chunk_size);

        if self.chunk_count != expected {
            return Err(MetadataError::InconsistentChunkCount {
                chunk_count: self.chunk_count,
                expected,
            });
        }

        Ok(())
    }
}

/// `ceil(size / chunk_size)`. An empty file has zero chunks.
///
/// # Panics
///
/// Will panic if `chunk_size` is zero.
#[must_use]
pub fn chunk_count(size: u64, chunk_size: u64) -> u64 {
    size.div_ceil(chunk_size)
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    #[error("metadata describes {received} but {requested} was requested")]
    HashMismatch { requested: ContentHash, received: ContentHash },
    #[error("metadata declares a zero chunk size")]
    ZeroChunkSize,
    #[error("metadata declares {chunk_count} chunks, its size needs {expected}")]
    InconsistentChunkCount { chunk_count: u64, expected: u64 },
}
