//! Streaming SHA-256 of files.
use std::path::Path;

use lanswarm_primitives::content_hash::ContentHash;
use sha2::{Digest, Sha256};
use tokio::io::AsyncReadExt;

use super::error::Error;

/// Read buffer size. Files are never loaded whole into memory.
pub const HASHING_BUFFER_SIZE: usize = 64 * 1024;

/// Hashes the file at `path`.
///
/// # Errors
///
/// Will return `Error::Io` if the file cannot be opened or read.
pub async fn hash_file(path: &Path) -> Result<ContentHash, Error> {
    let mut file = tokio::fs::File::open(path).await.map_err(|e| Error::io(path, e))?;

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; HASHING_BUFFER_SIZE];

    loop {
        let read = file.read(&mut buffer).await.map_err(|e| Error::io(path, e))?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(ContentHash(hasher.finalize().into()))
}

/// Hashes an in-memory buffer.
#[must_use]
pub fn hash_bytes(bytes: &[u8]) -> ContentHash {
    ContentHash(Sha256::digest(bytes).into())
}
