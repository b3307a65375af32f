//! Parallel chunk download.
//!
//! The content is written to `<output>.tmp`, preallocated to its final size.
//! A pool of workers shares a queue with every chunk index; each worker
//! fetches the chunk, retries it with exponential backoff if needed, and
//! writes it at its offset through its own file handle. Chunks never
//! overlap, so the workers need no lock.
//!
//! When every worker is done the temporary file is hashed. Only content with
//! the expected hash is renamed to the output path. On any failure the
//! temporary file is removed.
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use futures::future::BoxFuture;
use lanswarm_configuration::Download;
use lanswarm_primitives::content_hash::ContentHash;
use lanswarm_primitives::metadata::ContentMetadata;
use tokio::io::{AsyncSeekExt, AsyncWriteExt};
use tokio::task::JoinSet;

use super::error::Error;
use super::PEER_CLIENT_LOG_TARGET;
use crate::registry::hashing;

/// Where the chunks come from.
pub trait ChunkSource: Send + Sync + 'static {
    fn fetch_chunk(&self, index: u64) -> BoxFuture<'_, Result<Bytes, Error>>;
}

/// How the workers download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub workers: usize,
    pub max_attempts: u32,
    pub retry_base_delay: Duration,
}

impl From<&Download> for Settings {
    fn from(config: &Download) -> Self {
        Self {
            workers: config.workers,
            max_attempts: config.max_attempts,
            retry_base_delay: Duration::from_millis(config.retry_base_delay),
        }
    }
}

impl Settings {
    /// Delay before the attempt that follows the failed `attempt`:
    /// `retry_base_delay * 2^(attempt - 1)`.
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.retry_base_delay
            .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
    }
}

/// `<output>.tmp`
#[must_use]
pub fn temp_path(output: &Path) -> PathBuf {
    let mut temp = output.as_os_str().to_owned();
    temp.push(".tmp");
    PathBuf::from(temp)
}

/// Downloads the content described by `metadata` from `source` into
/// `output`.
///
/// # Errors
///
/// Will return `Error::ChunkFailed` if a chunk cannot be fetched within the
/// allowed attempts, `Error::Integrity` if the downloaded content does not
/// have the expected hash, or `Error::Io` if the files cannot be written.
pub async fn fetch_file<S: ChunkSource>(
    source: Arc<S>,
    metadata: &ContentMetadata,
    settings: &Settings,
    output: &Path,
) -> Result<(), Error> {
    let temp = temp_path(output);

    let result = fetch_into(source, metadata, settings, &temp).await;

    let result = match result {
        Ok(()) => verify_and_persist(&temp, output, &metadata.content_hash).await,
        Err(err) => Err(err),
    };

    if result.is_err() {
        // The file may not exist if the failure happened before creating it.
        let _ = tokio::fs::remove_file(&temp).await;
    }

    result
}

async fn fetch_into<S: ChunkSource>(
    source: Arc<S>,
    metadata: &ContentMetadata,
    settings: &Settings,
    temp: &Path,
) -> Result<(), Error> {
    let file = tokio::fs::File::create(temp).await.map_err(|e| Error::io(temp, e))?;
    file.set_len(metadata.size).await.map_err(|e| Error::io(temp, e))?;
    drop(file);

    let workers = std::cmp::min(settings.workers.max(1) as u64, metadata.chunk_count);

    tracing::info!(
        target: PEER_CLIENT_LOG_TARGET,
        "Downloading '{}' ({} chunks) with {workers} workers...",
        metadata.name,
        metadata.chunk_count
    );

    let queue = Arc::new(AtomicU64::new(0));
    let mut pool = JoinSet::new();

    for _ in 0..workers {
        pool.spawn(worker(
            source.clone(),
            metadata.clone(),
            *settings,
            temp.to_path_buf(),
            queue.clone(),
        ));
    }

    while let Some(joined) = pool.join_next().await {
        let failure = match joined {
            Ok(Ok(())) => continue,
            Ok(Err(err)) => err,
            Err(err) => Error::Worker {
                source: lanswarm_located_error::Located(err).into(),
            },
        };

        pool.abort_all();

        // Wait until the aborted workers release their file handles.
        while pool.join_next().await.is_some() {}

        return Err(failure);
    }

    Ok(())
}

async fn worker<S: ChunkSource>(
    source: Arc<S>,
    metadata: ContentMetadata,
    settings: Settings,
    temp: PathBuf,
    queue: Arc<AtomicU64>,
) -> Result<(), Error> {
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .open(&temp)
        .await
        .map_err(|e| Error::io(&temp, e))?;

    loop {
        let index = queue.fetch_add(1, Ordering::Relaxed);

        if index >= metadata.chunk_count {
            break;
        }

        let chunk = fetch_chunk_with_retry(source.as_ref(), &metadata, &settings, index).await?;

        file.seek(std::io::SeekFrom::Start(metadata.chunk_offset(index)))
            .await
            .map_err(|e| Error::io(&temp, e))?;
        file.write_all(&chunk).await.map_err(|e| Error::io(&temp, e))?;

        tracing::debug!(target: PEER_CLIENT_LOG_TARGET, "Downloaded chunk {}/{}", index + 1, metadata.chunk_count);
    }

    file.flush().await.map_err(|e| Error::io(&temp, e))?;

    Ok(())
}

async fn fetch_chunk_with_retry<S: ChunkSource>(
    source: &S,
    metadata: &ContentMetadata,
    settings: &Settings,
    index: u64,
) -> Result<Bytes, Error> {
    let expected = metadata.chunk_len(index).unwrap_or_default();
    let mut attempt = 0;

    loop {
        attempt += 1;

        let result = source.fetch_chunk(index).await.and_then(|chunk| {
            let received = chunk.len() as u64;
            if received == expected {
                Ok(chunk)
            } else {
                Err(Error::ShortChunk { index, expected, received })
            }
        });

        match result {
            Ok(chunk) => return Ok(chunk),
            Err(err) if attempt < settings.max_attempts => {
                let delay = settings.backoff(attempt);
                tracing::warn!(
                    target: PEER_CLIENT_LOG_TARGET,
                    "Error downloading chunk {index}: {err}. Retrying in {}ms", delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }
            Err(err) => {
                return Err(Error::ChunkFailed {
                    index,
                    attempts: attempt,
                    source: Box::new(err),
                })
            }
        }
    }
}

/// Renames `temp` to `output` if its content hashes to `expected`.
async fn verify_and_persist(temp: &Path, output: &Path, expected: &ContentHash) -> Result<(), Error> {
    let actual = hashing::hash_file(temp).await.map_err(|source| Error::Hashing { source })?;

    if actual != *expected {
        return Err(Error::Integrity {
            expected: *expected,
            actual,
        });
    }

    tokio::fs::rename(temp, output).await.map_err(|e| Error::io(output, e))?;

    tracing::info!(target: PEER_CLIENT_LOG_TARGET, "File verified successfully. Saved to {}", output.display());

    Ok(())
}
