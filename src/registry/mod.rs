//! The content registry.
//!
//! It maps content hashes to the local files that hold them, and knows how to
//! cut those files in chunks. Both roles use it: the peer transfer server reads
//! the chunks of registered files, and the downloader registers the files it
//! completes so they are seeded afterwards.
//!
//! Entries are never mutated and live as long as the process. The registry
//! also remembers the hash of every file it has read, with the size and
//! modification time the file had then, so describing an unchanged file does
//! not read it again.
//!
//! ```rust,no_run
//! # async fn run() -> Result<(), lanswarm::registry::Error> {
//! use std::path::Path;
//!
//! use lanswarm::registry::ContentRegistry;
//!
//! let registry = ContentRegistry::default();
//!
//! let content_hash = registry.add_file(Path::new("./movie.mkv")).await?;
//!
//! assert!(registry.lookup(&content_hash).is_some());
//! # Ok(())
//! # }
//! ```
pub mod error;
pub mod hashing;

use std::collections::HashMap;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::SystemTime;

use lanswarm_primitives::content_hash::ContentHash;
use lanswarm_primitives::metadata::{self, ContentMetadata};
use lanswarm_primitives::CHUNK_SIZE;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tracing::instrument;

pub use self::error::Error;

pub const REGISTRY_LOG_TARGET: &str = "REGISTRY";

/// Content hash to local path map, shared by the server and client roles.
#[derive(Debug)]
pub struct ContentRegistry {
    files: RwLock<HashMap<ContentHash, PathBuf>>,
    digests: RwLock<HashMap<PathBuf, Digest>>,
    chunk_size: u64,
}

/// The hash of a file and the size and modification time it had when it was
/// hashed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Digest {
    len: u64,
    modified: SystemTime,
    content_hash: ContentHash,
}

impl Digest {
    /// `None` if the platform does not report modification times.
    fn of(metadata: &std::fs::Metadata, content_hash: ContentHash) -> Option<Self> {
        Some(Self {
            len: metadata.len(),
            modified: metadata.modified().ok()?,
            content_hash,
        })
    }

    fn matches(&self, metadata: &std::fs::Metadata) -> bool {
        self.len == metadata.len() && metadata.modified().is_ok_and(|modified| modified == self.modified)
    }
}

impl Default for ContentRegistry {
    fn default() -> Self {
        Self::new(CHUNK_SIZE)
    }
}

impl ContentRegistry {
    /// # Panics
    ///
    /// Will panic if `chunk_size` is zero.
    #[must_use]
    pub fn new(chunk_size: u64) -> Self {
        assert!(chunk_size > 0, "the chunk size must be positive");

        Self {
            files: RwLock::default(),
            digests: RwLock::default(),
            chunk_size,
        }
    }

    #[must_use]
    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    fn files(&self) -> RwLockReadGuard<'_, HashMap<ContentHash, PathBuf>> {
        self.files.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn files_mut(&self) -> RwLockWriteGuard<'_, HashMap<ContentHash, PathBuf>> {
        self.files.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn digest(&self, path: &Path, metadata: &std::fs::Metadata) -> Option<ContentHash> {
        let digests = self.digests.read().unwrap_or_else(PoisonError::into_inner);

        digests
            .get(path)
            .filter(|digest| digest.matches(metadata))
            .map(|digest| digest.content_hash)
    }

    fn remember_digest(&self, path: &Path, metadata: &std::fs::Metadata, content_hash: ContentHash) {
        let mut digests = self.digests.write().unwrap_or_else(PoisonError::into_inner);

        match Digest::of(metadata, content_hash) {
            Some(digest) => digests.insert(path.to_path_buf(), digest),
            None => digests.remove(path),
        };
    }

    /// Hashes the file at `path` and registers it.
    ///
    /// # Errors
    ///
    /// Will return `Error::Io` if the file cannot be opened or read.
    #[instrument(skip(self), err)]
    pub async fn add_file(&self, path: &Path) -> Result<ContentHash, Error> {
        // Taken before hashing: a write during hashing changes the stamp.
        let metadata = tokio::fs::metadata(path).await.map_err(|e| Error::io(path, e))?;

        let content_hash = hashing::hash_file(path).await?;

        self.remember_digest(path, &metadata, content_hash);
        self.register(content_hash, path.to_path_buf());

        Ok(content_hash)
    }

    /// Registers a file whose hash is already known, for example a download
    /// that has just been verified. The file is not read.
    ///
    /// # Errors
    ///
    /// Will return `Error::Io` if the file does not exist.
    pub async fn add_verified_file(&self, content_hash: ContentHash, path: PathBuf) -> Result<(), Error> {
        let metadata = tokio::fs::metadata(&path).await.map_err(|e| Error::io(&path, e))?;

        self.remember_digest(&path, &metadata, content_hash);
        self.register(content_hash, path);

        Ok(())
    }

    fn register(&self, content_hash: ContentHash, path: PathBuf) {
        tracing::info!(target: REGISTRY_LOG_TARGET, "Registered {} as {}", path.display(), content_hash.short());

        self.files_mut().insert(content_hash, path);
    }

    #[must_use]
    pub fn lookup(&self, content_hash: &ContentHash) -> Option<PathBuf> {
        self.files().get(content_hash).cloned()
    }

    /// Every registered content hash, the set a peer announces.
    #[must_use]
    pub fn hashes(&self) -> Vec<ContentHash> {
        self.files().keys().copied().collect()
    }

    /// Describes the file at `path`. The hash is recomputed only when the
    /// size or modification time differ from the last time the file was
    /// hashed, so a file changed on disk is described as it is now.
    ///
    /// # Errors
    ///
    /// Will return `Error::Io` if the file cannot be read, or
    /// `Error::NoFileName` if `path` ends in `..`.
    pub async fn describe_metadata(&self, path: &Path) -> Result<ContentMetadata, Error> {
        let metadata = tokio::fs::metadata(path).await.map_err(|e| Error::io(path, e))?;
        let size = metadata.len();

        let name = path
            .file_name()
            .ok_or_else(|| Error::NoFileName { path: path.to_path_buf() })?
            .to_string_lossy()
            .into_owned();

        let content_hash = match self.digest(path, &metadata) {
            Some(content_hash) => content_hash,
            None => {
                let content_hash = hashing::hash_file(path).await?;
                self.remember_digest(path, &metadata, content_hash);
                content_hash
            }
        };

        Ok(ContentMetadata::new(name, size, content_hash, self.chunk_size))
    }

    /// Reads the chunk `index` of the file at `path`. Every chunk is
    /// `chunk_size` long except the last one, which can be shorter.
    ///
    /// # Errors
    ///
    /// Will return `Error::ChunkOutOfRange` if the file has no chunk `index`
    /// and `Error::Io` if it cannot be read.
    pub async fn read_chunk(&self, path: &Path, index: u64) -> Result<Vec<u8>, Error> {
        let mut file = tokio::fs::File::open(path).await.map_err(|e| Error::io(path, e))?;

        let size = file.metadata().await.map_err(|e| Error::io(path, e))?.len();
        let chunk_count = metadata::chunk_count(size, self.chunk_size);

        if index >= chunk_count {
            return Err(Error::ChunkOutOfRange { index, chunk_count });
        }

        let offset = index * self.chunk_size;
        let len = std::cmp::min(self.chunk_size, size - offset);

        file.seek(SeekFrom::Start(offset)).await.map_err(|e| Error::io(path, e))?;

        // `read_to_end` keeps reading after short reads until `len` bytes or EOF.
        let mut chunk = Vec::with_capacity(usize::try_from(len).unwrap_or_default());
        file.take(len)
            .read_to_end(&mut chunk)
            .await
            .map_err(|e| Error::io(path, e))?;

        Ok(chunk)
    }
}
