//! Snapshot caching of fetched feed documents

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::fs;
use tracing::debug;
use vercheck_errors::{Error, StorageError};

/// Raw feed snapshots stored under one cache directory
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    cache_dir: PathBuf,
}

impl SnapshotCache {
    /// Create a new cache manager
    pub fn new(cache_dir: impl AsRef<Path>) -> Self {
        Self {
            cache_dir: cache_dir.as_ref().to_path_buf(),
        }
    }

    /// Cache root
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Path of a named snapshot
    #[must_use]
    pub fn path(&self, name: &str) -> PathBuf {
        self.cache_dir.join(name)
    }

    /// Read a snapshot
    ///
    /// # Errors
    ///
    /// Returns `StorageError::PathNotFound` if the snapshot doesn't exist.
    pub async fn load(&self, name: &str) -> Result<Vec<u8>, Error> {
        let path = self.path(name);

        fs::read(&path)
            .await
            .map_err(|e| StorageError::from_io_with_path(&e, &path).into())
    }

    /// Write a snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the cache directory cannot be created or the file cannot be written.
    pub async fn save(&self, name: &str, contents: &[u8]) -> Result<(), Error> {
        // Ensure cache directory exists
        fs::create_dir_all(&self.cache_dir)
            .await
            .map_err(|e| StorageError::from_io_with_path(&e, &self.cache_dir))?;

        let path = self.path(name);

        // Write to temporary file first
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, contents)
            .await
            .map_err(|e| StorageError::from_io_with_path(&e, &temp_path))?;

        // Atomic rename
        fs::rename(&temp_path, &path)
            .await
            .map_err(|e| StorageError::AtomicRenameFailed {
                message: format!("{} -> {}: {e}", temp_path.display(), path.display()),
            })?;

        debug!(path = %path.display(), bytes = contents.len(), "snapshot written");
        Ok(())
    }

    /// Get snapshot age, `None` if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns an error if file metadata cannot be read.
    pub async fn age(&self, name: &str) -> Result<Option<Duration>, Error> {
        let path = self.path(name);

        match fs::metadata(&path).await {
            Ok(metadata) => {
                let modified = metadata
                    .modified()
                    .map_err(|e| StorageError::from_io_with_path(&e, &path))?;

                // Clock skew puts the mtime in the future; call that fresh
                let age = SystemTime::now()
                    .duration_since(modified)
                    .unwrap_or(Duration::ZERO);

                Ok(Some(age))
            }
            Err(_) => Ok(None),
        }
    }

    /// True if the snapshot is absent or older than `max_age`
    ///
    /// # Errors
    ///
    /// Returns an error if file metadata cannot be read.
    pub async fn is_stale(&self, name: &str, max_age: Duration) -> Result<bool, Error> {
        let stale = match self.age(name).await? {
            Some(age) => age > max_age,
            None => true,
        };
        debug!(snapshot = name, stale, "cache freshness");
        Ok(stale)
    }

    /// Remove the named snapshots
    ///
    /// # Errors
    ///
    /// Returns an error if a snapshot exists but cannot be removed.
    pub async fn clear(&self, names: &[&str]) -> Result<(), Error> {
        for name in names {
            let path = self.path(name);
            match fs::remove_file(&path).await {
                Ok(()) => debug!(path = %path.display(), "snapshot removed"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(StorageError::from_io_with_path(&e, &path).into()),
            }
        }
        Ok(())
    }
}
