//! On-disk response cache keyed by request URL.
//!
//! Each successful response body is stored in its own file named after the
//! SHA-256 digest of the URL. The cache is shared by every fetch of a run and
//! survives between runs until cleared.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::files::write_atomic;

/// File extension of cached bodies.
const ENTRY_EXTENSION: &str = "body";

/// Response body store rooted at a single directory.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
}

impl ResponseCache {
    /// Open (and create if needed) a cache directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Cache key for a URL.
    ///
    /// # Examples
    /// ```
    /// use pydocs_parser::cache::ResponseCache;
    ///
    /// let key = ResponseCache::key("https://peps.python.org/");
    /// assert_eq!(key.len(), 64);
    /// assert_eq!(key, ResponseCache::key("https://peps.python.org/"));
    /// ```
    pub fn key(url: &str) -> String {
        let digest = Sha256::digest(url.as_bytes());
        format!("{digest:x}")
    }

    fn entry_path(&self, url: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{ENTRY_EXTENSION}", Self::key(url)))
    }

    /// Cached body for `url`, if any.
    pub fn get(&self, url: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.entry_path(url)) {
            Ok(body) => Ok(Some(body)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Store `body` for `url`, replacing any previous entry.
    pub fn put(&self, url: &str, body: &[u8]) -> Result<()> {
        write_atomic(&self.entry_path(url), body)
    }

    /// Remove every cached entry. Returns the number of entries removed.
    pub fn clear(&self) -> Result<usize> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let mut removed = 0;
        for entry in entries {
            let path = entry?.path();
            if path.is_file() {
                fs::remove_file(&path)?;
                removed += 1;
            }
        }

        tracing::info!(removed, dir = %self.dir.display(), "Response cache cleared");
        Ok(removed)
    }

    /// Number of cached entries.
    pub fn len(&self) -> Result<usize> {
        let mut count = 0;
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == ENTRY_EXTENSION) {
                count += 1;
            }
        }
        Ok(count)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
