//! On-disk summary cache
//!
//! One plain-text file per chunk fingerprint. Summaries are written as soon
//! as they are produced, so an interrupted run resumes where it stopped and
//! a finished run is free to repeat.

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Flat-file key-value store for chunk summaries
#[derive(Debug)]
pub struct SummaryCache {
    dir: PathBuf,
}

impl SummaryCache {
    /// Open a cache rooted at `dir`, creating the directory if needed
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cache`] if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .map_err(|e| Error::Cache(format!("failed to create {}: {e}", dir.display())))?;
        Ok(Self { dir })
    }

    /// Whether a summary is cached under `key`
    #[must_use]
    pub fn exists(&self, key: &str) -> bool {
        self.entry_path(key).exists()
    }

    /// Read the summary cached under `key`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cache`] if no entry exists or it cannot be read.
    pub fn get(&self, key: &str) -> Result<String> {
        let path = self.entry_path(key);
        std::fs::read_to_string(&path)
            .map_err(|e| Error::Cache(format!("failed to read {}: {e}", path.display())))
    }

    /// Write `text` under `key`, replacing any previous entry
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cache`] if the entry cannot be written.
    pub fn put(&self, key: &str, text: &str) -> Result<()> {
        let path = self.entry_path(key);
        std::fs::write(&path, text)
            .map_err(|e| Error::Cache(format!("failed to write {}: {e}", path.display())))
    }

    /// Directory this cache lives in
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("chunk_{key}.txt"))
    }
}
