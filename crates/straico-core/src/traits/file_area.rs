//! Upload area trait.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::result::AppResult;

/// A direct child of a directory in the upload area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaEntry {
    /// Absolute path of the entry.
    pub path: PathBuf,
    /// `true` for regular files only; directories and anything else are `false`.
    pub is_file: bool,
}

/// Result of removing a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirRemoval {
    /// The directory was removed.
    Removed,
    /// The directory did not exist.
    Missing,
    /// The directory still has entries and was kept.
    NotEmpty,
}

/// Host upload area.
#[async_trait]
pub trait FileArea: Send + Sync + std::fmt::Debug + 'static {
    /// Resolve a plugin subdirectory under the upload root.
    ///
    /// Returns `None` when the host has no upload root.
    async fn resolve(&self, subdir: &str) -> AppResult<Option<PathBuf>>;

    /// Whether `dir` exists and is a directory.
    async fn exists(&self, dir: &Path) -> AppResult<bool>;

    /// List the direct children of `dir`. Not recursive.
    async fn list(&self, dir: &Path) -> AppResult<Vec<AreaEntry>>;

    /// Delete a regular file. Returns `false` when it was already gone.
    async fn delete_file(&self, path: &Path) -> AppResult<bool>;

    /// Remove `dir` only if it is empty.
    async fn remove_dir(&self, dir: &Path) -> AppResult<DirRemoval>;
}
