//! Local filesystem upload area.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use straico_core::error::{AppError, ErrorKind};
use straico_core::result::AppResult;
use straico_core::traits::file_area::{AreaEntry, DirRemoval, FileArea};

/// Upload area rooted at the host's upload directory.
#[derive(Debug, Clone)]
pub struct LocalUploadArea {
    /// Host upload root, if the host has one.
    root: Option<PathBuf>,
}

impl LocalUploadArea {
    /// Create an upload area. `None` means the host has no upload root.
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    /// The configured upload root.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }
}

/// Reject anything that is not a single plain path component.
fn validate_subdir(subdir: &str) -> AppResult<()> {
    if subdir.is_empty()
        || subdir == "."
        || subdir == ".."
        || subdir.contains('/')
        || subdir.contains('\\')
    {
        return Err(AppError::validation(format!(
            "Invalid upload subdirectory name: '{subdir}'"
        )));
    }
    Ok(())
}

#[async_trait]
impl FileArea for LocalUploadArea {
    async fn resolve(&self, subdir: &str) -> AppResult<Option<PathBuf>> {
        validate_subdir(subdir)?;
        Ok(self.root.as_ref().map(|root| root.join(subdir)))
    }

    async fn exists(&self, dir: &Path) -> AppResult<bool> {
        match fs::metadata(dir).await {
            Ok(meta) => Ok(meta.is_dir()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to stat directory: {}", dir.display()),
                e,
            )),
        }
    }

    async fn list(&self, dir: &Path) -> AppResult<Vec<AreaEntry>> {
        let mut reader = match fs::read_dir(dir).await {
            Ok(reader) => reader,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to list directory: {}", dir.display()),
                    e,
                ));
            }
        };

        let mut entries = Vec::new();
        while let Some(entry) = reader.next_entry().await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to read directory entry", e)
        })? {
            let path = entry.path();
            // Follows symlinks; a dangling link is not a regular file.
            let is_file = fs::metadata(&path)
                .await
                .map(|meta| meta.is_file())
                .unwrap_or(false);
            entries.push(AreaEntry { path, is_file });
        }

        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }

    async fn delete_file(&self, path: &Path) -> AppResult<bool> {
        match fs::remove_file(path).await {
            Ok(()) => {
                debug!(path = %path.display(), "Deleted file");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete file: {}", path.display()),
                e,
            )),
        }
    }

    async fn remove_dir(&self, dir: &Path) -> AppResult<DirRemoval> {
        if !self.exists(dir).await? {
            return Ok(DirRemoval::Missing);
        }
        if !self.list(dir).await?.is_empty() {
            return Ok(DirRemoval::NotEmpty);
        }

        match fs::remove_dir(dir).await {
            Ok(()) => {
                debug!(dir = %dir.display(), "Removed directory");
                Ok(DirRemoval::Removed)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(DirRemoval::Missing),
            Err(e) if e.kind() == std::io::ErrorKind::DirectoryNotEmpty => {
                Ok(DirRemoval::NotEmpty)
            }
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to remove directory: {}", dir.display()),
                e,
            )),
        }
    }
}
