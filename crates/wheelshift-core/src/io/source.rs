//! Archive sources - where wheels are downloaded from.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use opendal::{ErrorKind, Operator};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("{archive} not found in {location}")]
    NotFound { archive: String, location: String },

    #[error("download of {archive} failed: {reason}")]
    Download { archive: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Materializes a named archive as a local file.
#[async_trait]
pub trait ArchiveSource: Send + Sync {
    /// Human-readable location, used in messages.
    fn location(&self) -> &str;

    /// Download `archive_filename` into `dest_dir`, returning the local path.
    async fn fetch(&self, archive_filename: &str, dest_dir: &Path) -> Result<PathBuf, SourceError>;
}

/// An [`ArchiveSource`] backed by an object-store operator.
#[derive(Debug, Clone)]
pub struct StoreSource {
    op: Operator,
    location: String,
}

impl StoreSource {
    pub fn new(op: Operator, location: impl Into<String>) -> Self {
        Self {
            op,
            location: location.into(),
        }
    }
}

#[async_trait]
impl ArchiveSource for StoreSource {
    fn location(&self) -> &str {
        &self.location
    }

    async fn fetch(&self, archive_filename: &str, dest_dir: &Path) -> Result<PathBuf, SourceError> {
        let file_name = Path::new(archive_filename)
            .file_name()
            .ok_or_else(|| SourceError::Download {
                archive: archive_filename.to_string(),
                reason: "archive name has no file component".to_string(),
            })?;

        let data = self.op.read(archive_filename).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                SourceError::NotFound {
                    archive: archive_filename.to_string(),
                    location: self.location.clone(),
                }
            } else {
                SourceError::Download {
                    archive: archive_filename.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;

        tokio::fs::create_dir_all(dest_dir).await?;
        let local_path = dest_dir.join(file_name);
        tokio::fs::write(&local_path, &data).await?;

        tracing::info!(
            archive = archive_filename,
            bytes = data.len(),
            location = %self.location,
            "downloaded archive"
        );
        Ok(local_path)
    }
}
