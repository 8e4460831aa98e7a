//! Publishers - where reorganized files are written to.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use opendal::Operator;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("{0} already exists and overwrite is disabled")]
    Exists(String),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("store rejected {destination}: {reason}")]
    Store { destination: String, reason: String },
}

/// Writes a local file to a path relative to the target root.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Human-readable target location, used in reports.
    fn location(&self) -> &str;

    /// Publish `local_path` to `destination`.
    ///
    /// With `overwrite` unset, an existing object at `destination` is an error.
    async fn publish(
        &self,
        local_path: &Path,
        destination: &str,
        overwrite: bool,
    ) -> Result<(), PublishError>;
}

/// A [`Publisher`] backed by an object-store operator.
#[derive(Debug, Clone)]
pub struct StorePublisher {
    op: Operator,
    location: String,
}

impl StorePublisher {
    pub fn new(op: Operator, location: impl Into<String>) -> Self {
        Self {
            op,
            location: location.into(),
        }
    }

    fn store_error(destination: &str, err: &opendal::Error) -> PublishError {
        PublishError::Store {
            destination: destination.to_string(),
            reason: err.to_string(),
        }
    }
}

#[async_trait]
impl Publisher for StorePublisher {
    fn location(&self) -> &str {
        &self.location
    }

    async fn publish(
        &self,
        local_path: &Path,
        destination: &str,
        overwrite: bool,
    ) -> Result<(), PublishError> {
        if !overwrite
            && self
                .op
                .is_exist(destination)
                .await
                .map_err(|e| Self::store_error(destination, &e))?
        {
            return Err(PublishError::Exists(destination.to_string()));
        }

        let data = tokio::fs::read(local_path)
            .await
            .map_err(|source| PublishError::Read {
                path: local_path.to_path_buf(),
                source,
            })?;

        self.op
            .write(destination, data)
            .await
            .map_err(|e| Self::store_error(destination, &e))?;
        Ok(())
    }
}
