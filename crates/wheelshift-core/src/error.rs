//! Run-level errors. Any of these aborts a run; per-file publish failures are
//! recorded in the report instead (see [`crate::io::PublishError`]).

use thiserror::Error;

use crate::io::{ExtractError, SourceError};
use crate::location::LocationError;

#[derive(Error, Debug)]
pub enum ShiftError {
    #[error("failed to download {archive}: {reason}")]
    DownloadFailed { archive: String, reason: String },

    #[error("{archive} is not a valid zip archive: {reason}")]
    InvalidArchive { archive: String, reason: String },

    #[error("{archive} not found in {location}")]
    SourceNotFound { archive: String, location: String },

    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl ShiftError {
    /// Stable identifier for machine-readable output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DownloadFailed { .. } => "download_failed",
            Self::InvalidArchive { .. } => "invalid_archive",
            Self::SourceNotFound { .. } => "source_not_found",
            Self::Unexpected(_) => "unexpected_failure",
        }
    }

    /// Render as the single-line text report, starting with `ERROR:`.
    pub fn render(&self) -> String {
        format!("ERROR: {self}")
    }

    pub(crate) fn from_source(err: SourceError) -> Self {
        match err {
            SourceError::NotFound { archive, location } => Self::SourceNotFound { archive, location },
            SourceError::Download { archive, reason } => Self::DownloadFailed { archive, reason },
            SourceError::Io(e) => Self::Unexpected(e.to_string()),
        }
    }

    pub(crate) fn from_extract(archive: &str, err: ExtractError) -> Self {
        match err {
            ExtractError::InvalidArchive(reason) => Self::InvalidArchive {
                archive: archive.to_string(),
                reason,
            },
            ExtractError::Io(e) => Self::Unexpected(e.to_string()),
        }
    }
}

impl From<LocationError> for ShiftError {
    fn from(err: LocationError) -> Self {
        Self::Unexpected(err.to_string())
    }
}

impl From<std::io::Error> for ShiftError {
    fn from(err: std::io::Error) -> Self {
        Self::Unexpected(err.to_string())
    }
}
