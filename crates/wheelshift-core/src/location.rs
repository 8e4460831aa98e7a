//! Storage locations and their object-store operators.
//!
//! A location is a marker followed by a store-specific address:
//!
//! - `s3://{bucket}[/{prefix}]` for S3-compatible object storage
//! - `file://{absolute-dir}` for a local directory
//!
//! Locations without a recognized marker are treated as S3 addresses.

use std::fmt;
use std::path::PathBuf;

use opendal::Operator;
use opendal::services::{Fs, S3};
use thiserror::Error;

/// Marker for S3-compatible object storage, prepended to unmarked locations.
pub const S3_MARKER: &str = "s3://";

/// Marker for a local directory store.
pub const FILE_MARKER: &str = "file://";

const MARKERS: [&str; 2] = [S3_MARKER, FILE_MARKER];

#[derive(Error, Debug)]
pub enum LocationError {
    #[error("location is empty")]
    Empty,

    #[error("missing bucket name in {0}")]
    MissingBucket(String),

    #[error("file location must be an absolute path: {0}")]
    RelativePath(String),

    #[error("failed to configure store for {location}: {source}")]
    Store {
        location: String,
        #[source]
        source: opendal::Error,
    },
}

/// Credentials and endpoint settings for S3-compatible stores.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Custom endpoint (e.g., `https://<account>.r2.cloudflarestorage.com`)
    pub endpoint: Option<String>,
    /// Access Key ID
    pub access_key: Option<String>,
    /// Secret Access Key
    pub secret_key: Option<String>,
    /// Signing region
    pub region: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            access_key: None,
            secret_key: None,
            region: "auto".to_string(),
        }
    }
}

/// Prepend the default marker when `raw` carries none.
///
/// ```
/// use wheelshift_core::location::normalize;
///
/// assert_eq!(normalize("bucket/wheels"), "s3://bucket/wheels");
/// assert_eq!(normalize("file:///srv/out"), "file:///srv/out");
/// ```
pub fn normalize(raw: &str) -> String {
    let raw = raw.trim();
    if MARKERS.iter().any(|marker| raw.starts_with(marker)) {
        raw.to_string()
    } else {
        format!("{S3_MARKER}{}", raw.trim_start_matches('/'))
    }
}

/// A parsed storage location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// An S3 bucket, optionally scoped to a key prefix.
    S3 {
        /// Bucket name
        bucket: String,
        /// Key prefix without leading or trailing slashes (may be empty)
        prefix: String,
    },
    /// A local directory.
    Fs {
        /// Absolute directory path
        root: PathBuf,
    },
}

impl Location {
    /// Parse a location, normalizing it first.
    pub fn parse(raw: &str) -> Result<Self, LocationError> {
        if raw.trim().is_empty() {
            return Err(LocationError::Empty);
        }
        let normalized = normalize(raw);

        if let Some(path) = normalized.strip_prefix(FILE_MARKER) {
            let root = PathBuf::from(path);
            if !root.is_absolute() {
                return Err(LocationError::RelativePath(normalized));
            }
            return Ok(Self::Fs { root });
        }

        let address = normalized.strip_prefix(S3_MARKER).unwrap_or(&normalized);
        let (bucket, prefix) = address.split_once('/').unwrap_or((address, ""));
        if bucket.is_empty() {
            return Err(LocationError::MissingBucket(normalized));
        }

        Ok(Self::S3 {
            bucket: bucket.to_string(),
            prefix: prefix.trim_matches('/').to_string(),
        })
    }

    /// Build an operator rooted at this location.
    pub fn operator(&self, config: &StoreConfig) -> Result<Operator, LocationError> {
        let built = match self {
            Self::S3 { bucket, prefix } => {
                let mut builder = S3::default();
                builder.bucket(bucket);
                builder.root(&format!("/{prefix}"));
                builder.region(&config.region);
                if let Some(endpoint) = &config.endpoint {
                    builder.endpoint(endpoint);
                }
                if let Some(access_key) = &config.access_key {
                    builder.access_key_id(access_key);
                }
                if let Some(secret_key) = &config.secret_key {
                    builder.secret_access_key(secret_key);
                }
                Operator::new(builder).map(|op| op.finish())
            }
            Self::Fs { root } => {
                let mut builder = Fs::default();
                builder.root(&root.to_string_lossy());
                Operator::new(builder).map(|op| op.finish())
            }
        };

        built.map_err(|source| LocationError::Store {
            location: self.to_string(),
            source,
        })
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::S3 { bucket, prefix } if prefix.is_empty() => write!(f, "{S3_MARKER}{bucket}"),
            Self::S3 { bucket, prefix } => write!(f, "{S3_MARKER}{bucket}/{prefix}"),
            Self::Fs { root } => write!(f, "{FILE_MARKER}{}", root.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_prepends_marker() {
        assert_eq!(normalize("bucket"), "s3://bucket");
        assert_eq!(normalize("/bucket/in/"), "s3://bucket/in/");
        assert_eq!(normalize("  s3://bucket/in "), "s3://bucket/in");
        assert_eq!(normalize("file:///tmp/x"), "file:///tmp/x");
    }

    #[test]
    fn test_parse_s3() {
        assert_eq!(
            Location::parse("s3://wheels/incoming/").unwrap(),
            Location::S3 {
                bucket: "wheels".into(),
                prefix: "incoming".into()
            }
        );
        assert_eq!(
            Location::parse("wheels").unwrap(),
            Location::S3 {
                bucket: "wheels".into(),
                prefix: String::new()
            }
        );
        assert_eq!(
            Location::parse("wheels/a/b").unwrap().to_string(),
            "s3://wheels/a/b"
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Location::parse("  "), Err(LocationError::Empty)));
        assert!(matches!(
            Location::parse("s3:///prefix"),
            Err(LocationError::MissingBucket(_))
        ));
        assert!(matches!(
            Location::parse("file://relative/dir"),
            Err(LocationError::RelativePath(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_parse_fs() {
        let loc = Location::parse("file:///srv/wheels").unwrap();
        assert_eq!(
            loc,
            Location::Fs {
                root: PathBuf::from("/srv/wheels")
            }
        );
        assert_eq!(loc.to_string(), "file:///srv/wheels");
    }

    #[test]
    fn test_s3_operator_builds_without_network() {
        let config = StoreConfig {
            endpoint: Some("https://example.r2.cloudflarestorage.com".into()),
            access_key: Some("key".into()),
            secret_key: Some("secret".into()),
            ..StoreConfig::default()
        };
        let loc = Location::parse("s3://bucket/out").unwrap();
        assert!(loc.operator(&config).is_ok());
    }
}
