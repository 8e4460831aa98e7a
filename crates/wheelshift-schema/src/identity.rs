//! Wheel filename grammar.
//!
//! Wheels are named `{distribution}-{version}-{tags}.whl`. The distribution may
//! itself contain hyphens, so the split point is found by trying every hyphen
//! from the right: the longest distribution whose next token is a valid version,
//! and which still leaves a non-empty tag segment, wins.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::WHEEL_EXTENSION;

/// Pre-release and dev markers accepted after the numeric release segment.
///
/// `dev` and `rc` are checked before the single-letter markers.
const PRE_RELEASE_MARKERS: [&str; 4] = ["dev", "rc", "a", "b"];

/// The `{distribution}-{version}` pair encoded in a wheel filename.
///
/// # Example
///
/// ```
/// use wheelshift_schema::WheelIdentity;
///
/// let id = WheelIdentity::parse("talend_etl_tooling-1.2.0-py3-none-any.whl").unwrap();
/// assert_eq!(id.distribution, "talend_etl_tooling");
/// assert_eq!(id.version, "1.2.0");
/// assert_eq!(id.data_dir(), "talend_etl_tooling-1.2.0.data/data/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WheelIdentity {
    /// Distribution name, possibly containing hyphens (e.g. `my-pkg`).
    pub distribution: String,
    /// Version token (e.g. `1.2.0`, `2.0.0rc1`).
    pub version: String,
}

impl WheelIdentity {
    /// Parse a wheel filename.
    ///
    /// Returns `None` when the name does not follow the
    /// `{distribution}-{version}-{tags}.whl` convention. That is not an error:
    /// callers fall back to treating every file as plain package content.
    pub fn parse(filename: &str) -> Option<Self> {
        let stem = filename.strip_suffix(WHEEL_EXTENSION)?;

        for (split, _) in stem.rmatch_indices('-') {
            if split == 0 {
                continue;
            }
            let Some((version, tags)) = stem[split + 1..].split_once('-') else {
                continue;
            };
            if tags.is_empty() || !is_version(version) {
                continue;
            }
            return Some(Self {
                distribution: stem[..split].to_string(),
                version: version.to_string(),
            });
        }

        None
    }

    /// `{distribution}-{version}`, the stem shared by the wheel's special folders.
    pub fn prefix(&self) -> String {
        format!("{}-{}", self.distribution, self.version)
    }

    /// Folder whose contents are installed at the installation root.
    pub fn data_dir(&self) -> String {
        format!("{}.data/data/", self.prefix())
    }

    /// Wheel metadata folder (`METADATA`, `RECORD`, `WHEEL`, ...).
    pub fn dist_info_dir(&self) -> String {
        format!("{}.dist-info/", self.prefix())
    }
}

impl fmt::Display for WheelIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.distribution, self.version)
    }
}

/// `N(.N)*` optionally followed by a pre-release marker and digits.
///
/// The marker may be glued to the release (`1.0rc1`) or introduced by a dot
/// (`1.0.dev3`).
fn is_version(token: &str) -> bool {
    let release_end = token
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(token.len());
    let (release, suffix) = token.split_at(release_end);

    let release = match release.strip_suffix('.') {
        Some(trimmed) if !suffix.is_empty() => trimmed,
        _ => release,
    };

    let release_ok = !release.is_empty()
        && release
            .split('.')
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()));

    release_ok && (suffix.is_empty() || is_pre_release(suffix))
}

fn is_pre_release(suffix: &str) -> bool {
    PRE_RELEASE_MARKERS.iter().any(|marker| {
        suffix
            .strip_prefix(marker)
            .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
    })
}
