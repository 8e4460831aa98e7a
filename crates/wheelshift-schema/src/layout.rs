//! Destination layout for republished wheel contents.
//!
//! Every file extracted from a wheel falls into exactly one [`PathCategory`].
//! Rules are evaluated in order and the first match wins:
//!
//! | Category   | Matches                                   | Destination            |
//! |------------|-------------------------------------------|------------------------|
//! | `Tooling`  | `talend_etl_tooling/...`                  | unchanged              |
//! | `Data`     | `{dist}-{ver}.data/data/...`              | base name only         |
//! | `Metadata` | `{dist}-{ver}.dist-info/...`              | omitted                |
//! | `Package`  | anything else                             | unchanged              |
//!
//! Paths are relative and `/`-separated regardless of host platform.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::WheelIdentity;

/// Reserved top-level folder holding this tool's own package payload.
pub const TOOLING_DIR: &str = "talend_etl_tooling/";

/// Which layout rule a path matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathCategory {
    /// Reserved tooling folder, copied through unchanged.
    Tooling,
    /// Installation-root data, flattened to the target root.
    Data,
    /// Wheel metadata, never published.
    Metadata,
    /// Regular package content, copied through unchanged.
    Package,
}

impl PathCategory {
    /// Lowercase label used in reports and tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tooling => "tooling",
            Self::Data => "data",
            Self::Metadata => "metadata",
            Self::Package => "package",
        }
    }
}

impl fmt::Display for PathCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where (if anywhere) a file goes in the target store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "destination", rename_all = "lowercase")]
pub enum RoutingDecision {
    /// Publish to this path relative to the target root.
    Publish(String),
    /// Skip the file entirely.
    Omit,
}

impl RoutingDecision {
    /// Destination path, or `None` for [`RoutingDecision::Omit`].
    pub fn destination(&self) -> Option<&str> {
        match self {
            Self::Publish(dest) => Some(dest),
            Self::Omit => None,
        }
    }
}

/// Precomputed folder prefixes for one archive.
///
/// Without an identity the data and metadata rules are disabled, so every file
/// outside the tooling folder is treated as package content.
#[derive(Debug, Clone, Default)]
pub struct Router {
    data_prefix: Option<String>,
    metadata_prefix: Option<String>,
}

impl Router {
    /// Build the routing rules for an archive.
    pub fn new(identity: Option<&WheelIdentity>) -> Self {
        Self {
            data_prefix: identity.map(WheelIdentity::data_dir),
            metadata_prefix: identity.map(WheelIdentity::dist_info_dir),
        }
    }

    /// Category of a relative path.
    pub fn category(&self, relative_path: &str) -> PathCategory {
        if relative_path.starts_with(TOOLING_DIR) {
            return PathCategory::Tooling;
        }
        if self
            .data_prefix
            .as_deref()
            .is_some_and(|prefix| relative_path.starts_with(prefix))
        {
            return PathCategory::Data;
        }
        if self
            .metadata_prefix
            .as_deref()
            .is_some_and(|prefix| relative_path.starts_with(prefix))
        {
            return PathCategory::Metadata;
        }
        PathCategory::Package
    }

    /// Category and decision for a relative path.
    pub fn route(&self, relative_path: &str) -> (PathCategory, RoutingDecision) {
        let category = self.category(relative_path);
        let decision = match category {
            PathCategory::Tooling | PathCategory::Package => {
                RoutingDecision::Publish(relative_path.to_string())
            }
            PathCategory::Data => RoutingDecision::Publish(base_name(relative_path).to_string()),
            PathCategory::Metadata => RoutingDecision::Omit,
        };
        (category, decision)
    }
}

/// Route a single path. Prefer [`Router`] when routing a whole archive.
pub fn route(relative_path: &str, identity: Option<&WheelIdentity>) -> (PathCategory, RoutingDecision) {
    Router::new(identity).route(relative_path)
}

/// Destination decision for a single path.
///
/// # Example
///
/// ```
/// use wheelshift_schema::{RoutingDecision, WheelIdentity, classify};
///
/// let id = WheelIdentity::parse("mypkg-1.0-py3-none-any.whl");
/// assert_eq!(
///     classify("mypkg-1.0.data/data/scripts/run.sh", id.as_ref()),
///     RoutingDecision::Publish("run.sh".into()),
/// );
/// assert_eq!(classify("mypkg-1.0.dist-info/RECORD", id.as_ref()), RoutingDecision::Omit);
/// ```
pub fn classify(relative_path: &str, identity: Option<&WheelIdentity>) -> RoutingDecision {
    route(relative_path, identity).1
}

fn base_name(relative_path: &str) -> &str {
    relative_path.rsplit('/').next().unwrap_or(relative_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> WheelIdentity {
        WheelIdentity::parse("mypkg-1.0-py3-none-any.whl").unwrap()
    }

    fn publish(dest: &str) -> RoutingDecision {
        RoutingDecision::Publish(dest.to_string())
    }

    #[test]
    fn test_data_files_are_flattened() {
        let id = id();
        assert_eq!(classify("mypkg-1.0.data/data/scripts/run.sh", Some(&id)), publish("run.sh"));
        assert_eq!(classify("mypkg-1.0.data/data/a/b/c/conf.ini", Some(&id)), publish("conf.ini"));
        assert_eq!(classify("mypkg-1.0.data/data/top.txt", Some(&id)), publish("top.txt"));
    }

    #[test]
    fn test_other_data_schemes_pass_through() {
        // Only the `data` scheme is flattened; `scripts`, `purelib`, etc. keep their path.
        let id = id();
        assert_eq!(
            classify("mypkg-1.0.data/scripts/tool", Some(&id)),
            publish("mypkg-1.0.data/scripts/tool")
        );
    }

    #[test]
    fn test_metadata_is_omitted() {
        let id = id();
        for path in [
            "mypkg-1.0.dist-info/METADATA",
            "mypkg-1.0.dist-info/RECORD",
            "mypkg-1.0.dist-info/licenses/LICENSE",
        ] {
            assert_eq!(classify(path, Some(&id)), RoutingDecision::Omit, "{path}");
        }
    }

    #[test]
    fn test_package_content_passes_through() {
        let id = id();
        for path in ["mypkg/core/__init__.py", "setup.cfg", "other-2.0.dist-info/METADATA"] {
            assert_eq!(classify(path, Some(&id)), publish(path));
        }
    }

    #[test]
    fn test_tooling_folder_takes_precedence() {
        let (category, decision) = route("talend_etl_tooling/app.py", Some(&id()));
        assert_eq!(category, PathCategory::Tooling);
        assert_eq!(decision, publish("talend_etl_tooling/app.py"));

        // A file merely named like the folder is ordinary content.
        assert_eq!(
            route("talend_etl_tooling.py", None).0,
            PathCategory::Package
        );
    }

    #[test]
    fn test_unmatched_identity_disables_special_folders() {
        let router = Router::new(None);
        assert_eq!(
            router.route("mypkg-1.0.dist-info/METADATA"),
            (PathCategory::Package, publish("mypkg-1.0.dist-info/METADATA"))
        );
        assert_eq!(
            router.route("mypkg-1.0.data/data/README.txt"),
            (PathCategory::Package, publish("mypkg-1.0.data/data/README.txt"))
        );
    }

    #[test]
    fn test_destination_accessor() {
        assert_eq!(publish("a/b").destination(), Some("a/b"));
        assert_eq!(RoutingDecision::Omit.destination(), None);
    }
}
