//! Run results and their text rendering.

use std::fmt::Write as _;

use serde::Serialize;
use wheelshift_schema::{PathCategory, WheelIdentity};

use crate::io::ExtractedEntry;

/// How many extracted paths the report previews.
pub const SAMPLE_SIZE: usize = 5;

/// What happened to one extracted file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "lowercase")]
pub enum UploadStatus {
    /// Written to the target store.
    Published,
    /// Publishing failed; the run continued.
    Failed(String),
    /// Routed, but no target store was used (absent target or dry run).
    Planned,
    /// Excluded by the layout rules.
    Omitted,
}

/// Per-file record kept by the driver, in walk order.
#[derive(Debug, Clone, Serialize)]
pub struct UploadOutcome {
    pub entry: ExtractedEntry,
    pub category: PathCategory,
    /// Destination relative to the target root, `None` when omitted.
    pub destination: Option<String>,
    pub status: UploadStatus,
}

/// Aggregate result of a run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// Archive filename as requested
    pub archive: String,
    /// Parsed wheel identity, `None` when the filename did not match
    pub identity: Option<WheelIdentity>,
    /// Normalized target location, if one was given
    pub target: Option<String>,
    /// Whether publishing was skipped on purpose
    pub dry_run: bool,
    /// Total regular files found after unpacking
    pub extracted: usize,
    /// Files successfully written to the target
    pub published: usize,
    /// Files excluded by the layout rules
    pub omitted: usize,
    /// First [`SAMPLE_SIZE`] extracted relative paths
    pub sample: Vec<String>,
    /// One line per failed publish
    pub warnings: Vec<String>,
    pub outcomes: Vec<UploadOutcome>,
}

impl RunReport {
    pub fn new(identity: Option<WheelIdentity>) -> Self {
        Self {
            identity,
            ..Self::default()
        }
    }

    /// Record a file found during the walk.
    pub fn record_extracted(&mut self, relative_path: &str) {
        self.extracted += 1;
        if self.sample.len() < SAMPLE_SIZE {
            self.sample.push(relative_path.to_string());
        }
    }

    /// Record what happened to a file after routing.
    pub fn record_outcome(&mut self, outcome: UploadOutcome) {
        match &outcome.status {
            UploadStatus::Published => self.published += 1,
            UploadStatus::Omitted => self.omitted += 1,
            UploadStatus::Failed(reason) => self
                .warnings
                .push(format!("{}: {reason}", outcome.entry.relative_path)),
            UploadStatus::Planned => {}
        }
        self.outcomes.push(outcome);
    }

    /// Number of files that failed to publish.
    pub fn failed(&self) -> usize {
        self.warnings.len()
    }

    /// Number of files routed to a destination (published, failed or planned).
    pub fn routed(&self) -> usize {
        self.extracted.saturating_sub(self.omitted)
    }

    /// Destinations that were written, in walk order.
    pub fn published_destinations(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| o.status == UploadStatus::Published)
            .filter_map(|o| o.destination.as_deref())
            .collect()
    }

    /// The sample paths, one per line, with an `... and N more` suffix when truncated.
    pub fn preview(&self) -> String {
        let mut out = self
            .sample
            .iter()
            .map(|p| format!("  {p}"))
            .collect::<Vec<_>>()
            .join("\n");
        let remaining = self.extracted.saturating_sub(self.sample.len());
        if remaining > 0 {
            let _ = write!(out, "\n  ... and {remaining} more");
        }
        out
    }

    /// Render the human-readable report, starting with `SUCCESS:`.
    pub fn render(&self) -> String {
        let mut out = format!(
            "SUCCESS: Extracted {} files from {}",
            self.extracted, self.archive
        );
        if let Some(identity) = &self.identity {
            let _ = write!(out, " ({identity})");
        }
        out.push('\n');

        match (&self.target, self.dry_run) {
            (Some(target), false) => {
                let _ = writeln!(
                    out,
                    "Published {} of {} files to {target} ({} omitted)",
                    self.published,
                    self.routed(),
                    self.omitted
                );
            }
            (Some(target), true) => {
                let _ = writeln!(
                    out,
                    "Dry run: {} files would be published to {target} ({} omitted)",
                    self.routed(),
                    self.omitted
                );
            }
            (None, _) => {
                let _ = writeln!(
                    out,
                    "No target location configured: {} files routed, nothing published ({} omitted)",
                    self.routed(),
                    self.omitted
                );
            }
        }

        if self.extracted > 0 {
            let _ = write!(out, "Extracted files:\n{}\n", self.preview());
        }

        if !self.warnings.is_empty() {
            let _ = write!(
                out,
                "Warnings ({}):\n{}\n",
                self.warnings.len(),
                self.warnings.join("\n")
            );
        }

        out.truncate(out.trim_end().len());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn outcome(path: &str, status: UploadStatus) -> UploadOutcome {
        UploadOutcome {
            entry: ExtractedEntry {
                relative_path: path.to_string(),
                absolute_path: PathBuf::from("/work").join(path),
            },
            category: PathCategory::Package,
            destination: (status != UploadStatus::Omitted).then(|| path.to_string()),
            status,
        }
    }

    #[test]
    fn test_sample_is_bounded() {
        let mut report = RunReport::new(None);
        for i in 0..8 {
            report.record_extracted(&format!("f{i}.py"));
        }
        assert_eq!(report.sample.len(), SAMPLE_SIZE);
        assert_eq!(report.extracted, 8);
        assert!(report.preview().ends_with("  ... and 3 more"));
        assert!(report.preview().starts_with("  f0.py\n  f1.py"));
    }

    #[test]
    fn test_preview_without_truncation() {
        let mut report = RunReport::new(None);
        report.record_extracted("a.py");
        assert_eq!(report.preview(), "  a.py");
    }

    #[test]
    fn test_counts_and_warnings() {
        let mut report = RunReport::new(None);
        for p in ["a", "b", "c", "d"] {
            report.record_extracted(p);
        }
        report.record_outcome(outcome("a", UploadStatus::Published));
        report.record_outcome(outcome("b", UploadStatus::Failed("denied".into())));
        report.record_outcome(outcome("c", UploadStatus::Omitted));
        report.record_outcome(outcome("d", UploadStatus::Published));

        assert_eq!(report.published, 2);
        assert_eq!(report.omitted, 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.routed(), 3);
        assert_eq!(report.warnings, ["b: denied"]);
        assert_eq!(report.published_destinations(), ["a", "d"]);
    }

    #[test]
    fn test_render_with_target() {
        let mut report = RunReport::new(WheelIdentity::parse("p-1.0-py3-none-any.whl"));
        report.archive = "p-1.0-py3-none-any.whl".into();
        report.target = Some("s3://bucket/out".into());
        report.record_extracted("p/a.py");
        report.record_outcome(outcome("p/a.py", UploadStatus::Failed("timeout".into())));

        let text = report.render();
        assert!(text.starts_with("SUCCESS: Extracted 1 files from p-1.0-py3-none-any.whl (p-1.0)\n"));
        assert!(text.contains("Published 0 of 1 files to s3://bucket/out (0 omitted)"));
        assert!(text.contains("Extracted files:\n  p/a.py"));
        assert!(text.ends_with("Warnings (1):\np/a.py: timeout"));
    }

    #[test]
    fn test_render_without_target() {
        let mut report = RunReport::new(None);
        report.archive = "x.whl".into();
        let text = report.render();
        assert!(text.starts_with("SUCCESS: Extracted 0 files from x.whl\n"));
        assert!(text.contains("No target location configured"));
        assert!(!text.contains("Warnings"));
    }

    #[test]
    fn test_report_serializes() {
        let mut report = RunReport::new(None);
        report.record_extracted("a");
        report.record_outcome(outcome("a", UploadStatus::Planned));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["extracted"], 1);
        assert_eq!(json["outcomes"][0]["status"]["state"], "planned");
        assert_eq!(json["outcomes"][0]["category"], "package");
    }

    #[test]
    fn test_failed_status_carries_reason() {
        let json = serde_json::to_value(UploadStatus::Failed("denied".into())).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "failed", "reason": "denied" }));
    }

    #[test]
    fn test_routed_without_extracted_does_not_underflow() {
        let mut report = RunReport::new(None);
        report.record_outcome(outcome("a", UploadStatus::Omitted));
        assert_eq!(report.routed(), 0);
        assert!(report.render().contains("0 files routed"));
    }
}
