//! The reorganization driver.
//!
//! Walks an unpacked wheel, routes every file through the layout rules and
//! publishes the survivors one at a time. A failed publish is recorded in the
//! report and the walk moves on; only a failure to enumerate the extracted
//! files stops the run.

use std::path::Path;

use tracing::{debug, info, warn};
use wheelshift_schema::{Router, RoutingDecision, WheelIdentity};

use crate::Reporter;
use crate::io::{ExtractError, Publisher, walk_files};
use crate::report::{RunReport, UploadOutcome, UploadStatus};

/// Reorganize the files under `extracted_root`.
///
/// Without a `publisher` every routed file is recorded as
/// [`UploadStatus::Planned`]. Destinations are always overwritten.
pub async fn reorganize<R: Reporter>(
    extracted_root: &Path,
    identity: Option<&WheelIdentity>,
    publisher: Option<&dyn Publisher>,
    reporter: &R,
) -> Result<RunReport, ExtractError> {
    let router = Router::new(identity);
    let mut report = RunReport::new(identity.cloned());
    report.target = publisher.map(|p| p.location().to_string());

    for entry in walk_files(extracted_root)? {
        report.record_extracted(&entry.relative_path);

        let (category, decision) = router.route(&entry.relative_path);
        debug!(path = %entry.relative_path, %category, ?decision, "routed");
        reporter.routed(&entry.relative_path, category, decision.destination());

        let RoutingDecision::Publish(destination) = decision else {
            report.record_outcome(UploadOutcome {
                entry,
                category,
                destination: None,
                status: UploadStatus::Omitted,
            });
            continue;
        };

        let status = match publisher {
            None => UploadStatus::Planned,
            Some(publisher) => {
                match publisher
                    .publish(&entry.absolute_path, &destination, true)
                    .await
                {
                    Ok(()) => {
                        info!(path = %entry.relative_path, %destination, "published");
                        reporter.published(&entry.relative_path, &destination);
                        UploadStatus::Published
                    }
                    Err(e) => {
                        warn!(path = %entry.relative_path, %destination, error = %e, "publish failed");
                        reporter.failed(&entry.relative_path, &e.to_string());
                        UploadStatus::Failed(e.to_string())
                    }
                }
            }
        };

        report.record_outcome(UploadOutcome {
            entry,
            category,
            destination: Some(destination),
            status,
        });
    }

    Ok(report)
}
