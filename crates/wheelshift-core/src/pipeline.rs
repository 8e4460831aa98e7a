//! End-to-end runs: download, unpack, reorganize, report.
//!
//! [`Pipeline::run`] is the text-only surface: it always returns a string
//! beginning with `SUCCESS:` or `ERROR:`. [`Pipeline::execute`] exposes the same
//! run as a typed `Result`.

use std::path::{Path, PathBuf};

use serde_json::json;
use tracing::{info, warn};
use wheelshift_schema::WheelIdentity;

use crate::error::ShiftError;
use crate::io::{ArchiveSource, Publisher, StorePublisher, StoreSource, WorkArea, unpack_zip};
use crate::location::{Location, StoreConfig};
use crate::reorganize::reorganize;
use crate::report::RunReport;
use crate::reporter::Reporter;

/// One invocation: which archive to take from where, and where to put it.
#[derive(Debug, Clone)]
pub struct Job {
    /// Source location (marker optional)
    pub source: String,
    /// Archive filename inside the source location
    pub archive: String,
    /// Target location (marker optional); `None` or blank skips publishing
    pub target: Option<String>,
}

/// Knobs that do not change what a run means.
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    /// Parent directory for the temporary working area
    pub work_dir: Option<PathBuf>,
    /// Route files but do not publish them
    pub dry_run: bool,
}

pub struct Pipeline<R: Reporter> {
    store: StoreConfig,
    options: PipelineOptions,
    reporter: R,
}

impl<R: Reporter> Pipeline<R> {
    pub fn new(store: StoreConfig, options: PipelineOptions, reporter: R) -> Self {
        Self {
            store,
            options,
            reporter,
        }
    }

    /// Run a job and render the outcome as text.
    pub async fn run(&self, job: &Job) -> String {
        match self.execute(job).await {
            Ok(report) => report.render(),
            Err(e) => e.render(),
        }
    }

    /// Run a job.
    pub async fn execute(&self, job: &Job) -> Result<RunReport, ShiftError> {
        let source_location = Location::parse(&job.source)?;
        let source = StoreSource::new(
            source_location.operator(&self.store)?,
            source_location.to_string(),
        );

        let publisher = match job.target.as_deref().map(str::trim) {
            Some(target) if !target.is_empty() => {
                let location = Location::parse(target)?;
                Some(StorePublisher::new(
                    location.operator(&self.store)?,
                    location.to_string(),
                ))
            }
            _ => None,
        };

        process_archive(
            &source,
            publisher.as_ref().map(|p| p as &dyn Publisher),
            &job.archive,
            &self.options,
            &self.reporter,
        )
        .await
    }
}

/// Run one archive through a scoped working area.
///
/// The working area is removed before this returns, on success and on every
/// error path.
pub async fn process_archive<R: Reporter>(
    source: &dyn ArchiveSource,
    publisher: Option<&dyn Publisher>,
    archive: &str,
    options: &PipelineOptions,
    reporter: &R,
) -> Result<RunReport, ShiftError> {
    info!(tool = crate::TOOL_NAME, archive, source = source.location(), "starting run");
    let work_area = WorkArea::acquire(options.work_dir.as_deref())?;

    let result = shift(&work_area, source, publisher, archive, options, reporter).await;

    if let Err(e) = work_area.release() {
        warn!(error = %e, "failed to remove work area");
        reporter.warning(&format!("failed to remove work area: {e}"));
    }
    result
}

async fn shift<R: Reporter>(
    work_area: &WorkArea,
    source: &dyn ArchiveSource,
    publisher: Option<&dyn Publisher>,
    archive: &str,
    options: &PipelineOptions,
    reporter: &R,
) -> Result<RunReport, ShiftError> {
    reporter.section("Downloading");
    let local_archive = source
        .fetch(archive, &work_area.download_dir())
        .await
        .map_err(ShiftError::from_source)?;

    reporter.section("Unpacking");
    let extract_dir = work_area.extract_dir();
    let unpacked = unpack_zip(&local_archive, &extract_dir)
        .map_err(|e| ShiftError::from_extract(archive, e))?;
    info!(archive, files = unpacked, "unpacked archive");

    let identity = identify(archive);
    if identity.is_none() {
        warn!(archive, "filename does not follow wheel naming; every file passes through");
        reporter.warning(&format!(
            "{archive} does not follow {{distribution}}-{{version}}-{{tags}}.whl naming; \
             data and metadata folders will not be recognized"
        ));
    }

    reporter.section(if publisher.is_some() && !options.dry_run {
        "Publishing"
    } else {
        "Routing"
    });
    let active_publisher = publisher.filter(|_| !options.dry_run);
    let mut report = reorganize(&extract_dir, identity.as_ref(), active_publisher, reporter)
        .await
        .map_err(|e| ShiftError::from_extract(archive, e))?;

    report.archive = archive.to_string();
    report.target = publisher.map(|p| p.location().to_string());
    report.dry_run = options.dry_run;
    reporter.info(&format!(
        "{} extracted, {} published, {} omitted, {} failed",
        report.extracted,
        report.published,
        report.omitted,
        report.failed()
    ));
    Ok(report)
}

/// Parse the wheel identity from the final path component of `archive`.
fn identify(archive: &str) -> Option<WheelIdentity> {
    let file_name = Path::new(archive).file_name()?.to_str()?;
    WheelIdentity::parse(file_name)
}

/// Render a run result as pretty JSON.
pub fn render_json(result: &Result<RunReport, ShiftError>) -> String {
    let value = match result {
        Ok(report) => json!({ "status": "success", "report": report }),
        Err(e) => json!({ "status": "error", "kind": e.kind(), "message": e.to_string() }),
    };
    serde_json::to_string_pretty(&value).unwrap_or_else(|e| {
        json!({ "status": "error", "kind": "unexpected_failure", "message": e.to_string() })
            .to_string()
    })
}
