use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use comfy_table::{Table, presets};
use wheelshift_core::{Job, Pipeline, PipelineOptions, Reporter, StoreConfig, UploadStatus};

/// Unpack a local wheel and print a routing table without publishing anything.
pub async fn plan<R: Reporter>(
    wheel: &Path,
    options: PipelineOptions,
    reporter: R,
) -> Result<ExitCode> {
    let wheel = std::path::absolute(wheel)
        .with_context(|| format!("invalid wheel path {}", wheel.display()))?;
    let dir = wheel.parent().context("wheel path has no parent directory")?;
    let archive = wheel
        .file_name()
        .and_then(|n| n.to_str())
        .context("wheel filename is not valid UTF-8")?;

    let job = Job {
        source: format!("{}{}", wheelshift_core::location::FILE_MARKER, dir.display()),
        archive: archive.to_string(),
        target: None,
    };
    tracing::debug!("Planning {} from {}", job.archive, job.source);
    let pipeline = Pipeline::new(StoreConfig::default(), options, reporter);

    let report = match pipeline.execute(&job).await {
        Ok(report) => report,
        Err(e) => {
            println!("{}", e.render());
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_header(vec!["Path", "Category", "Destination"]);
    for outcome in &report.outcomes {
        let destination = match (&outcome.status, &outcome.destination) {
            (UploadStatus::Omitted, _) | (_, None) => "(omitted)".to_string(),
            (_, Some(dest)) => dest.clone(),
        };
        table.add_row(vec![
            outcome.entry.relative_path.clone(),
            outcome.category.to_string(),
            destination,
        ]);
    }

    match &report.identity {
        Some(identity) => println!("{archive}: {identity}"),
        None => println!("{archive}: unrecognized wheel name, all files pass through"),
    }
    println!("{table}");
    println!(
        "{} files, {} to publish, {} omitted",
        report.extracted,
        report.routed(),
        report.omitted
    );
    Ok(ExitCode::SUCCESS)
}
