use std::process::ExitCode;

use wheelshift_core::{Job, Pipeline, PipelineOptions, Reporter, StoreConfig};

/// Run a job and print its report to stdout.
///
/// Fails (exit code 1) exactly when the report is an error.
pub async fn run<R: Reporter>(
    job: &Job,
    store: StoreConfig,
    options: PipelineOptions,
    json: bool,
    reporter: R,
) -> ExitCode {
    tracing::debug!(
        "Running {} from {} (target: {:?}, dry run: {})",
        job.archive,
        job.source,
        job.target,
        options.dry_run
    );
    let pipeline = Pipeline::new(store, options, reporter);
    let result = pipeline.execute(job).await;
    let ok = result.is_ok();

    let output = if json {
        wheelshift_core::pipeline::render_json(&result)
    } else {
        match &result {
            Ok(report) => report.render(),
            Err(e) => e.render(),
        }
    };
    println!("{output}");

    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}
