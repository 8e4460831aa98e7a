//! wheelshift CLI

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wheelshift_cli::cmd;
use wheelshift_cli::ui::ConsoleReporter;
use wheelshift_cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Logs go to stderr; stdout carries only the report.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let reporter = ConsoleReporter::new(cli.quiet);

    match cli.command {
        Commands::Run {
            source,
            archive,
            target,
            dry_run,
            json,
            store,
            work,
        } => {
            let job = wheelshift_core::Job {
                source,
                archive,
                target,
            };
            Ok(cmd::run::run(&job, store.into(), work.options(dry_run), json, reporter).await)
        }
        Commands::Plan { wheel, work } => cmd::plan::plan(&wheel, work.options(true), reporter).await,
    }
}
