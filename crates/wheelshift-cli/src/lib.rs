//! wheelshift - republish Python wheel contents between object stores
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
//!
//! Downloads a wheel, unpacks it, and republishes its files using wheel
//! layout conventions:
//!
//! ```text
//! {dist}-{ver}.data/data/a/b.txt   ->  b.txt        (flattened)
//! {dist}-{ver}.dist-info/...       ->  (omitted)
//! talend_etl_tooling/...           ->  unchanged
//! anything else                    ->  unchanged
//! ```

pub mod cmd;
pub mod ui;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use wheelshift_core::{PipelineOptions, StoreConfig};

#[derive(Debug, Parser)]
#[command(name = "wheelshift")]
#[command(author, version, about = "wheelshift - republish Python wheel contents between object stores")]
pub struct Cli {
    /// Suppress progress output on stderr
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Download a wheel, reorganize it, and publish it to a target location
    Run {
        /// Source location holding the archive (e.g. s3://bucket/incoming)
        #[arg(long)]
        source: String,
        /// Archive filename inside the source location
        #[arg(long)]
        archive: String,
        /// Target location; omit to only extract and route
        #[arg(long)]
        target: Option<String>,
        /// Route files without publishing them
        #[arg(long)]
        dry_run: bool,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        store: StoreArgs,
        #[command(flatten)]
        work: WorkArgs,
    },
    /// Show where each file of a local wheel would be published
    Plan {
        /// Path to a local .whl file
        wheel: PathBuf,
        #[command(flatten)]
        work: WorkArgs,
    },
}

/// S3-compatible store settings.
#[derive(Debug, Clone, Args)]
pub struct StoreArgs {
    /// Custom S3 endpoint
    #[arg(long, env = "WHEELSHIFT_S3_ENDPOINT")]
    pub endpoint: Option<String>,
    /// S3 access key ID
    #[arg(long, env = "WHEELSHIFT_S3_ACCESS_KEY", hide_env_values = true)]
    pub access_key: Option<String>,
    /// S3 secret access key
    #[arg(long, env = "WHEELSHIFT_S3_SECRET_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,
    /// S3 signing region
    #[arg(long, env = "WHEELSHIFT_S3_REGION", default_value = "auto")]
    pub region: String,
}

impl From<StoreArgs> for StoreConfig {
    fn from(args: StoreArgs) -> Self {
        Self {
            endpoint: args.endpoint,
            access_key: args.access_key,
            secret_key: args.secret_key,
            region: args.region,
        }
    }
}

/// Working area settings.
#[derive(Debug, Clone, Args)]
pub struct WorkArgs {
    /// Parent directory for the temporary working area
    #[arg(long, env = "WHEELSHIFT_WORK_DIR")]
    pub work_dir: Option<PathBuf>,
}

impl WorkArgs {
    pub fn options(&self, dry_run: bool) -> PipelineOptions {
        PipelineOptions {
            work_dir: self.work_dir.clone(),
            dry_run,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from([
            "wheelshift",
            "run",
            "--source",
            "bucket/in",
            "--archive",
            "p-1.0-py3-none-any.whl",
            "--dry-run",
        ])
        .unwrap();
        match cli.command {
            Commands::Run {
                source,
                target,
                dry_run,
                store,
                ..
            } => {
                assert_eq!(source, "bucket/in");
                assert_eq!(target, None);
                assert!(dry_run);
                assert_eq!(StoreConfig::from(store).region, "auto");
            }
            Commands::Plan { .. } => panic!("expected run"),
        }
    }
}
