//! Core library for wheelshift.
//!
//! Downloads a wheel from one object store, unpacks it into a scoped working
//! area, routes every file through the layout rules in [`wheelshift_schema`],
//! and republishes the result to a second store.
//!
//! # Layout
//!
//! - [`io`]: side effects (archive sources, zip unpacking, publishers, the
//!   temporary working area).
//! - [`reorganize`]: the per-file routing and publishing loop.
//! - [`pipeline`]: ties a full run together and renders the text report.

pub mod error;
pub mod io;
pub mod location;
pub mod pipeline;
pub mod reorganize;
pub mod report;
pub mod reporter;

pub use error::ShiftError;
pub use location::{Location, StoreConfig};
pub use pipeline::{Job, Pipeline, PipelineOptions, process_archive};
pub use report::{RunReport, UploadOutcome, UploadStatus};
pub use reporter::{NullReporter, Reporter};

/// Tool identifier used in logs and temporary directory names.
pub const TOOL_NAME: &str = concat!("wheelshift/", env!("CARGO_PKG_VERSION"));
