//! Reporter trait for dependency injection
//!
//! Lets the pipeline report progress without being coupled to a specific
//! console or log implementation.

use wheelshift_schema::PathCategory;

pub trait Reporter: Send + Sync {
    /// A new phase of the run has started (e.g. "Downloading", "Publishing").
    fn section(&self, title: &str);

    /// A file has been routed to a destination (or omitted, when `destination` is `None`).
    fn routed(&self, relative_path: &str, category: PathCategory, destination: Option<&str>);

    /// A file reached the target store.
    fn published(&self, relative_path: &str, destination: &str);

    /// A file failed to reach the target store. The run continues.
    fn failed(&self, relative_path: &str, reason: &str);

    /// Log an informational message.
    fn info(&self, msg: &str);

    /// Log a warning message.
    fn warning(&self, msg: &str);
}

impl<T: Reporter + ?Sized> Reporter for std::sync::Arc<T> {
    fn section(&self, title: &str) {
        (**self).section(title);
    }
    fn routed(&self, relative_path: &str, category: PathCategory, destination: Option<&str>) {
        (**self).routed(relative_path, category, destination);
    }
    fn published(&self, relative_path: &str, destination: &str) {
        (**self).published(relative_path, destination);
    }
    fn failed(&self, relative_path: &str, reason: &str) {
        (**self).failed(relative_path, reason);
    }
    fn info(&self, msg: &str) {
        (**self).info(msg);
    }
    fn warning(&self, msg: &str) {
        (**self).warning(msg);
    }
}

/// A no-op reporter for silent operations (e.g., library use, testing).
#[derive(Debug, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn section(&self, _: &str) {}
    fn routed(&self, _: &str, _: PathCategory, _: Option<&str>) {}
    fn published(&self, _: &str, _: &str) {}
    fn failed(&self, _: &str, _: &str) {}
    fn info(&self, _: &str) {}
    fn warning(&self, _: &str) {}
}
