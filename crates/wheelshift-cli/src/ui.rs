//! Console progress output on stderr.

use crossterm::style::Stylize;
use wheelshift_core::Reporter;
use wheelshift_schema::PathCategory;

/// Prints progress lines to stderr unless quiet.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReporter {
    quiet: bool,
}

impl ConsoleReporter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    fn emit(&self, line: &str) {
        if !self.quiet {
            eprintln!("{line}");
        }
    }
}

impl Reporter for ConsoleReporter {
    fn section(&self, title: &str) {
        self.emit(&format!("{}", title.bold()));
    }

    fn routed(&self, relative_path: &str, category: PathCategory, destination: Option<&str>) {
        if destination.is_none() {
            self.emit(&format!("  {} {relative_path} ({category})", "skip".dark_grey()));
        }
    }

    fn published(&self, relative_path: &str, destination: &str) {
        if relative_path == destination {
            self.emit(&format!("  {} {destination}", "put".green()));
        } else {
            self.emit(&format!("  {} {relative_path} -> {destination}", "put".green()));
        }
    }

    fn failed(&self, relative_path: &str, reason: &str) {
        self.emit(&format!("  {} {relative_path}: {reason}", "fail".red()));
    }

    fn info(&self, msg: &str) {
        self.emit(msg);
    }

    fn warning(&self, msg: &str) {
        self.emit(&format!("{} {msg}", "warning:".yellow()));
    }
}
