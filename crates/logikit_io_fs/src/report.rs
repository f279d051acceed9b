//! Publish report model.

use std::fmt;
use std::path::PathBuf;

use crate::spec::EnumPublishMode;

/// Outcome of one successful [`crate::publish_bytes`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPublish {
    /// Final destination path.
    pub path_file: PathBuf,
    /// Number of bytes written.
    pub n_bytes: u64,
    /// Whether a previous file at `path_file` was replaced.
    pub if_replaced: bool,
    /// Publish mode used.
    pub rule_publish: EnumPublishMode,
}

impl ReportPublish {
    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} path={} bytes={} replaced={} mode={:?}",
            self.path_file.display(),
            self.n_bytes,
            self.if_replaced,
            self.rule_publish
        )
    }
}

impl fmt::Display for ReportPublish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[PUBLISH]"))
    }
}
