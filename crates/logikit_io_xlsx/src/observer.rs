//! Progress notices emitted during an export.

use std::path::Path;

use tracing::{error, info};

use crate::spec::XlsxExportError;

/// One progress notice.
#[derive(Debug, Clone, Copy)]
pub enum EnumExportEvent<'a> {
    /// Destination directory had to be created.
    DirectoryCreated {
        /// Created directory.
        path: &'a Path,
    },
    /// Workbook serialization started.
    SavingStarted {
        /// Destination file.
        path: &'a Path,
    },
    /// Workbook published successfully.
    Saved {
        /// Destination file.
        path: &'a Path,
        /// Data rows written.
        n_rows: usize,
        /// Columns written.
        n_cols: usize,
    },
    /// Export failed; the same error is returned to the caller.
    Failed {
        /// Destination file.
        path: &'a Path,
        /// Failure cause.
        error: &'a XlsxExportError,
    },
}

/// Sink for export progress notices.
pub trait ExportObserver: Send + Sync {
    /// Receive one notice. Must not fail or panic.
    fn on_event(&self, event: &EnumExportEvent<'_>);
}

/// Default sink: forwards notices to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ExportObserver for TracingObserver {
    fn on_event(&self, event: &EnumExportEvent<'_>) {
        match event {
            EnumExportEvent::DirectoryCreated { path } => {
                info!(path = %path.display(), "created directory");
            }
            EnumExportEvent::SavingStarted { path } => {
                info!(path = %path.display(), "saving xlsx report");
            }
            EnumExportEvent::Saved {
                path,
                n_rows,
                n_cols,
            } => {
                info!(path = %path.display(), n_rows, n_cols, "xlsx report saved with auto-width columns");
            }
            EnumExportEvent::Failed { path, error } => match error {
                XlsxExportError::FileLocked { .. } => {
                    error!(
                        path = %path.display(),
                        "could not write xlsx report; is the file open in a spreadsheet viewer?"
                    );
                }
                _ => {
                    error!(path = %path.display(), %error, "xlsx export failed");
                }
            },
        }
    }
}

/// Sink that drops every notice.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentObserver;

impl ExportObserver for SilentObserver {
    fn on_event(&self, _event: &EnumExportEvent<'_>) {}
}
