//! Publish specification models and top-level error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////
// #region EnumsInit

/// How bytes reach the destination path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumPublishMode {
    /// Write a sibling temp file, then rename it over the destination.
    ///
    /// A failed write never leaves a partial file under the destination path.
    #[default]
    Atomic,
    /// Truncate and write the destination file in place.
    Direct,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Failure while preparing or publishing a destination file.
#[derive(Debug, Error)]
pub enum FsPublishError {
    /// Destination is held open/locked by another process.
    #[error("Destination is locked by another process: {}", path.display())]
    Locked {
        /// Destination file path.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },
    /// Any other IO failure (directory creation, write, rename).
    #[error("IO failure at {}: {source}", path.display())]
    Io {
        /// Path the failed operation targeted.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
