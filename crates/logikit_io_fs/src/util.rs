use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::spec::FsPublishError;

////////////////////////////////////////////////////////////////////////////////
// #region ErrorClassification

/// `ERROR_SHARING_VIOLATION`: file is open by another process without share rights.
#[cfg(windows)]
const N_WIN_ERROR_SHARING_VIOLATION: i32 = 32;
/// `ERROR_LOCK_VIOLATION`: a region of the file is locked by another process.
#[cfg(windows)]
const N_WIN_ERROR_LOCK_VIOLATION: i32 = 33;

/// Map an IO error on `path` to a lock conflict or a generic IO failure.
///
/// `PermissionDenied` only counts as a lock when the destination already
/// exists; otherwise the directory itself is unwritable.
pub fn classify_io_error(path: &Path, err: io::Error, if_target_exists: bool) -> FsPublishError {
    if _is_lock_conflict(&err, if_target_exists) {
        return FsPublishError::Locked {
            path: path.to_path_buf(),
            source: err,
        };
    }
    FsPublishError::Io {
        path: path.to_path_buf(),
        source: err,
    }
}

fn _is_lock_conflict(err: &io::Error, if_target_exists: bool) -> bool {
    #[cfg(windows)]
    {
        if let Some(code) = err.raw_os_error()
            && matches!(
                code,
                N_WIN_ERROR_SHARING_VIOLATION | N_WIN_ERROR_LOCK_VIOLATION
            )
        {
            return true;
        }
    }
    if_target_exists && err.kind() == io::ErrorKind::PermissionDenied
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region PathUtilities

/// Derive a hidden sibling temp path for `path_file`.
///
/// The temp file lives in the same directory so the final rename never
/// crosses a filesystem boundary.
pub(crate) fn derive_temp_path(path_file: &Path) -> PathBuf {
    let n_nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|v| v.as_nanos())
        .unwrap_or(0);
    let c_name = path_file
        .file_name()
        .map(|v| v.to_string_lossy().to_string())
        .unwrap_or_else(|| "publish".to_string());
    let c_name_tmp = format!(".{c_name}.{}.{n_nanos}.tmp", std::process::id());

    match path_file.parent() {
        Some(path_parent) => path_parent.join(c_name_tmp),
        None => PathBuf::from(c_name_tmp),
    }
}

/// Return the non-empty parent directory of `path_file`, if any.
pub(crate) fn derive_parent_dir(path_file: &Path) -> Option<&Path> {
    path_file
        .parent()
        .filter(|path_parent| !path_parent.as_os_str().is_empty())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::Path;

    use super::*;

    #[test]
    fn permission_denied_on_existing_target_is_locked() {
        let err = classify_io_error(
            Path::new("out/report.xlsx"),
            io::Error::from(io::ErrorKind::PermissionDenied),
            true,
        );
        assert!(matches!(
            err,
            FsPublishError::Locked { ref path, .. } if path == Path::new("out/report.xlsx")
        ));
    }

    #[test]
    fn permission_denied_without_target_is_io() {
        let err = classify_io_error(
            Path::new("out/report.xlsx"),
            io::Error::from(io::ErrorKind::PermissionDenied),
            false,
        );
        assert!(matches!(err, FsPublishError::Io { .. }));
    }

    #[test]
    fn other_errors_are_io() {
        let err = classify_io_error(
            Path::new("report.xlsx"),
            io::Error::from(io::ErrorKind::NotFound),
            true,
        );
        assert!(matches!(err, FsPublishError::Io { .. }));
    }

    #[cfg(windows)]
    #[test]
    fn sharing_violation_is_locked_even_without_target() {
        let err = classify_io_error(
            Path::new("report.xlsx"),
            io::Error::from_raw_os_error(32),
            false,
        );
        assert!(matches!(err, FsPublishError::Locked { .. }));
    }

    #[test]
    fn temp_path_is_hidden_sibling() {
        let path_tmp = derive_temp_path(Path::new("out/sub/report.xlsx"));
        assert_eq!(path_tmp.parent(), Some(Path::new("out/sub")));

        let c_name = path_tmp
            .file_name()
            .expect("file name")
            .to_string_lossy()
            .to_string();
        assert!(c_name.starts_with(".report.xlsx."));
        assert!(c_name.ends_with(".tmp"));
    }

    #[test]
    fn parent_dir_of_bare_file_name_is_none() {
        assert_eq!(derive_parent_dir(Path::new("report.xlsx")), None);
        assert_eq!(
            derive_parent_dir(Path::new("out/report.xlsx")),
            Some(Path::new("out"))
        );
    }
}
