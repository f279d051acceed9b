//! Destination preparation and byte publishing.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::report::ReportPublish;
use crate::spec::{EnumPublishMode, FsPublishError};
use crate::util::{classify_io_error, derive_parent_dir, derive_temp_path};

/// Create the parent directory of `path_file` (recursively) when missing.
///
/// Returns the created directory, or `None` when nothing had to be created
/// (bare file name or already existing parent). Repeated calls never fail
/// because the directory already exists.
pub fn ensure_parent_dir<P>(path_file: P) -> Result<Option<PathBuf>, FsPublishError>
where
    P: AsRef<Path>,
{
    let Some(path_dir_parent) = derive_parent_dir(path_file.as_ref()) else {
        return Ok(None);
    };
    if path_dir_parent.is_dir() {
        return Ok(None);
    }

    fs::create_dir_all(path_dir_parent).map_err(|e| FsPublishError::Io {
        path: path_dir_parent.to_path_buf(),
        source: e,
    })?;
    debug!(path = %path_dir_parent.display(), "created parent directory");
    Ok(Some(path_dir_parent.to_path_buf()))
}

/// Write `data` to `path_file` using `rule_publish`.
///
/// In [`EnumPublishMode::Atomic`] mode the bytes go to a sibling temp file
/// first; the temp file is removed on every failure path, and any previous
/// file at `path_file` stays untouched unless the final rename succeeds.
/// An existing destination must be writable by the caller in both modes, so a
/// read-only or share-locked file fails with [`FsPublishError::Locked`]
/// instead of being replaced by the rename.
///
/// The parent directory must already exist (see [`ensure_parent_dir`]).
pub fn publish_bytes<P>(
    path_file: P,
    data: &[u8],
    rule_publish: EnumPublishMode,
) -> Result<ReportPublish, FsPublishError>
where
    P: AsRef<Path>,
{
    let path_file = path_file.as_ref();
    let if_target_exists = path_file.exists();

    match rule_publish {
        EnumPublishMode::Atomic => {
            let path_file_tmp = derive_temp_path(path_file);
            if let Err(e) = write_file_synced(&path_file_tmp, data) {
                let _ = fs::remove_file(&path_file_tmp);
                return Err(FsPublishError::Io {
                    path: path_file.to_path_buf(),
                    source: e,
                });
            }
            if if_target_exists && let Err(e) = check_target_writable(path_file) {
                let _ = fs::remove_file(&path_file_tmp);
                return Err(classify_io_error(path_file, e, true));
            }
            if let Err(e) = fs::rename(&path_file_tmp, path_file) {
                let _ = fs::remove_file(&path_file_tmp);
                return Err(classify_io_error(path_file, e, if_target_exists));
            }
        }
        EnumPublishMode::Direct => {
            write_file_synced(path_file, data)
                .map_err(|e| classify_io_error(path_file, e, if_target_exists))?;
        }
    }

    debug!(
        path = %path_file.display(),
        n_bytes = data.len(),
        ?rule_publish,
        "published file"
    );
    Ok(ReportPublish {
        path_file: path_file.to_path_buf(),
        n_bytes: data.len() as u64,
        if_replaced: if_target_exists,
        rule_publish,
    })
}

/// Open the existing destination for writing without truncating it.
fn check_target_writable(path_file: &Path) -> Result<(), io::Error> {
    OpenOptions::new().write(true).open(path_file).map(drop)
}

fn write_file_synced(path_file: &Path, data: &[u8]) -> Result<(), io::Error> {
    let mut file = File::create(path_file)?;
    file.write_all(data)?;
    file.sync_all()
}
