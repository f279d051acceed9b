//! `logikit_io_fs` v1:
//! Filesystem helpers for report publishing.
//!
//! Module layout:
//! - `publish` : directory preparation and file publishing
//! - `spec`    : enums/errors
//! - `report`  : publish result model
//! - `util`    : shared helper functions

pub mod publish;
pub mod report;
pub mod spec;
mod util;

pub use publish::{ensure_parent_dir, publish_bytes};
pub use report::ReportPublish;
pub use spec::{EnumPublishMode, FsPublishError};
pub use util::classify_io_error;
