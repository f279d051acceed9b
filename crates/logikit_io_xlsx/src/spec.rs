//! Shared XLSX export models, options and errors.

use std::io;
use std::path::PathBuf;

use logikit_io_fs::{EnumPublishMode, FsPublishError};
use thiserror::Error;

use crate::conf::{C_SHEET_NAME_DEFAULT, N_WIDTH_CELL_PADDING_DEFAULT, N_WIDTH_EXCEL_COLUMN_MAX};

////////////////////////////////////////////////////////////////////////////////
// #region CellValues

/// Normalized scalar cell value during conversion/write pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumCellValue {
    /// Missing/blank value.
    None,
    /// Text value.
    String(String),
    /// Whole-number value.
    Integer(i64),
    /// Floating-point value.
    Float(f64),
    /// Boolean value.
    Boolean(bool),
}

impl From<&str> for EnumCellValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for EnumCellValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for EnumCellValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for EnumCellValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for EnumCellValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl<T: Into<EnumCellValue>> From<Option<T>> for EnumCellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region TableSpecification

/// Row-oriented table: named columns plus rows of scalar cells.
///
/// Converted into a Polars `DataFrame` before export; the conversion rejects
/// duplicate column names and ragged rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecTable {
    /// Ordered column names.
    pub columns: Vec<String>,
    /// Ordered rows; every row must have `columns.len()` cells.
    pub rows: Vec<Vec<EnumCellValue>>,
}

impl SpecTable {
    /// Create an empty table with the given column names.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append one row (builder style).
    pub fn with_row<I, V>(mut self, row: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<EnumCellValue>,
    {
        self.push_row(row);
        self
    }

    /// Append one row.
    pub fn push_row<I, V>(&mut self, row: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<EnumCellValue>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ExportOptions

/// Value conversion policy for missing/NaN/Inf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecXlsxValuePolicy {
    /// Replacement text for missing value when keep-missing is enabled.
    pub missing_value_str: String,
    /// Replacement text for NaN.
    pub nan_str: String,
    /// Replacement text for positive infinity.
    pub posinf_str: String,
    /// Replacement text for negative infinity.
    pub neginf_str: String,
}

impl Default for SpecXlsxValuePolicy {
    fn default() -> Self {
        Self {
            missing_value_str: "NA".to_string(),
            nan_str: "NaN".to_string(),
            posinf_str: "Inf".to_string(),
            neginf_str: "-Inf".to_string(),
        }
    }
}

/// Autofit rule for column width inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumAutofitColumnsRule {
    /// Disable autofit; the viewer's default width applies.
    None,
    /// Infer width from header cells only.
    Header,
    /// Infer width from body cells only.
    Body,
    /// Infer width from both header and body cells (default).
    #[default]
    All,
}

/// Autofit policy for one export call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecAutofitCellsPolicy {
    /// Autofit width inference rule.
    pub rule_columns: EnumAutofitColumnsRule,
    /// Max body rows inspected; `None` inspects every row.
    pub height_body_inferred_max: Option<usize>,
    /// Width padding added after inference.
    pub width_cell_padding: usize,
    /// Maximum final width; must be within `1..=255`.
    pub width_cell_max: usize,
}

impl Default for SpecAutofitCellsPolicy {
    fn default() -> Self {
        Self {
            rule_columns: EnumAutofitColumnsRule::All,
            height_body_inferred_max: None,
            width_cell_padding: N_WIDTH_CELL_PADDING_DEFAULT,
            width_cell_max: N_WIDTH_EXCEL_COLUMN_MAX,
        }
    }
}

/// Exporter-wide options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecXlsxExportOptions {
    /// Sheet name used when an export call passes none.
    pub sheet_name: String,
    /// Value conversion policy.
    pub value_policy: SpecXlsxValuePolicy,
    /// Keep missing/NaN/Inf as policy text instead of blank.
    pub keep_missing_values: bool,
    /// Column autofit policy.
    pub policy_autofit: SpecAutofitCellsPolicy,
    /// How the finished workbook is published to disk.
    pub rule_publish: EnumPublishMode,
}

impl Default for SpecXlsxExportOptions {
    fn default() -> Self {
        Self {
            sheet_name: C_SHEET_NAME_DEFAULT.to_string(),
            value_policy: SpecXlsxValuePolicy::default(),
            keep_missing_values: false,
            policy_autofit: SpecAutofitCellsPolicy::default(),
            rule_publish: EnumPublishMode::Atomic,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// Per-export call report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxExportReport {
    /// Written workbook path.
    pub path_file_out: PathBuf,
    /// Actual sheet name in the workbook.
    pub sheet_name: String,
    /// Number of data rows (header excluded).
    pub n_rows: usize,
    /// Number of columns.
    pub n_cols: usize,
    /// Applied width per column; empty when autofit is disabled.
    pub widths_by_col: Vec<usize>,
    /// Directory created for the destination, if any.
    pub path_dir_created: Option<PathBuf>,
    /// Size of the published workbook in bytes.
    pub n_bytes: u64,
    /// Whether a previous file at the destination was replaced.
    pub if_replaced: bool,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecXlsxExportReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Export failure surfaced to the caller.
#[derive(Debug, Error)]
pub enum XlsxExportError {
    /// Destination is open/locked by another process; close it and retry.
    #[error("Could not write to {}: file is locked by another process", path.display())]
    FileLocked {
        /// Destination path.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },
    /// Directory creation or file write failed.
    #[error("IO error at {}: {source}", path.display())]
    Io {
        /// Path the failed operation targeted.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },
    /// Dataset, sheet name or options rejected before anything is written.
    #[error("Invalid export input: {0}")]
    Validation(String),
}

impl From<FsPublishError> for XlsxExportError {
    fn from(err: FsPublishError) -> Self {
        match err {
            FsPublishError::Locked { path, source } => Self::FileLocked { path, source },
            FsPublishError::Io { path, source } => Self::Io { path, source },
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
