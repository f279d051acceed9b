//! XLSX constants and default preset factories.

use crate::spec::SpecXlsxExportOptions;

/// Excel worksheet maximum row count (header row included).
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Excel maximum column width in character units.
pub const N_WIDTH_EXCEL_COLUMN_MAX: usize = 255;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Largest integer magnitude an xlsx number cell (IEEE-754 double) stores exactly.
pub const N_INT_EXACT_F64_MAX: u64 = 1 << 53;

/// Sheet name used when the caller does not pass one.
pub const C_SHEET_NAME_DEFAULT: &str = "Report";
/// Width buffer added after autofit (room for filter-arrow controls).
pub const N_WIDTH_CELL_PADDING_DEFAULT: usize = 2;

/// Build default export options.
pub fn derive_default_xlsx_export_options() -> SpecXlsxExportOptions {
    SpecXlsxExportOptions::default()
}
