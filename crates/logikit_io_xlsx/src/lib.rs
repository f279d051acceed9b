//! `logikit_io_xlsx` v1:
//! Single-sheet XLSX table export with auto-sized columns.
//!
//! Module layout:
//! - `conf`     : Excel limits and default presets
//! - `spec`     : cell values, tables, options, report and errors
//! - `util`     : value conversion, validation and width planning
//! - `frame`    : Polars <-> cell value conversion
//! - `observer` : export progress notices
//! - `writer`   : the exporter
pub mod conf;
pub mod frame;
pub mod observer;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    C_SHEET_NAME_DEFAULT, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX,
    N_INT_EXACT_F64_MAX, N_WIDTH_CELL_PADDING_DEFAULT, N_WIDTH_EXCEL_COLUMN_MAX, TUP_EXCEL_ILLEGAL,
    derive_default_xlsx_export_options,
};
pub use frame::derive_dataframe_from_table;
pub use logikit_io_fs::EnumPublishMode;
pub use observer::{EnumExportEvent, ExportObserver, SilentObserver, TracingObserver};
pub use spec::{
    EnumAutofitColumnsRule, EnumCellValue, SpecAutofitCellsPolicy, SpecTable,
    SpecXlsxExportOptions, SpecXlsxExportReport, SpecXlsxValuePolicy, XlsxExportError,
};
pub use util::{
    convert_cell_value, convert_nan_inf_to_str, plan_column_widths, render_cell_text,
    sanitize_sheet_name,
};
pub use writer::{XlsxExporter, export_xlsx_auto_width};
