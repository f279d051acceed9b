//! XLSX exporter that writes one DataFrame to one auto-width sheet.

use std::path::Path;
use std::sync::Arc;

use logikit_io_fs::{ensure_parent_dir, publish_bytes};
use polars::prelude::DataFrame;
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use tracing::debug;

use crate::conf::N_INT_EXACT_F64_MAX;
use crate::frame::{derive_cell_value_from_any_value, derive_column_names, derive_dataframe_from_table};
use crate::observer::{EnumExportEvent, ExportObserver, TracingObserver};
use crate::spec::{
    EnumCellValue, SpecTable, SpecXlsxExportOptions, SpecXlsxExportReport, XlsxExportError,
};
use crate::util::{
    SpecColumnWidthTracker, convert_cell_value, render_cell_text, sanitize_sheet_name,
    validate_excel_limits, validate_policy_autofit, validate_unique_columns,
};

/// Table exporter bound to a set of options and a progress sink.
///
/// Stateless between calls: every export resolves its destination, rebuilds
/// the workbook in memory and publishes it in one step.
pub struct XlsxExporter {
    options: SpecXlsxExportOptions,
    observer: Arc<dyn ExportObserver>,
}

impl Default for XlsxExporter {
    fn default() -> Self {
        Self::new(SpecXlsxExportOptions::default())
    }
}

impl XlsxExporter {
    /// Create exporter reporting progress through `tracing`.
    pub fn new(options: SpecXlsxExportOptions) -> Self {
        Self::with_observer(options, Arc::new(TracingObserver))
    }

    /// Create exporter with a custom progress sink.
    pub fn with_observer(options: SpecXlsxExportOptions, observer: Arc<dyn ExportObserver>) -> Self {
        Self { options, observer }
    }

    /// Write `df` to `file_out` as one sheet with auto-sized columns.
    ///
    /// `sheet_name` falls back to [`SpecXlsxExportOptions::sheet_name`]
    /// (`"Report"` by default). Missing parent directories are created.
    ///
    /// # Errors
    /// - [`XlsxExportError::FileLocked`] when the destination is held by another process.
    /// - [`XlsxExportError::Io`] for directory creation or write failures.
    /// - [`XlsxExportError::Validation`] for invalid sheet names, duplicate
    ///   columns, Excel limit overflow or cell data the writer rejects.
    ///
    /// Every failure is reported to the observer before it is returned.
    pub fn export_dataframe<P>(
        &self,
        df: &DataFrame,
        file_out: P,
        sheet_name: Option<&str>,
    ) -> Result<SpecXlsxExportReport, XlsxExportError>
    where
        P: AsRef<Path>,
    {
        let path_file_out = file_out.as_ref();
        let result = self.export_dataframe_inner(df, path_file_out, sheet_name);
        if let Err(error) = &result {
            self.observer.on_event(&EnumExportEvent::Failed {
                path: path_file_out,
                error,
            });
        }
        result
    }

    /// Write a row-oriented table; ragged rows are rejected.
    pub fn export_table<P>(
        &self,
        table: &SpecTable,
        file_out: P,
        sheet_name: Option<&str>,
    ) -> Result<SpecXlsxExportReport, XlsxExportError>
    where
        P: AsRef<Path>,
    {
        let path_file_out = file_out.as_ref();
        let df = match derive_dataframe_from_table(table) {
            Ok(df) => df,
            Err(error) => {
                self.observer.on_event(&EnumExportEvent::Failed {
                    path: path_file_out,
                    error: &error,
                });
                return Err(error);
            }
        };
        self.export_dataframe(&df, path_file_out, sheet_name)
    }

    fn export_dataframe_inner(
        &self,
        df: &DataFrame,
        path_file_out: &Path,
        sheet_name: Option<&str>,
    ) -> Result<SpecXlsxExportReport, XlsxExportError> {
        validate_policy_autofit(&self.options.policy_autofit)?;

        let c_sheet_name_raw = sheet_name.unwrap_or(&self.options.sheet_name);
        let c_sheet_name = sanitize_sheet_name(c_sheet_name_raw, "_")?;

        let l_colnames_df = derive_column_names(df);
        validate_unique_columns(&l_colnames_df)?;
        validate_excel_limits(df.height(), l_colnames_df.len())?;

        let mut report = SpecXlsxExportReport {
            path_file_out: path_file_out.to_path_buf(),
            sheet_name: c_sheet_name.clone(),
            n_rows: df.height(),
            n_cols: l_colnames_df.len(),
            ..Default::default()
        };
        if c_sheet_name != c_sheet_name_raw {
            report.warn(format!(
                "Sheet name sanitized: {c_sheet_name_raw:?} -> {c_sheet_name:?}."
            ));
        }

        report.path_dir_created = ensure_parent_dir(path_file_out)?;
        if let Some(path_dir_created) = &report.path_dir_created {
            self.observer.on_event(&EnumExportEvent::DirectoryCreated {
                path: path_dir_created,
            });
        }

        self.observer.on_event(&EnumExportEvent::SavingStarted {
            path: path_file_out,
        });

        let v_bytes = self.render_workbook(df, &l_colnames_df, &mut report)?;
        let report_publish = publish_bytes(path_file_out, &v_bytes, self.options.rule_publish)?;
        debug!("{report_publish}");
        report.n_bytes = report_publish.n_bytes;
        report.if_replaced = report_publish.if_replaced;

        self.observer.on_event(&EnumExportEvent::Saved {
            path: path_file_out,
            n_rows: report.n_rows,
            n_cols: report.n_cols,
        });
        Ok(report)
    }

    /// Serialize header, rows and column widths into an in-memory workbook.
    fn render_workbook(
        &self,
        df: &DataFrame,
        colnames: &[String],
        report: &mut SpecXlsxExportReport,
    ) -> Result<Vec<u8>, XlsxExportError> {
        let if_keep_missing_values = self.options.keep_missing_values;
        let value_policy = &self.options.value_policy;
        let policy_autofit = &self.options.policy_autofit;

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&report.sheet_name)
            .map_err(derive_xlsx_error)?;

        let mut tracker = SpecColumnWidthTracker::new(colnames.len());
        for (n_idx_col, c_name) in colnames.iter().enumerate() {
            tracker.observe_header(n_idx_col, c_name);
            write_cell(worksheet, 0, n_idx_col, &EnumCellValue::String(c_name.clone()))?;
        }

        let n_rows_inspect = policy_autofit
            .height_body_inferred_max
            .unwrap_or(usize::MAX);
        let l_cols = df.get_columns();
        for n_idx_row in 0..df.height() {
            for (n_idx_col, col) in l_cols.iter().enumerate() {
                let value_raw = derive_cell_value_from_any_value(col.get(n_idx_row).map_err(
                    |err| XlsxExportError::Validation(format!("Failed to access cell value: {err}")),
                )?);
                let value = convert_cell_value(&value_raw, if_keep_missing_values, value_policy);

                if n_idx_row < n_rows_inspect {
                    tracker.observe_body(n_idx_col, &render_cell_text(&value));
                }
                write_cell(worksheet, n_idx_row + 1, n_idx_col, &value)?;
            }
        }

        report.widths_by_col = tracker.finish(policy_autofit, &mut report.warnings);
        for (n_idx_col, n_width) in report.widths_by_col.iter().enumerate() {
            worksheet
                .set_column_width(cast_col_num(n_idx_col)?, *n_width as f64)
                .map_err(derive_xlsx_error)?;
        }

        workbook.save_to_buffer().map_err(derive_xlsx_error)
    }
}

/// Export `df` to `file_out` with default options and `tracing` progress notices.
///
/// One-call form of [`XlsxExporter::export_dataframe`]; `sheet_name` defaults
/// to `"Report"`.
pub fn export_xlsx_auto_width<P>(
    df: &DataFrame,
    file_out: P,
    sheet_name: Option<&str>,
) -> Result<SpecXlsxExportReport, XlsxExportError>
where
    P: AsRef<Path>,
{
    XlsxExporter::default().export_dataframe(df, file_out, sheet_name)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    value: &EnumCellValue,
) -> Result<(), XlsxExportError> {
    let n_row = cast_row_num(row_idx)?;
    let n_col = cast_col_num(col_idx)?;
    match value {
        EnumCellValue::None => {}
        EnumCellValue::String(val) => {
            if !val.is_empty() {
                worksheet
                    .write_string(n_row, n_col, val)
                    .map_err(derive_xlsx_error)?;
            }
        }
        // Beyond 2^53 a number cell would round; keep the exact digits as text.
        EnumCellValue::Integer(val) if val.unsigned_abs() > N_INT_EXACT_F64_MAX => {
            worksheet
                .write_string(n_row, n_col, val.to_string())
                .map_err(derive_xlsx_error)?;
        }
        EnumCellValue::Integer(val) => {
            worksheet
                .write_number(n_row, n_col, *val as f64)
                .map_err(derive_xlsx_error)?;
        }
        EnumCellValue::Float(val) => {
            worksheet
                .write_number(n_row, n_col, *val)
                .map_err(derive_xlsx_error)?;
        }
        EnumCellValue::Boolean(val) => {
            worksheet
                .write_boolean(n_row, n_col, *val)
                .map_err(derive_xlsx_error)?;
        }
    }
    Ok(())
}

fn cast_row_num(value: usize) -> Result<u32, XlsxExportError> {
    u32::try_from(value)
        .map_err(|_| XlsxExportError::Validation(format!("row index overflow: {value}")))
}

fn cast_col_num(value: usize) -> Result<u16, XlsxExportError> {
    u16::try_from(value)
        .map_err(|_| XlsxExportError::Validation(format!("column index overflow: {value}")))
}

fn derive_xlsx_error(err: XlsxError) -> XlsxExportError {
    XlsxExportError::Validation(format!("xlsx write error: {err}"))
}
