//! Stateless helper utilities used by the XLSX exporter.

use std::collections::{BTreeMap, BTreeSet};

use crate::conf::{
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, N_WIDTH_EXCEL_COLUMN_MAX,
    TUP_EXCEL_ILLEGAL,
};
use crate::spec::{
    EnumAutofitColumnsRule, EnumCellValue, SpecAutofitCellsPolicy, SpecXlsxValuePolicy,
    XlsxExportError,
};

////////////////////////////////////////////////////////////////////////////////
// #region CellValueConversion

/// Convert `NaN`/`Inf` to policy string; return error for finite values.
pub fn convert_nan_inf_to_str(
    x: f64,
    value_policy: &SpecXlsxValuePolicy,
) -> Result<String, String> {
    if x.is_nan() {
        return Ok(value_policy.nan_str.clone());
    }
    if x.is_infinite() {
        return Ok(if x.is_sign_positive() {
            value_policy.posinf_str.clone()
        } else {
            value_policy.neginf_str.clone()
        });
    }
    Err("Input is neither NaN nor Inf.".to_string())
}

/// Normalize cell value according to the missing-value policy.
///
/// Missing values and non-finite floats become blank, or policy text when
/// `if_keep_missing_values` is set. Everything else passes through.
pub fn convert_cell_value(
    value: &EnumCellValue,
    if_keep_missing_values: bool,
    value_policy: &SpecXlsxValuePolicy,
) -> EnumCellValue {
    match value {
        EnumCellValue::None => {
            if if_keep_missing_values {
                EnumCellValue::String(value_policy.missing_value_str.clone())
            } else {
                EnumCellValue::None
            }
        }
        EnumCellValue::Float(n) if !n.is_finite() => {
            if if_keep_missing_values {
                EnumCellValue::String(
                    convert_nan_inf_to_str(*n, value_policy)
                        .unwrap_or_else(|_| value_policy.nan_str.clone()),
                )
            } else {
                EnumCellValue::None
            }
        }
        _ => value.clone(),
    }
}

/// Render a cell value to its locale-independent display text.
///
/// Integers print as digits, whole floats keep one fractional digit (`4.0`),
/// booleans print as `True`/`False` and missing values as empty text.
pub fn render_cell_text(value: &EnumCellValue) -> String {
    match value {
        EnumCellValue::None => String::new(),
        EnumCellValue::String(s) => s.clone(),
        EnumCellValue::Integer(n) => n.to_string(),
        EnumCellValue::Float(n) => render_float_text(*n),
        EnumCellValue::Boolean(b) => if *b { "True" } else { "False" }.to_string(),
    }
}

fn render_float_text(x: f64) -> String {
    if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 {
        return format!("{x:.1}");
    }
    x.to_string()
}

/// Display width of rendered text, in characters.
pub fn estimate_width_len(text: &str) -> usize {
    text.chars().count()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region DataFrameLikeUtils

/// Validate that `columns` has no duplicated names.
pub fn validate_unique_columns(columns: &[String]) -> Result<(), XlsxExportError> {
    if columns.len() == columns.iter().collect::<BTreeSet<_>>().len() {
        return Ok(());
    }

    let mut dict_pos: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (n_idx, c_name) in columns.iter().enumerate() {
        dict_pos.entry(c_name).or_default().push(n_idx);
    }

    let c_msg = dict_pos
        .iter()
        .filter(|(_, l_pos)| l_pos.len() > 1)
        .map(|(c_name, l_pos)| format!("{c_name:?} x{} at indices {:?}", l_pos.len(), l_pos))
        .collect::<Vec<_>>()
        .join("; ");

    Err(XlsxExportError::Validation(format!(
        "Duplicate column names detected: {c_msg}"
    )))
}

/// Validate that every row has exactly `width` cells.
pub fn validate_uniform_rows(
    width: usize,
    rows: &[Vec<EnumCellValue>],
) -> Result<(), XlsxExportError> {
    let l_ragged = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row.len() != width)
        .map(|(n_idx, row)| format!("row {n_idx} has {} cells", row.len()))
        .collect::<Vec<_>>();
    if l_ragged.is_empty() {
        return Ok(());
    }

    Err(XlsxExportError::Validation(format!(
        "Ragged rows detected (expected {width} cells per row): {}",
        l_ragged.join("; ")
    )))
}

/// Validate table dimensions against single-sheet Excel limits.
pub fn validate_excel_limits(height_df: usize, width_df: usize) -> Result<(), XlsxExportError> {
    if width_df > N_NCOLS_EXCEL_MAX {
        return Err(XlsxExportError::Validation(format!(
            "Too many columns for one sheet: {width_df} > {N_NCOLS_EXCEL_MAX}."
        )));
    }
    if height_df > N_NROWS_EXCEL_MAX - 1 {
        return Err(XlsxExportError::Validation(format!(
            "Too many rows for one sheet: {height_df} data rows + 1 header row > {N_NROWS_EXCEL_MAX}."
        )));
    }
    Ok(())
}

/// Validate autofit policy bounds.
pub fn validate_policy_autofit(policy_autofit: &SpecAutofitCellsPolicy) -> Result<(), XlsxExportError> {
    if policy_autofit.width_cell_max == 0 || policy_autofit.width_cell_max > N_WIDTH_EXCEL_COLUMN_MAX
    {
        return Err(XlsxExportError::Validation(format!(
            "policy_autofit.width_cell_max must be within 1..={N_WIDTH_EXCEL_COLUMN_MAX}."
        )));
    }
    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
///
/// Blank names are rejected instead of being replaced by a placeholder.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> Result<String, XlsxExportError> {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().to_string();
    if c_name.is_empty() {
        return Err(XlsxExportError::Validation(
            "sheet_name must be a non-empty string.".to_string(),
        ));
    }

    Ok(c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ColumnWidths

/// Running max of rendered text width per column, split header/body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecColumnWidthTracker {
    l_width_by_col_header: Vec<usize>,
    l_width_by_col_body: Vec<usize>,
}

impl SpecColumnWidthTracker {
    /// Create a tracker for `width_df` columns.
    pub fn new(width_df: usize) -> Self {
        Self {
            l_width_by_col_header: vec![0; width_df],
            l_width_by_col_body: vec![0; width_df],
        }
    }

    /// Record one rendered header cell.
    pub fn observe_header(&mut self, n_idx_col: usize, text: &str) {
        if let Some(n_width) = self.l_width_by_col_header.get_mut(n_idx_col) {
            *n_width = usize::max(*n_width, estimate_width_len(text));
        }
    }

    /// Record one rendered body cell.
    pub fn observe_body(&mut self, n_idx_col: usize, text: &str) {
        if let Some(n_width) = self.l_width_by_col_body.get_mut(n_idx_col) {
            *n_width = usize::max(*n_width, estimate_width_len(text));
        }
    }

    /// Final width per column: recorded max + padding, capped at the policy max.
    ///
    /// Returns an empty vector when autofit is disabled. Capped columns are
    /// reported through `warnings`.
    pub fn finish(
        &self,
        policy_autofit: &SpecAutofitCellsPolicy,
        warnings: &mut Vec<String>,
    ) -> Vec<usize> {
        if matches!(policy_autofit.rule_columns, EnumAutofitColumnsRule::None) {
            return vec![];
        }

        let n_max = usize::min(N_WIDTH_EXCEL_COLUMN_MAX, policy_autofit.width_cell_max);
        let n_pad = policy_autofit.width_cell_padding;

        let mut l_widths = Vec::with_capacity(self.l_width_by_col_header.len());
        for n_idx_col in 0..self.l_width_by_col_header.len() {
            let n_width_header = self.l_width_by_col_header[n_idx_col];
            let n_width_body = self.l_width_by_col_body[n_idx_col];
            let n_width_recorded = match policy_autofit.rule_columns {
                EnumAutofitColumnsRule::Header => n_width_header,
                EnumAutofitColumnsRule::Body => n_width_body,
                EnumAutofitColumnsRule::All | EnumAutofitColumnsRule::None => {
                    usize::max(n_width_header, n_width_body)
                }
            };
            let n_width_wanted = n_width_recorded.saturating_add(n_pad);
            if n_width_wanted > n_max {
                warnings.push(format!(
                    "Column {n_idx_col} width capped: {n_width_wanted} -> {n_max}."
                ));
            }
            l_widths.push(usize::min(n_max, n_width_wanted));
        }
        l_widths
    }
}

/// Plan column widths for a header plus rows of cell values.
///
/// Each width is `max(len(header), len(rendered cell) for every row) + padding`.
pub fn plan_column_widths(
    header: &[String],
    rows: &[Vec<EnumCellValue>],
    policy_autofit: &SpecAutofitCellsPolicy,
) -> Vec<usize> {
    let mut tracker = SpecColumnWidthTracker::new(header.len());
    for (n_idx_col, c_name) in header.iter().enumerate() {
        tracker.observe_header(n_idx_col, c_name);
    }

    let n_rows_inspect = policy_autofit
        .height_body_inferred_max
        .map_or(rows.len(), |n_max| usize::min(n_max, rows.len()));
    for row in &rows[..n_rows_inspect] {
        for (n_idx_col, value) in row.iter().enumerate() {
            tracker.observe_body(n_idx_col, &render_cell_text(value));
        }
    }

    tracker.finish(policy_autofit, &mut Vec::new())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
