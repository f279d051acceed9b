//! Conversions between Polars frames and normalized cell values.

use polars::prelude::{AnyValue, Column, DataFrame};

use crate::spec::{EnumCellValue, SpecTable, XlsxExportError};
use crate::util::{render_cell_text, validate_uniform_rows, validate_unique_columns};

/// Column dtype inferred from the non-missing cells of a [`SpecTable`] column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EnumColumnKind {
    Empty,
    Integer,
    Float,
    Boolean,
    String,
}

impl EnumColumnKind {
    fn merge(self, value: &EnumCellValue) -> Self {
        let kind_value = match value {
            EnumCellValue::None => return self,
            EnumCellValue::Integer(_) => Self::Integer,
            EnumCellValue::Float(_) => Self::Float,
            EnumCellValue::Boolean(_) => Self::Boolean,
            EnumCellValue::String(_) => Self::String,
        };
        match (self, kind_value) {
            (Self::Empty, kind) => kind,
            (kind_a, kind_b) if kind_a == kind_b => kind_a,
            (Self::Integer, Self::Float) | (Self::Float, Self::Integer) => Self::Float,
            _ => Self::String,
        }
    }
}

/// Convert a row-oriented table into a `DataFrame`.
///
/// Columns with mixed scalar kinds are stored as text (rendered the same way
/// the width planner renders them); integer/float mixes widen to float.
pub fn derive_dataframe_from_table(table: &SpecTable) -> Result<DataFrame, XlsxExportError> {
    validate_unique_columns(&table.columns)?;
    validate_uniform_rows(table.width(), &table.rows)?;

    let mut l_cols = Vec::with_capacity(table.width());
    for (n_idx_col, c_name) in table.columns.iter().enumerate() {
        let iter_values = || table.rows.iter().map(move |row| &row[n_idx_col]);
        let kind = iter_values().fold(EnumColumnKind::Empty, EnumColumnKind::merge);

        let col = match kind {
            EnumColumnKind::Integer => Column::new(
                c_name.as_str().into(),
                iter_values()
                    .map(|value| match value {
                        EnumCellValue::Integer(n) => Some(*n),
                        _ => None,
                    })
                    .collect::<Vec<Option<i64>>>(),
            ),
            EnumColumnKind::Float => Column::new(
                c_name.as_str().into(),
                iter_values()
                    .map(|value| match value {
                        EnumCellValue::Integer(n) => Some(*n as f64),
                        EnumCellValue::Float(n) => Some(*n),
                        _ => None,
                    })
                    .collect::<Vec<Option<f64>>>(),
            ),
            EnumColumnKind::Boolean => Column::new(
                c_name.as_str().into(),
                iter_values()
                    .map(|value| match value {
                        EnumCellValue::Boolean(b) => Some(*b),
                        _ => None,
                    })
                    .collect::<Vec<Option<bool>>>(),
            ),
            EnumColumnKind::String | EnumColumnKind::Empty => Column::new(
                c_name.as_str().into(),
                iter_values()
                    .map(|value| match value {
                        EnumCellValue::None => None,
                        other => Some(render_cell_text(other)),
                    })
                    .collect::<Vec<Option<String>>>(),
            ),
        };
        l_cols.push(col);
    }

    DataFrame::new(l_cols)
        .map_err(|err| XlsxExportError::Validation(format!("Failed to build DataFrame: {err}")))
}

/// Ordered column names of `df`.
pub fn derive_column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names_str()
        .into_iter()
        .map(ToString::to_string)
        .collect()
}

/// Map one Polars scalar to a normalized cell value.
pub fn derive_cell_value_from_any_value(value: AnyValue<'_>) -> EnumCellValue {
    match value {
        AnyValue::Null => EnumCellValue::None,
        AnyValue::Boolean(val) => EnumCellValue::Boolean(val),
        AnyValue::String(val) => EnumCellValue::String(val.to_string()),
        AnyValue::StringOwned(val) => EnumCellValue::String(val.to_string()),
        // Shortest f32 text round-trips as the value the caller wrote (0.1, not 0.100000001).
        AnyValue::Float32(val) => {
            EnumCellValue::Float(val.to_string().parse::<f64>().unwrap_or(val as f64))
        }
        AnyValue::Float64(val) => EnumCellValue::Float(val),
        other if other.dtype().is_integer() => match other.extract::<i64>() {
            Some(val) => EnumCellValue::Integer(val),
            None => EnumCellValue::String(other.to_string()),
        },
        other => EnumCellValue::String(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use polars::prelude::{AnyValue, DataType};

    use super::*;

    #[test]
    fn test_table_columns_get_inferred_dtypes() {
        let table = SpecTable::new(["Pallets", "LDM", "Stackable", "Mixed", "Blank"])
            .with_row([
                EnumCellValue::Integer(10),
                EnumCellValue::Float(4.0),
                EnumCellValue::Boolean(false),
                EnumCellValue::Integer(1),
                EnumCellValue::None,
            ])
            .with_row([
                EnumCellValue::Integer(11),
                EnumCellValue::Integer(2),
                EnumCellValue::None,
                EnumCellValue::from("x"),
                EnumCellValue::None,
            ]);

        let df = derive_dataframe_from_table(&table).expect("dataframe");
        assert_eq!(df.height(), 2);
        assert_eq!(
            derive_column_names(&df),
            vec!["Pallets", "LDM", "Stackable", "Mixed", "Blank"]
        );

        let l_dtypes: Vec<DataType> = df.get_columns().iter().map(|c| c.dtype().clone()).collect();
        assert_eq!(
            l_dtypes,
            vec![
                DataType::Int64,
                DataType::Float64,
                DataType::Boolean,
                DataType::String,
                DataType::String,
            ]
        );

        let col_mixed = &df.get_columns()[3];
        assert_eq!(
            derive_cell_value_from_any_value(col_mixed.get(0).expect("cell")),
            EnumCellValue::String("1".to_string())
        );
    }

    #[test]
    fn test_table_rejects_ragged_rows_and_duplicates() {
        let table_ragged = SpecTable::new(["a", "b"])
            .with_row([1i64, 2])
            .with_row([3i64]);
        assert!(matches!(
            derive_dataframe_from_table(&table_ragged),
            Err(XlsxExportError::Validation(_))
        ));

        let table_dup = SpecTable::new(["a", "a"]);
        assert!(matches!(
            derive_dataframe_from_table(&table_dup),
            Err(XlsxExportError::Validation(_))
        ));
    }

    #[test]
    fn test_any_value_mapping() {
        assert_eq!(
            derive_cell_value_from_any_value(AnyValue::Null),
            EnumCellValue::None
        );
        assert_eq!(
            derive_cell_value_from_any_value(AnyValue::Int32(7)),
            EnumCellValue::Integer(7)
        );
        assert_eq!(
            derive_cell_value_from_any_value(AnyValue::UInt32(7)),
            EnumCellValue::Integer(7)
        );
        assert_eq!(
            derive_cell_value_from_any_value(AnyValue::Float32(0.1)),
            EnumCellValue::Float(0.1)
        );
        assert_eq!(
            derive_cell_value_from_any_value(AnyValue::Boolean(true)),
            EnumCellValue::Boolean(true)
        );
        assert_eq!(
            derive_cell_value_from_any_value(AnyValue::String("Kiel")),
            EnumCellValue::String("Kiel".to_string())
        );
    }
}
