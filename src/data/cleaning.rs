use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use super::model::{CellValue, Column, ColumnType, Table};
use crate::error::{DatasetError, Result};

// ---------------------------------------------------------------------------
// Missing-value strategies
// ---------------------------------------------------------------------------

/// How missing values in numeric columns are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingStrategy {
    DropRows,
    FillMean,
    FillMedian,
    FillMode,
}

impl MissingStrategy {
    pub const ALL: [MissingStrategy; 4] = [
        MissingStrategy::DropRows,
        MissingStrategy::FillMean,
        MissingStrategy::FillMedian,
        MissingStrategy::FillMode,
    ];

    /// Label shown in the method selector.
    pub fn label(self) -> &'static str {
        match self {
            MissingStrategy::DropRows => "Drop Rows",
            MissingStrategy::FillMean => "Fill with Mean",
            MissingStrategy::FillMedian => "Fill with Median",
            MissingStrategy::FillMode => "Fill with Mode",
        }
    }
}

impl fmt::Display for MissingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MissingStrategy {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Drop Rows" | "drop_rows" => Ok(MissingStrategy::DropRows),
            "Fill with Mean" | "fill_mean" => Ok(MissingStrategy::FillMean),
            "Fill with Median" | "fill_median" => Ok(MissingStrategy::FillMedian),
            "Fill with Mode" | "fill_mode" => Ok(MissingStrategy::FillMode),
            other => Err(DatasetError::UnknownStrategy(other.to_string())),
        }
    }
}

/// What [`handle_missing`] changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MissingReport {
    pub rows_dropped: usize,
    pub cells_filled: usize,
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Remove rows equal (across every column) to an earlier row.
/// Returns the number of rows removed.
pub fn remove_duplicates(table: &mut Table) -> usize {
    let before = table.row_count();
    let keep: Vec<bool> = {
        let mut seen: HashSet<Vec<&CellValue>> = HashSet::with_capacity(before);
        (0..before).map(|i| seen.insert(table.row(i))).collect()
    };
    table.retain_rows(&keep);
    before - table.row_count()
}

/// Apply a missing-value strategy to every numeric column that has at least
/// one missing value. Text and boolean columns are never touched.
pub fn handle_missing(table: &mut Table, strategy: MissingStrategy) -> MissingReport {
    let mut report = MissingReport::default();

    if strategy == MissingStrategy::DropRows {
        let mut keep = vec![true; table.row_count()];
        for col in table.columns().iter().filter(|c| c.dtype.is_numeric()) {
            for (flag, value) in keep.iter_mut().zip(&col.values) {
                if value.is_missing() {
                    *flag = false;
                }
            }
        }
        let before = table.row_count();
        table.retain_rows(&keep);
        report.rows_dropped = before - table.row_count();
        return report;
    }

    for col in table.columns_mut().iter_mut() {
        if !col.dtype.is_numeric() || col.missing_count() == 0 {
            continue;
        }
        let fill = match strategy {
            MissingStrategy::FillMean => mean(&col.numeric_values()).map(CellValue::Float),
            MissingStrategy::FillMedian => median(col.numeric_values()).map(CellValue::Float),
            MissingStrategy::FillMode => mode(&col.values).cloned(),
            MissingStrategy::DropRows => None,
        };
        // An all-missing column has nothing to fill from.
        let Some(fill) = fill else {
            continue;
        };
        report.cells_filled += fill_column(col, fill);
    }
    report
}

/// Remove the named columns. Fails without modifying the table if any name
/// is not a column.
pub fn drop_columns(table: &mut Table, names: &[String]) -> Result<()> {
    let unknown: Vec<String> = names
        .iter()
        .filter(|n| table.column(n).is_none())
        .cloned()
        .collect();
    if !unknown.is_empty() {
        return Err(DatasetError::UnknownColumn { names: unknown });
    }
    table.columns_mut().retain(|c| !names.contains(&c.name));
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn fill_column(col: &mut Column, fill: CellValue) -> usize {
    let mut filled = 0;
    for value in col.values.iter_mut().filter(|v| v.is_missing()) {
        *value = fill.clone();
        filled += 1;
    }
    // Mean and median of an integer column are floats.
    if matches!(fill, CellValue::Float(_)) && col.dtype == ColumnType::Integer {
        for value in &mut col.values {
            if let CellValue::Integer(i) = value {
                *value = CellValue::Float(*i as f64);
            }
        }
    }
    col.dtype = ColumnType::infer(&col.values);
    filled
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub(crate) fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

/// Most frequent non-missing value; ties go to the value seen first.
pub(crate) fn mode(values: &[CellValue]) -> Option<&CellValue> {
    let mut counts: HashMap<&CellValue, usize> = HashMap::new();
    for v in values.iter().filter(|v| !v.is_missing()) {
        *counts.entry(v).or_default() += 1;
    }
    let best = counts.values().copied().max()?;
    values
        .iter()
        .find(|v| !v.is_missing() && counts.get(v).copied() == Some(best))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_csv_bytes;

    fn table(csv: &str) -> Table {
        load_csv_bytes(csv.as_bytes()).unwrap()
    }

    #[test]
    fn remove_duplicates_keeps_first_occurrence() {
        let mut t = table("a,b\n1,x\n2,y\n1,x\n3,z\n2,y\n");
        assert_eq!(remove_duplicates(&mut t), 2);
        assert_eq!(
            t.column("a").unwrap().values,
            vec![CellValue::Integer(1), CellValue::Integer(2), CellValue::Integer(3)]
        );
    }

    #[test]
    fn remove_duplicates_treats_missing_as_equal() {
        let mut t = table("a,b\n1,\n1,\n");
        assert_eq!(remove_duplicates(&mut t), 1);
        assert_eq!(t.row_count(), 1);
    }

    #[test]
    fn remove_duplicates_is_idempotent() {
        let mut t = table("a,b\n1,2\n1,2\n3,\n3,\n4,5\n");
        remove_duplicates(&mut t);
        let once = t.clone();
        assert_eq!(remove_duplicates(&mut t), 0);
        assert_eq!(t, once);
    }

    #[test]
    fn remove_duplicates_keeps_rows_differing_in_whitespace() {
        let mut t = table("n,city\n1,Oslo\n1, Oslo\n1,Oslo\n");
        assert_eq!(remove_duplicates(&mut t), 1);
        assert_eq!(
            t.column("city").unwrap().values,
            vec![CellValue::Text("Oslo".into()), CellValue::Text(" Oslo".into())]
        );
    }

    #[test]
    fn drop_rows_uses_numeric_columns_only() {
        let mut t = table("a,b,name\n1,,x\n2,3,\n,4,y\n5,6,z\n");
        let report = handle_missing(&mut t, MissingStrategy::DropRows);
        assert_eq!(report.rows_dropped, 2);
        assert_eq!(t.row_count(), 2);
        // The row missing only a text value survives.
        assert_eq!(t.column("name").unwrap().missing_count(), 1);
    }

    #[test]
    fn fill_mean_converts_integer_column_to_float() {
        let mut t = table("a,b\n1,2\n3,\n");
        let report = handle_missing(&mut t, MissingStrategy::FillMean);
        assert_eq!(report.cells_filled, 1);
        let b = t.column("b").unwrap();
        assert_eq!(b.dtype, ColumnType::Float);
        assert_eq!(b.values, vec![CellValue::Float(2.0), CellValue::Float(2.0)]);
        assert_eq!(t.column("a").unwrap().dtype, ColumnType::Integer);
    }

    #[test]
    fn fill_median_averages_middle_pair() {
        let mut t = table("a\n1\nNA\n4\n10\n2\n");
        handle_missing(&mut t, MissingStrategy::FillMedian);
        assert_eq!(t.column("a").unwrap().values[1], CellValue::Float(3.0));
    }

    #[test]
    fn fill_mean_ignores_nan_spellings() {
        let mut t = table("a,k\n1,x\nNAN,y\n,z\n3,w\n");
        let report = handle_missing(&mut t, MissingStrategy::FillMean);
        assert_eq!(report.cells_filled, 2);
        let a = t.column("a").unwrap();
        assert_eq!(a.missing_count(), 0);
        assert_eq!(a.values[1], CellValue::Float(2.0));
        assert_eq!(a.values[2], CellValue::Float(2.0));
    }

    #[test]
    fn fill_median_ignores_nan_spellings() {
        let mut t = table("a\n1\n+nan\nNA\n3\n");
        handle_missing(&mut t, MissingStrategy::FillMedian);
        let a = t.column("a").unwrap();
        assert_eq!(a.values[1], CellValue::Float(2.0));
        assert_eq!(a.values[2], CellValue::Float(2.0));
    }

    #[test]
    fn fill_mode_prefers_first_encountered_on_tie() {
        let mut t = table("a\n5\nNA\n3\n3\n5\n");
        handle_missing(&mut t, MissingStrategy::FillMode);
        let a = t.column("a").unwrap();
        assert_eq!(a.values[1], CellValue::Integer(5));
        assert_eq!(a.dtype, ColumnType::Integer);
    }

    #[test]
    fn fill_leaves_text_and_empty_columns_alone() {
        let mut t = table("a,b,c\n1,x,\n,,\n");
        let report = handle_missing(&mut t, MissingStrategy::FillMean);
        assert_eq!(report.cells_filled, 1);
        assert_eq!(t.column("b").unwrap().missing_count(), 1);
        assert_eq!(t.column("c").unwrap().missing_count(), 2);
    }

    #[test]
    fn drop_columns_removes_named_columns() {
        let mut t = table("a,b,c\n1,2,3\n");
        drop_columns(&mut t, &["a".to_string(), "c".to_string()]).unwrap();
        assert_eq!(t.column_names(), vec!["b"]);
        assert_eq!(t.row_count(), 1);
    }

    #[test]
    fn drop_columns_with_unknown_name_leaves_table_unchanged() {
        let mut t = table("a,b\n1,2\n");
        let before = t.clone();
        let err = drop_columns(&mut t, &["a".to_string(), "nope".to_string()]).unwrap_err();
        assert!(matches!(err, DatasetError::UnknownColumn { ref names } if names == &["nope"]));
        assert_eq!(t, before);
    }

    #[test]
    fn strategy_parses_ui_labels() {
        for strategy in MissingStrategy::ALL {
            assert_eq!(strategy.label().parse::<MissingStrategy>().unwrap(), strategy);
        }
        assert_eq!("fill_mode".parse::<MissingStrategy>().unwrap(), MissingStrategy::FillMode);
        assert!(matches!(
            "Fill with Zero".parse::<MissingStrategy>(),
            Err(DatasetError::UnknownStrategy(_))
        ));
    }
}
