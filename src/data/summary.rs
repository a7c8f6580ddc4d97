use std::collections::HashMap;

use super::model::{CellValue, ColumnType, Table};
use crate::error::{DatasetError, Result};

/// Per-column line of a [`Summary`].
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: String,
    pub dtype: ColumnType,
    pub missing: usize,
}

/// Shape, types and missing counts of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub rows: usize,
    pub columns: Vec<ColumnSummary>,
}

impl Summary {
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn total_missing(&self) -> usize {
        self.columns.iter().map(|c| c.missing).sum()
    }
}

pub fn summarize(table: &Table) -> Summary {
    Summary {
        rows: table.row_count(),
        columns: table
            .columns()
            .iter()
            .map(|c| ColumnSummary {
                name: c.name.clone(),
                dtype: c.dtype,
                missing: c.missing_count(),
            })
            .collect(),
    }
}

/// The first `n` rows rendered as display strings.
pub fn preview(table: &Table, n: usize) -> Vec<Vec<String>> {
    (0..table.row_count().min(n))
        .map(|i| table.row(i).iter().map(|v| v.to_string()).collect())
        .collect()
}

/// Non-missing values of a column with their frequencies, most frequent
/// first. Equal counts keep the order values first appear in.
pub fn value_counts(table: &Table, column: &str) -> Result<Vec<(CellValue, usize)>> {
    let col = table.column(column).ok_or_else(|| DatasetError::UnknownColumn {
        names: vec![column.to_string()],
    })?;

    let mut order: Vec<&CellValue> = Vec::new();
    let mut counts: HashMap<&CellValue, usize> = HashMap::new();
    for v in col.values.iter().filter(|v| !v.is_missing()) {
        let count = counts.entry(v).or_insert_with(|| {
            order.push(v);
            0
        });
        *count += 1;
    }

    let mut out: Vec<(CellValue, usize)> = order
        .into_iter()
        .map(|v| (v.clone(), counts[v]))
        .collect();
    // Stable sort keeps first-seen order among ties.
    out.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(out)
}
