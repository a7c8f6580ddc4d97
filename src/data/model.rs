use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of a column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring the common Pandas dtypes.
/// Rows are compared for equality as a whole, so `CellValue` must be `Eq + Hash`.
#[derive(Debug, Clone)]
pub enum CellValue {
    Integer(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Missing,
}

// -- Manual Eq/Ord so rows can be hashed and sorted --

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn rank(v: &CellValue) -> u8 {
            match v {
                Missing => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                Text(_) => 4,
            }
        }
        match (self, other) {
            (Missing, Missing) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => rank(self).cmp(&rank(other)),
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Text(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Missing => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) if v.fract() == 0.0 && v.is_finite() => write!(f, "{v:.1}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Missing => write!(f, "<NA>"),
        }
    }
}

impl CellValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// Try to interpret the value as an `f64` for statistics.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// ColumnType – the inferred semantic type of a column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Integer,
    Float,
    Boolean,
    Text,
    /// Every cell is missing. Treated as numeric, like an all-NaN float column.
    Empty,
}

impl ColumnType {
    /// Whether the missing-value strategies apply to this column.
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float | ColumnType::Empty)
    }

    /// Pandas-style dtype label shown in the overview.
    pub fn dtype_name(self) -> &'static str {
        match self {
            ColumnType::Integer => "int64",
            ColumnType::Float | ColumnType::Empty => "float64",
            ColumnType::Boolean => "bool",
            ColumnType::Text => "object",
        }
    }

    /// Infer the unified type of a set of cell values.
    pub fn infer<'a>(values: impl IntoIterator<Item = &'a CellValue>) -> Self {
        let mut ty = ColumnType::Empty;
        for v in values {
            let cell_ty = match v {
                CellValue::Missing => continue,
                CellValue::Integer(_) => ColumnType::Integer,
                CellValue::Float(_) => ColumnType::Float,
                CellValue::Bool(_) => ColumnType::Boolean,
                CellValue::Text(_) => ColumnType::Text,
            };
            ty = match (ty, cell_ty) {
                (ColumnType::Empty, t) => t,
                (a, b) if a == b => a,
                (ColumnType::Integer, ColumnType::Float) | (ColumnType::Float, ColumnType::Integer) => {
                    ColumnType::Float
                }
                _ => ColumnType::Text,
            };
        }
        ty
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dtype_name())
    }
}

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

/// A named column whose values all share one inferred type (or are missing).
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub dtype: ColumnType,
    pub values: Vec<CellValue>,
}

impl Column {
    /// Build a column, inferring its type and coercing cells to it.
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        let dtype = ColumnType::infer(&values);
        let values = match dtype {
            ColumnType::Float => values
                .into_iter()
                .map(|v| match v {
                    CellValue::Integer(i) => CellValue::Float(i as f64),
                    other => other,
                })
                .collect(),
            ColumnType::Text => values
                .into_iter()
                .map(|v| match v {
                    CellValue::Missing | CellValue::Text(_) => v,
                    other => CellValue::Text(other.to_string()),
                })
                .collect(),
            _ => values,
        };
        Column {
            name: name.into(),
            dtype,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }

    /// Non-missing numeric values, in row order.
    pub fn numeric_values(&self) -> Vec<f64> {
        self.values.iter().filter_map(CellValue::as_f64).collect()
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset
// ---------------------------------------------------------------------------

/// An ordered sequence of named columns with a uniform row count.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Assemble a table from columns. All columns must have the same length.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self, String> {
        let row_count = columns.first().map_or(0, Column::len);
        if let Some(bad) = columns.iter().find(|c| c.len() != row_count) {
            return Err(format!(
                "column '{}' has {} rows, expected {row_count}",
                bad.name,
                bad.len()
            ));
        }
        for (i, col) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.name == col.name) {
                return Err(format!("duplicate column name '{}'", col.name));
            }
        }
        Ok(Table { columns, row_count })
    }

    /// Build a table from row-oriented data. Each row must have one value
    /// per column name.
    pub fn from_rows(names: &[&str], rows: Vec<Vec<CellValue>>) -> Result<Self, String> {
        let mut cols: Vec<Vec<CellValue>> = vec![Vec::with_capacity(rows.len()); names.len()];
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != names.len() {
                return Err(format!(
                    "row {i} has {} values, expected {}",
                    row.len(),
                    names.len()
                ));
            }
            for (slot, value) in cols.iter_mut().zip(row) {
                slot.push(value);
            }
        }
        let columns = names
            .iter()
            .zip(cols)
            .map(|(name, values)| Column::new(*name, values))
            .collect();
        Self::from_columns(columns)
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Values of one row across all columns, in column order.
    pub fn row(&self, index: usize) -> Vec<&CellValue> {
        self.columns.iter().map(|c| &c.values[index]).collect()
    }

    pub fn missing_cells(&self) -> usize {
        self.columns.iter().map(Column::missing_count).sum()
    }

    /// Keep only the rows for which `keep[row]` is true.
    pub(crate) fn retain_rows(&mut self, keep: &[bool]) {
        for col in &mut self.columns {
            let mut flags = keep.iter();
            col.values.retain(|_| flags.next().copied().unwrap_or(false));
        }
        self.row_count = keep.iter().filter(|k| **k).count();
    }

    pub(crate) fn columns_mut(&mut self) -> &mut Vec<Column> {
        &mut self.columns
    }
}
