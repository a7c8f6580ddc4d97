use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{
    DataType, Float16Type, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type,
    UInt16Type, UInt32Type, UInt64Type, UInt8Type,
};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Column, ColumnType, Table};
use crate::error::{DatasetError, Result};

/// Tokens read as missing values, in addition to empty fields.
pub const DEFAULT_NA_TOKENS: &[&str] = &[
    "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "null", "NULL", "None", "<NA>", "#N/A",
];

/// Options controlling how delimited text is parsed.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Field values treated as missing (empty fields always are).
    pub na_tokens: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            delimiter: b',',
            na_tokens: DEFAULT_NA_TOKENS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl LoadOptions {
    /// Set the delimiter
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    fn is_na(&self, field: &str) -> bool {
        field.is_empty() || self.na_tokens.iter().any(|t| t == field)
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Parse raw CSV bytes (header row first) into a [`Table`].
pub fn load_csv_bytes(bytes: &[u8]) -> Result<Table> {
    load_csv_with_options(bytes, &LoadOptions::default())
}

/// Load a dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row followed by data rows
/// * `.json`    – `[{ "col": value, ... }, ...]` (records orientation)
/// * `.parquet` – flat scalar columns
pub fn load_file(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv_bytes(&std::fs::read(path)?),
        "tsv" => load_csv_with_options(
            &std::fs::read(path)?,
            &LoadOptions::default().with_delimiter(b'\t'),
        ),
        "json" => load_json_bytes(&std::fs::read(path)?),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DatasetError::UnsupportedFormat(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Parse delimited text. Every column's type is inferred from all of its
/// fields; a column that mixes kinds of values keeps its original text.
pub fn load_csv_with_options(bytes: &[u8], options: &LoadOptions) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(DatasetError::Parse("no columns to parse from input".into()));
    }
    let names = dedupe_names(headers.iter());

    let mut raw: Vec<Vec<String>> = vec![Vec::new(); names.len()];
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| DatasetError::Parse(format!("CSV row {row_no}: {e}")))?;
        for (slot, field) in raw.iter_mut().zip(record.iter()) {
            slot.push(field.to_string());
        }
    }

    let columns = names
        .into_iter()
        .zip(raw)
        .map(|(name, fields)| text_column(name, fields, options))
        .collect();

    Table::from_columns(columns).map_err(DatasetError::Parse)
}

/// Types are guessed from the trimmed field; text cells keep the field as
/// written, surrounding whitespace included.
fn text_column(name: String, fields: Vec<String>, options: &LoadOptions) -> Column {
    let cells: Vec<CellValue> = fields
        .iter()
        .map(|f| guess_cell_type(f.trim(), options))
        .collect();
    if ColumnType::infer(&cells) == ColumnType::Text {
        let values = fields
            .into_iter()
            .zip(cells)
            .map(|(field, cell)| match cell {
                CellValue::Missing => CellValue::Missing,
                _ => CellValue::Text(field),
            })
            .collect();
        return Column {
            name,
            dtype: ColumnType::Text,
            values,
        };
    }
    Column::new(name, cells)
}

fn guess_cell_type(s: &str, options: &LoadOptions) -> CellValue {
    if options.is_na(s) {
        return CellValue::Missing;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        // `f64::from_str` accepts any spelling of NaN.
        if f.is_nan() {
            return CellValue::Missing;
        }
        return CellValue::Float(f);
    }
    match s {
        "true" | "True" | "TRUE" => CellValue::Bool(true),
        "false" | "False" | "FALSE" => CellValue::Bool(false),
        _ => CellValue::Text(s.to_string()),
    }
}

/// Blank headers become `Unnamed: <i>`; repeated names get a `.1`, `.2`, ...
/// suffix so every column stays addressable by name.
fn dedupe_names<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for (i, header) in headers.enumerate() {
        let base = match header.trim() {
            "" => format!("Unnamed: {i}"),
            h => h.to_string(),
        };
        let mut name = base.clone();
        let mut n = 1;
        while names.contains(&name) {
            name = format!("{base}.{n}");
            n += 1;
        }
        names.push(name);
    }
    names
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "sample": "A", "concentration": 1.5 },
///   { "sample": "B", "concentration": null }
/// ]
/// ```
///
/// Keys absent from a record are missing values in that row.
pub fn load_json_bytes(bytes: &[u8]) -> Result<Table> {
    let root: JsonValue = serde_json::from_slice(bytes)?;
    let records = root
        .as_array()
        .ok_or_else(|| DatasetError::Parse("expected top-level JSON array".into()))?;

    let mut names: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| DatasetError::Parse(format!("row {i} is not a JSON object")))?;
        for key in obj.keys() {
            if !names.contains(key) {
                names.push(key.clone());
            }
        }
    }
    if names.is_empty() && !records.is_empty() {
        return Err(DatasetError::Parse(format!(
            "{} records but no fields in any of them",
            records.len()
        )));
    }

    let columns = names
        .into_iter()
        .map(|name| {
            let values = records
                .iter()
                .map(|rec| rec.get(&name).map_or(CellValue::Missing, json_to_cell))
                .collect();
            Column::new(name, values)
        })
        .collect();

    Table::from_columns(columns).map_err(DatasetError::Parse)
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Missing,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat columns.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`). Nested or exotic column types are
/// rendered to text.
pub fn load_parquet(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    let mut values: Vec<Vec<CellValue>> = vec![Vec::new(); names.len()];
    for batch_result in reader {
        let batch = batch_result?;
        for (slot, col) in values.iter_mut().zip(batch.columns()) {
            for row in 0..batch.num_rows() {
                slot.push(arrow_cell(col, row)?);
            }
        }
    }

    let columns = names
        .into_iter()
        .zip(values)
        .map(|(name, vals)| Column::new(name, vals))
        .collect();
    Table::from_columns(columns).map_err(DatasetError::Parse)
}

/// Extract a single cell from an Arrow column at a given row.
fn arrow_cell(col: &ArrayRef, row: usize) -> Result<CellValue> {
    if col.is_null(row) {
        return Ok(CellValue::Missing);
    }
    let cell = match col.data_type() {
        DataType::Utf8 => CellValue::Text(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::Text(col.as_string::<i64>().value(row).to_string()),
        DataType::Int8 => CellValue::Integer(col.as_primitive::<Int8Type>().value(row).into()),
        DataType::Int16 => CellValue::Integer(col.as_primitive::<Int16Type>().value(row).into()),
        DataType::Int32 => CellValue::Integer(col.as_primitive::<Int32Type>().value(row).into()),
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::UInt8 => CellValue::Integer(col.as_primitive::<UInt8Type>().value(row).into()),
        DataType::UInt16 => CellValue::Integer(col.as_primitive::<UInt16Type>().value(row).into()),
        DataType::UInt32 => CellValue::Integer(col.as_primitive::<UInt32Type>().value(row).into()),
        DataType::UInt64 => {
            let v = col.as_primitive::<UInt64Type>().value(row);
            i64::try_from(v).map_or(CellValue::Float(v as f64), CellValue::Integer)
        }
        DataType::Float16 => float_cell(col.as_primitive::<Float16Type>().value(row).to_f64()),
        DataType::Float32 => float_cell(col.as_primitive::<Float32Type>().value(row).into()),
        DataType::Float64 => float_cell(col.as_primitive::<Float64Type>().value(row)),
        DataType::Decimal128(..) | DataType::Decimal256(..) => {
            let text = array_value_to_string(col, row)?;
            match text.parse::<f64>() {
                Ok(v) => CellValue::Float(v),
                Err(_) => CellValue::Text(text),
            }
        }
        DataType::Boolean => CellValue::Bool(col.as_boolean().value(row)),
        _ => CellValue::Text(array_value_to_string(col, row)?),
    };
    Ok(cell)
}

/// Pandas writes NaN for missing floats.
fn float_cell(v: f64) -> CellValue {
    if v.is_nan() {
        CellValue::Missing
    } else {
        CellValue::Float(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_column_types() {
        let table = load_csv_bytes(b"id,score,name,flag\n1,2.5,alice,true\n2,,bob,false\n").unwrap();
        let dtypes: Vec<ColumnType> = table.columns().iter().map(|c| c.dtype).collect();
        assert_eq!(
            dtypes,
            vec![ColumnType::Integer, ColumnType::Float, ColumnType::Text, ColumnType::Boolean]
        );
        assert_eq!(table.column("score").unwrap().missing_count(), 1);
    }

    #[test]
    fn na_tokens_are_missing() {
        let table = load_csv_bytes(b"a\nNA\nnull\n3\n").unwrap();
        let col = table.column("a").unwrap();
        assert_eq!(col.dtype, ColumnType::Integer);
        assert_eq!(col.missing_count(), 2);
    }

    #[test]
    fn mixed_column_keeps_original_text() {
        let table = load_csv_bytes(b"code\n007\nabc\n").unwrap();
        let col = table.column("code").unwrap();
        assert_eq!(col.dtype, ColumnType::Text);
        assert_eq!(col.values[0], CellValue::Text("007".into()));
    }

    #[test]
    fn nan_spellings_are_missing() {
        let table = load_csv_bytes(b"a,k\n1,x\nNAN,y\n,z\n+nan,v\n-NAN,u\n3,w\n").unwrap();
        let col = table.column("a").unwrap();
        assert_eq!(col.dtype, ColumnType::Integer);
        assert_eq!(col.missing_count(), 4);
        assert_eq!(table.missing_cells(), 4);
    }

    #[test]
    fn text_cells_keep_surrounding_whitespace() {
        let table = load_csv_bytes(b"city,n\nOslo,1\n Oslo, 2\n  ,3\n").unwrap();
        let city = table.column("city").unwrap();
        assert_eq!(
            city.values,
            vec![CellValue::Text("Oslo".into()), CellValue::Text(" Oslo".into()), CellValue::Missing]
        );
        // Numbers are still recognised through padding.
        assert_eq!(table.column("n").unwrap().dtype, ColumnType::Integer);
    }

    #[test]
    fn ragged_rows_fail_to_parse() {
        let err = load_csv_bytes(b"a,b\n1,2\n3\n").unwrap_err();
        assert!(matches!(err, DatasetError::Parse(_)));
    }

    #[test]
    fn empty_input_fails_to_parse() {
        assert!(matches!(load_csv_bytes(b""), Err(DatasetError::Parse(_))));
    }

    #[test]
    fn invalid_utf8_fails_to_parse() {
        assert!(matches!(load_csv_bytes(b"a\n\xff\xfe\n"), Err(DatasetError::Parse(_))));
    }

    #[test]
    fn header_only_gives_empty_table() {
        let table = load_csv_bytes(b"a,b\n").unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_names(), vec!["a", "b"]);
        assert_eq!(table.column("a").unwrap().dtype, ColumnType::Empty);
    }

    #[test]
    fn duplicate_and_blank_headers_are_renamed() {
        let table = load_csv_bytes(b"a,a,\n1,2,3\n").unwrap();
        assert_eq!(table.column_names(), vec!["a", "a.1", "Unnamed: 2"]);
    }

    #[test]
    fn custom_delimiter() {
        let table =
            load_csv_with_options(b"a;b\n1;2\n", &LoadOptions::default().with_delimiter(b';')).unwrap();
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn json_records_fill_absent_keys_with_missing() {
        let table = load_json_bytes(br#"[{"a": 1, "b": "x"}, {"a": 2.5}]"#).unwrap();
        assert_eq!(table.column_names(), vec!["a", "b"]);
        assert_eq!(table.column("a").unwrap().dtype, ColumnType::Float);
        assert_eq!(table.column("b").unwrap().values[1], CellValue::Missing);
    }

    #[test]
    fn json_must_be_an_array_of_objects() {
        assert!(matches!(load_json_bytes(b"{}"), Err(DatasetError::Parse(_))));
        assert!(matches!(load_json_bytes(b"[1, 2]"), Err(DatasetError::Parse(_))));
    }

    #[test]
    fn json_records_without_fields_fail_to_parse() {
        assert!(matches!(load_json_bytes(b"[{}, {}]"), Err(DatasetError::Parse(_))));
        assert_eq!(load_json_bytes(b"[]").unwrap().row_count(), 0);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_file(Path::new("data.xlsx")).unwrap_err();
        assert!(matches!(err, DatasetError::UnsupportedFormat(ext) if ext == "xlsx"));
    }
}
