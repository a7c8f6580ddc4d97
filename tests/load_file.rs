use std::fs;

use dataset_viewer::data::loader::load_file;
use dataset_viewer::{Action, CellValue, ColumnType, DatasetError, Outcome, Session};

#[test]
fn test_load_csv_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("people.csv");
    fs::write(&path, "name,age\nAda,36\nAlan,\n").unwrap();

    let table = load_file(&path).unwrap();
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.column("age").unwrap().dtype, ColumnType::Integer);
    assert_eq!(table.column("age").unwrap().missing_count(), 1);
}

#[test]
fn test_load_tsv_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("people.tsv");
    fs::write(&path, "name\tage\nAda\t36\n").unwrap();

    let table = load_file(&path).unwrap();
    assert_eq!(table.column_names(), vec!["name", "age"]);
}

#[test]
fn test_load_json_records_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("people.json");
    fs::write(&path, r#"[{"age": 36, "name": "Ada"}, {"age": null, "name": "Alan"}]"#).unwrap();

    let mut session = Session::new();
    let table = session.load_file(&path).unwrap();
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.column("age").unwrap().values[1], CellValue::Missing);
    assert_eq!(table.column("name").unwrap().dtype, ColumnType::Text);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_file(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, DatasetError::Io(_)));
}

#[test]
fn test_bad_file_keeps_session_table() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.csv");
    let bad = dir.path().join("bad.json");
    fs::write(&good, "a\n1\n").unwrap();
    fs::write(&bad, "not json").unwrap();

    let mut session = Session::new();
    session.load_file(&good).unwrap();
    assert!(matches!(session.load_file(&bad), Err(DatasetError::Parse(_))));
    assert_eq!(session.table().unwrap().column_names(), vec!["a"]);
}

#[test]
fn test_load_file_action_reports_shape() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("people.json");
    fs::write(&good, r#"[{"age": 36, "name": "Ada"}, {"age": 41, "name": "Alan"}]"#).unwrap();

    let mut session = Session::new();
    let outcome = session.apply(Action::LoadFile { path: good }).unwrap();
    assert_eq!(outcome, Outcome::Loaded { rows: 2, columns: 2 });

    let err = session
        .apply(Action::LoadFile { path: dir.path().join("people.xlsx") })
        .unwrap_err();
    assert!(matches!(err, DatasetError::UnsupportedFormat(ref ext) if ext == "xlsx"));
    assert_eq!(session.table().unwrap().row_count(), 2);
}

#[test]
fn test_load_parquet_file() {
    use std::sync::Arc;

    use arrow::array::{
        ArrayRef, BooleanArray, Decimal128Array, Float32Array, Float64Array, Int64Array,
        StringArray, UInt64Array,
    };
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("people.parquet");

    let batch = RecordBatch::try_from_iter(vec![
        ("id", Arc::new(Int64Array::from(vec![Some(1), None, Some(3)])) as ArrayRef),
        ("name", Arc::new(StringArray::from(vec!["Ada", "Alan", "Grace"])) as ArrayRef),
        ("score", Arc::new(Float64Array::from(vec![1.5, f64::NAN, 2.5])) as ArrayRef),
        ("member", Arc::new(BooleanArray::from(vec![true, false, true])) as ArrayRef),
        ("ratio", Arc::new(Float32Array::from(vec![0.5, f32::NAN, 0.25])) as ArrayRef),
        ("small", Arc::new(UInt64Array::from(vec![1u64, 2, 3])) as ArrayRef),
        ("big", Arc::new(UInt64Array::from(vec![1u64, u64::MAX, 3])) as ArrayRef),
        (
            "price",
            Arc::new(
                Decimal128Array::from(vec![Some(1250i128), None, Some(99)])
                    .with_precision_and_scale(10, 2)
                    .unwrap(),
            ) as ArrayRef,
        ),
    ])
    .unwrap();

    let file = fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let table = load_file(&path).unwrap();
    assert_eq!(
        table.column_names(),
        vec!["id", "name", "score", "member", "ratio", "small", "big", "price"]
    );
    let dtypes: Vec<ColumnType> = table.columns().iter().map(|c| c.dtype).collect();
    assert_eq!(
        dtypes,
        vec![
            ColumnType::Integer,
            ColumnType::Text,
            ColumnType::Float,
            ColumnType::Boolean,
            ColumnType::Float,
            ColumnType::Integer,
            ColumnType::Float,
            ColumnType::Float,
        ]
    );
    assert_eq!(table.column("id").unwrap().missing_count(), 1);
    assert_eq!(table.column("score").unwrap().missing_count(), 1);
    // Float32 NaN is missing, like Float64 NaN.
    assert_eq!(table.column("ratio").unwrap().missing_count(), 1);
    assert_eq!(table.column("ratio").unwrap().values[0], CellValue::Float(0.5));
    assert_eq!(table.column("small").unwrap().values[1], CellValue::Integer(2));
    // A u64 beyond i64::MAX widens the column to Float instead of wrapping.
    assert_eq!(table.column("big").unwrap().values[1], CellValue::Float(u64::MAX as f64));
    let price = table.column("price").unwrap();
    assert_eq!(price.values[0], CellValue::Float(12.5));
    assert_eq!(price.values[1], CellValue::Missing);
}
