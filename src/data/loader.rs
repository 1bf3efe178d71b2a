use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::{Cell, Dataset, RawTable};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a team statistics dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one row per team-season (recommended)
/// * `.json`    – `[{ "team": "...", "year": 2020, ... }, ...]`
/// * `.parquet` – flat scalar columns, as written by `df.to_parquet()`
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let io_err = |source| LoadError::Io {
        path: path.display().to_string(),
        source,
    };

    match ext.as_str() {
        "csv" => load_csv_reader(std::fs::File::open(path).map_err(io_err)?),
        "json" => load_json_str(&std::fs::read_to_string(path).map_err(io_err)?),
        "parquet" | "pq" => load_parquet(std::fs::File::open(path).map_err(io_err)?),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with raw (`wins`, `points_opp`, …) or display
/// (`Games Won`, `Points Against`, …) column names, one record per row.
pub fn load_csv_reader<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(Cell::parse).collect());
    }

    Dataset::from_table(RawTable { headers, rows })
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "team": "Buffalo Bills", "year": 2020, "wins": 13, ... },
///   ...
/// ]
/// ```
///
/// Columns are the union of keys in first-seen order; absent keys are null.
pub fn load_json_str(text: &str) -> Result<Dataset, LoadError> {
    let root: JsonValue = serde_json::from_str(text)?;
    let records = root
        .as_array()
        .ok_or_else(|| LoadError::Json("expected top-level JSON array".into()))?;

    let mut headers: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| LoadError::Json(format!("row {i} is not a JSON object")))?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(|rec| rec.as_object())
        .map(|obj| {
            headers
                .iter()
                .map(|h| obj.get(h).map(json_to_cell).unwrap_or(Cell::Null))
                .collect()
        })
        .collect();

    Dataset::from_table(RawTable { headers, rows })
}

fn json_to_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::String(s) => Cell::parse(s),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Cell::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Cell::Float(f)
            } else {
                Cell::Text(n.to_string())
            }
        }
        JsonValue::Null => Cell::Null,
        other => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of team statistics.
///
/// Every column must be a flat scalar: Utf8 / LargeUtf8 for identity text,
/// integer or float for metrics. Works with files written by both **Pandas**
/// (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(file: std::fs::File) -> Result<Dataset, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        for row in 0..batch.num_rows() {
            let cells = batch
                .columns()
                .iter()
                .map(|col| extract_cell(col, row))
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(cells);
        }
    }

    Dataset::from_table(RawTable { headers, rows })
}

/// Extract a single value from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> Result<Cell, LoadError> {
    if col.is_null(row) {
        return Ok(Cell::Null);
    }
    let cell = match col.data_type() {
        DataType::Utf8 => Cell::Text(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Cell::Text(col.as_string::<i64>().value(row).to_string()),
        DataType::Int16 => Cell::Integer(col.as_primitive::<Int16Type>().value(row) as i64),
        DataType::Int32 => Cell::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => Cell::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => Cell::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => Cell::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Null => Cell::Null,
        other => {
            return Err(LoadError::Parquet(format!(
                "unsupported column type {other:?}"
            )))
        }
    };
    Ok(cell)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;
    use crate::data::schema::{GAMES_WON, POINTS_FOR, TEAM_NAME};

    const CSV: &str = "\
team,year,conference,division,wins,losses,points,points_opp,logo_path
Buffalo Bills,2020,AFC,AFC East,13,3,501,375,logos/buf.png
Miami Dolphins,2020,AFC,AFC East,10,6,404,338,
Green Bay Packers,2020,NFC,NFC North,13,3,509,369,logos/gb.png";

    #[test]
    fn csv_with_raw_headers() {
        let ds = load_csv_reader(CSV.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.metric_columns()[0], GAMES_WON);
        let packers = &ds.records()[2];
        assert_eq!(packers.team, "Green Bay Packers");
        assert_eq!(ds.metric(packers, POINTS_FOR), Some(509.0));
        assert_eq!(ds.records()[1].logo_path, None);
    }

    #[test]
    fn csv_with_display_headers_and_blank_metric() {
        let csv_data = "\
Team Name,Season Year,NFL Conference,NFL Division,Games Won,Points For
Chicago Bears,2020,NFC,NFC North,8,";
        let ds = load_csv_reader(csv_data.as_bytes()).unwrap();
        let bears = &ds.records()[0];
        assert_eq!(bears.year, 2020);
        assert_eq!(ds.metric(bears, POINTS_FOR), None);
    }

    #[test]
    fn csv_missing_division_column_fails() {
        let csv_data = "team,year,conference,wins\nA,2020,AFC,3";
        let err = load_csv_reader(csv_data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(_)));
    }

    #[test]
    fn csv_ragged_row_fails() {
        let csv_data = "team,year,conference,division,wins\nA,2020,AFC";
        let err = load_csv_reader(csv_data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }

    #[test]
    fn json_records() {
        let json = r#"[
            {"team": "Buffalo Bills", "year": 2020, "conference": "AFC", "division": "AFC East", "wins": 13, "points": 501},
            {"team": "Miami Dolphins", "year": 2020, "conference": "AFC", "division": "AFC East", "wins": 10}
        ]"#;
        let ds = load_json_str(json).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.metric(&ds.records()[1], POINTS_FOR), None);
        assert_eq!(ds.records()[0].team, "Buffalo Bills");
    }

    #[test]
    fn json_must_be_array_of_objects() {
        assert!(matches!(load_json_str("{}"), Err(LoadError::Json(_))));
        assert!(matches!(load_json_str("[1, 2]"), Err(LoadError::Json(_))));
        assert!(matches!(load_json_str("[{"), Err(LoadError::Json(_))));
    }

    #[test]
    fn file_dispatch_by_extension() {
        let mut csv_file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        csv_file.write_all(CSV.as_bytes()).unwrap();
        let ds = load_file(csv_file.path()).unwrap();
        assert_eq!(ds.unique_values(TEAM_NAME).unwrap().len(), 3);

        let err = load_file(Path::new("stats.xlsx")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(ext) if ext == "xlsx"));

        let err = load_file(Path::new("/nonexistent/data.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn parquet_flat_columns() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("team", DataType::Utf8, false),
            Field::new("year", DataType::Int64, false),
            Field::new("conference", DataType::Utf8, false),
            Field::new("division", DataType::Utf8, false),
            Field::new("wins", DataType::Int64, false),
            Field::new("points", DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["Buffalo Bills", "Miami Dolphins"])),
                Arc::new(Int64Array::from(vec![2020, 2020])),
                Arc::new(StringArray::from(vec!["AFC", "AFC"])),
                Arc::new(StringArray::from(vec!["AFC East", "AFC East"])),
                Arc::new(Int64Array::from(vec![13, 10])),
                Arc::new(Float64Array::from(vec![Some(501.0), None])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.metric(&ds.records()[0], POINTS_FOR), Some(501.0));
        assert_eq!(ds.metric(&ds.records()[1], POINTS_FOR), None);
        assert_eq!(ds.metric(&ds.records()[1], GAMES_WON), Some(10.0));
    }
}
