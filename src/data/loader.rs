use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::{DataError, Result};
use super::model::{CellValue, PatientTables, Table};

pub const PROFILES_FILE: &str = "patient_profiles.csv";
pub const PREDICTIONS_FILE: &str = "ncrs_predictions.csv";
pub const TRAJECTORIES_FILE: &str = "trajectory_forecasts.csv";

// ---------------------------------------------------------------------------
// Input locations
// ---------------------------------------------------------------------------

/// Paths of the three input tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSources {
    pub profiles: PathBuf,
    pub predictions: PathBuf,
    pub trajectories: PathBuf,
}

impl DataSources {
    /// The default file names inside `dir`.
    pub fn from_dir(dir: &Path) -> Self {
        Self {
            profiles: dir.join(PROFILES_FILE),
            predictions: dir.join(PREDICTIONS_FILE),
            trajectories: dir.join(TRAJECTORIES_FILE),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load all three tables and type the trajectory forecasts.
pub fn load_tables(sources: &DataSources) -> Result<PatientTables> {
    let profiles = load_table(&sources.profiles)?;
    let predictions = load_table(&sources.predictions)?;
    let trajectories = load_table(&sources.trajectories)?;
    log::debug!(
        "Loaded {} profiles, {} predictions, {} trajectory rows",
        profiles.len(),
        predictions.len(),
        trajectories.len()
    );
    PatientTables::new(profiles, predictions, trajectories)
}

/// Load one table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one patient record per line
/// * `.json`    – `[{ "patient_id": ..., ... }, ...]` (records orient)
/// * `.parquet` – flat scalar columns, as written by Pandas or Polars
pub fn load_table(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Err(DataError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DataError::UnsupportedExtension(other.to_string())),
    };
    log::info!(
        "Loaded table '{}' ({} rows, columns {:?})",
        table.name,
        table.len(),
        table.column_names
    );
    Ok(table)
}

fn table_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("table")
        .to_string()
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut table = Table::new(table_name(path), headers.clone());
    for result in reader.records() {
        let record = result?;
        let row: BTreeMap<String, CellValue> = headers
            .iter()
            .zip(record.iter())
            .map(|(col, raw)| (col.clone(), CellValue::infer(raw)))
            .collect();
        table.rows.push(row);
    }
    Ok(table)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
/// Column order is first appearance across records.
fn load_json(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path)?;
    let root: JsonValue = serde_json::from_str(&text)?;
    let name = table_name(path);

    let records = root.as_array().ok_or_else(|| DataError::Malformed {
        table: name.clone(),
        message: "expected a top-level JSON array".to_string(),
    })?;

    let mut table = Table::new(name, Vec::new());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec.as_object().ok_or_else(|| DataError::Malformed {
            table: table.name.clone(),
            message: format!("row {i} is not a JSON object"),
        })?;

        let mut row = BTreeMap::new();
        for (key, val) in obj {
            if !table.has_column(key) {
                table.column_names.push(key.clone());
            }
            row.insert(key.clone(), json_to_cell(val));
        }
        table.rows.push(row);
    }
    Ok(table)
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Works with files written by both Pandas (`df.to_parquet()`) and
/// Polars (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    let mut table = Table::new(table_name(path), columns);

    for batch_result in reader {
        let batch = batch_result?;
        for row in 0..batch.num_rows() {
            let values: BTreeMap<String, CellValue> = table
                .column_names
                .iter()
                .enumerate()
                .map(|(idx, name)| (name.clone(), arrow_to_cell(batch.column(idx), row)))
                .collect();
            table.rows.push(values);
        }
    }
    Ok(table)
}

/// Extract a single cell from an Arrow column at a given row.
fn arrow_to_cell(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 => CellValue::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => CellValue::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => CellValue::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => CellValue::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => CellValue::Bool(col.as_boolean().value(row)),
        other => CellValue::String(format!("{other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_cells_are_typed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "patient_profiles.csv",
            "patient_id,age,disease\nP001,65,Diabetes\nP002,,Hypertension\n",
        );
        let table = load_table(&path).unwrap();
        assert_eq!(table.name, "patient_profiles");
        assert_eq!(table.column_names, vec!["patient_id", "age", "disease"]);
        assert_eq!(table.value(0, "age"), &CellValue::Integer(65));
        assert_eq!(table.value(1, "age"), &CellValue::Null);
        assert_eq!(table.value(1, "disease"), &CellValue::String("Hypertension".into()));
    }

    #[test]
    fn json_records_keep_first_seen_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "ncrs_predictions.json",
            r#"[{"patient_id": "P1", "predicted_ncrs": 41.5}, {"patient_id": "P2", "flag": true}]"#,
        );
        let table = load_table(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.has_column("flag"));
        assert_eq!(table.value(0, "predicted_ncrs"), &CellValue::Float(41.5));
        assert_eq!(table.value(1, "predicted_ncrs"), &CellValue::Null);
    }

    #[test]
    fn json_must_be_an_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "bad.json", r#"{"patient_id": "P1"}"#);
        assert!(matches!(
            load_table(&path),
            Err(DataError::Malformed { .. })
        ));
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trajectory_forecasts.csv");
        let err = load_table(&path).unwrap_err();
        assert!(matches!(err, DataError::NotFound { .. }));
        assert!(err.to_string().contains("trajectory_forecasts.csv"));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "profiles.xlsx", "");
        assert!(matches!(
            load_table(&path),
            Err(DataError::UnsupportedExtension(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn sources_use_default_file_names() {
        let sources = DataSources::from_dir(Path::new("/data"));
        assert_eq!(sources.trajectories, PathBuf::from("/data/trajectory_forecasts.csv"));
        assert_eq!(sources.profiles, PathBuf::from("/data/patient_profiles.csv"));
    }
}
