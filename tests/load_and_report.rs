use std::path::Path;
use std::sync::Arc;

use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use pretty_assertions::assert_eq;

use ncrs_dashboard::data::export::export_report;
use ncrs_dashboard::data::filter::{
    critical_trajectories, filtered_indices, risk_distribution, top_by_day7, RiskFilter,
};
use ncrs_dashboard::data::loader::{load_table, load_tables, DataSources};
use ncrs_dashboard::data::{CellValue, DataError};
use ncrs_dashboard::state::AppState;

const PROFILES: &str = "\
patient_id,age,gender,disease_type
P001,65,0,0
P002,72,1,1
P003,58,0,1
";

const PREDICTIONS: &str = "\
patient_id,predicted_ncrs,predicted_risk_level
P001,28.4,Stable
P002,66.0,Fragile
P003,47.5,Moderate
";

const TRAJECTORIES: &str = "\
patient_id,predicted_ncrs,day1_ncrs,day4_ncrs,day7_ncrs,risk_change,predicted_risk_level,trajectory_risk
P001,28.4,29.0,30.2,31.5,3.1,Stable,Stable Trajectory
P002,66.0,68.5,73.0,79.4,13.4,Fragile,Critical Trajectory
P003,47.5,49.0,55.0,62.0,14.5,Moderate,Critical Trajectory
";

fn write_tables(dir: &Path, trajectories: &str) {
    std::fs::write(dir.join("patient_profiles.csv"), PROFILES).unwrap();
    std::fs::write(dir.join("ncrs_predictions.csv"), PREDICTIONS).unwrap();
    std::fs::write(dir.join("trajectory_forecasts.csv"), trajectories).unwrap();
}

#[test]
fn loads_three_tables_from_a_folder() {
    let dir = tempfile::tempdir().unwrap();
    write_tables(dir.path(), TRAJECTORIES);

    let tables = load_tables(&DataSources::from_dir(dir.path())).unwrap();
    assert_eq!(tables.patient_ids(), vec!["P001", "P002", "P003"]);

    let p2 = tables.trajectory_for("P002").unwrap();
    assert_eq!(p2.day7_ncrs, 79.4);
    assert!(p2.is_critical_trajectory());

    let profile = tables.profile_for("P002").unwrap();
    assert_eq!(profile[1], ("age".to_string(), CellValue::Integer(72)));
    let prediction = tables.prediction_for("P003").unwrap();
    assert_eq!(prediction[2].1, CellValue::String("Moderate".into()));
}

#[test]
fn doctor_view_queries() {
    let dir = tempfile::tempdir().unwrap();
    write_tables(dir.path(), TRAJECTORIES);
    let tables = load_tables(&DataSources::from_dir(dir.path())).unwrap();
    let f = &tables.forecasts;

    let all = filtered_indices(f, &RiskFilter::All);
    let top: Vec<&str> = top_by_day7(f, &all, 10)
        .into_iter()
        .map(|i| f[i].patient_id.as_str())
        .collect();
    assert_eq!(top, vec!["P002", "P003", "P001"]);

    let counts = risk_distribution(f, &all);
    assert_eq!(counts.values().sum::<usize>(), 3);

    let stable = filtered_indices(f, &RiskFilter::Level("Stable".into()));
    assert!(critical_trajectories(f, &stable, 10).is_empty());
    assert_eq!(critical_trajectories(f, &all, 10), vec![1, 2]);
}

#[test]
fn missing_trajectory_column_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    write_tables(
        dir.path(),
        "patient_id,predicted_ncrs,day1_ncrs,day4_ncrs,day7_ncrs,risk_change,predicted_risk_level\n\
         P001,28.4,29.0,30.2,31.5,3.1,Stable\n",
    );

    let err = load_tables(&DataSources::from_dir(dir.path())).unwrap_err();
    match err {
        DataError::MissingColumn { table, column } => {
            assert_eq!(table, "trajectory_forecasts");
            assert_eq!(column, "trajectory_risk");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn export_writes_the_unfiltered_table() {
    let dir = tempfile::tempdir().unwrap();
    write_tables(dir.path(), TRAJECTORIES);

    let mut state = AppState::default();
    state.load(DataSources::from_dir(dir.path()));
    state.set_risk_filter(RiskFilter::Level("Stable".into()));
    assert_eq!(state.visible_indices.len(), 1);

    let out = dir.path().join("ncrs_report.csv");
    state.export_report_to(&out).unwrap();

    let written = std::fs::read_to_string(&out).unwrap();
    assert_eq!(written, TRAJECTORIES);
    assert!(state.status_message.unwrap().starts_with("Report saved"));
}

#[test]
fn exported_report_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    write_tables(dir.path(), TRAJECTORIES);
    let tables = load_tables(&DataSources::from_dir(dir.path())).unwrap();

    let out = dir.path().join("report.csv");
    export_report(&tables.trajectories, &out).unwrap();
    let reloaded = load_table(&out).unwrap();
    assert_eq!(reloaded.column_names, tables.trajectories.column_names);
    assert_eq!(reloaded.rows, tables.trajectories.rows);
}

#[test]
fn parquet_trajectories_are_supported() {
    let dir = tempfile::tempdir().unwrap();
    let schema = Arc::new(Schema::new(vec![
        Field::new("patient_id", DataType::Utf8, false),
        Field::new("predicted_ncrs", DataType::Float64, false),
        Field::new("day1_ncrs", DataType::Float64, false),
        Field::new("day4_ncrs", DataType::Float64, false),
        Field::new("day7_ncrs", DataType::Float64, false),
        Field::new("risk_change", DataType::Float64, false),
        Field::new("predicted_risk_level", DataType::Utf8, false),
        Field::new("trajectory_risk", DataType::Utf8, true),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(vec!["A1", "A2"])),
            Arc::new(Float64Array::from(vec![35.0, 70.5])),
            Arc::new(Float64Array::from(vec![36.0, 72.0])),
            Arc::new(Float64Array::from(vec![38.0, 75.0])),
            Arc::new(Float64Array::from(vec![40.0, 81.0])),
            Arc::new(Float64Array::from(vec![5.0, 10.5])),
            Arc::new(StringArray::from(vec!["Moderate", "Fragile"])),
            Arc::new(StringArray::from(vec![Some("Rising Risk"), None])),
        ],
    )
    .unwrap();

    let path = dir.path().join("trajectory_forecasts.parquet");
    let file = std::fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let table = load_table(&path).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.value(1, "day7_ncrs"), &CellValue::Float(81.0));
    assert_eq!(table.value(1, "trajectory_risk"), &CellValue::Null);

    // a null label still loads as an empty one
    std::fs::write(dir.path().join("patient_profiles.csv"), PROFILES).unwrap();
    std::fs::write(dir.path().join("ncrs_predictions.csv"), PREDICTIONS).unwrap();
    let sources = DataSources {
        trajectories: path,
        ..DataSources::from_dir(dir.path())
    };
    let tables = load_tables(&sources).unwrap();
    assert_eq!(tables.patient_ids(), vec!["A1", "A2"]);
    let a2 = tables.trajectory_for("A2").unwrap();
    assert_eq!(a2.trajectory_risk, "");
    assert_eq!(a2.day7_ncrs, 81.0);
}

#[test]
fn blank_cells_do_not_hide_other_patients() {
    let dir = tempfile::tempdir().unwrap();
    write_tables(
        dir.path(),
        "\
patient_id,predicted_ncrs,day1_ncrs,day4_ncrs,day7_ncrs,risk_change,predicted_risk_level,trajectory_risk
P001,28.4,29.0,30.2,31.5,3.1,Stable,Stable Trajectory
P002,66.0,68.5,73.0,,13.4,,Critical Trajectory
P003,47.5,49.0,55.0,62.0,14.5,Moderate,Critical Trajectory
",
    );

    let mut state = AppState::default();
    state.load(DataSources::from_dir(dir.path()));
    assert_eq!(state.status_message, None);
    let tables = state.tables.as_ref().unwrap();
    let f = &tables.forecasts;
    assert_eq!(tables.patient_ids(), vec!["P001", "P002", "P003"]);
    assert!(tables.trajectory_for("P002").unwrap().day7_ncrs.is_nan());

    // the blank score is not ranked, the blank level is not counted
    let all = filtered_indices(f, &RiskFilter::All);
    let top: Vec<&str> = top_by_day7(f, &all, 10)
        .into_iter()
        .map(|i| f[i].patient_id.as_str())
        .collect();
    assert_eq!(top, vec!["P003", "P001"]);
    assert_eq!(risk_distribution(f, &all).values().sum::<usize>(), 2);
    assert_eq!(critical_trajectories(f, &all, 10).len(), 2);
}
