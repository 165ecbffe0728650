//! Small in-memory tables shared by the unit tests.

use std::collections::BTreeMap;

use super::model::{CellValue, Table, TRAJECTORY_COLUMNS};

/// Build a trajectory table from `(patient_id, predicted, day7, level, trajectory)` rows.
pub fn trajectory_table(rows: &[(&str, f64, f64, &str, &str)]) -> Table {
    let mut table = Table::new(
        "trajectory_forecasts",
        TRAJECTORY_COLUMNS.iter().map(|c| c.to_string()).collect(),
    );
    for &(id, predicted, day7, level, trajectory) in rows {
        let mut row = BTreeMap::new();
        row.insert("patient_id".into(), CellValue::String(id.into()));
        row.insert("predicted_ncrs".into(), CellValue::Float(predicted));
        row.insert("day1_ncrs".into(), CellValue::Float(predicted + 1.0));
        row.insert("day4_ncrs".into(), CellValue::Float(predicted + 2.0));
        row.insert("day7_ncrs".into(), CellValue::Float(day7));
        row.insert("risk_change".into(), CellValue::Float(day7 - predicted));
        row.insert("predicted_risk_level".into(), CellValue::String(level.into()));
        row.insert("trajectory_risk".into(), CellValue::String(trajectory.into()));
        table.rows.push(row);
    }
    table
}
