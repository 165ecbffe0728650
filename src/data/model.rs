use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::error::{DataError, Result};

/// Columns every trajectory forecast table must provide.
pub const TRAJECTORY_COLUMNS: [&str; 8] = [
    "patient_id",
    "predicted_ncrs",
    "day1_ncrs",
    "day4_ncrs",
    "day7_ncrs",
    "risk_change",
    "predicted_risk_level",
    "trajectory_risk",
];

/// Label used in `trajectory_risk` for deteriorating patients.
pub const CRITICAL_TRAJECTORY: &str = "Critical Trajectory";

// ---------------------------------------------------------------------------
// CellValue – a single cell of a loaded table
// ---------------------------------------------------------------------------

/// A dynamically-typed table cell, mirroring common Pandas dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:.1}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, ""),
        }
    }
}

impl CellValue {
    /// Infer a cell type from raw text (CSV cells).
    pub fn infer(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        match s {
            "true" | "True" => CellValue::Bool(true),
            "false" | "False" => CellValue::Bool(false),
            _ => CellValue::String(s.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Text form used for identifiers and labels.
    /// Integral floats print without a fractional part so `7.0` and `7` agree.
    pub fn as_key(&self) -> String {
        match self {
            CellValue::Float(v) if v.fract() == 0.0 && v.is_finite() => format!("{}", *v as i64),
            CellValue::Float(v) => v.to_string(),
            CellValue::Null => String::new(),
            other => other.to_string(),
        }
    }

    /// Text written back out on CSV export. Floats keep a fractional part (`29.0`).
    pub fn to_csv_field(&self) -> String {
        match self {
            CellValue::Float(v) => format!("{v:?}"),
            CellValue::Null => String::new(),
            other => other.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Table – one loaded file
// ---------------------------------------------------------------------------

/// A flat table with ordered columns and dynamically-typed rows.
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Display name (usually the file stem), used in error messages.
    pub name: String,
    /// Column names in file order.
    pub column_names: Vec<String>,
    /// Rows: column_name → value. Absent columns read as `Null`.
    pub rows: Vec<BTreeMap<String, CellValue>>,
}

impl Table {
    pub fn new(name: impl Into<String>, column_names: Vec<String>) -> Self {
        Self {
            name: name.into(),
            column_names,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_names.iter().any(|c| c == column)
    }

    /// Fail with [`DataError::MissingColumn`] for the first absent column.
    pub fn require_columns(&self, columns: &[&str]) -> Result<()> {
        match columns.iter().find(|c| !self.has_column(c)) {
            Some(missing) => Err(DataError::MissingColumn {
                table: self.name.clone(),
                column: missing.to_string(),
            }),
            None => Ok(()),
        }
    }

    pub fn value(&self, row: usize, column: &str) -> &CellValue {
        static NULL: CellValue = CellValue::Null;
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&NULL)
    }

    /// Index of the first row whose `column` matches `key` by [`CellValue::as_key`].
    pub fn find_row(&self, column: &str, key: &str) -> Option<usize> {
        if !self.has_column(column) {
            return None;
        }
        self.rows
            .iter()
            .position(|r| r.get(column).map(CellValue::as_key).as_deref() == Some(key))
    }

    /// `(column, value)` pairs of one row in column order.
    pub fn row_pairs(&self, row: usize) -> Vec<(String, CellValue)> {
        self.column_names
            .iter()
            .map(|c| (c.clone(), self.value(row, c).clone()))
            .collect()
    }

    /// Numeric cell. Blanks and non-numbers read as NaN, as in a float column.
    fn number(&self, row: usize, column: &str) -> f64 {
        let cell = self.value(row, column);
        cell.as_f64().unwrap_or_else(|| {
            if *cell != CellValue::Null {
                log::warn!("{}, row {row}: '{column}' is not a number ('{cell}')", self.name);
            }
            f64::NAN
        })
    }

    /// Label cell. Blanks read as an empty label.
    fn text(&self, row: usize, column: &str) -> String {
        self.value(row, column).as_key()
    }
}

// ---------------------------------------------------------------------------
// TrajectoryForecast – one typed row of trajectory_forecasts
// ---------------------------------------------------------------------------

/// Current NCRS plus its day-1/4/7 forecasts for one patient.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryForecast {
    pub patient_id: String,
    pub predicted_ncrs: f64,
    pub day1_ncrs: f64,
    pub day4_ncrs: f64,
    pub day7_ncrs: f64,
    pub risk_change: f64,
    pub predicted_risk_level: String,
    pub trajectory_risk: String,
}

impl TrajectoryForecast {
    /// Type every row of a trajectory table. Only a missing column is fatal;
    /// blank cells become NaN scores or empty labels and the row is kept.
    pub fn from_table(table: &Table) -> Result<Vec<Self>> {
        table.require_columns(&TRAJECTORY_COLUMNS)?;
        Ok((0..table.len())
            .map(|row| Self {
                patient_id: table.text(row, "patient_id"),
                predicted_ncrs: table.number(row, "predicted_ncrs"),
                day1_ncrs: table.number(row, "day1_ncrs"),
                day4_ncrs: table.number(row, "day4_ncrs"),
                day7_ncrs: table.number(row, "day7_ncrs"),
                risk_change: table.number(row, "risk_change"),
                predicted_risk_level: table.text(row, "predicted_risk_level"),
                trajectory_risk: table.text(row, "trajectory_risk"),
            })
            .collect())
    }

    /// `(day, ncrs)` points for the trajectory chart.
    pub fn points(&self) -> [[f64; 2]; 4] {
        [
            [0.0, self.predicted_ncrs],
            [1.0, self.day1_ncrs],
            [4.0, self.day4_ncrs],
            [7.0, self.day7_ncrs],
        ]
    }

    pub fn current_label(&self) -> String {
        format!("{:.0}%", self.predicted_ncrs)
    }

    pub fn current_delta_label(&self) -> String {
        format!("+{:.0}", self.risk_change)
    }

    pub fn day7_label(&self) -> String {
        format!("{:.0}%", self.day7_ncrs)
    }

    pub fn day7_delta_label(&self) -> String {
        format!("{:.0}", self.day7_ncrs - self.predicted_ncrs)
    }

    pub fn is_critical_trajectory(&self) -> bool {
        self.trajectory_risk == CRITICAL_TRAJECTORY
    }
}

// ---------------------------------------------------------------------------
// PatientTables – the three loaded inputs
// ---------------------------------------------------------------------------

/// Profiles, predictions and trajectory forecasts for the whole population.
#[derive(Debug, Clone)]
pub struct PatientTables {
    pub profiles: Table,
    pub predictions: Table,
    pub trajectories: Table,
    /// Typed view of `trajectories`, same row order.
    pub forecasts: Vec<TrajectoryForecast>,
}

impl PatientTables {
    pub fn new(profiles: Table, predictions: Table, trajectories: Table) -> Result<Self> {
        let forecasts = TrajectoryForecast::from_table(&trajectories)?;
        Ok(Self {
            profiles,
            predictions,
            trajectories,
            forecasts,
        })
    }

    /// Distinct patient ids in first-appearance order.
    pub fn patient_ids(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.forecasts
            .iter()
            .filter(|f| seen.insert(f.patient_id.as_str()))
            .map(|f| f.patient_id.clone())
            .collect()
    }

    /// First forecast row for a patient.
    pub fn trajectory_for(&self, patient_id: &str) -> Option<&TrajectoryForecast> {
        self.forecasts.iter().find(|f| f.patient_id == patient_id)
    }

    pub fn profile_for(&self, patient_id: &str) -> Option<Vec<(String, CellValue)>> {
        self.profiles
            .find_row("patient_id", patient_id)
            .map(|row| self.profiles.row_pairs(row))
    }

    pub fn prediction_for(&self, patient_id: &str) -> Option<Vec<(String, CellValue)>> {
        self.predictions
            .find_row("patient_id", patient_id)
            .map(|row| self.predictions.row_pairs(row))
    }
}
