use std::path::Path;

use crate::data::export::export_report;
use crate::data::filter::{filter_options, filtered_indices, RiskFilter};
use crate::data::loader::{load_tables, DataSources};
use crate::data::{DataError, PatientTables};
use crate::scoring::{IntakeForm, ScoreBreakdown};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Patient,
    Doctor,
}

impl View {
    pub const ALL: [View; 2] = [View::Patient, View::Doctor];

    pub fn label(&self) -> &'static str {
        match self {
            View::Patient => "Patient Dashboard",
            View::Doctor => "Doctor Dashboard",
        }
    }
}

/// A scored intake form, kept so the result stays on screen while the form is edited.
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeResult {
    pub form: IntakeForm,
    pub score: ScoreBreakdown,
}

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded tables (None until loading succeeds).
    pub tables: Option<PatientTables>,

    /// Where the tables were loaded from.
    pub sources: Option<DataSources>,

    pub view: View,

    /// Patient shown on the patient dashboard.
    pub selected_patient: Option<String>,

    /// Risk level shown on the doctor dashboard.
    pub risk_filter: RiskFilter,

    /// Indices of forecast rows passing `risk_filter` (cached).
    pub visible_indices: Vec<usize>,

    /// Values currently in the "New Patient Input" panel.
    pub intake: IntakeForm,

    /// Last "Calculate NCRS Score" result.
    pub intake_result: Option<IntakeResult>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load tables from `sources`; on failure keep the message and leave the
    /// previous tables and their sources in place.
    pub fn load(&mut self, sources: DataSources) {
        match load_tables(&sources) {
            Ok(tables) => {
                log::info!(
                    "Loaded {} trajectory forecasts for {} patients",
                    tables.forecasts.len(),
                    tables.patient_ids().len()
                );
                self.set_tables(tables);
                self.sources = Some(sources);
            }
            Err(e) => {
                log::error!("Failed to load patient tables: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest newly loaded tables, reset selection and filters.
    pub fn set_tables(&mut self, tables: PatientTables) {
        self.selected_patient = tables.patient_ids().into_iter().next();
        self.risk_filter = RiskFilter::All;
        self.visible_indices = (0..tables.forecasts.len()).collect();
        self.tables = Some(tables);
        self.status_message = None;
    }

    pub fn select_patient(&mut self, patient_id: &str) {
        let known = self
            .tables
            .as_ref()
            .is_some_and(|t| t.trajectory_for(patient_id).is_some());
        if known {
            self.selected_patient = Some(patient_id.to_string());
        } else {
            log::warn!("Ignoring selection of unknown patient '{patient_id}'");
        }
    }

    pub fn set_risk_filter(&mut self, filter: RiskFilter) {
        log::debug!("Risk filter set to {filter}");
        self.risk_filter = filter;
        self.refilter();
    }

    /// Recompute `visible_indices` after a filter change.
    pub fn refilter(&mut self) {
        if let Some(tables) = &self.tables {
            self.visible_indices = filtered_indices(&tables.forecasts, &self.risk_filter);
        }
    }

    pub fn risk_filter_options(&self) -> Vec<RiskFilter> {
        let forecasts = self
            .tables
            .as_ref()
            .map(|t| t.forecasts.as_slice())
            .unwrap_or_default();
        filter_options(forecasts)
    }

    /// Score the current intake form and remember the result.
    pub fn calculate_intake(&mut self) -> &IntakeResult {
        let form = self.intake.clamped();
        let score = form.score();
        log::info!(
            "Real-time NCRS {} ({}) for age {}, {} / {}",
            score.ncrs,
            score.risk_level(),
            form.age,
            form.gender.label(),
            form.disease.label()
        );
        self.intake_result.insert(IntakeResult { form, score })
    }

    /// Write the full trajectory table (unfiltered) to `path`.
    pub fn export_report_to(&mut self, path: &Path) -> Result<(), DataError> {
        let Some(tables) = &self.tables else {
            self.status_message = Some("No data loaded".to_string());
            return Ok(());
        };
        match export_report(&tables.trajectories, path) {
            Ok(()) => {
                self.status_message = Some(format!("Report saved to {}", path.display()));
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to export report: {e}");
                self.status_message = Some(format!("Error: {e}"));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::trajectory_table;
    use crate::data::model::{Table, CRITICAL_TRAJECTORY};

    fn loaded_state() -> AppState {
        let trajectories = trajectory_table(&[
            ("P7", 35.0, 48.0, "Moderate", "Rising"),
            ("P8", 72.0, 85.0, "Fragile", CRITICAL_TRAJECTORY),
        ]);
        let tables =
            PatientTables::new(Table::default(), Table::default(), trajectories).unwrap();
        let mut state = AppState::default();
        state.set_tables(tables);
        state
    }

    #[test]
    fn first_patient_is_selected_on_load() {
        let state = loaded_state();
        assert_eq!(state.selected_patient.as_deref(), Some("P7"));
        assert_eq!(state.visible_indices, vec![0, 1]);
    }

    #[test]
    fn unknown_patient_is_ignored() {
        let mut state = loaded_state();
        state.select_patient("P8");
        state.select_patient("nobody");
        assert_eq!(state.selected_patient.as_deref(), Some("P8"));
    }

    #[test]
    fn filter_updates_visible_rows() {
        let mut state = loaded_state();
        state.set_risk_filter(RiskFilter::Level("Fragile".into()));
        assert_eq!(state.visible_indices, vec![1]);
        state.set_risk_filter(RiskFilter::All);
        assert_eq!(state.visible_indices, vec![0, 1]);
    }

    #[test]
    fn intake_result_is_kept() {
        let mut state = AppState::default();
        state.intake.adherence_pct = 100.0;
        state.intake.activity_minutes = 60;
        state.intake.systolic_bp = 130;
        state.intake.glucose = 140;
        let ncrs = state.calculate_intake().score.ncrs;
        assert_eq!(ncrs, 8.0);
        assert_eq!(state.intake_result.as_ref().map(|r| r.score.ncrs), Some(8.0));
    }

    #[test]
    fn failed_load_keeps_message() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::default();
        state.load(DataSources::from_dir(dir.path()));
        assert!(state.tables.is_none());
        let message = state.status_message.unwrap();
        assert!(message.contains("patient_profiles.csv"), "{message}");
        assert!(state.sources.is_none());
    }

    #[test]
    fn failed_reload_keeps_previous_sources() {
        let good = tempfile::tempdir().unwrap();
        for (name, contents) in [
            ("patient_profiles.csv", "patient_id,age\nP7,61\n"),
            ("ncrs_predictions.csv", "patient_id,ncrs\nP7,35.0\n"),
            (
                "trajectory_forecasts.csv",
                "patient_id,predicted_ncrs,day1_ncrs,day4_ncrs,day7_ncrs,risk_change,predicted_risk_level,trajectory_risk\n\
                 P7,35.0,36.0,40.0,48.0,13.0,Moderate,Rising\n",
            ),
        ] {
            std::fs::write(good.path().join(name), contents).unwrap();
        }
        let empty = tempfile::tempdir().unwrap();

        let mut state = AppState::default();
        state.load(DataSources::from_dir(good.path()));
        assert!(state.tables.is_some());
        state.load(DataSources::from_dir(empty.path()));

        assert!(state.tables.is_some());
        assert!(state.status_message.is_some());
        let sources = state.sources.as_ref().unwrap();
        assert!(sources.trajectories.starts_with(good.path()));
    }

    #[test]
    fn options_without_data_are_defaults() {
        let labels: Vec<String> = AppState::default()
            .risk_filter_options()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(labels, vec!["All", "Fragile", "Moderate", "Stable"]);
    }
}
