use eframe::egui::{self, Color32, RichText, Ui};

use crate::care::{CarePlan, Severity};
use crate::color::{ncrs_color, CRITICAL_RED, MODERATE_AMBER, STABLE_GREEN};
use crate::data::CellValue;
use crate::state::AppState;
use crate::ui::plot::trajectory_plot;
use crate::ui::widgets::{callout, metric};

// ---------------------------------------------------------------------------
// Patient dashboard
// ---------------------------------------------------------------------------

pub fn patient_dashboard(ui: &mut Ui, state: &mut AppState) {
    ui.heading("NCRS-AI Patient Dashboard");

    let Some(tables) = &state.tables else {
        ui.label("Open a data folder to view patients  (File → Open data folder…)");
        return;
    };

    let ids = tables.patient_ids();
    if ids.is_empty() {
        ui.label("No patients");
        return;
    }

    let current = state.selected_patient.clone().unwrap_or_default();
    let mut chosen = current.clone();
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Select Patient:");
        egui::ComboBox::from_id_salt("patient_selector")
            .selected_text(&current)
            .show_ui(ui, |ui: &mut Ui| {
                for id in &ids {
                    ui.selectable_value(&mut chosen, id.clone(), id);
                }
            });
    });
    if chosen != current {
        state.select_patient(&chosen);
    }

    let Some(tables) = &state.tables else {
        return;
    };
    let Some(patient_id) = state.selected_patient.as_deref() else {
        return;
    };
    let Some(forecast) = tables.trajectory_for(patient_id) else {
        return;
    };

    ui.columns(2, |cols| {
        metric(
            &mut cols[0],
            "Current NCRS",
            &forecast.current_label(),
            Some(&forecast.current_delta_label()),
        );
        metric(
            &mut cols[1],
            "Predicted NCRS (Day 7)",
            &forecast.day7_label(),
            Some(&forecast.day7_delta_label()),
        );
    });

    ui.horizontal(|ui: &mut Ui| {
        ui.label(RichText::new("●").color(ncrs_color(forecast.predicted_ncrs)));
        ui.strong("Current Risk Level:");
        ui.label(&forecast.predicted_risk_level);
    });
    ui.label(format!("Trajectory: {}", forecast.trajectory_risk));

    ui.add_space(8.0);
    trajectory_plot(ui, forecast);

    ui.add_space(8.0);
    care_plan(ui, &CarePlan::for_ncrs(forecast.predicted_ncrs));

    ui.add_space(8.0);
    if let Some(profile) = tables.profile_for(patient_id) {
        record_section(ui, "Patient Profile", "profile_detail", &profile);
    }
    if let Some(prediction) = tables.prediction_for(patient_id) {
        record_section(ui, "NCRS Prediction", "prediction_detail", &prediction);
    }
}

fn care_plan(ui: &mut Ui, plan: &CarePlan) {
    ui.heading("Adaptive Care Plan");

    let color = match plan.severity {
        Severity::Critical => CRITICAL_RED,
        Severity::High => MODERATE_AMBER,
        Severity::Stable => STABLE_GREEN,
    };
    callout(ui, plan.banner, color);
    callout(ui, &format!("English: {}", plan.english), STABLE_GREEN);
    callout(ui, &format!("தமிழ்: {}", plan.tamil), Color32::LIGHT_BLUE);

    ui.columns(3, |cols| {
        cols[0].label(format!("Medication: {}", plan.medication));
        cols[1].label(format!("Diet: {}", plan.diet));
        cols[2].label(format!("Activity: {}", plan.activity));
    });
}

fn record_section(ui: &mut Ui, title: &str, id: &str, fields: &[(String, CellValue)]) {
    egui::CollapsingHeader::new(title)
        .id_salt(id)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new(format!("{id}_grid")).striped(true).show(ui, |ui: &mut Ui| {
                for (column, value) in fields {
                    ui.label(RichText::new(column).weak());
                    ui.label(value.to_string());
                    ui.end_row();
                }
            });
        });
}
