use eframe::egui::{self, Color32, RichText, Ui};

use crate::care::urgent_alert;
use crate::color::{ncrs_color, CRITICAL_RED};
use crate::data::export::REPORT_FILE_NAME;
use crate::data::loader::DataSources;
use crate::scoring::{
    Disease, Gender, ACTIVITY_RANGE, ADHERENCE_RANGE, AGE_RANGE, GLUCOSE_RANGE,
    SYSTOLIC_BP_RANGE,
};
use crate::state::{AppState, View};
use crate::ui::widgets::metric;

pub const FOOTER: &str = "NCRS-AI: Non-Compliance Risk Scoring for Chronic Disease Care";

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.tables.is_some(), egui::Button::new("Export report…"))
                .clicked()
            {
                save_report_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(tables) = &state.tables {
            ui.label(format!(
                "{} patients, {} forecasts",
                tables.patient_ids().len(),
                tables.forecasts.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                ui.visuals().text_color()
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – view selector
// ---------------------------------------------------------------------------

pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("NCRS-AI");
    ui.separator();

    ui.strong("Choose View:");
    egui::ComboBox::from_id_salt("view_selector")
        .selected_text(state.view.label())
        .show_ui(ui, |ui: &mut Ui| {
            for view in View::ALL {
                ui.selectable_value(&mut state.view, view, view.label());
            }
        });

    if let Some(sources) = &state.sources {
        ui.separator();
        ui.small("Data files");
        for path in [&sources.profiles, &sources.predictions, &sources.trajectories] {
            ui.small(path.display().to_string());
        }
    }
}

// ---------------------------------------------------------------------------
// New patient input
// ---------------------------------------------------------------------------

/// The collapsible real-time scoring form.
pub fn intake_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("New Patient Input");
    egui::CollapsingHeader::new("Enter Patient Data for Real-Time Analysis")
        .id_salt("intake_form")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            let form = &mut state.intake;
            ui.columns(2, |cols| {
                let left = &mut cols[0];
                left.horizontal(|ui: &mut Ui| {
                    ui.label("Age");
                    ui.add(egui::DragValue::new(&mut form.age).range(AGE_RANGE));
                });
                left.horizontal(|ui: &mut Ui| {
                    ui.label("Gender");
                    egui::ComboBox::from_id_salt("intake_gender")
                        .selected_text(form.gender.label())
                        .show_ui(ui, |ui: &mut Ui| {
                            for g in Gender::ALL {
                                ui.selectable_value(&mut form.gender, g, g.label());
                            }
                        });
                });
                left.horizontal(|ui: &mut Ui| {
                    ui.label("Disease");
                    egui::ComboBox::from_id_salt("intake_disease")
                        .selected_text(form.disease.label())
                        .show_ui(ui, |ui: &mut Ui| {
                            for d in Disease::ALL {
                                ui.selectable_value(&mut form.disease, d, d.label());
                            }
                        });
                });

                let right = &mut cols[1];
                right.add(
                    egui::Slider::new(&mut form.adherence_pct, ADHERENCE_RANGE)
                        .text("Medication Adherence (Last 7 days %)"),
                );
                right.add(
                    egui::Slider::new(&mut form.activity_minutes, ACTIVITY_RANGE)
                        .text("Avg Daily Activity (minutes)"),
                );
                right.horizontal(|ui: &mut Ui| {
                    ui.label("Latest BP (Systolic)");
                    ui.add(egui::DragValue::new(&mut form.systolic_bp).range(SYSTOLIC_BP_RANGE));
                });
                right.horizontal(|ui: &mut Ui| {
                    ui.label("Latest Glucose (mg/dL)");
                    ui.add(egui::DragValue::new(&mut form.glucose).range(GLUCOSE_RANGE));
                });
            });

            if ui
                .button(RichText::new("Calculate NCRS Score").strong())
                .clicked()
            {
                state.calculate_intake();
            }

            if let Some(result) = &state.intake_result {
                let ncrs = result.score.ncrs;
                ui.label(
                    RichText::new(format!("Real-Time NCRS: {ncrs}%"))
                        .strong()
                        .color(ncrs_color(ncrs)),
                );
                ui.horizontal(|ui: &mut Ui| {
                    ui.strong("Risk Level:");
                    ui.label(
                        RichText::new(result.score.risk_level().as_str())
                            .color(ncrs_color(ncrs)),
                    );
                });
                if let Some(alert) = urgent_alert(ncrs) {
                    ui.label(RichText::new(alert.message).strong().color(CRITICAL_RED));
                    ui.label(format!("தமிழ்: {}", alert.tamil));
                }
                ui.columns(3, |cols| {
                    metric(&mut cols[0], "Age", &result.form.age.to_string(), None);
                    metric(&mut cols[1], "Activity", &result.form.activity_label(), None);
                    metric(&mut cols[2], "Health", &result.form.health_label(), None);
                });
            }
        });
}

pub fn footer(ui: &mut Ui) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(FOOTER).italics().weak());
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open NCRS data folder")
        .pick_folder();

    if let Some(dir) = folder {
        state.load(DataSources::from_dir(&dir));
    }
}

pub fn save_report_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Download full report")
        .add_filter("CSV", &["csv"])
        .set_file_name(REPORT_FILE_NAME)
        .save_file();

    if let Some(path) = file {
        // failure is already logged and surfaced in the status bar
        let _ = state.export_report_to(&path);
    }
}
