use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::ncrs_color;
use crate::data::filter::{critical_trajectories, risk_distribution, top_by_day7};
use crate::state::AppState;
use crate::ui::panels::save_report_dialog;
use crate::ui::plot::{critical_bars, risk_pie};

/// Rows shown in the highest-risk table and the critical bar chart.
pub const TOP_N: usize = 10;

const TOP_COLUMNS: [&str; 6] = [
    "patient_id",
    "predicted_ncrs",
    "day7_ncrs",
    "risk_change",
    "trajectory_risk",
    "predicted_risk_level",
];

// ---------------------------------------------------------------------------
// Doctor dashboard
// ---------------------------------------------------------------------------

pub fn doctor_dashboard(ui: &mut Ui, state: &mut AppState) {
    ui.heading("NCRS-AI Doctor Dashboard");

    if state.tables.is_none() {
        ui.label("Open a data folder to view patients  (File → Open data folder…)");
        return;
    }

    let options = state.risk_filter_options();
    let mut chosen = state.risk_filter.clone();
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Filter by Risk:");
        egui::ComboBox::from_id_salt("risk_filter")
            .selected_text(chosen.to_string())
            .show_ui(ui, |ui: &mut Ui| {
                for option in &options {
                    let label = option.to_string();
                    ui.selectable_value(&mut chosen, option.clone(), label);
                }
            });
    });
    if chosen != state.risk_filter {
        state.set_risk_filter(chosen);
    }

    let Some(tables) = &state.tables else {
        return;
    };
    let forecasts = &tables.forecasts;
    let visible = &state.visible_indices;

    ui.add_space(8.0);
    ui.heading("Top 10 Highest Risk Patients");
    let top = top_by_day7(forecasts, visible, TOP_N);
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .vscroll(false)
        .column(Column::auto().at_least(80.0))
        .columns(Column::remainder().at_least(90.0), TOP_COLUMNS.len() - 1)
        .header(22.0, |mut header| {
            for name in TOP_COLUMNS {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|mut body| {
            for &i in &top {
                let f = &forecasts[i];
                body.row(20.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(&f.patient_id);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(
                            RichText::new(format!("{:.1}", f.predicted_ncrs))
                                .color(ncrs_color(f.predicted_ncrs)),
                        );
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(
                            RichText::new(format!("{:.1}", f.day7_ncrs))
                                .color(ncrs_color(f.day7_ncrs)),
                        );
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format!("{:.1}", f.risk_change));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(&f.trajectory_risk);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(&f.predicted_risk_level);
                    });
                });
            }
        });

    ui.add_space(8.0);
    let counts = risk_distribution(forecasts, visible);
    let critical = critical_trajectories(forecasts, visible, TOP_N);
    ui.columns(2, |cols| {
        risk_pie(&mut cols[0], &counts);
        if !critical.is_empty() {
            critical_bars(&mut cols[1], forecasts, &critical);
        }
    });

    ui.add_space(8.0);
    if ui.button("Download Full Report").clicked() {
        save_report_dialog(state);
    }
}
