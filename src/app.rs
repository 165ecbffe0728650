use eframe::egui;

use crate::state::{AppState, View};
use crate::ui::{doctor, panels, patient};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct NcrsApp {
    pub state: AppState,
}

impl NcrsApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for NcrsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Bottom panel: footer ----
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            panels::footer(ui);
        });

        // ---- Left side panel: view selector ----
        egui::SidePanel::left("view_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: intake form + selected dashboard ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    panels::intake_panel(ui, &mut self.state);
                    ui.separator();
                    match self.state.view {
                        View::Patient => patient::patient_dashboard(ui, &mut self.state),
                        View::Doctor => doctor::doctor_dashboard(ui, &mut self.state),
                    }
                });
        });
    }
}
