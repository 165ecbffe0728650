use eframe::egui::{Color32, RichText, Ui};

use crate::color::{CRITICAL_RED, STABLE_GREEN};

/// A dashboard metric: caption, large value, optional signed delta.
pub fn metric(ui: &mut Ui, label: &str, value: &str, delta: Option<&str>) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).weak());
        ui.label(RichText::new(value).size(26.0).strong());
        if let Some(delta) = delta {
            ui.label(RichText::new(delta).color(delta_color(delta)));
        }
    });
}

fn delta_color(delta: &str) -> Color32 {
    if delta.starts_with('-') {
        CRITICAL_RED
    } else {
        STABLE_GREEN
    }
}

/// Coloured callout box used for care plan banners.
pub fn callout(ui: &mut Ui, text: &str, color: Color32) {
    eframe::egui::Frame::group(ui.style())
        .fill(color.gamma_multiply(0.15))
        .stroke((1.0, color))
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(text).strong().color(color));
        });
}
