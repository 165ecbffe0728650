use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::scoring::RiskLevel;

pub const STABLE_GREEN: Color32 = Color32::from_rgb(46, 160, 67);
pub const MODERATE_AMBER: Color32 = Color32::from_rgb(230, 170, 20);
pub const CRITICAL_RED: Color32 = Color32::from_rgb(215, 48, 39);
pub const TREND_ORANGE: Color32 = Color32::from_rgb(255, 140, 0);

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

pub fn risk_color(level: RiskLevel) -> Color32 {
    match level {
        RiskLevel::Stable => STABLE_GREEN,
        RiskLevel::Moderate => MODERATE_AMBER,
        RiskLevel::Critical => CRITICAL_RED,
    }
}

/// Colour for a score by its band.
pub fn ncrs_color(ncrs: f64) -> Color32 {
    risk_color(RiskLevel::classify(ncrs))
}

fn known_label_color(label: &str) -> Option<Color32> {
    match label {
        "Stable" => Some(STABLE_GREEN),
        "Moderate" => Some(MODERATE_AMBER),
        "Fragile" | "Critical" => Some(CRITICAL_RED),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Risk label → Color32
// ---------------------------------------------------------------------------

/// Maps risk level labels to colours: fixed colours for the known bands,
/// distinct generated hues for anything else.
#[derive(Debug, Clone)]
pub struct LevelColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl LevelColors {
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a String>) -> Self {
        let labels: Vec<&String> = labels.into_iter().collect();
        let unknown: Vec<&String> = labels
            .iter()
            .copied()
            .filter(|l| known_label_color(l).is_none())
            .collect();
        let mut generated = generate_palette(unknown.len()).into_iter();

        let mapping = labels
            .iter()
            .map(|l| {
                let color = known_label_color(l)
                    .or_else(|| generated.next())
                    .unwrap_or(Color32::GRAY);
                ((*l).clone(), color)
            })
            .collect();

        LevelColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}
