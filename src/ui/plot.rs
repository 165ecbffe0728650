use std::collections::BTreeMap;
use std::f64::consts::TAU;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, HLine, Legend, Line, LineStyle, Plot, PlotPoint, PlotPoints, Points, Polygon,
    Text,
};

use crate::color::{LevelColors, CRITICAL_RED, STABLE_GREEN, TREND_ORANGE};
use crate::data::TrajectoryForecast;
use crate::scoring::{MODERATE_MAX, STABLE_MAX};

const PIE_SEGMENTS_PER_TURN: f64 = 120.0;

// ---------------------------------------------------------------------------
// Trajectory line chart (patient dashboard)
// ---------------------------------------------------------------------------

/// Current → day 7 NCRS with the CRITICAL and SAFE reference lines.
pub fn trajectory_plot(ui: &mut Ui, forecast: &TrajectoryForecast) {
    ui.strong("Current → Predicted NCRS Trajectory");

    let points = forecast.points();

    Plot::new("trajectory_plot")
        .height(400.0)
        .legend(Legend::default())
        .x_axis_label("Days")
        .y_axis_label("NCRS %")
        .include_x(0.0)
        .include_x(7.0)
        .include_y(0.0)
        .include_y(100.0)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            let line_points: PlotPoints = points.iter().copied().collect();
            plot_ui.line(
                Line::new(line_points)
                    .name("NCRS Trend")
                    .color(TREND_ORANGE)
                    .width(3.0),
            );
            let markers: PlotPoints = points.iter().copied().collect();
            plot_ui.points(Points::new(markers).radius(5.0).color(TREND_ORANGE));

            plot_ui.hline(
                HLine::new(MODERATE_MAX)
                    .name("CRITICAL")
                    .color(CRITICAL_RED)
                    .style(LineStyle::dashed_loose()),
            );
            plot_ui.hline(
                HLine::new(STABLE_MAX)
                    .name("SAFE")
                    .color(STABLE_GREEN)
                    .style(LineStyle::dashed_loose()),
            );
        });
}

// ---------------------------------------------------------------------------
// Risk distribution pie chart (doctor dashboard)
// ---------------------------------------------------------------------------

/// One pie slice; angles in radians, starting at 12 o'clock, clockwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub count: usize,
    pub start: f64,
    pub end: f64,
}

impl Slice {
    pub fn fraction(&self) -> f64 {
        (self.end - self.start) / TAU
    }

    /// Polygon outline: centre, then arc points.
    fn outline(&self, radius: f64) -> Vec<[f64; 2]> {
        let sweep = self.end - self.start;
        let steps = ((sweep / TAU) * PIE_SEGMENTS_PER_TURN).ceil().max(1.0) as usize;
        let mut pts = Vec::with_capacity(steps + 2);
        pts.push([0.0, 0.0]);
        for i in 0..=steps {
            let angle = self.start + sweep * i as f64 / steps as f64;
            pts.push(polar(radius, angle));
        }
        pts
    }
}

fn polar(radius: f64, angle: f64) -> [f64; 2] {
    [radius * angle.sin(), radius * angle.cos()]
}

/// Split a full turn proportionally to the counts. Zero counts are dropped.
pub fn pie_slices(counts: &BTreeMap<String, usize>) -> Vec<Slice> {
    let total: usize = counts.values().sum();
    if total == 0 {
        return Vec::new();
    }
    let mut start = 0.0;
    counts
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(label, &count)| {
            let end = start + TAU * count as f64 / total as f64;
            let slice = Slice {
                label: label.clone(),
                count,
                start,
                end,
            };
            start = end;
            slice
        })
        .collect()
}

pub fn risk_pie(ui: &mut Ui, counts: &BTreeMap<String, usize>) {
    ui.strong("Risk Distribution");

    let slices = pie_slices(counts);
    if slices.is_empty() {
        ui.label("No patients match the filter.");
        return;
    }
    let colors = LevelColors::new(counts.keys());

    Plot::new("risk_pie")
        .height(320.0)
        .data_aspect(1.0)
        .legend(Legend::default())
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for slice in &slices {
                let color = colors.color_for(&slice.label);
                let outline: PlotPoints = slice.outline(1.0).into_iter().collect();
                plot_ui.polygon(
                    Polygon::new(outline)
                        .name(&slice.label)
                        .fill_color(color)
                        .stroke(Stroke::new(1.0, Color32::WHITE)),
                );

                let mid = polar(0.62, (slice.start + slice.end) / 2.0);
                plot_ui.text(Text::new(
                    PlotPoint::new(mid[0], mid[1]),
                    RichText::new(format!("{:.1}%", slice.fraction() * 100.0))
                        .color(Color32::WHITE)
                        .strong(),
                ));
            }
        });
}

// ---------------------------------------------------------------------------
// Critical trajectory bar chart (doctor dashboard)
// ---------------------------------------------------------------------------

pub fn critical_bars(ui: &mut Ui, forecasts: &[TrajectoryForecast], rows: &[usize]) {
    ui.strong("Critical Trajectory Patients");

    let labels: Vec<String> = rows
        .iter()
        .map(|&i| forecasts[i].patient_id.clone())
        .collect();
    let bars: Vec<Bar> = rows
        .iter()
        .enumerate()
        .map(|(x, &i)| {
            Bar::new(x as f64, forecasts[i].day7_ncrs)
                .name(&forecasts[i].patient_id)
                .width(0.7)
        })
        .collect();

    Plot::new("critical_bars")
        .height(320.0)
        .x_axis_label("patient_id")
        .y_axis_label("day7_ncrs")
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(CRITICAL_RED).name("day7_ncrs"));
        });
}
