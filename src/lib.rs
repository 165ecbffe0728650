//! NCRS-AI dashboard: non-compliance risk scoring for chronic disease care.
//!
//! Loads precomputed patient trajectory forecasts, scores ad-hoc patient
//! input with a fixed heuristic, and renders patient and doctor views with
//! egui.

pub mod app;
pub mod care;
pub mod cli;
pub mod color;
pub mod data;
pub mod logging;
pub mod scoring;
pub mod state;
pub mod ui;
