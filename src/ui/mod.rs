//! egui rendering. Every function here reads or mutates [`crate::state::AppState`]
//! and draws; no data logic lives in this module.

pub mod doctor;
pub mod panels;
pub mod patient;
pub mod plot;
pub mod widgets;
