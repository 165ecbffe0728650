//! Heuristic NCRS for ad-hoc patient input.
//!
//! ```text
//! medication = (1 - adherence) * 100
//! activity   = max(0, (60 - minutes) / 60 * 100)
//! health     = clamp((|bp - 130| / 20 + |glucose - 140| / 40) * 30, 10, 80)
//! diet       = 25
//! ncrs       = round1(0.35 medication + 0.20 diet + 0.15 activity + 0.30 health)
//! ```

use std::fmt;
use std::ops::RangeInclusive;

use serde::Serialize;

pub const MEDICATION_WEIGHT: f64 = 0.35;
pub const DIET_WEIGHT: f64 = 0.20;
pub const ACTIVITY_WEIGHT: f64 = 0.15;
pub const HEALTH_WEIGHT: f64 = 0.30;

/// Placeholder until dietary data is collected.
pub const DIET_SCORE: f64 = 25.0;

/// Upper bound (inclusive) of the Stable band.
pub const STABLE_MAX: f64 = 30.0;
/// Upper bound (inclusive) of the Moderate band.
pub const MODERATE_MAX: f64 = 60.0;

pub const AGE_RANGE: RangeInclusive<u32> = 18..=100;
pub const ADHERENCE_RANGE: RangeInclusive<f64> = 0.0..=100.0;
pub const ACTIVITY_RANGE: RangeInclusive<u32> = 0..=120;
pub const SYSTOLIC_BP_RANGE: RangeInclusive<u32> = 90..=200;
pub const GLUCOSE_RANGE: RangeInclusive<u32> = 70..=300;

// ---------------------------------------------------------------------------
// Risk level
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    Stable,
    Moderate,
    Critical,
}

impl RiskLevel {
    pub fn classify(ncrs: f64) -> Self {
        if ncrs <= STABLE_MAX {
            RiskLevel::Stable
        } else if ncrs <= MODERATE_MAX {
            RiskLevel::Moderate
        } else {
            RiskLevel::Critical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Stable => "Stable",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::Critical => "Critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Score
// ---------------------------------------------------------------------------

/// Component scores and the weighted total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub medication: f64,
    pub diet: f64,
    pub activity: f64,
    pub health: f64,
    pub ncrs: f64,
}

impl ScoreBreakdown {
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::classify(self.ncrs)
    }

    /// The breakdown plus its risk level as a pretty-printed JSON object.
    pub fn to_json(&self) -> serde_json::Result<String> {
        #[derive(Serialize)]
        struct Report<'a> {
            #[serde(flatten)]
            score: &'a ScoreBreakdown,
            risk_level: RiskLevel,
        }

        serde_json::to_string_pretty(&Report {
            score: self,
            risk_level: self.risk_level(),
        })
    }
}

/// Round to one decimal place from the exact binary value, ties to even.
/// `60.05` is stored as `60.0499..` and rounds to `60.0`.
pub fn round1(x: f64) -> f64 {
    format!("{x:.1}").parse().unwrap_or(x)
}

/// Score one set of readings. `adherence` is a fraction in `[0, 1]`.
pub fn score(adherence: f64, activity_minutes: f64, systolic_bp: f64, glucose: f64) -> ScoreBreakdown {
    let medication = (1.0 - adherence) * 100.0;
    let activity = ((60.0 - activity_minutes) / 60.0 * 100.0).max(0.0);
    let deviation = (systolic_bp - 130.0).abs() / 20.0 + (glucose - 140.0).abs() / 40.0;
    let health = (deviation * 30.0).clamp(10.0, 80.0);
    let diet = DIET_SCORE;

    let ncrs = round1(
        MEDICATION_WEIGHT * medication
            + DIET_WEIGHT * diet
            + ACTIVITY_WEIGHT * activity
            + HEALTH_WEIGHT * health,
    );

    ScoreBreakdown {
        medication,
        diet,
        activity,
        health,
        ncrs,
    }
}

// ---------------------------------------------------------------------------
// Intake form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Disease {
    #[default]
    Diabetes,
    Hypertension,
}

impl Disease {
    pub const ALL: [Disease; 2] = [Disease::Diabetes, Disease::Hypertension];

    pub fn label(&self) -> &'static str {
        match self {
            Disease::Diabetes => "Diabetes",
            Disease::Hypertension => "Hypertension",
        }
    }
}

/// Ad-hoc patient readings entered in the "New Patient Input" panel.
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeForm {
    pub age: u32,
    pub gender: Gender,
    pub disease: Disease,
    /// Medication adherence over the last 7 days, percent.
    pub adherence_pct: f64,
    pub activity_minutes: u32,
    pub systolic_bp: u32,
    /// mg/dL
    pub glucose: u32,
}

impl Default for IntakeForm {
    fn default() -> Self {
        Self {
            age: 65,
            gender: Gender::Male,
            disease: Disease::Diabetes,
            adherence_pct: 50.0,
            activity_minutes: 20,
            systolic_bp: 170,
            glucose: 220,
        }
    }
}

fn clamp_to<T: PartialOrd + Copy>(value: T, range: &RangeInclusive<T>) -> T {
    if value < *range.start() {
        *range.start()
    } else if value > *range.end() {
        *range.end()
    } else {
        value
    }
}

impl IntakeForm {
    /// Copy of the form with every field inside its input range.
    pub fn clamped(&self) -> Self {
        let adherence_pct = if self.adherence_pct.is_nan() {
            *ADHERENCE_RANGE.start()
        } else {
            clamp_to(self.adherence_pct, &ADHERENCE_RANGE)
        };
        Self {
            age: clamp_to(self.age, &AGE_RANGE),
            adherence_pct,
            activity_minutes: clamp_to(self.activity_minutes, &ACTIVITY_RANGE),
            systolic_bp: clamp_to(self.systolic_bp, &SYSTOLIC_BP_RANGE),
            glucose: clamp_to(self.glucose, &GLUCOSE_RANGE),
            ..self.clone()
        }
    }

    pub fn adherence_fraction(&self) -> f64 {
        self.adherence_pct / 100.0
    }

    pub fn score(&self) -> ScoreBreakdown {
        let form = self.clamped();
        score(
            form.adherence_fraction(),
            form.activity_minutes as f64,
            form.systolic_bp as f64,
            form.glucose as f64,
        )
    }

    pub fn activity_label(&self) -> String {
        format!("{}min", self.activity_minutes)
    }

    pub fn health_label(&self) -> String {
        format!("BP:{} G:{}", self.systolic_bp, self.glucose)
    }
}
