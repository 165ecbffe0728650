//! Adaptive care plan text, chosen by NCRS band.

use crate::scoring::{MODERATE_MAX, STABLE_MAX};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Stable,
    High,
    Critical,
}

/// Bilingual guidance plus the three per-area actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarePlan {
    pub severity: Severity,
    pub banner: &'static str,
    pub english: &'static str,
    pub tamil: &'static str,
    pub medication: &'static str,
    pub diet: &'static str,
    pub activity: &'static str,
}

const CRITICAL_PLAN: CarePlan = CarePlan {
    severity: Severity::Critical,
    banner: "CRITICAL - Doctor consultation required!",
    english: "Take ALL medications TODAY. Call doctor.",
    tamil: "இன்றே அனைத்து மருந்துகளையும் எடுத்துக்கொள்ளுங்கள். மருத்துவரை அழைக்கவும்!",
    medication: "Take ALL doses TODAY. Call doctor.",
    diet: "Strict low-carb diet. No sweets.",
    activity: "30min walk TODAY. Emergency.",
};

const HIGH_PLAN: CarePlan = CarePlan {
    severity: Severity::High,
    banner: "HIGH RISK - Extra caution needed!",
    english: "Double-check ALL medications this week.",
    tamil: "இந்த வாரம் அனைத்து மருந்துகளையும் இரட்டிப்பு சரிபார்க்கவும்!",
    medication: "Double-check ALL doses.",
    diet: "Reduce salt/sugar by 50%.",
    activity: "45min daily walk M-F.",
};

const STABLE_PLAN: CarePlan = CarePlan {
    severity: Severity::Stable,
    banner: "STABLE - Excellent compliance!",
    english: "Great job! Keep it up!",
    tamil: "சிறப்பாக செய்கிறீர்கள்! தொடருங்கள்!",
    medication: "Continue current doses.",
    diet: "Maintain healthy diet.",
    activity: "30min daily walk.",
};

impl CarePlan {
    pub fn for_ncrs(ncrs: f64) -> Self {
        if ncrs > MODERATE_MAX {
            CRITICAL_PLAN
        } else if ncrs > STABLE_MAX {
            HIGH_PLAN
        } else {
            STABLE_PLAN
        }
    }
}

/// Alert shown under a real-time score above the Moderate band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrgentAlert {
    pub message: &'static str,
    pub tamil: &'static str,
}

pub fn urgent_alert(ncrs: f64) -> Option<UrgentAlert> {
    (ncrs > MODERATE_MAX).then_some(UrgentAlert {
        message: "CRITICAL - Contact doctor immediately!",
        tamil: "உடனடியாக மருத்துவரை அணுகவும்!",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_follows_bands() {
        assert_eq!(CarePlan::for_ncrs(75.0).severity, Severity::Critical);
        assert_eq!(CarePlan::for_ncrs(60.0).severity, Severity::High);
        assert_eq!(CarePlan::for_ncrs(30.5).severity, Severity::High);
        assert_eq!(CarePlan::for_ncrs(30.0).severity, Severity::Stable);
        assert_eq!(CarePlan::for_ncrs(0.0).diet, "Maintain healthy diet.");
    }

    #[test]
    fn high_plan_actions() {
        let plan = CarePlan::for_ncrs(45.0);
        assert_eq!(plan.medication, "Double-check ALL doses.");
        assert_eq!(plan.activity, "45min daily walk M-F.");
    }

    #[test]
    fn alert_only_above_sixty() {
        assert!(urgent_alert(60.0).is_none());
        assert!(urgent_alert(60.1).is_some());
    }
}
