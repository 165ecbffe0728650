use std::collections::BTreeMap;
use std::fmt;

use super::model::TrajectoryForecast;

/// Levels offered by the risk filter before any found in the data.
pub const DEFAULT_LEVELS: [&str; 3] = ["Fragile", "Moderate", "Stable"];

// ---------------------------------------------------------------------------
// Risk filter: which predicted_risk_level is shown
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RiskFilter {
    #[default]
    All,
    Level(String),
}

impl RiskFilter {
    pub fn matches(&self, forecast: &TrajectoryForecast) -> bool {
        match self {
            RiskFilter::All => true,
            RiskFilter::Level(level) => forecast.predicted_risk_level == *level,
        }
    }
}

impl fmt::Display for RiskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskFilter::All => write!(f, "All"),
            RiskFilter::Level(level) => write!(f, "{level}"),
        }
    }
}

/// Filter choices: `All`, the default levels, then any other non-blank level in the data.
pub fn filter_options(forecasts: &[TrajectoryForecast]) -> Vec<RiskFilter> {
    let mut options = vec![RiskFilter::All];
    options.extend(DEFAULT_LEVELS.iter().map(|l| RiskFilter::Level(l.to_string())));
    for f in forecasts.iter().filter(|f| !f.predicted_risk_level.is_empty()) {
        let option = RiskFilter::Level(f.predicted_risk_level.clone());
        if !options.contains(&option) {
            options.push(option);
        }
    }
    options
}

/// Indices of forecast rows passing the filter, in table order.
pub fn filtered_indices(forecasts: &[TrajectoryForecast], filter: &RiskFilter) -> Vec<usize> {
    forecasts
        .iter()
        .enumerate()
        .filter(|(_, f)| filter.matches(f))
        .map(|(i, _)| i)
        .collect()
}

/// The `n` rows with the largest `day7_ncrs`, highest first.
/// Ties keep table order; rows without a day-7 score are not ranked.
pub fn top_by_day7(forecasts: &[TrajectoryForecast], indices: &[usize], n: usize) -> Vec<usize> {
    let mut ranked: Vec<usize> = indices
        .iter()
        .copied()
        .filter(|&i| !forecasts[i].day7_ncrs.is_nan())
        .collect();
    // stable sort: equal scores stay in table order
    ranked.sort_by(|&a, &b| forecasts[b].day7_ncrs.total_cmp(&forecasts[a].day7_ncrs));
    ranked.truncate(n);
    ranked
}

/// Row count per `predicted_risk_level`. Blank levels are not counted.
pub fn risk_distribution(
    forecasts: &[TrajectoryForecast],
    indices: &[usize],
) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for &i in indices {
        if forecasts[i].predicted_risk_level.is_empty() {
            continue;
        }
        *counts
            .entry(forecasts[i].predicted_risk_level.clone())
            .or_insert(0) += 1;
    }
    counts
}

/// First `n` rows on a critical trajectory, in table order.
pub fn critical_trajectories(
    forecasts: &[TrajectoryForecast],
    indices: &[usize],
    n: usize,
) -> Vec<usize> {
    indices
        .iter()
        .copied()
        .filter(|&i| forecasts[i].is_critical_trajectory())
        .take(n)
        .collect()
}
