/// Data layer: table types, loading, filtering and export.
///
/// Architecture:
/// ```text
///  patient_profiles / ncrs_predictions / trajectory_forecasts
///        (.csv / .json / .parquet)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse files → Table ×3
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ PatientTables  │  typed TrajectoryForecast rows, patient index
///   └───────────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌──────────┐
///   │  filter   │   │  export   │  full report → CSV
///   └──────────┘   └──────────┘
///   risk level → indices, top-N, distribution
/// ```

pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;

#[cfg(test)]
pub(crate) mod fixtures;

pub use error::DataError;
pub use model::{CellValue, PatientTables, Table, TrajectoryForecast};
