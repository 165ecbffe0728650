//! Command-line interface for `ncrs-dashboard`.
//!
//! Without a subcommand the dashboard window opens; `score` and `export` run
//! headless.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::data::loader::{DataSources, PREDICTIONS_FILE, PROFILES_FILE, TRAJECTORIES_FILE};
use crate::logging::Verbosity;
use crate::scoring::{Disease, Gender, IntakeForm};

/// NCRS-AI - Non-Compliance Risk Scoring for Chronic Disease Care
#[derive(Debug, Parser)]
#[command(name = "ncrs-dashboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory containing the patient tables
    #[arg(long, env = "NCRS_DATA_DIR", default_value = ".", global = true)]
    pub data_dir: PathBuf,

    /// Patient profile table, relative to the data directory
    #[arg(long, default_value = PROFILES_FILE, global = true)]
    pub profiles: PathBuf,

    /// NCRS prediction table, relative to the data directory
    #[arg(long, default_value = PREDICTIONS_FILE, global = true)]
    pub predictions: PathBuf,

    /// Trajectory forecast table, relative to the data directory
    #[arg(long, default_value = TRAJECTORIES_FILE, global = true)]
    pub trajectories: PathBuf,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score one patient from the command line
    Score(ScoreArgs),

    /// Write the full trajectory report as CSV
    Export {
        /// Output file
        #[arg(short, long, default_value = crate::data::export::REPORT_FILE_NAME)]
        output: PathBuf,
    },
}

#[derive(Debug, Clone, Args)]
pub struct ScoreArgs {
    #[arg(long, default_value_t = 65)]
    pub age: u32,

    /// Patient is female
    #[arg(long)]
    pub female: bool,

    /// Primary condition is hypertension (default diabetes)
    #[arg(long)]
    pub hypertension: bool,

    /// Medication adherence over the last 7 days, percent
    #[arg(long, default_value_t = 50.0)]
    pub adherence: f64,

    /// Average daily activity, minutes
    #[arg(long, default_value_t = 20)]
    pub activity: u32,

    /// Latest systolic blood pressure
    #[arg(long, default_value_t = 170)]
    pub bp: u32,

    /// Latest glucose, mg/dL
    #[arg(long, default_value_t = 220)]
    pub glucose: u32,

    /// Print the breakdown as JSON
    #[arg(long)]
    pub json: bool,
}

impl ScoreArgs {
    pub fn to_form(&self) -> IntakeForm {
        IntakeForm {
            age: self.age,
            gender: if self.female { Gender::Female } else { Gender::Male },
            disease: if self.hypertension {
                Disease::Hypertension
            } else {
                Disease::Diabetes
            },
            adherence_pct: self.adherence,
            activity_minutes: self.activity,
            systolic_bp: self.bp,
            glucose: self.glucose,
        }
    }
}

impl Cli {
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }

    /// Resolve table paths against the data directory.
    pub fn sources(&self) -> DataSources {
        DataSources {
            profiles: self.data_dir.join(&self.profiles),
            predictions: self.data_dir.join(&self.predictions),
            trajectories: self.data_dir.join(&self.trajectories),
        }
    }
}
