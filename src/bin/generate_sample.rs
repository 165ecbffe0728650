use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use ncrs_dashboard::data::loader::{PREDICTIONS_FILE, PROFILES_FILE, TRAJECTORIES_FILE};
use ncrs_dashboard::scoring::{round1, score};

/// Write deterministic sample patient tables for the dashboard.
#[derive(Debug, Parser)]
struct Args {
    /// Output directory
    #[arg(default_value = ".")]
    out_dir: PathBuf,

    /// Number of patients
    #[arg(short, long, default_value_t = 120)]
    patients: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    fn int(&mut self, lo: u32, hi: u32) -> u32 {
        lo + (self.next_u64() % u64::from(hi - lo + 1)) as u32
    }
}

struct Patient {
    id: String,
    age: u32,
    gender: u32,
    disease: u32,
    adherence: f64,
    activity: u32,
    bp: u32,
    glucose: u32,
}

fn risk_level(ncrs: f64) -> &'static str {
    if ncrs <= 30.0 {
        "Stable"
    } else if ncrs <= 60.0 {
        "Moderate"
    } else {
        "Fragile"
    }
}

fn trajectory_label(current: f64, day7: f64) -> &'static str {
    if day7 > 60.0 && day7 > current {
        "Critical Trajectory"
    } else if day7 > current + 5.0 {
        "Rising Risk"
    } else if day7 < current - 5.0 {
        "Improving"
    } else {
        "Stable Trajectory"
    }
}

fn csv_writer(dir: &Path, name: &str) -> Result<csv::Writer<std::fs::File>> {
    let path = dir.join(name);
    csv::Writer::from_path(&path).with_context(|| format!("creating {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let patients: Vec<Patient> = (0..args.patients)
        .map(|i| Patient {
            id: format!("P{:04}", i + 1),
            age: rng.int(30, 90),
            gender: rng.int(0, 1),
            disease: rng.int(0, 1),
            adherence: round1(rng.range(0.2, 1.0)),
            activity: rng.int(0, 90),
            bp: rng.int(105, 195),
            glucose: rng.int(85, 290),
        })
        .collect();

    let mut profiles = csv_writer(&args.out_dir, PROFILES_FILE)?;
    profiles.write_record([
        "patient_id",
        "age",
        "gender",
        "disease_type",
        "med_adherence_7d",
        "avg_daily_activity_min",
        "latest_bp_systolic",
        "latest_glucose",
    ])?;

    let mut predictions = csv_writer(&args.out_dir, PREDICTIONS_FILE)?;
    predictions.write_record([
        "patient_id",
        "medication_score",
        "activity_score",
        "health_score",
        "predicted_ncrs",
        "predicted_risk_level",
    ])?;

    let mut trajectories = csv_writer(&args.out_dir, TRAJECTORIES_FILE)?;
    trajectories.write_record([
        "patient_id",
        "predicted_ncrs",
        "day1_ncrs",
        "day4_ncrs",
        "day7_ncrs",
        "risk_change",
        "predicted_risk_level",
        "trajectory_risk",
    ])?;

    for p in &patients {
        profiles.write_record([
            p.id.clone(),
            p.age.to_string(),
            p.gender.to_string(),
            p.disease.to_string(),
            p.adherence.to_string(),
            p.activity.to_string(),
            p.bp.to_string(),
            p.glucose.to_string(),
        ])?;

        let s = score(p.adherence, p.activity as f64, p.bp as f64, p.glucose as f64);
        let level = risk_level(s.ncrs);
        predictions.write_record([
            p.id.clone(),
            format!("{:.1}", s.medication),
            format!("{:.1}", s.activity),
            format!("{:.1}", s.health),
            s.ncrs.to_string(),
            level.to_string(),
        ])?;

        // drift per day, biased towards deterioration for poor adherence
        let drift = rng.range(-2.5, 2.5) + (0.6 - p.adherence) * 3.0;
        let at = |day: f64| round1((s.ncrs + drift * day).clamp(0.0, 100.0));
        let day7 = at(7.0);
        trajectories.write_record([
            p.id.clone(),
            s.ncrs.to_string(),
            at(1.0).to_string(),
            at(4.0).to_string(),
            day7.to_string(),
            round1(day7 - s.ncrs).to_string(),
            level.to_string(),
            trajectory_label(s.ncrs, day7).to_string(),
        ])?;
    }

    profiles.flush()?;
    predictions.flush()?;
    trajectories.flush()?;

    println!(
        "Wrote {} patients to {}",
        patients.len(),
        args.out_dir.display()
    );
    Ok(())
}
