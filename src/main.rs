use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;

use ncrs_dashboard::app::NcrsApp;
use ncrs_dashboard::care::urgent_alert;
use ncrs_dashboard::cli::{Cli, Command, ScoreArgs};
use ncrs_dashboard::data::export::export_report;
use ncrs_dashboard::data::loader::{load_tables, DataSources};
use ncrs_dashboard::logging::init_logging;
use ncrs_dashboard::state::AppState;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity());

    let sources = cli.sources();
    match &cli.command {
        None => run_dashboard(sources),
        Some(Command::Score(args)) => print_score(args),
        Some(Command::Export { output }) => {
            let tables = load_tables(&sources).context("loading patient tables")?;
            export_report(&tables.trajectories, output)
                .with_context(|| format!("writing {}", output.display()))?;
            println!("Wrote {} rows to {}", tables.trajectories.len(), output.display());
            Ok(())
        }
    }
}

fn print_score(args: &ScoreArgs) -> Result<()> {
    let form = args.to_form().clamped();
    let score = form.score();
    log::debug!("Scored intake {form:?}: {}", score.ncrs);
    if args.json {
        println!("{}", score.to_json().context("serializing score")?);
        return Ok(());
    }
    println!("Real-Time NCRS: {}%", score.ncrs);
    println!("Risk Level: {}", score.risk_level());
    println!(
        "  medication {:.1}  diet {:.1}  activity {:.1}  health {:.1}",
        score.medication, score.diet, score.activity, score.health
    );
    if let Some(alert) = urgent_alert(score.ncrs) {
        println!("{}", alert.message);
    }
    Ok(())
}

fn run_dashboard(sources: DataSources) -> Result<()> {
    // a missing table is shown in the window, not fatal
    let mut state = AppState::default();
    state.load(sources);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "NCRS-AI",
        options,
        Box::new(|_cc| Ok(Box::new(NcrsApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}
