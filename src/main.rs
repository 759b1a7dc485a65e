//! Building load simulator entry point: CLI wiring and config-driven simulation.

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{info, warn};

use building_load_sim::config::ScenarioConfig;
use building_load_sim::io::export::{export_csv, export_report_json};
use building_load_sim::reporting::AnalyticsReport;

use crate::cli::Args;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .without_time()
        .compact()
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut scenario = match &args.scenario {
        Some(path) => ScenarioConfig::from_toml_file(path)?,
        None => ScenarioConfig::from_preset(&args.preset)?,
    };
    if let Some(seed) = args.seed {
        scenario.simulation.seed = seed;
    }
    if let Some(source) = args.energy_source {
        scenario.simulation.energy_source = Some(source);
    }
    if let Some(season) = args.season {
        scenario.simulation.season = Some(season);
    }

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            warn!(field = e.field.as_str(), "{}", e.message);
        }
        bail!("scenario has {} invalid field(s)", errors.len());
    }

    let sim = scenario.build_simulator()?;
    let timestep_hours = sim.config().timestep_hours();
    info!(
        loads = sim.len(),
        timesteps = sim.config().timestep_count(),
        seed = sim.config().seed,
        "running simulation"
    );

    let table = sim.run().context("simulation failed")?;
    let tariff = scenario.simulation.effective_tariff();
    let report = AnalyticsReport::from_table(&table, timestep_hours, tariff)?;

    println!("{table}");
    println!();
    println!("{report}");

    if let Some(path) = &args.table_out {
        export_csv(&table, path)
            .with_context(|| format!("cannot write load table to {}", path.display()))?;
        info!(path = %path.display(), "load table exported");
    }
    if let Some(path) = &args.report_out {
        export_report_json(&report, path)
            .with_context(|| format!("cannot write report to {}", path.display()))?;
        info!(path = %path.display(), "report exported");
    }

    Ok(())
}
