use std::path::PathBuf;

use clap::Parser;

use building_load_sim::tariff::{EnergySource, Season};

/// Building electrical load simulator.
#[derive(Debug, Parser)]
#[command(author, version, about)]
#[must_use]
pub struct Args {
    /// Load the scenario from a TOML file.
    #[clap(long, conflicts_with = "preset")]
    pub scenario: Option<PathBuf>,

    /// Use a built-in preset (office, home, heatwave).
    #[clap(long, default_value = "home")]
    pub preset: String,

    /// Override the scenario's random seed.
    #[clap(long)]
    pub seed: Option<u64>,

    /// Price energy by supply source (needs a season as well).
    #[clap(long, value_enum)]
    pub energy_source: Option<EnergySource>,

    /// Season used with the supply source to pick the price.
    #[clap(long, value_enum)]
    pub season: Option<Season>,

    /// Export the load table to CSV.
    #[clap(long)]
    pub table_out: Option<PathBuf>,

    /// Export the analytics report to JSON.
    #[clap(long)]
    pub report_out: Option<PathBuf>,
}
