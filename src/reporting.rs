//! Bundled analytics for one run, with a text rendering and advisory notes.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::analytics::{
    DEFAULT_NIGHT_STEPS, NIGHT_HVAC_WARNING, PeakLoad, consumption_energy_kwh, daily_energy_kwh,
    energy_cost, find_peak_load, flag_inefficiencies, solar_offset_pct, subsystem_share,
};
use crate::error::SimError;
use crate::sim::LoadTable;

/// Solar offset (%) below which more generation is suggested.
pub const LOW_SOLAR_OFFSET_PCT: f64 = 20.0;
/// Peak total (kW) above which load shifting is suggested.
pub const HIGH_PEAK_KW: f64 = 10.0;
/// Consumption (kWh) above which an appliance audit is suggested.
pub const HIGH_CONSUMPTION_KWH: f64 = 200.0;

/// Default flat tariff per kWh, used when no source/season price is configured.
pub const DEFAULT_TARIFF_PER_KWH: f64 = 9.0;

/// All analytics derived from a complete simulation run.
///
/// Computed post-hoc from a [`LoadTable`] so the reported numbers always
/// agree with the table.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsReport {
    /// Row with the highest total load.
    pub peak: PeakLoad,
    /// Percentage of consumption energy per subsystem.
    pub subsystem_share_pct: IndexMap<String, f64>,
    /// Percentage of consumption energy offset by solar generation.
    pub solar_offset_pct: f64,
    /// Inefficiency warnings, in rule order.
    pub warnings: Vec<String>,
    /// Energy drawn by consumption subsystems (kWh).
    pub consumption_kwh: f64,
    /// Consumption energy at the flat tariff.
    pub cost: f64,
    /// Net energy per day (kWh).
    pub daily_energy_kwh: Vec<f64>,
}

impl AnalyticsReport {
    /// Computes every analytic for `table`.
    ///
    /// # Arguments
    ///
    /// * `table` - Output of a simulation run
    /// * `timestep_hours` - Duration of one row in hours
    /// * `tariff_per_kwh` - Flat price applied to consumption energy
    ///
    /// # Errors
    ///
    /// Returns [`SimError::EmptyTable`] if the table has no rows.
    pub fn from_table(
        table: &LoadTable,
        timestep_hours: f64,
        tariff_per_kwh: f64,
    ) -> Result<Self, SimError> {
        let peak = find_peak_load(table)?;
        let consumption_kwh = consumption_energy_kwh(table, timestep_hours);
        Ok(Self {
            peak,
            subsystem_share_pct: subsystem_share(table, timestep_hours),
            solar_offset_pct: solar_offset_pct(table, timestep_hours),
            warnings: flag_inefficiencies(table, DEFAULT_NIGHT_STEPS),
            consumption_kwh,
            cost: energy_cost(consumption_kwh, tariff_per_kwh),
            daily_energy_kwh: daily_energy_kwh(table, timestep_hours),
        })
    }
}

/// Advisory notes for a report, in rule order.
///
/// Always returns at least one note.
pub fn recommendations(report: &AnalyticsReport) -> Vec<&'static str> {
    let mut notes = Vec::new();
    if report.solar_offset_pct < LOW_SOLAR_OFFSET_PCT {
        notes.push("Consider increasing solar capacity to offset more demand.");
    }
    if report.peak.total_kw > HIGH_PEAK_KW {
        notes.push("Peak load is high; consider shifting flexible loads to off-peak hours.");
    }
    if report.warnings.iter().any(|w| w == NIGHT_HVAC_WARNING) {
        notes.push("Reduce HVAC usage at night to save energy.");
    }
    if report.consumption_kwh > HIGH_CONSUMPTION_KWH {
        notes.push("Overall energy use is high; audit appliances for efficiency.");
    }
    if notes.is_empty() {
        notes.push("Energy usage is within typical range. Good job!");
    }
    notes
}

impl fmt::Display for AnalyticsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Analytics Report ---")?;
        writeln!(
            f,
            "Peak load:             {:.2} kW at step {} ({})",
            self.peak.total_kw,
            self.peak.timestep,
            self.peak.subsystem.as_deref().unwrap_or("-")
        )?;
        writeln!(f, "Subsystem share:")?;
        if self.subsystem_share_pct.is_empty() {
            writeln!(f, "  (no consumption)")?;
        }
        for (label, pct) in &self.subsystem_share_pct {
            writeln!(f, "  {label:<20} {pct:>5.1}%")?;
        }
        writeln!(f, "Solar offset:          {:.1}%", self.solar_offset_pct)?;
        writeln!(f, "Energy consumed:       {:.2} kWh", self.consumption_kwh)?;
        writeln!(f, "Cost:                  {:.2}", self.cost)?;
        for (day, kwh) in self.daily_energy_kwh.iter().enumerate() {
            writeln!(f, "Day {:<3}               {kwh:.2} kWh", day + 1)?;
        }
        for warning in &self.warnings {
            writeln!(f, "Warning: {warning}")?;
        }
        write!(f, "Recommendations:")?;
        for note in recommendations(self) {
            write!(f, "\n  - {note}")?;
        }
        Ok(())
    }
}
