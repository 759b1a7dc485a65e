//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::loads::{ScheduledLoad, ThermalLoad};
use crate::reporting::DEFAULT_TARIFF_PER_KWH;
use crate::sim::types::TOTAL_LABEL;
use crate::sim::{SimConfig, Simulator};
use crate::tariff::{self, EnergySource, Season};

/// Top-level scenario configuration parsed from TOML.
///
/// Load from TOML with [`ScenarioConfig::from_toml_file`] or pick one of the
/// built-in presets with [`ScenarioConfig::from_preset`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Simulation timing and global parameters.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Loads in the order they are added to the simulator.
    #[serde(default)]
    pub loads: Vec<LoadConfig>,
}

/// Simulation timing and global parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Duration of one step in hours (must be > 0).
    pub timestep_hours: f64,
    /// Simulated period in hours (a whole multiple of `timestep_hours`).
    pub period_hours: f64,
    /// Random seed.
    pub seed: u64,
    /// Flat price per kWh used for the cost figure.
    pub tariff_per_kwh: f64,
    /// Supply source; with `season`, selects the price instead of `tariff_per_kwh`.
    pub energy_source: Option<EnergySource>,
    /// Season of the simulated period.
    pub season: Option<Season>,
}

impl SimulationConfig {
    /// Price per kWh applied to consumption energy.
    ///
    /// The source/season price when both are set, otherwise `tariff_per_kwh`.
    pub fn effective_tariff(&self) -> f64 {
        match (self.energy_source, self.season) {
            (Some(source), Some(season)) => tariff::price_per_kwh(source, season),
            _ => self.tariff_per_kwh,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            timestep_hours: 1.0,
            period_hours: 24.0,
            seed: 42,
            tariff_per_kwh: DEFAULT_TARIFF_PER_KWH,
            energy_source: None,
            season: None,
        }
    }
}

/// One load, tagged by `kind`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoadConfig {
    Scheduled(ScheduledLoadConfig),
    Thermal(ThermalLoadConfig),
}

/// Parameters of a [`ScheduledLoad`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduledLoadConfig {
    /// Display name.
    pub name: String,
    /// Column the load is summed into.
    pub subsystem: String,
    /// Rated power (kW); negative for generation.
    pub power_kw: f64,
    /// Per-step multiplier, one entry per step.
    pub schedule: Vec<f64>,
    /// Apply ±10% independent noise per step.
    #[serde(default)]
    pub randomize: bool,
}

/// Parameters of a [`ThermalLoad`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThermalLoadConfig {
    /// Display name.
    pub name: String,
    /// Column the load is summed into.
    pub subsystem: String,
    /// Driving input per step (e.g. outdoor °C).
    pub input_series: Vec<f64>,
    /// Idle threshold for the input.
    pub setpoint: f64,
    /// Power at full duty (kW, >= 0).
    pub max_power_kw: f64,
    /// Duty-cycle gain per unit above the setpoint (>= 0).
    pub alpha: f64,
}

impl LoadConfig {
    /// Display name of the configured load.
    pub fn name(&self) -> &str {
        match self {
            Self::Scheduled(c) => &c.name,
            Self::Thermal(c) => &c.name,
        }
    }

    /// Subsystem label of the configured load.
    pub fn subsystem(&self) -> &str {
        match self {
            Self::Scheduled(c) => &c.subsystem,
            Self::Thermal(c) => &c.subsystem,
        }
    }

    fn series_len(&self) -> usize {
        match self {
            Self::Scheduled(c) => c.schedule.len(),
            Self::Thermal(c) => c.input_series.len(),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("config error: {field} - {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"simulation.timestep_hours"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Per-step multiplier that is 1 on `[start, end)` and 0 elsewhere.
fn on_window(len: usize, start: usize, end: usize) -> Vec<f64> {
    on_windows(len, &[(start, end)])
}

/// Per-step multiplier that is 1 inside any of the `[start, end)` windows.
fn on_windows(len: usize, windows: &[(usize, usize)]) -> Vec<f64> {
    (0..len)
        .map(|t| {
            if windows.iter().any(|&(start, end)| (start..end).contains(&t)) {
                1.0
            } else {
                0.0
            }
        })
        .collect()
}

fn scheduled(name: &str, subsystem: &str, power_kw: f64, schedule: Vec<f64>) -> LoadConfig {
    LoadConfig::Scheduled(ScheduledLoadConfig {
        name: name.to_string(),
        subsystem: subsystem.to_string(),
        power_kw,
        schedule,
        randomize: true,
    })
}

/// Hourly outdoor temperature (°C) for a hot day: 22 °C before dawn, 34 °C mid-afternoon.
const HEATWAVE_TEMPERATURE_C: [f64; 24] = [
    23.6, 23.0, 22.5, 22.2, 22.0, 22.2, 22.5, 23.0, 23.8, 25.0, 26.5, 28.0, 29.5, 31.0, 32.5, 33.6,
    34.0, 33.5, 32.2, 30.6, 28.8, 27.0, 25.6, 24.5,
];

impl ScenarioConfig {
    /// Returns the office preset: chiller plant, lighting circuits, and plant loads.
    pub fn office() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            loads: vec![
                scheduled("Chiller", "HVAC", 50.0, on_windows(24, &[(0, 8), (16, 24)])),
                scheduled("Fan", "HVAC", 5.0, on_window(24, 0, 24)),
                scheduled("Office", "Lighting", 3.0, on_window(24, 7, 17)),
                scheduled("Hallway", "Lighting", 1.0, on_window(24, 0, 24)),
                scheduled("External", "Lighting", 2.0, on_window(24, 18, 24)),
                scheduled("Pump", "Appliances", 4.0, on_window(24, 6, 18)),
                scheduled("Computer", "Appliances", 0.5, on_window(24, 8, 18)),
            ],
        }
    }

    /// Returns the home preset: split AC, evening lighting, fridge, and rooftop solar.
    pub fn home() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            loads: vec![
                scheduled("AC", "HVAC", 3.0, on_windows(24, &[(6, 8), (14, 18)])),
                scheduled("Living Room", "Lighting", 0.2, on_window(24, 17, 21)),
                scheduled("Fridge", "Appliances", 0.15, on_window(24, 0, 24)),
                scheduled("Solar PV", "Solar", -2.0, on_window(24, 6, 18)),
            ],
        }
    }

    /// Returns the heatwave preset: temperature-driven AC with lighting and solar.
    pub fn heatwave() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            loads: vec![
                LoadConfig::Thermal(ThermalLoadConfig {
                    name: "Central AC".to_string(),
                    subsystem: "HVAC".to_string(),
                    input_series: HEATWAVE_TEMPERATURE_C.to_vec(),
                    setpoint: 24.0,
                    max_power_kw: 4.0,
                    alpha: 0.1,
                }),
                scheduled("Whole House", "Lighting", 0.7, on_window(24, 16, 22)),
                scheduled("Fridge", "Appliances", 0.18, on_window(24, 0, 24)),
                scheduled("Solar PV", "Solar", -3.0, on_window(24, 7, 17)),
            ],
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["office", "home", "heatwave"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "office" => Ok(Self::office()),
            "home" => Ok(Self::home()),
            "heatwave" => Ok(Self::heatwave()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let s = &self.simulation;

        let steps = match SimConfig::new(s.timestep_hours, s.period_hours, s.seed) {
            Ok(cfg) => Some(cfg.timestep_count()),
            Err(e) => {
                errors.push(e);
                None
            }
        };
        if !(s.tariff_per_kwh.is_finite() && s.tariff_per_kwh >= 0.0) {
            errors.push(ConfigError::new("simulation.tariff_per_kwh", "must be >= 0"));
        }

        for (i, load) in self.loads.iter().enumerate() {
            let field = |name: &str| format!("loads[{i}].{name}");

            if load.subsystem().is_empty() {
                errors.push(ConfigError::new(field("subsystem"), "must not be empty"));
            }
            if load.subsystem() == TOTAL_LABEL {
                errors.push(ConfigError::new(
                    field("subsystem"),
                    format!("\"{TOTAL_LABEL}\" is reserved for the total column"),
                ));
            }
            if let Some(steps) = steps.filter(|&n| n != load.series_len()) {
                let series = match load {
                    LoadConfig::Scheduled(_) => "schedule",
                    LoadConfig::Thermal(_) => "input_series",
                };
                errors.push(ConfigError::new(
                    field(series),
                    format!("has {} entries, expected {steps}", load.series_len()),
                ));
            }
            match load {
                LoadConfig::Scheduled(c) => {
                    if !c.power_kw.is_finite() {
                        errors.push(ConfigError::new(field("power_kw"), "must be finite"));
                    }
                    if !c.schedule.iter().all(|m| m.is_finite()) {
                        errors.push(ConfigError::new(field("schedule"), "must be finite"));
                    }
                }
                LoadConfig::Thermal(t) => {
                    if !t.setpoint.is_finite() {
                        errors.push(ConfigError::new(field("setpoint"), "must be finite"));
                    }
                    if !(t.max_power_kw.is_finite() && t.max_power_kw >= 0.0) {
                        errors.push(ConfigError::new(field("max_power_kw"), "must be >= 0"));
                    }
                    if !(t.alpha.is_finite() && t.alpha >= 0.0) {
                        errors.push(ConfigError::new(field("alpha"), "must be >= 0"));
                    }
                    if !t.input_series.iter().all(|x| x.is_finite()) {
                        errors.push(ConfigError::new(field("input_series"), "must be finite"));
                    }
                }
            }
        }

        errors
    }

    /// Timing configuration for the simulator.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the timing is invalid.
    pub fn sim_config(&self) -> Result<SimConfig, ConfigError> {
        let s = &self.simulation;
        SimConfig::new(s.timestep_hours, s.period_hours, s.seed)
    }

    /// Builds a simulator with every configured load, in file order.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` reported by [`ScenarioConfig::validate`].
    pub fn build_simulator(&self) -> Result<Simulator, ConfigError> {
        if let Some(err) = self.validate().into_iter().next() {
            return Err(err);
        }

        let mut sim = Simulator::new(self.sim_config()?);
        for load in &self.loads {
            debug!(load = load.name(), subsystem = load.subsystem(), "adding configured load");
            match load {
                LoadConfig::Scheduled(c) => sim.add_load(
                    ScheduledLoad::new(&c.name, c.power_kw, c.schedule.clone(), c.randomize),
                    &c.subsystem,
                ),
                LoadConfig::Thermal(c) => sim.add_load(
                    ThermalLoad::new(
                        &c.name,
                        c.input_series.clone(),
                        c.setpoint,
                        c.max_power_kw,
                        c.alpha,
                    ),
                    &c.subsystem,
                ),
            }
        }
        Ok(sim)
    }
}
