//! Core simulation types: timing configuration and well-known column labels.

use crate::config::ConfigError;

/// Column holding the row-wise sum across all subsystem columns.
pub const TOTAL_LABEL: &str = "Total";
/// Conventional generation column (values stored as negative power).
pub const SOLAR_LABEL: &str = "Solar";
/// Conventional heating/cooling column inspected by the inefficiency rules.
pub const HVAC_LABEL: &str = "HVAC";

/// Relative tolerance when checking that the period is a whole number of steps.
const INTEGRAL_TOLERANCE: f64 = 1e-9;

/// Centralized simulation configuration.
///
/// The simulator and analytics reference this struct for timing parameters.
/// Construction validates the timing so an existing `SimConfig` always
/// describes a whole, positive number of steps.
///
/// # Examples
///
/// ```
/// use building_load_sim::sim::types::SimConfig;
///
/// let cfg = SimConfig::new(0.25, 24.0, 42).unwrap();
/// assert_eq!(cfg.timestep_count(), 96);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    timestep_hours: f64,
    period_hours: f64,
    timestep_count: usize,
    /// Random seed for the stream shared by all loads in one run.
    pub seed: u64,
}

impl SimConfig {
    /// Creates a new simulation configuration.
    ///
    /// # Arguments
    ///
    /// * `timestep_hours` - Duration of one step in hours (must be > 0)
    /// * `period_hours` - Simulated period in hours (must be > 0)
    /// * `seed` - Random seed
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if either duration is not a positive finite
    /// number, or if the period is not an integer multiple of the timestep.
    pub fn new(timestep_hours: f64, period_hours: f64, seed: u64) -> Result<Self, ConfigError> {
        if !(timestep_hours.is_finite() && timestep_hours > 0.0) {
            return Err(ConfigError::new("simulation.timestep_hours", "must be > 0"));
        }
        if !(period_hours.is_finite() && period_hours > 0.0) {
            return Err(ConfigError::new("simulation.period_hours", "must be > 0"));
        }

        let ratio = period_hours / timestep_hours;
        let steps = ratio.round();
        if steps < 1.0 || (ratio - steps).abs() > INTEGRAL_TOLERANCE * ratio {
            return Err(ConfigError::new(
                "simulation.period_hours",
                format!("{period_hours} h is not a whole multiple of the {timestep_hours} h timestep"),
            ));
        }

        Ok(Self {
            timestep_hours,
            period_hours,
            timestep_count: steps as usize,
            seed,
        })
    }

    /// Duration of one step in hours.
    pub fn timestep_hours(&self) -> f64 {
        self.timestep_hours
    }

    /// Simulated period in hours.
    pub fn period_hours(&self) -> f64 {
        self.period_hours
    }

    /// Number of steps in the simulated period.
    pub fn timestep_count(&self) -> usize {
        self.timestep_count
    }
}
