//! Simulator that composes loads into one time-indexed table.

use indexmap::IndexMap;
use indexmap::map::Entry;
use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info};

use crate::error::SimError;
use crate::loads::Load;

use super::table::LoadTable;
use super::types::{SimConfig, TOTAL_LABEL};

/// Simulation engine owning the timing configuration and all loads.
///
/// Loads are kept in insertion order: production follows that order so the
/// shared random stream is consumed identically on every run.
#[derive(Debug)]
pub struct Simulator {
    config: SimConfig,
    loads: Vec<(Box<dyn Load>, String)>,
}

impl Simulator {
    /// Creates a simulator with no loads.
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            loads: Vec::new(),
        }
    }

    /// Creates a simulator with no loads from raw timing parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] if the timing is rejected by
    /// [`SimConfig::new`].
    pub fn with_timing(timestep_hours: f64, period_hours: f64, seed: u64) -> Result<Self, SimError> {
        Ok(Self::new(SimConfig::new(timestep_hours, period_hours, seed)?))
    }

    /// Registers a load under a subsystem label.
    ///
    /// Loads sharing a label are summed into one column. Lengths are not
    /// checked here; a mismatch surfaces when the simulation runs.
    pub fn add_load(&mut self, load: impl Load + 'static, subsystem: impl Into<String>) {
        self.loads.push((Box::new(load), subsystem.into()));
    }

    /// Number of registered loads.
    pub fn len(&self) -> usize {
        self.loads.len()
    }

    /// Whether no loads are registered.
    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }

    /// Returns a reference to the simulation configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Runs the simulation with a stream freshly seeded from the configuration.
    ///
    /// Two calls on the same simulator produce bit-identical tables.
    ///
    /// # Errors
    ///
    /// See [`Simulator::run_with_rng`].
    pub fn run(&self) -> Result<LoadTable, SimError> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        self.run_with_rng(&mut rng)
    }

    /// Runs the simulation, drawing randomness from a caller-owned stream.
    ///
    /// Each load produces its profile in insertion order; profiles are added
    /// element-wise into one accumulator per subsystem label, in first-seen
    /// order. Any failure aborts the whole run.
    ///
    /// # Errors
    ///
    /// * [`SimError::LengthMismatch`] if a load does not cover the horizon
    /// * [`SimError::ReservedLabel`] if a load is registered as `Total`
    pub fn run_with_rng(&self, rng: &mut StdRng) -> Result<LoadTable, SimError> {
        let steps = self.config.timestep_count();
        let mut columns: IndexMap<String, Vec<f64>> = IndexMap::new();

        for (load, subsystem) in &self.loads {
            if subsystem == TOTAL_LABEL {
                return Err(SimError::ReservedLabel(subsystem.clone()));
            }

            let profile = load.produce(steps, rng)?;
            if profile.len() != steps {
                return Err(SimError::LengthMismatch {
                    load: load.name().to_string(),
                    expected: steps,
                    actual: profile.len(),
                });
            }
            debug!(
                load = load.name(),
                load_type = load.load_type(),
                subsystem = subsystem.as_str(),
                "produced load profile"
            );

            match columns.entry(subsystem.clone()) {
                Entry::Occupied(mut entry) => {
                    for (acc, kw) in entry.get_mut().iter_mut().zip(profile) {
                        *acc += kw;
                    }
                }
                Entry::Vacant(entry) => {
                    entry.insert(profile);
                }
            }
        }

        info!(
            timesteps = steps,
            loads = self.loads.len(),
            subsystems = columns.len(),
            "simulation finished"
        );
        Ok(LoadTable::new(self.config.timestep_hours(), steps, columns))
    }
}
