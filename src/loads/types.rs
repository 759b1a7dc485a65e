//! Common trait and helpers for load models.

use std::fmt;

use rand::rngs::StdRng;

use crate::error::SimError;

/// Trait defining a source of simulated demand or generation.
///
/// This trait provides a common interface for every load in the simulation,
/// allowing the simulator to compose heterogeneous loads into one table.
pub trait Load: fmt::Debug {
    /// Produces the power profile for the whole simulation horizon.
    ///
    /// Positive values indicate power consumption (load),
    /// negative values indicate power generation.
    ///
    /// # Arguments
    ///
    /// * `timestep_count` - Number of steps the simulation covers
    /// * `rng` - Shared random stream, drawn from in load insertion order
    ///
    /// # Returns
    ///
    /// Power in kilowatts (kW) for each step, or [`SimError::LengthMismatch`]
    /// if the load's input does not cover exactly `timestep_count` steps.
    fn produce(&self, timestep_count: usize, rng: &mut StdRng) -> Result<Vec<f64>, SimError>;

    /// Display name of the load. Not a uniqueness key.
    fn name(&self) -> &str;

    /// Returns a human-readable type name for the load.
    fn load_type(&self) -> &'static str;
}

/// Rejects an input sequence whose length differs from the simulation horizon.
pub(crate) fn ensure_len(name: &str, actual: usize, expected: usize) -> Result<(), SimError> {
    if actual == expected {
        Ok(())
    } else {
        Err(SimError::LengthMismatch {
            load: name.to_string(),
            expected,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_len_accepts_matching_length() {
        assert!(ensure_len("Fridge", 24, 24).is_ok());
    }

    #[test]
    fn ensure_len_reports_both_lengths() {
        let err = ensure_len("Fridge", 23, 24);
        assert!(matches!(
            err,
            Err(SimError::LengthMismatch {
                expected: 24,
                actual: 23,
                ..
            })
        ));
    }
}
