use rand::rngs::StdRng;

use crate::error::SimError;
use crate::loads::types::{Load, ensure_len};

/// Duty cycle for an input `delta` above the setpoint.
///
/// Zero at or below the setpoint, grows linearly with `alpha` per unit of
/// overshoot, and saturates at 1.
pub fn duty_cycle(delta: f64, alpha: f64) -> f64 {
    (alpha * delta).clamp(0.0, 1.0)
}

/// A load whose draw follows how far an input series exceeds a setpoint.
///
/// Typically a cooling unit driven by outdoor temperature: no effort below
/// the setpoint, effort proportional to overshoot, capped at `max_power_kw`.
/// Deterministic; never draws from the random stream.
#[derive(Debug, Clone)]
pub struct ThermalLoad {
    /// Display name
    pub name: String,

    /// Per-step driving input, e.g. outdoor temperature in °C
    pub input_series: Vec<f64>,

    /// Input value at and below which the load is idle
    pub setpoint: f64,

    /// Power at full duty in kilowatts
    pub max_power_kw: f64,

    /// Duty-cycle gain per unit of input above the setpoint
    pub alpha: f64,
}

impl ThermalLoad {
    /// Creates a new thermal load.
    ///
    /// Negative `max_power_kw` and `alpha` are clamped to zero.
    ///
    /// # Arguments
    ///
    /// * `name` - Display name of the load
    /// * `input_series` - Driving input, one entry per simulation step
    /// * `setpoint` - Idle threshold for the input
    /// * `max_power_kw` - Power at full duty in kilowatts
    /// * `alpha` - Duty-cycle gain per unit above the setpoint
    pub fn new(
        name: impl Into<String>,
        input_series: Vec<f64>,
        setpoint: f64,
        max_power_kw: f64,
        alpha: f64,
    ) -> Self {
        Self {
            name: name.into(),
            input_series,
            setpoint,
            max_power_kw: max_power_kw.max(0.0),
            alpha: alpha.max(0.0),
        }
    }
}

impl Load for ThermalLoad {
    fn produce(&self, timestep_count: usize, _rng: &mut StdRng) -> Result<Vec<f64>, SimError> {
        ensure_len(&self.name, self.input_series.len(), timestep_count)?;

        Ok(self
            .input_series
            .iter()
            .map(|&input| self.max_power_kw * duty_cycle(input - self.setpoint, self.alpha))
            .collect())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn load_type(&self) -> &'static str {
        "Thermal"
    }
}
