use rand::{Rng, rngs::StdRng};

use crate::error::SimError;
use crate::loads::types::{Load, ensure_len};

/// Lower bound of the multiplicative noise applied to randomized loads.
pub const VARIATION_MIN: f64 = 0.9;
/// Upper bound of the multiplicative noise applied to randomized loads.
pub const VARIATION_MAX: f64 = 1.1;

/// A load with a fixed power rating switched by a per-step schedule.
///
/// Covers lighting circuits, appliances, and generation alike: a negative
/// `power_kw` turns the load into a generator (e.g. rooftop solar).
///
/// # Examples
///
/// ```
/// use building_load_sim::loads::{Load, ScheduledLoad};
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let pump = ScheduledLoad::new("Pump", 4.0, vec![0.0, 1.0, 1.0, 0.0], false);
/// let mut rng = StdRng::seed_from_u64(42);
/// let profile = pump.produce(4, &mut rng).unwrap();
/// assert_eq!(profile, vec![0.0, 4.0, 4.0, 0.0]);
/// ```
#[derive(Debug, Clone)]
pub struct ScheduledLoad {
    /// Display name
    pub name: String,

    /// Power rating in kilowatts; negative for generation
    pub power_kw: f64,

    /// Per-step multiplier, conventionally 0 (off) or 1 (on)
    pub schedule: Vec<f64>,

    /// Whether each step is scaled by an independent factor in `[0.9, 1.1]`
    pub randomize: bool,
}

impl ScheduledLoad {
    /// Creates a new scheduled load.
    ///
    /// # Arguments
    ///
    /// * `name` - Display name of the load
    /// * `power_kw` - Rated power in kilowatts (negative for generation)
    /// * `schedule` - Per-step multiplier, one entry per simulation step
    /// * `randomize` - Apply independent uniform noise to every step
    pub fn new(name: impl Into<String>, power_kw: f64, schedule: Vec<f64>, randomize: bool) -> Self {
        Self {
            name: name.into(),
            power_kw,
            schedule,
            randomize,
        }
    }
}

impl Load for ScheduledLoad {
    /// Scales the schedule by the power rating.
    ///
    /// With `randomize` set, one factor is drawn per step (including steps
    /// where the schedule is off) so the stream advances by exactly
    /// `timestep_count` draws.
    fn produce(&self, timestep_count: usize, rng: &mut StdRng) -> Result<Vec<f64>, SimError> {
        ensure_len(&self.name, self.schedule.len(), timestep_count)?;

        let profile = self
            .schedule
            .iter()
            .map(|&multiplier| {
                let kw = self.power_kw * multiplier;
                if self.randomize {
                    kw * rng.random_range(VARIATION_MIN..=VARIATION_MAX)
                } else {
                    kw
                }
            })
            .collect();
        Ok(profile)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn load_type(&self) -> &'static str {
        "Scheduled"
    }
}
