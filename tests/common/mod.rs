//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use building_load_sim::loads::ScheduledLoad;
use building_load_sim::sim::{SimConfig, Simulator};

/// Hourly configuration over one day (24 steps, seed 42).
pub fn hourly_day() -> SimConfig {
    SimConfig::new(1.0, 24.0, 42).expect("hourly day is a valid configuration")
}

/// Schedule that is off for six steps, on for twelve, off for six.
pub fn daytime_schedule() -> Vec<f64> {
    let mut schedule = vec![0.0; 6];
    schedule.extend([1.0; 12]);
    schedule.extend([0.0; 6]);
    schedule
}

/// 4 kW daytime HVAC load, not randomized.
pub fn daytime_hvac() -> ScheduledLoad {
    ScheduledLoad::new("AC", 4.0, daytime_schedule(), false)
}

/// 2 kW daytime solar generation, not randomized.
pub fn daytime_solar() -> ScheduledLoad {
    ScheduledLoad::new("Solar PV", -2.0, daytime_schedule(), false)
}

/// Simulator with the daytime HVAC load and, optionally, daytime solar.
pub fn hvac_simulator(with_solar: bool) -> Simulator {
    let mut sim = Simulator::new(hourly_day());
    sim.add_load(daytime_hvac(), "HVAC");
    if with_solar {
        sim.add_load(daytime_solar(), "Solar");
    }
    sim
}
