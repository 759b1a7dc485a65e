//! Load models that turn per-step inputs into power draw or generation.

/// Fixed-rating load following an on/off (or multiplier) schedule.
pub mod scheduled;
/// Duty-cycle load driven by an input series against a setpoint.
pub mod thermal;
pub mod types;

// Re-export the main types for convenience
pub use scheduled::ScheduledLoad;
pub use thermal::ThermalLoad;
pub use types::Load;
