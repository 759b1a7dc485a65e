pub mod simulator;
/// Aggregated, time-indexed output of a run.
pub mod table;
pub mod types;

pub use simulator::Simulator;
pub use table::LoadTable;
pub use types::SimConfig;
