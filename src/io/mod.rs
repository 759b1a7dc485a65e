/// CSV and JSON export of simulation output.
pub mod export;
