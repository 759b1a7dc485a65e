//! Building electrical load simulator.
//!
//! Composes scheduled and thermal loads into a per-subsystem load table and
//! derives peak, share, solar-offset, and inefficiency analytics from it.

pub mod analytics;
pub mod config;
pub mod error;
/// Export of tables and reports.
pub mod io;
pub mod loads;
pub mod reporting;
/// Simulator, timing configuration, and the load table.
pub mod sim;
pub mod tariff;
