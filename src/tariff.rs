//! Energy prices per kWh by generation source and season.

use serde::{Deserialize, Serialize};

/// Generation source backing the supply tariff.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergySource {
    Coal,
    Solar,
    Nuclear,
    Hydro,
    Wind,
}

/// Season of the simulated period.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Summer,
    Winter,
    Spring,
    Fall,
}

/// Price per kWh for a source in a season.
pub const fn price_per_kwh(source: EnergySource, season: Season) -> f64 {
    use EnergySource::*;
    use Season::*;

    match (source, season) {
        (Coal, Summer) => 9.0,
        (Coal, Winter) => 10.0,
        (Coal, Spring | Fall) => 8.0,
        (Solar, Summer) => 4.0,
        (Solar, Winter) => 6.0,
        (Solar, Spring | Fall) => 5.0,
        (Nuclear, _) => 6.0,
        (Hydro | Wind, _) => 5.0,
    }
}
