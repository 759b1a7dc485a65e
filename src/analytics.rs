//! Descriptive analytics computed post-hoc from a [`LoadTable`].
//!
//! Every function here is pure: it reads the table and returns numbers or
//! labels. Formatting is left to the caller (see [`crate::reporting`]).

use std::ops::Range;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::SimError;
use crate::sim::LoadTable;
use crate::sim::types::{HVAC_LABEL, SOLAR_LABEL};

/// Steps treated as night by [`flag_inefficiencies`] unless told otherwise.
pub const DEFAULT_NIGHT_STEPS: Range<usize> = 0..7;

/// Fraction of full-period HVAC energy above which night use is flagged.
pub const NIGHT_HVAC_SHARE_THRESHOLD: f64 = 0.1;

/// Warning emitted when night-time HVAC use exceeds the threshold.
pub const NIGHT_HVAC_WARNING: &str = "High night-time HVAC consumption detected.";

/// Hours per day, used to bucket steps into days.
const HOURS_PER_DAY: f64 = 24.0;

/// The row with the highest total load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeakLoad {
    /// Row index of the first maximum of `Total`.
    pub timestep: usize,
    /// Subsystem with the largest value in that row; `None` if the table
    /// has no subsystem columns.
    pub subsystem: Option<String>,
    /// `Total` at that row (kW).
    pub total_kw: f64,
}

/// Finds the peak of the `Total` column and its dominant subsystem.
///
/// Ties resolve to the first occurrence: earliest row, then first column.
///
/// # Errors
///
/// Returns [`SimError::EmptyTable`] if the table has no rows.
pub fn find_peak_load(table: &LoadTable) -> Result<PeakLoad, SimError> {
    let mut peak: Option<(usize, f64)> = None;
    for (t, &kw) in table.total().iter().enumerate() {
        if peak.is_none_or(|(_, best)| kw > best) {
            peak = Some((t, kw));
        }
    }
    let (timestep, total_kw) = peak.ok_or(SimError::EmptyTable)?;

    let mut subsystem: Option<(&str, f64)> = None;
    for (label, kw) in table.row(timestep) {
        if subsystem.is_none_or(|(_, best)| kw > best) {
            subsystem = Some((label, kw));
        }
    }

    Ok(PeakLoad {
        timestep,
        subsystem: subsystem.map(|(label, _)| label.to_string()),
        total_kw,
    })
}

/// Energy (kWh) per consumption subsystem, in column order.
///
/// Consumption subsystems are all subsystem columns except `Solar` whose
/// summed power is strictly positive (`Total` is never a subsystem column).
fn consumption_energy(table: &LoadTable, timestep_hours: f64) -> IndexMap<&str, f64> {
    table
        .subsystem_columns()
        .filter(|(label, _)| *label != SOLAR_LABEL)
        .map(|(label, values)| (label, values.iter().sum::<f64>()))
        .filter(|(_, sum)| *sum > 0.0)
        .map(|(label, sum)| (label, sum * timestep_hours))
        .collect()
}

/// Total consumption energy (kWh) across all consumption subsystems.
///
/// Zero when no subsystem qualifies.
pub fn consumption_energy_kwh(table: &LoadTable, timestep_hours: f64) -> f64 {
    consumption_energy(table, timestep_hours).values().sum()
}

/// Percentage share of consumption energy per subsystem.
///
/// Generation (`Solar`) and subsystems with a non-positive sum are left out.
/// Returns an empty mapping when nothing qualifies; otherwise the shares
/// sum to 100.
pub fn subsystem_share(table: &LoadTable, timestep_hours: f64) -> IndexMap<String, f64> {
    let energy = consumption_energy(table, timestep_hours);
    let total: f64 = energy.values().sum();
    if total <= 0.0 {
        return IndexMap::new();
    }
    energy
        .into_iter()
        .map(|(label, kwh)| (label.to_string(), kwh / total * 100.0))
        .collect()
}

/// Percentage of consumption energy offset by the `Solar` column.
///
/// Generation is stored as negative power, so its energy is the negated
/// column sum. Returns 0 when there is no `Solar` column or no consumption.
pub fn solar_offset_pct(table: &LoadTable, timestep_hours: f64) -> f64 {
    let Some(solar) = table.column(SOLAR_LABEL) else {
        return 0.0;
    };
    let consumption_kwh = consumption_energy_kwh(table, timestep_hours);
    if consumption_kwh <= 0.0 {
        return 0.0;
    }
    let generation_kwh = -solar.iter().sum::<f64>() * timestep_hours;
    100.0 * generation_kwh / consumption_kwh
}

/// Heuristic warnings about wasteful consumption patterns.
///
/// Currently one rule: if an `HVAC` column exists and its draw over
/// `night_steps` exceeds [`NIGHT_HVAC_SHARE_THRESHOLD`] of its full-period
/// sum, [`NIGHT_HVAC_WARNING`] is emitted. Night steps past the end of the
/// table are ignored.
pub fn flag_inefficiencies(table: &LoadTable, night_steps: Range<usize>) -> Vec<String> {
    let mut warnings = Vec::new();

    if let Some(hvac) = table.column(HVAC_LABEL) {
        let start = night_steps.start.min(hvac.len());
        let end = night_steps.end.clamp(start, hvac.len());
        let night_kw: f64 = hvac[start..end].iter().sum();
        let all_kw: f64 = hvac.iter().sum();
        if night_kw > NIGHT_HVAC_SHARE_THRESHOLD * all_kw {
            warnings.push(NIGHT_HVAC_WARNING.to_string());
        }
    }

    warnings
}

/// Cost of `energy_kwh` at a flat tariff.
pub fn energy_cost(energy_kwh: f64, tariff_per_kwh: f64) -> f64 {
    energy_kwh * tariff_per_kwh
}

/// Net energy (kWh) of the `Total` column per day.
///
/// Row `t` belongs to day `floor(t * timestep_hours / 24)`. The result has
/// one entry per day touched by the table, so a partial final day still
/// gets its own bucket.
pub fn daily_energy_kwh(table: &LoadTable, timestep_hours: f64) -> Vec<f64> {
    let mut days: Vec<f64> = Vec::new();
    for (t, kw) in table.total().iter().enumerate() {
        let day = (t as f64 * timestep_hours / HOURS_PER_DAY).floor() as usize;
        if days.len() <= day {
            days.resize(day + 1, 0.0);
        }
        days[day] += kw * timestep_hours;
    }
    days
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use indexmap::indexmap;

    use super::*;

    fn table(columns: IndexMap<String, Vec<f64>>, rows: usize) -> LoadTable {
        LoadTable::new(1.0, rows, columns)
    }

    fn day_window() -> Vec<f64> {
        (0..24).map(|t| if (6..18).contains(&t) { 1.0 } else { 0.0 }).collect()
    }

    fn hvac_only() -> LoadTable {
        table(
            indexmap! { "HVAC".to_string() => day_window().iter().map(|s| 4.0 * s).collect() },
            24,
        )
    }

    fn hvac_and_solar() -> LoadTable {
        table(
            indexmap! {
                "HVAC".to_string() => day_window().iter().map(|s| 4.0 * s).collect(),
                "Solar".to_string() => day_window().iter().map(|s| -2.0 * s).collect(),
            },
            24,
        )
    }

    #[test]
    fn peak_picks_first_maximum() {
        let peak = find_peak_load(&hvac_only()).unwrap();
        assert_eq!(
            peak,
            PeakLoad {
                timestep: 6,
                subsystem: Some("HVAC".to_string()),
                total_kw: 4.0,
            }
        );
    }

    #[test]
    fn peak_subsystem_ties_break_by_column_order() {
        let t = table(
            indexmap! {
                "Lighting".to_string() => vec![1.0, 2.0],
                "Kitchen".to_string() => vec![1.0, 2.0],
            },
            2,
        );
        let peak = find_peak_load(&t).unwrap();
        assert_eq!(peak.timestep, 1);
        assert_eq!(peak.subsystem.as_deref(), Some("Lighting"));
        assert_eq!(peak.total_kw, 4.0);
    }

    #[test]
    fn peak_on_empty_table_fails() {
        let t = table(IndexMap::new(), 0);
        assert!(matches!(find_peak_load(&t), Err(SimError::EmptyTable)));
    }

    #[test]
    fn peak_without_subsystems_has_no_label() {
        let t = table(IndexMap::new(), 3);
        let peak = find_peak_load(&t).unwrap();
        assert_eq!(peak.timestep, 0);
        assert_eq!(peak.subsystem, None);
        assert_eq!(peak.total_kw, 0.0);
    }

    #[test]
    fn share_single_subsystem_is_hundred() {
        let shares = subsystem_share(&hvac_only(), 1.0);
        assert_eq!(shares, indexmap! { "HVAC".to_string() => 100.0 });
    }

    #[test]
    fn share_excludes_solar_and_non_positive_columns() {
        let t = table(
            indexmap! {
                "HVAC".to_string() => vec![3.0, 1.0],
                "Lighting".to_string() => vec![1.0, 1.0],
                "Solar".to_string() => vec![-1.0, -2.0],
                "Battery".to_string() => vec![1.0, -1.0],
            },
            2,
        );
        let shares = subsystem_share(&t, 0.5);
        assert_eq!(shares.len(), 2);
        assert_abs_diff_eq!(shares["HVAC"], 66.666_666_666, epsilon = 1e-6);
        assert_abs_diff_eq!(shares["Lighting"], 33.333_333_333, epsilon = 1e-6);
        assert_abs_diff_eq!(shares.values().sum::<f64>(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn share_is_empty_without_consumption() {
        let t = table(indexmap! { "Solar".to_string() => vec![-1.0, -1.0] }, 2);
        assert!(subsystem_share(&t, 1.0).is_empty());
        assert!(subsystem_share(&table(IndexMap::new(), 0), 1.0).is_empty());
    }

    #[test]
    fn solar_offset_matches_energy_ratio() {
        assert_eq!(solar_offset_pct(&hvac_and_solar(), 1.0), 50.0);
        assert_abs_diff_eq!(solar_offset_pct(&hvac_and_solar(), 0.25), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn solar_offset_zero_without_solar_column() {
        assert_eq!(solar_offset_pct(&hvac_only(), 1.0), 0.0);
    }

    #[test]
    fn solar_offset_zero_without_consumption() {
        let t = table(indexmap! { "Solar".to_string() => vec![-2.0; 4] }, 4);
        assert_eq!(solar_offset_pct(&t, 1.0), 0.0);
    }

    #[test]
    fn consumption_energy_scales_with_timestep() {
        assert_eq!(consumption_energy_kwh(&hvac_and_solar(), 1.0), 48.0);
        assert_eq!(consumption_energy_kwh(&hvac_and_solar(), 0.5), 24.0);
        assert_eq!(consumption_energy_kwh(&table(IndexMap::new(), 0), 1.0), 0.0);
    }

    #[test]
    fn daytime_hvac_is_not_flagged() {
        assert!(flag_inefficiencies(&hvac_only(), DEFAULT_NIGHT_STEPS).is_empty());
    }

    #[test]
    fn always_on_hvac_is_flagged() {
        let t = table(indexmap! { "HVAC".to_string() => vec![2.0; 24] }, 24);
        assert_eq!(
            flag_inefficiencies(&t, DEFAULT_NIGHT_STEPS),
            vec![NIGHT_HVAC_WARNING.to_string()]
        );
    }

    #[test]
    fn flagging_uses_custom_night_window() {
        // HVAC only runs 22:00-24:00
        let hvac: Vec<f64> = (0..24).map(|t| if t >= 22 { 3.0 } else { 0.0 }).collect();
        let t = table(indexmap! { "HVAC".to_string() => hvac }, 24);
        assert!(flag_inefficiencies(&t, DEFAULT_NIGHT_STEPS).is_empty());
        assert_eq!(flag_inefficiencies(&t, 20..24).len(), 1);
    }

    #[test]
    fn flagging_ignores_missing_hvac_and_short_tables() {
        let t = table(indexmap! { "Lighting".to_string() => vec![5.0; 24] }, 24);
        assert!(flag_inefficiencies(&t, DEFAULT_NIGHT_STEPS).is_empty());

        let short = table(indexmap! { "HVAC".to_string() => vec![1.0; 3] }, 3);
        assert_eq!(flag_inefficiencies(&short, DEFAULT_NIGHT_STEPS).len(), 1);
        assert!(flag_inefficiencies(&short, 10..20).is_empty());
    }

    #[test]
    fn cost_is_flat_tariff() {
        assert_eq!(energy_cost(48.0, 9.0), 432.0);
    }

    #[test]
    fn daily_energy_buckets_by_day() {
        let t = LoadTable::new(
            12.0,
            5,
            indexmap! { "HVAC".to_string() => vec![1.0, 2.0, 3.0, 4.0, 5.0] },
        );
        assert_eq!(daily_energy_kwh(&t, 12.0), vec![36.0, 84.0, 60.0]);
        assert!(daily_energy_kwh(&table(IndexMap::new(), 0), 1.0).is_empty());
    }

    #[test]
    fn daily_energy_is_net_of_generation() {
        assert_eq!(daily_energy_kwh(&hvac_and_solar(), 1.0), vec![24.0]);
    }
}
