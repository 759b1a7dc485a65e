//! Time-indexed load table produced by a simulation run.

use std::fmt;

use indexmap::IndexMap;

use super::types::TOTAL_LABEL;

/// Aggregated power per subsystem, one row per timestep.
///
/// Columns appear in the order their label was first registered with the
/// simulator, followed by the synthetic [`TOTAL_LABEL`] column. All values
/// are kW, treated as constant over the step. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadTable {
    timestep_hours: f64,
    columns: IndexMap<String, Vec<f64>>,
    total: Vec<f64>,
}

impl LoadTable {
    /// Builds a table from per-subsystem columns, computing the `Total` column.
    ///
    /// Every column must have `rows` entries; the simulator guarantees this.
    pub(crate) fn new(timestep_hours: f64, rows: usize, columns: IndexMap<String, Vec<f64>>) -> Self {
        let mut total = vec![0.0; rows];
        for values in columns.values() {
            debug_assert_eq!(values.len(), rows);
            for (acc, kw) in total.iter_mut().zip(values) {
                *acc += kw;
            }
        }
        Self {
            timestep_hours,
            columns,
            total,
        }
    }

    /// Number of rows (timesteps).
    pub fn len(&self) -> usize {
        self.total.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.total.is_empty()
    }

    /// Duration of one row in hours.
    pub fn timestep_hours(&self) -> f64 {
        self.timestep_hours
    }

    /// Start time of a row in hours since the beginning of the period.
    pub fn time_hours(&self, timestep: usize) -> f64 {
        timestep as f64 * self.timestep_hours
    }

    /// Subsystem labels in column order, excluding `Total`.
    pub fn subsystems(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// All column names in order, `Total` last.
    pub fn column_names(&self) -> Vec<&str> {
        self.subsystems().chain([TOTAL_LABEL]).collect()
    }

    /// Subsystem columns with their values, in column order.
    pub fn subsystem_columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.columns.iter().map(|(label, values)| (label.as_str(), values.as_slice()))
    }

    /// Looks up a column by name; `"Total"` returns the total column.
    pub fn column(&self, label: &str) -> Option<&[f64]> {
        if label == TOTAL_LABEL {
            Some(&self.total)
        } else {
            self.columns.get(label).map(Vec::as_slice)
        }
    }

    /// The row-wise sum across all subsystem columns.
    pub fn total(&self) -> &[f64] {
        &self.total
    }

    /// Subsystem values of one row, in column order. Empty if out of range.
    pub fn row(&self, timestep: usize) -> Vec<(&str, f64)> {
        if timestep >= self.len() {
            return Vec::new();
        }
        self.subsystem_columns()
            .map(|(label, values)| (label, values[timestep]))
            .collect()
    }
}

impl fmt::Display for LoadTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>5}", "step")?;
        for name in self.column_names() {
            write!(f, " {name:>12}")?;
        }
        for t in 0..self.len() {
            writeln!(f)?;
            write!(f, "{t:>5}")?;
            for (_, kw) in self.row(t) {
                write!(f, " {kw:>12.3}")?;
            }
            write!(f, " {:>12.3}", self.total[t])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use indexmap::indexmap;

    use super::*;

    fn sample() -> LoadTable {
        LoadTable::new(
            0.5,
            3,
            indexmap! {
                "HVAC".to_string() => vec![1.0, 2.0, 3.0],
                "Solar".to_string() => vec![0.0, -1.5, -0.5],
            },
        )
    }

    #[test]
    fn total_is_row_wise_sum() {
        assert_eq!(sample().total(), &[1.0, 0.5, 2.5]);
    }

    #[test]
    fn column_order_keeps_insertion_and_total_last() {
        assert_eq!(sample().column_names(), vec!["HVAC", "Solar", "Total"]);
    }

    #[test]
    fn column_lookup_includes_total() {
        let table = sample();
        assert_eq!(table.column("Total"), Some(&[1.0, 0.5, 2.5][..]));
        assert_eq!(table.column("Solar"), Some(&[0.0, -1.5, -0.5][..]));
        assert_eq!(table.column("Lighting"), None);
    }

    #[test]
    fn row_and_time_lookup() {
        let table = sample();
        assert_eq!(table.row(1), vec![("HVAC", 2.0), ("Solar", -1.5)]);
        assert!(table.row(3).is_empty());
        assert_eq!(table.time_hours(3), 1.5);
    }

    #[test]
    fn empty_columns_give_zero_total() {
        let table = LoadTable::new(1.0, 4, IndexMap::new());
        assert_eq!(table.len(), 4);
        assert_eq!(table.total(), &[0.0; 4]);
        assert_eq!(table.column_names(), vec!["Total"]);
    }

    #[test]
    fn display_has_header_and_one_line_per_row() {
        let s = format!("{}", sample());
        assert_eq!(s.lines().count(), 4);
        assert!(s.lines().next().is_some_and(|h| h.contains("Total")));
    }
}
