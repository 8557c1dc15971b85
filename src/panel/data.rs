//! Panel data structures: tracked quantities, per-row storage, and the
//! (country, year) keyed panel itself

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Canonical country identifier (ISO3 code)
pub type CountryCode = String;

/// Number of tracked burden quantities
pub const QUANTITY_COUNT: usize = 7;

/// A burden quantity tracked per country-year
///
/// Cases and deaths each carry low/central/high point estimates; lost
/// working days are derived from central cases at merge time and then
/// treated like any other quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quantity {
    CasesLow,
    CasesCentral,
    CasesHigh,
    DeathsLow,
    DeathsCentral,
    DeathsHigh,
    WorkDaysLost,
}

/// Which scenario multiplier curve applies to a quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityClass {
    /// Scaled by the case-reduction curve (cases and work days)
    CaseLike,
    /// Scaled by the death-reduction curve
    DeathLike,
}

impl Quantity {
    pub const ALL: [Quantity; QUANTITY_COUNT] = [
        Quantity::CasesLow,
        Quantity::CasesCentral,
        Quantity::CasesHigh,
        Quantity::DeathsLow,
        Quantity::DeathsCentral,
        Quantity::DeathsHigh,
        Quantity::WorkDaysLost,
    ];

    /// Storage index within per-row value arrays
    pub fn index(self) -> usize {
        match self {
            Quantity::CasesLow => 0,
            Quantity::CasesCentral => 1,
            Quantity::CasesHigh => 2,
            Quantity::DeathsLow => 3,
            Quantity::DeathsCentral => 4,
            Quantity::DeathsHigh => 5,
            Quantity::WorkDaysLost => 6,
        }
    }

    pub fn class(self) -> QuantityClass {
        match self {
            Quantity::DeathsLow | Quantity::DeathsCentral | Quantity::DeathsHigh => {
                QuantityClass::DeathLike
            }
            _ => QuantityClass::CaseLike,
        }
    }

    /// Column name used in output files
    pub fn column_name(self) -> &'static str {
        match self {
            Quantity::CasesLow => "cases_low",
            Quantity::CasesCentral => "cases_central",
            Quantity::CasesHigh => "cases_high",
            Quantity::DeathsLow => "deaths_low",
            Quantity::DeathsCentral => "deaths_central",
            Quantity::DeathsHigh => "deaths_high",
            Quantity::WorkDaysLost => "work_days_lost",
        }
    }
}

/// One country-year row of the panel
///
/// Baseline values start as observed data, get gap-filled by the
/// extrapolator, and are then extended with scenario-adjusted and averted
/// columns. A missing baseline cell stays missing in every derived column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelRow {
    pub country: CountryCode,
    pub year: u32,

    /// Population for this country-year (estimate preferred over projection)
    pub population: Option<f64>,

    /// Observed or extrapolated values, indexed by `Quantity::index`
    pub baseline: [Option<f64>; QUANTITY_COUNT],

    /// Baseline scaled by the scenario multiplier for the year
    pub if_scenario: [Option<f64>; QUANTITY_COUNT],

    /// baseline - if_scenario; may be negative
    pub averted: [Option<f64>; QUANTITY_COUNT],

    /// Running per-country sum of averted over ascending years
    /// (missing averted contributes a zero increment)
    pub averted_cumulative: [f64; QUANTITY_COUNT],

    /// True when any value on this row was filled by extrapolation for a
    /// year past the reference window. Metadata only; arithmetic never
    /// reads it.
    pub estimated: bool,
}

impl PanelRow {
    pub fn new(country: CountryCode, year: u32) -> Self {
        Self {
            country,
            year,
            population: None,
            baseline: [None; QUANTITY_COUNT],
            if_scenario: [None; QUANTITY_COUNT],
            averted: [None; QUANTITY_COUNT],
            averted_cumulative: [0.0; QUANTITY_COUNT],
            estimated: false,
        }
    }

    pub fn value(&self, quantity: Quantity) -> Option<f64> {
        self.baseline[quantity.index()]
    }

    pub fn set_value(&mut self, quantity: Quantity, value: f64) {
        self.baseline[quantity.index()] = Some(value);
    }
}

/// The longitudinal panel, keyed by (country, year)
///
/// BTreeMap keying gives unique (country, year) rows and deterministic
/// iteration order: country ascending, then year ascending. Cumulative
/// aggregation relies on that order.
#[derive(Debug, Clone, Default)]
pub struct Panel {
    rows: BTreeMap<(CountryCode, u32), PanelRow>,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, country: &str, year: u32) -> Option<&PanelRow> {
        self.rows.get(&(country.to_string(), year))
    }

    pub fn get_mut(&mut self, country: &str, year: u32) -> Option<&mut PanelRow> {
        self.rows.get_mut(&(country.to_string(), year))
    }

    /// Get the row for (country, year), creating an empty one if absent
    pub fn row_mut(&mut self, country: &str, year: u32) -> &mut PanelRow {
        self.rows
            .entry((country.to_string(), year))
            .or_insert_with(|| PanelRow::new(country.to_string(), year))
    }

    pub fn rows(&self) -> impl Iterator<Item = &PanelRow> {
        self.rows.values()
    }

    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut PanelRow> {
        self.rows.values_mut()
    }

    /// Distinct countries, ascending
    pub fn countries(&self) -> Vec<CountryCode> {
        let mut out: Vec<CountryCode> = Vec::new();
        for (country, _) in self.rows.keys() {
            if out.last().map(|c| c != country).unwrap_or(true) {
                out.push(country.clone());
            }
        }
        out
    }

    /// Sum of a baseline quantity across all countries for one year
    ///
    /// Missing cells are skipped; returns None when no country has a value
    /// for that year at all.
    pub fn world_total(&self, quantity: Quantity, year: u32) -> Option<f64> {
        let mut total = 0.0;
        let mut any = false;
        for row in self.rows.values() {
            if row.year == year {
                if let Some(v) = row.value(quantity) {
                    total += v;
                    any = true;
                }
            }
        }
        any.then_some(total)
    }

    /// World totals for a quantity over every year present in the panel
    pub fn world_totals(&self, quantity: Quantity) -> BTreeMap<u32, f64> {
        let mut totals: BTreeMap<u32, f64> = BTreeMap::new();
        for row in self.rows.values() {
            if let Some(v) = row.value(quantity) {
                *totals.entry(row.year).or_insert(0.0) += v;
            }
        }
        totals
    }
}

/// World-level averted totals for one year
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldRow {
    pub year: u32,
    /// Sum of per-country averted values, missing treated as zero for the
    /// sum only
    pub averted: [f64; QUANTITY_COUNT],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_indices_are_distinct() {
        for (i, q) in Quantity::ALL.iter().enumerate() {
            assert_eq!(q.index(), i);
        }
    }

    #[test]
    fn test_quantity_classes() {
        assert_eq!(Quantity::CasesLow.class(), QuantityClass::CaseLike);
        assert_eq!(Quantity::WorkDaysLost.class(), QuantityClass::CaseLike);
        assert_eq!(Quantity::DeathsCentral.class(), QuantityClass::DeathLike);
    }

    #[test]
    fn test_panel_unique_keys() {
        let mut panel = Panel::new();
        panel.row_mut("NGA", 2020).set_value(Quantity::CasesCentral, 10.0);
        panel.row_mut("NGA", 2020).set_value(Quantity::CasesCentral, 20.0);
        assert_eq!(panel.len(), 1);
        assert_eq!(
            panel.get("NGA", 2020).unwrap().value(Quantity::CasesCentral),
            Some(20.0)
        );
    }

    #[test]
    fn test_world_total_skips_missing() {
        let mut panel = Panel::new();
        panel.row_mut("NGA", 2020).set_value(Quantity::CasesCentral, 10.0);
        panel.row_mut("COD", 2020).set_value(Quantity::CasesCentral, 5.0);
        panel.row_mut("IND", 2020); // no value
        assert_eq!(panel.world_total(Quantity::CasesCentral, 2020), Some(15.0));
        assert_eq!(panel.world_total(Quantity::CasesCentral, 2021), None);
    }

    #[test]
    fn test_countries_sorted_distinct() {
        let mut panel = Panel::new();
        panel.row_mut("NGA", 2020);
        panel.row_mut("NGA", 2021);
        panel.row_mut("COD", 2020);
        assert_eq!(panel.countries(), vec!["COD".to_string(), "NGA".to_string()]);
    }
}
