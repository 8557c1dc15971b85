//! Panel merger: combines burden observations with population estimates
//! and projections into a single (country, year) keyed panel

use super::data::{CountryCode, Panel, Quantity};
use crate::scenario::ScenarioConfig;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A cleaned burden record for one country-year
///
/// Produced by the input loaders after country resolution; every burden
/// field may be absent (not yet estimated for that year).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurdenObservation {
    pub country: CountryCode,
    pub year: u32,
    pub cases_low: Option<f64>,
    pub cases_central: Option<f64>,
    pub cases_high: Option<f64>,
    pub deaths_low: Option<f64>,
    pub deaths_central: Option<f64>,
    pub deaths_high: Option<f64>,
}

/// A population value for one country-year, from either the estimates or
/// the projections table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationRecord {
    pub country: CountryCode,
    pub year: u32,
    pub population: f64,
}

/// Merge the three input tables into one panel
///
/// - Population estimates and projections are coalesced per (country,
///   year); where both exist the estimate wins.
/// - Burden observations are joined with full outer semantics: a row
///   present in only one source keeps the other side's fields missing.
/// - Years outside the configured horizon are excluded entirely.
/// - `work_days_lost` is derived here as central cases times the
///   days-lost-per-case constant (a research assumption, not data).
pub fn merge(
    burden: &[BurdenObservation],
    population_estimates: &[PopulationRecord],
    population_projections: &[PopulationRecord],
    config: &ScenarioConfig,
) -> Panel {
    let in_horizon = |year: u32| year >= config.horizon_start && year <= config.horizon_end;

    // Coalesce population: projections first, then estimates overwrite
    let mut population: BTreeMap<(CountryCode, u32), f64> = BTreeMap::new();
    for rec in population_projections {
        if in_horizon(rec.year) {
            population.insert((rec.country.clone(), rec.year), rec.population);
        }
    }
    for rec in population_estimates {
        if in_horizon(rec.year) {
            population.insert((rec.country.clone(), rec.year), rec.population);
        }
    }

    let mut panel = Panel::new();

    for ((country, year), pop) in &population {
        panel.row_mut(country, *year).population = Some(*pop);
    }

    for obs in burden {
        if !in_horizon(obs.year) {
            continue;
        }
        let row = panel.row_mut(&obs.country, obs.year);
        row.baseline[Quantity::CasesLow.index()] = obs.cases_low;
        row.baseline[Quantity::CasesCentral.index()] = obs.cases_central;
        row.baseline[Quantity::CasesHigh.index()] = obs.cases_high;
        row.baseline[Quantity::DeathsLow.index()] = obs.deaths_low;
        row.baseline[Quantity::DeathsCentral.index()] = obs.deaths_central;
        row.baseline[Quantity::DeathsHigh.index()] = obs.deaths_high;
        row.baseline[Quantity::WorkDaysLost.index()] =
            obs.cases_central.map(|c| c * config.work_days_per_case);
    }

    info!(
        "merged panel: {} rows, {} countries",
        panel.len(),
        panel.countries().len()
    );

    panel
}
