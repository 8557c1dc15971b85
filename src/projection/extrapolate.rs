//! Forward extrapolation of missing country-year values
//!
//! Fills every missing cell with a ratio projection: the country's anchor
//! value scaled by the year's population relative to the anchor
//! population. This assumes burden scales linearly with population against
//! the reference-window average; it deliberately models no epidemiology,
//! interventions, or policy. A simplifying assumption, not a forecast.

use super::anchors::Anchor;
use crate::panel::{CountryCode, Panel, Quantity};
use crate::scenario::ScenarioConfig;
use log::info;
use std::collections::BTreeMap;

/// Fill missing cells in place
///
/// A cell is filled only when all three prerequisites exist: an anchor for
/// the quantity, an anchor population, and a population for the row's
/// year. Otherwise it stays missing and propagates as missing downstream.
///
/// Rows that gain values for years past the reference window are tagged
/// `estimated`; the tag is output metadata and never feeds arithmetic.
pub fn fill_gaps(
    panel: &mut Panel,
    anchors: &BTreeMap<CountryCode, Anchor>,
    config: &ScenarioConfig,
) {
    let mut filled_cells = 0usize;

    for row in panel.rows_mut() {
        let anchor = match anchors.get(&row.country) {
            Some(anchor) => anchor,
            None => continue,
        };
        let (population, anchor_population) = match (row.population, anchor.population) {
            (Some(p), Some(ap)) if ap > 0.0 => (p, ap),
            _ => continue,
        };

        let ratio = population / anchor_population;
        let mut filled_any = false;

        for quantity in Quantity::ALL {
            let idx = quantity.index();
            if row.baseline[idx].is_some() {
                continue;
            }
            if let Some(anchor_value) = anchor.values[idx] {
                row.baseline[idx] = Some(anchor_value * ratio);
                filled_any = true;
                filled_cells += 1;
            }
        }

        if filled_any && row.year > config.reference_end {
            row.estimated = true;
        }
    }

    info!("extrapolation filled {} cells", filled_cells);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::compute_anchors;
    use approx::assert_relative_eq;

    fn anchor_with(population: f64, quantity: Quantity, value: f64) -> Anchor {
        let mut anchor = Anchor {
            population: Some(population),
            ..Anchor::default()
        };
        anchor.values[quantity.index()] = Some(value);
        anchor
    }

    #[test]
    fn test_ratio_projection() {
        // anchor population 100, anchor cases 50, future population 150
        // => filled cases = 50 * 150/100 = 75
        let config = ScenarioConfig::default();
        let mut panel = Panel::new();
        panel.row_mut("NGA", 2035).population = Some(150.0);

        let mut anchors = BTreeMap::new();
        anchors.insert(
            "NGA".to_string(),
            anchor_with(100.0, Quantity::CasesCentral, 50.0),
        );

        fill_gaps(&mut panel, &anchors, &config);

        let row = panel.get("NGA", 2035).unwrap();
        assert_relative_eq!(row.value(Quantity::CasesCentral).unwrap(), 75.0);
        assert!(row.estimated);
    }

    #[test]
    fn test_observed_values_not_overwritten() {
        let config = ScenarioConfig::default();
        let mut panel = Panel::new();
        {
            let row = panel.row_mut("NGA", 2010);
            row.population = Some(150.0);
            row.set_value(Quantity::CasesCentral, 42.0);
        }

        let mut anchors = BTreeMap::new();
        anchors.insert(
            "NGA".to_string(),
            anchor_with(100.0, Quantity::CasesCentral, 50.0),
        );

        fill_gaps(&mut panel, &anchors, &config);

        let row = panel.get("NGA", 2010).unwrap();
        assert_relative_eq!(row.value(Quantity::CasesCentral).unwrap(), 42.0);
        assert!(!row.estimated);
    }

    #[test]
    fn test_missing_population_stays_missing() {
        let config = ScenarioConfig::default();
        let mut panel = Panel::new();
        panel.row_mut("NGA", 2035); // no population

        let mut anchors = BTreeMap::new();
        anchors.insert(
            "NGA".to_string(),
            anchor_with(100.0, Quantity::CasesCentral, 50.0),
        );

        fill_gaps(&mut panel, &anchors, &config);

        let row = panel.get("NGA", 2035).unwrap();
        assert_eq!(row.value(Quantity::CasesCentral), None);
        assert!(!row.estimated);
    }

    #[test]
    fn test_missing_anchor_quantity_stays_missing() {
        let config = ScenarioConfig::default();
        let mut panel = Panel::new();
        panel.row_mut("NGA", 2035).population = Some(150.0);

        let mut anchors = BTreeMap::new();
        anchors.insert(
            "NGA".to_string(),
            anchor_with(100.0, Quantity::CasesCentral, 50.0),
        );

        fill_gaps(&mut panel, &anchors, &config);

        let row = panel.get("NGA", 2035).unwrap();
        assert_eq!(row.value(Quantity::DeathsCentral), None);
    }

    #[test]
    fn test_historical_gap_fill_not_tagged_estimated() {
        // Gaps inside the historical range are filled but not tagged as
        // projected rows
        let config = ScenarioConfig::default();
        let mut panel = Panel::new();
        panel.row_mut("NGA", 2005).population = Some(80.0);

        let mut anchors = BTreeMap::new();
        anchors.insert(
            "NGA".to_string(),
            anchor_with(100.0, Quantity::CasesCentral, 50.0),
        );

        fill_gaps(&mut panel, &anchors, &config);

        let row = panel.get("NGA", 2005).unwrap();
        assert_relative_eq!(row.value(Quantity::CasesCentral).unwrap(), 40.0);
        assert!(!row.estimated);
    }

    #[test]
    fn test_fill_from_computed_anchors() {
        // End-to-end with compute_anchors feeding fill_gaps
        let config = ScenarioConfig::default();
        let mut panel = Panel::new();
        for (year, pop, cases) in [(2018, 95.0, 47.5), (2019, 100.0, 50.0), (2020, 105.0, 52.5)] {
            let row = panel.row_mut("NGA", year);
            row.population = Some(pop);
            row.set_value(Quantity::CasesCentral, cases);
        }
        panel.row_mut("NGA", 2030).population = Some(200.0);

        let anchors = compute_anchors(&panel, &config);
        fill_gaps(&mut panel, &anchors, &config);

        // anchor pop 100, anchor cases 50 => 50 * 200/100 = 100
        let row = panel.get("NGA", 2030).unwrap();
        assert_relative_eq!(row.value(Quantity::CasesCentral).unwrap(), 100.0);
        assert!(row.estimated);
    }
}
