//! World-level and cumulative aggregation of averted quantities

use crate::panel::{Panel, WorldRow, QUANTITY_COUNT};
use std::collections::BTreeMap;

/// Compute per-country cumulative averted columns and the world averted
/// series
///
/// Cumulative sums run over ascending years within each country (the
/// panel's key order guarantees this); a missing averted value contributes
/// a zero increment without resetting the running total. World sums treat
/// missing as zero for the sum only; the per-country cells themselves stay
/// missing.
pub fn aggregate(panel: &mut Panel) -> Vec<WorldRow> {
    let mut world: BTreeMap<u32, [f64; QUANTITY_COUNT]> = BTreeMap::new();

    let mut current_country: Option<String> = None;
    let mut running = [0.0; QUANTITY_COUNT];

    // Panel iteration is (country asc, year asc), so a country change
    // resets the running totals exactly once per country.
    for row in panel.rows_mut() {
        if current_country.as_deref() != Some(row.country.as_str()) {
            current_country = Some(row.country.clone());
            running = [0.0; QUANTITY_COUNT];
        }

        let world_year = world.entry(row.year).or_insert([0.0; QUANTITY_COUNT]);
        for i in 0..QUANTITY_COUNT {
            if let Some(averted) = row.averted[i] {
                running[i] += averted;
                world_year[i] += averted;
            }
            row.averted_cumulative[i] = running[i];
        }
    }

    world
        .into_iter()
        .map(|(year, averted)| WorldRow { year, averted })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::Quantity;
    use approx::assert_relative_eq;

    fn set_averted(panel: &mut Panel, country: &str, year: u32, value: Option<f64>) {
        let row = panel.row_mut(country, year);
        row.averted[Quantity::CasesCentral.index()] = value;
    }

    #[test]
    fn test_cumulative_with_missing_step() {
        // {5, missing, 3} across consecutive years => {5, 5, 8}
        let mut panel = Panel::new();
        set_averted(&mut panel, "NGA", 2025, Some(5.0));
        set_averted(&mut panel, "NGA", 2026, None);
        set_averted(&mut panel, "NGA", 2027, Some(3.0));

        aggregate(&mut panel);

        let idx = Quantity::CasesCentral.index();
        assert_relative_eq!(panel.get("NGA", 2025).unwrap().averted_cumulative[idx], 5.0);
        assert_relative_eq!(panel.get("NGA", 2026).unwrap().averted_cumulative[idx], 5.0);
        assert_relative_eq!(panel.get("NGA", 2027).unwrap().averted_cumulative[idx], 8.0);
    }

    #[test]
    fn test_cumulative_resets_per_country() {
        let mut panel = Panel::new();
        set_averted(&mut panel, "COD", 2025, Some(5.0));
        set_averted(&mut panel, "NGA", 2025, Some(7.0));

        aggregate(&mut panel);

        let idx = Quantity::CasesCentral.index();
        assert_relative_eq!(panel.get("COD", 2025).unwrap().averted_cumulative[idx], 5.0);
        assert_relative_eq!(panel.get("NGA", 2025).unwrap().averted_cumulative[idx], 7.0);
    }

    #[test]
    fn test_world_sum_treats_missing_as_zero() {
        let mut panel = Panel::new();
        set_averted(&mut panel, "COD", 2025, Some(5.0));
        set_averted(&mut panel, "NGA", 2025, None);
        set_averted(&mut panel, "IND", 2025, Some(2.0));

        let world = aggregate(&mut panel);

        let idx = Quantity::CasesCentral.index();
        let row_2025 = world.iter().find(|w| w.year == 2025).unwrap();
        assert_relative_eq!(row_2025.averted[idx], 7.0);
        // The missing per-country cell stays missing
        assert_eq!(panel.get("NGA", 2025).unwrap().averted[idx], None);
    }

    #[test]
    fn test_world_rows_sorted_by_year() {
        let mut panel = Panel::new();
        set_averted(&mut panel, "NGA", 2030, Some(1.0));
        set_averted(&mut panel, "NGA", 2025, Some(1.0));

        let world = aggregate(&mut panel);
        let years: Vec<u32> = world.iter().map(|w| w.year).collect();
        assert_eq!(years, vec![2025, 2030]);
    }

    #[test]
    fn test_negative_averted_flows_through() {
        let mut panel = Panel::new();
        set_averted(&mut panel, "NGA", 2025, Some(-4.0));
        set_averted(&mut panel, "NGA", 2026, Some(6.0));

        let world = aggregate(&mut panel);

        let idx = Quantity::CasesCentral.index();
        assert_relative_eq!(panel.get("NGA", 2026).unwrap().averted_cumulative[idx], 2.0);
        assert_relative_eq!(world[0].averted[idx], -4.0);
    }
}
