//! Malaria Projection - burden panel assembly and eradication-scenario modeling
//!
//! This library provides:
//! - Merging of burden estimates with UN population estimates/projections
//!   into a (country, year) panel
//! - Population-ratio extrapolation of missing country-year values
//! - WHO eradication-target scenario modeling (averted cases, deaths, and
//!   lost working days versus a do-nothing baseline)
//! - World-level and cumulative aggregation plus advisory validation

pub mod aggregate;
pub mod comparators;
pub mod error;
pub mod output;
pub mod panel;
pub mod projection;
pub mod scenario;
pub mod sources;
pub mod validation;

// Re-export commonly used types
pub use error::PipelineError;
pub use panel::{BurdenObservation, Panel, PanelRow, PopulationRecord, Quantity, WorldRow};
pub use projection::{compute_anchors, fill_gaps, Anchor};
pub use scenario::{apply_scenario, build_multiplier_curve, Checkpoint, ScenarioConfig};
pub use validation::{validate, ValidationReport};

use log::info;

/// Everything a pipeline run produces
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// The derived panel: observed, extrapolated, scenario, averted, and
    /// cumulative columns per country-year
    pub panel: Panel,
    /// World averted totals per year
    pub world: Vec<WorldRow>,
    /// Advisory cross-check results
    pub validation: ValidationReport,
}

/// Run the full pipeline over cleaned input records
///
/// Stages run in fixed order: merge, anchor extraction, extrapolation,
/// multiplier curve construction (one curve for case-like quantities, one
/// for deaths), scenario application, aggregation, validation. The whole
/// run is deterministic and either completes or fails outright.
pub fn run_pipeline(
    burden: &[BurdenObservation],
    population_estimates: &[PopulationRecord],
    population_projections: &[PopulationRecord],
    config: &ScenarioConfig,
) -> PipelineOutput {
    let mut panel = panel::merge(burden, population_estimates, population_projections, config);

    let anchors = compute_anchors(&panel, config);
    fill_gaps(&mut panel, &anchors, config);

    // Curves are anchored to the completed (observed + extrapolated)
    // world trajectories, so implied ratios correct for baseline drift
    let case_totals = panel.world_totals(Quantity::CasesCentral);
    let death_totals = panel.world_totals(Quantity::DeathsCentral);
    let case_curve = build_multiplier_curve(&case_totals, config);
    let death_curve = build_multiplier_curve(&death_totals, config);

    apply_scenario(&mut panel, &case_curve, &death_curve);

    let world = aggregate::aggregate(&mut panel);
    let validation = validate(&panel, config);

    info!(
        "pipeline complete: {} panel rows, {} world years, validation {}",
        panel.len(),
        world.len(),
        if validation.all_passed() { "clean" } else { "has failures" }
    );

    PipelineOutput {
        panel,
        world,
        validation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn population(country: &str, year: u32, value: f64) -> PopulationRecord {
        PopulationRecord {
            country: country.to_string(),
            year,
            population: value,
        }
    }

    fn burden(country: &str, year: u32, cases: f64, deaths: f64) -> BurdenObservation {
        BurdenObservation {
            country: country.to_string(),
            year,
            cases_low: Some(cases * 0.8),
            cases_central: Some(cases),
            cases_high: Some(cases * 1.2),
            deaths_low: Some(deaths * 0.8),
            deaths_central: Some(deaths),
            deaths_high: Some(deaths * 1.2),
        }
    }

    /// One country with flat burden over 2015-2020 and a growing
    /// population; checks extrapolation, scenario, and aggregation wiring.
    #[test]
    fn test_pipeline_end_to_end() {
        let config = ScenarioConfig {
            baseline_year: 2015,
            checkpoints: vec![Checkpoint::new(2030, 0.10)],
            ..ScenarioConfig::default()
        };

        let mut estimates = Vec::new();
        let mut observations = Vec::new();
        for year in 2015..=2020 {
            estimates.push(population("NGA", year, 100.0));
            observations.push(burden("NGA", year, 1000.0, 10.0));
        }
        // Future years: population only, burden to be extrapolated
        let projections: Vec<PopulationRecord> = (2021..=2035)
            .map(|year| population("NGA", year, 100.0))
            .collect();

        let out = run_pipeline(&observations, &estimates, &projections, &config);

        // Extrapolated 2030 cases: anchor 1000, population flat => 1000
        let row_2030 = out.panel.get("NGA", 2030).unwrap();
        assert_relative_eq!(row_2030.value(Quantity::CasesCentral).unwrap(), 1000.0);
        assert!(row_2030.estimated);

        // Flat trajectory: implied ratio at 2030 equals the raw target
        let idx = Quantity::CasesCentral.index();
        assert_relative_eq!(row_2030.if_scenario[idx].unwrap(), 100.0, epsilon = 1e-9);
        assert_relative_eq!(row_2030.averted[idx].unwrap(), 900.0, epsilon = 1e-9);

        // World series covers the averted years and matches the single
        // country's values
        let world_2030 = out.world.iter().find(|w| w.year == 2030).unwrap();
        assert_relative_eq!(world_2030.averted[idx], 900.0, epsilon = 1e-9);

        // Cumulative is monotone here (all averted values positive)
        let cumulative_2035 = out.panel.get("NGA", 2035).unwrap().averted_cumulative[idx];
        let cumulative_2030 = row_2030.averted_cumulative[idx];
        assert!(cumulative_2035 > cumulative_2030);
    }

    #[test]
    fn test_pipeline_population_growth_scales_extrapolation() {
        let config = ScenarioConfig {
            baseline_year: 2015,
            checkpoints: vec![Checkpoint::new(2030, 0.10)],
            ..ScenarioConfig::default()
        };

        let estimates: Vec<PopulationRecord> = (2018..=2020)
            .map(|year| population("NGA", year, 100.0))
            .collect();
        let observations: Vec<BurdenObservation> = (2015..=2020)
            .map(|year| burden("NGA", year, 50.0, 1.0))
            .collect();
        let projections = vec![population("NGA", 2040, 150.0)];

        let out = run_pipeline(&observations, &estimates, &projections, &config);

        // 50 * 150/100 = 75
        let row = out.panel.get("NGA", 2040).unwrap();
        assert_relative_eq!(row.value(Quantity::CasesCentral).unwrap(), 75.0);
    }

    #[test]
    fn test_pipeline_missing_data_never_becomes_zero() {
        let config = ScenarioConfig::default();

        // Burden only outside the reference window, no population at all:
        // nothing can anchor, nothing can fill
        let observations = vec![burden("NGA", 2005, 10.0, 1.0)];
        let out = run_pipeline(&observations, &[], &[], &config);

        let row = out.panel.get("NGA", 2005).unwrap();
        let idx = Quantity::CasesCentral.index();
        // Baseline observed, but the curves are undefined (no 2015 or
        // 2030 totals), so scenario columns are missing, not zero
        assert_eq!(row.baseline[idx], Some(10.0));
        assert_eq!(row.if_scenario[idx], Some(10.0)); // pre-baseline multiplier 1.0
        assert_relative_eq!(row.averted[idx].unwrap(), 0.0);

        let row_missing = out.panel.get("NGA", 2005).unwrap();
        assert_eq!(row_missing.baseline[Quantity::CasesLow.index()], Some(8.0));
    }

    #[test]
    fn test_pipeline_validation_reports_failures_on_sparse_input() {
        let config = ScenarioConfig::default();
        let observations = vec![burden("NGA", 2010, 10.0, 1.0)];
        let out = run_pipeline(&observations, &[], &[], &config);
        // No 2020 totals to compare to the WHO figures
        assert!(!out.validation.all_passed());
    }
}
