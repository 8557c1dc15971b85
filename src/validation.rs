//! Advisory cross-checks on the assembled panel
//!
//! These are sanity checks against externally published totals and the
//! expected shape of the data. A failing check is reported to the caller,
//! never silently discarded, and does not abort the run.

use crate::panel::{Panel, Quantity};
use crate::scenario::ScenarioConfig;
use log::warn;
use serde::Serialize;

/// WHO World Malaria Report 2021 global totals for 2020
const WHO_CASES_2020: f64 = 241_000_000.0;
const WHO_DEATHS_2020: f64 = 627_000.0;

/// Relative tolerance for comparisons against published totals
const PUBLISHED_TOTAL_TOLERANCE: f64 = 0.15;

/// One named check with its outcome
#[derive(Debug, Clone, Serialize)]
pub struct ValidationCheck {
    pub name: String,
    pub passed: bool,
    pub detail: String,
}

/// Results of every cross-check run against the panel
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub checks: Vec<ValidationCheck>,
}

impl ValidationReport {
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ValidationCheck> {
        self.checks.iter().filter(|c| !c.passed)
    }

    fn push(&mut self, name: &str, passed: bool, detail: String) {
        if !passed {
            warn!("validation check '{}' failed: {}", name, detail);
        }
        self.checks.push(ValidationCheck {
            name: name.to_string(),
            passed,
            detail,
        });
    }
}

/// Run all cross-checks
pub fn validate(panel: &Panel, config: &ScenarioConfig) -> ValidationReport {
    let mut report = ValidationReport::default();

    check_published_total(
        &mut report,
        "world_cases_2020_vs_who",
        panel.world_total(Quantity::CasesCentral, 2020),
        WHO_CASES_2020,
    );
    check_published_total(
        &mut report,
        "world_deaths_2020_vs_who",
        panel.world_total(Quantity::DeathsCentral, 2020),
        WHO_DEATHS_2020,
    );
    check_band_ordering(&mut report, panel);
    check_horizon(&mut report, panel, config);

    report
}

fn check_published_total(
    report: &mut ValidationReport,
    name: &str,
    computed: Option<f64>,
    published: f64,
) {
    match computed {
        Some(total) => {
            let relative_error = (total - published).abs() / published;
            report.push(
                name,
                relative_error <= PUBLISHED_TOTAL_TOLERANCE,
                format!(
                    "computed {:.0} vs published {:.0} ({:.1}% off)",
                    total,
                    published,
                    relative_error * 100.0
                ),
            );
        }
        None => report.push(name, false, "no data for 2020".to_string()),
    }
}

/// Count low <= central <= high violations. Source data occasionally
/// violates the ordering; we report it and leave the values untouched.
fn check_band_ordering(report: &mut ValidationReport, panel: &Panel) {
    let bands = [
        (Quantity::CasesLow, Quantity::CasesCentral, Quantity::CasesHigh),
        (Quantity::DeathsLow, Quantity::DeathsCentral, Quantity::DeathsHigh),
    ];
    let mut violations = 0usize;
    for row in panel.rows() {
        for (low, central, high) in bands {
            if let (Some(l), Some(c), Some(h)) =
                (row.value(low), row.value(central), row.value(high))
            {
                if !(l <= c && c <= h) {
                    violations += 1;
                }
            }
        }
    }
    report.push(
        "estimate_band_ordering",
        violations == 0,
        format!("{} rows violate low <= central <= high", violations),
    );
}

fn check_horizon(report: &mut ValidationReport, panel: &Panel, config: &ScenarioConfig) {
    let out_of_range = panel
        .rows()
        .filter(|r| r.year < config.horizon_start || r.year > config.horizon_end)
        .count();
    report.push(
        "horizon_containment",
        out_of_range == 0,
        format!("{} rows outside [{}, {}]", out_of_range, config.horizon_start, config.horizon_end),
    );
}
