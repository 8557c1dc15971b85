//! Scenario multiplier builder
//!
//! Converts discrete policy checkpoints into a dense per-year multiplier
//! curve. Each checkpoint's implied ratio corrects the stated target for
//! drift already present in the extrapolated baseline: if the trajectory
//! at the checkpoint year is already 80% of the baseline-year total, a
//! 0.25 target needs a 0.3125 multiplier, not 0.25.

use super::config::ScenarioConfig;
use log::debug;
use std::collections::BTreeMap;

/// Dense per-year multiplier series over the configured horizon
///
/// A year's multiplier is `None` where a missing or zero total left the
/// curve undefined; downstream scenario columns stay missing for those
/// years rather than silently reading "no change".
#[derive(Debug, Clone)]
pub struct MultiplierCurve {
    start: u32,
    values: Vec<Option<f64>>,
}

impl MultiplierCurve {
    pub fn get(&self, year: u32) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        // Flat extension outside the built range
        let idx = if year < self.start {
            0
        } else {
            ((year - self.start) as usize).min(self.values.len() - 1)
        };
        self.values[idx]
    }
}

/// Build one multiplier curve from world totals for a quantity class
///
/// `totals_by_year` holds the (observed + extrapolated) world totals the
/// implied ratios are computed against. Rules:
/// - years up to and including the baseline year: 1.0
/// - between defined knots: linear interpolation by year
/// - after the last defined knot: flat, unless a later checkpoint exists
///   whose implied ratio is undefined, in which case the tail is missing
/// - undefined knots (zero/missing totals) are skipped; interpolation
///   bridges between the nearest defined neighbors
pub fn build_multiplier_curve(
    totals_by_year: &BTreeMap<u32, f64>,
    config: &ScenarioConfig,
) -> MultiplierCurve {
    let baseline_total = totals_by_year
        .get(&config.baseline_year)
        .copied()
        .filter(|t| *t > 0.0);

    // Knots: the baseline year is an implicit checkpoint at ratio 1.0
    let mut knots: Vec<(u32, Option<f64>)> = vec![(config.baseline_year, Some(1.0))];
    for checkpoint in config.enabled_checkpoints() {
        let checkpoint_total = totals_by_year
            .get(&checkpoint.year)
            .copied()
            .filter(|t| *t > 0.0);
        let implied = match (baseline_total, checkpoint_total) {
            (Some(base), Some(at_checkpoint)) => {
                // target / (total[ckpt] / total[baseline])
                Some(checkpoint.target_ratio * base / at_checkpoint)
            }
            _ => None,
        };
        debug!(
            "checkpoint {}: target {} implied {:?}",
            checkpoint.year, checkpoint.target_ratio, implied
        );
        knots.push((checkpoint.year, implied));
    }
    knots.sort_by_key(|(year, _)| *year);

    let start = config.horizon_start;
    let values = (config.horizon_start..=config.horizon_end)
        .map(|year| multiplier_at(&knots, config.baseline_year, year))
        .collect();

    MultiplierCurve { start, values }
}

fn multiplier_at(knots: &[(u32, Option<f64>)], baseline_year: u32, year: u32) -> Option<f64> {
    if year <= baseline_year {
        return Some(1.0);
    }

    let defined = |(ky, kv): &(u32, Option<f64>)| kv.map(|v| (*ky, v));

    // Nearest defined knot at or before `year`; the baseline knot
    // guarantees one exists
    let (y1, v1) = knots
        .iter()
        .filter_map(defined)
        .filter(|(ky, _)| *ky <= year)
        .last()?;

    // Nearest defined knot after `year`
    let after = knots.iter().filter_map(defined).find(|(ky, _)| *ky > year);

    match after {
        Some((y2, v2)) => {
            let t = (year - y1) as f64 / (y2 - y1) as f64;
            Some(v1 + (v2 - v1) * t)
        }
        None => {
            // Flat extension needs the last checkpoint's value; if a later
            // checkpoint exists but its ratio is undefined, the tail is
            // unknown, not "no change"
            let trailing_undefined = knots.iter().any(|(ky, kv)| *ky > y1 && kv.is_none());
            if trailing_undefined {
                None
            } else {
                Some(v1)
            }
        }
    }
}
