//! Scenario applier: scales baseline quantities by the multiplier curves
//! and computes averted values

use super::multiplier::MultiplierCurve;
use crate::panel::{Panel, Quantity, QuantityClass};
use rayon::prelude::*;

/// Apply the scenario to every panel row
///
/// Case-like quantities (cases and work days) use `case_curve`, death-like
/// quantities use `death_curve`. For each quantity:
/// `if_scenario = baseline * multiplier` and
/// `averted = baseline - if_scenario`.
///
/// A missing baseline or a missing multiplier leaves both derived cells
/// missing; averted values may be negative when the scenario trajectory
/// exceeds the baseline.
pub fn apply_scenario(panel: &mut Panel, case_curve: &MultiplierCurve, death_curve: &MultiplierCurve) {
    // Rows never read each other, so this is safe to run per-row in
    // parallel; world aggregation happens afterwards.
    let mut rows: Vec<_> = panel.rows_mut().collect();
    rows.par_iter_mut().for_each(|row| {
        for quantity in Quantity::ALL {
            let curve = match quantity.class() {
                QuantityClass::CaseLike => case_curve,
                QuantityClass::DeathLike => death_curve,
            };
            let idx = quantity.index();
            let scaled = match (row.baseline[idx], curve.get(row.year)) {
                (Some(baseline), Some(multiplier)) => Some(baseline * multiplier),
                _ => None,
            };
            row.if_scenario[idx] = scaled;
            row.averted[idx] = match (row.baseline[idx], scaled) {
                (Some(baseline), Some(s)) => Some(baseline - s),
                _ => None,
            };
        }
    });
}
