//! Historical baseline extraction
//!
//! Computes each country's anchor: the arithmetic mean of population and
//! every tracked quantity over the reference window (2018-2020 by
//! default). Anchors are transient, consumed by the extrapolator and never
//! written to output.

use crate::panel::{CountryCode, Panel, Quantity, QUANTITY_COUNT};
use crate::scenario::ScenarioConfig;
use std::collections::BTreeMap;

/// Per-country mean values over the reference window
#[derive(Debug, Clone, Default)]
pub struct Anchor {
    pub population: Option<f64>,
    /// Mean per quantity, indexed by `Quantity::index`; None where the
    /// window held no observations for that quantity
    pub values: [Option<f64>; QUANTITY_COUNT],
}

#[derive(Debug, Clone, Copy, Default)]
struct MeanAccumulator {
    sum: f64,
    count: u32,
}

impl MeanAccumulator {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Compute anchors for every country in the panel
///
/// The mean for each quantity is taken over its non-missing values within
/// the reference window only; a quantity with no observations in the
/// window gets no anchor. Result depends only on panel contents.
pub fn compute_anchors(panel: &Panel, config: &ScenarioConfig) -> BTreeMap<CountryCode, Anchor> {
    let mut population_acc: BTreeMap<CountryCode, MeanAccumulator> = BTreeMap::new();
    let mut value_acc: BTreeMap<CountryCode, [MeanAccumulator; QUANTITY_COUNT]> = BTreeMap::new();

    for row in panel.rows() {
        if row.year < config.reference_start || row.year > config.reference_end {
            continue;
        }
        if let Some(pop) = row.population {
            population_acc.entry(row.country.clone()).or_default().push(pop);
        }
        let accs = value_acc.entry(row.country.clone()).or_default();
        for quantity in Quantity::ALL {
            if let Some(v) = row.value(quantity) {
                accs[quantity.index()].push(v);
            }
        }
    }

    let mut anchors: BTreeMap<CountryCode, Anchor> = BTreeMap::new();
    for country in panel.countries() {
        let mut anchor = Anchor::default();
        if let Some(acc) = population_acc.get(&country) {
            anchor.population = acc.mean();
        }
        if let Some(accs) = value_acc.get(&country) {
            for (i, acc) in accs.iter().enumerate() {
                anchor.values[i] = acc.mean();
            }
        }
        anchors.insert(country, anchor);
    }

    anchors
}
