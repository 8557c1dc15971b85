//! Hard-coded comparator statistics for the presentation layer
//!
//! Static context figures the charts compare averted totals against.
//! Nothing here is computed by the pipeline; these are transcribed
//! external statistics.

use serde::Serialize;

/// A single comparator figure
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Comparator {
    pub label: &'static str,
    pub value: f64,
    pub unit: &'static str,
}

/// Approximate annual working days supplied by entire national workforces
/// (employed persons times working days per year, ILO employment figures)
pub const NATIONAL_WORKING_DAYS: &[Comparator] = &[
    Comparator {
        label: "France, all workers, one year",
        value: 6.2e9,
        unit: "working days",
    },
    Comparator {
        label: "Germany, all workers, one year",
        value: 9.6e9,
        unit: "working days",
    },
    Comparator {
        label: "United Kingdom, all workers, one year",
        value: 7.4e9,
        unit: "working days",
    },
    Comparator {
        label: "Nigeria, all workers, one year",
        value: 13.1e9,
        unit: "working days",
    },
];

/// World annual death tolls from other causes (GBD 2019)
pub const WORLD_DEATH_TOLLS: &[Comparator] = &[
    Comparator {
        label: "HIV/AIDS",
        value: 864_000.0,
        unit: "deaths per year",
    },
    Comparator {
        label: "Tuberculosis",
        value: 1_180_000.0,
        unit: "deaths per year",
    },
    Comparator {
        label: "Road injuries",
        value: 1_280_000.0,
        unit: "deaths per year",
    },
    Comparator {
        label: "Homicide",
        value: 415_000.0,
        unit: "deaths per year",
    },
    Comparator {
        label: "Malaria",
        value: 643_000.0,
        unit: "deaths per year",
    },
];
