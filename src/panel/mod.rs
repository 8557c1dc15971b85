//! Longitudinal panel of country-year burden observations

mod data;
mod merge;

pub use data::{CountryCode, Panel, PanelRow, Quantity, QuantityClass, WorldRow, QUANTITY_COUNT};
pub use merge::{merge, BurdenObservation, PopulationRecord};
