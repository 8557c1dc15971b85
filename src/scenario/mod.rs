//! Eradication-scenario engine: configuration, multiplier curves, and
//! scenario application

mod apply;
mod config;
mod multiplier;

pub use apply::apply_scenario;
pub use config::{Checkpoint, ScenarioConfig};
pub use multiplier::{build_multiplier_curve, MultiplierCurve};
