//! Projection core: historical anchors and population-ratio extrapolation

mod anchors;
mod extrapolate;

pub use anchors::{compute_anchors, Anchor};
pub use extrapolate::fill_gaps;
