//! Domain-edge treatment.
//!
//! - [`Hydrograph`]: piecewise-linear inflow discharge over time
//! - [`EdgeConditions`]: transmissive / reflective / inflow ghost states and
//!   force-wetting of dry inflow cells

mod edge;
mod hydrograph;

pub use edge::EdgeConditions;
pub use hydrograph::Hydrograph;
