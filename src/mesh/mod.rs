//! Structured grid and initial conditions.
//!
//! - [`Grid`]: row-major cell indexing, neighbour lookup and edge geometry
//! - [`InitialCondition`]: per-cell bed, depth, discharge and domain mask
//! - [`Scenario`]: built-in configurations such as the three-humps dam break

mod grid;
mod initial;

pub use grid::Grid;
pub use initial::{InitialCondition, Scenario, profiles};
