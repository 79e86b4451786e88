//! Numerical fluxes for the 2D shallow-water equations.
//!
//! - Physical fluxes `F` (x) and `G` (y)
//! - HLL Riemann solver with contact restoration along both axes

pub mod hll;
pub mod physical;

pub use hll::{hll_x, hll_y};
pub use physical::{flux_x, flux_y};
