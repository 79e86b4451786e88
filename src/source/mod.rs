//! Source terms and well-balanced reconstruction.
//!
//! - Hydrostatic (depth-positivity-preserving) face reconstruction
//! - Implicit Manning friction with per-cell roughness
//! - Bed-slope source from reconstructed face values

pub mod bed_slope;
pub mod friction;
pub mod hydrostatic_reconstruction;

pub use bed_slope::bed_slope_source;
pub use friction::ManningFriction;
pub use hydrostatic_reconstruction::{HydrostaticReconstruction, ReconstructedFace};
