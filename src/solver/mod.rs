//! Finite-volume flood solver.
//!
//! # Phases
//!
//! Each iteration runs four barrier-separated phases over all cells:
//!
//! 1. [`publish_min_depth`]: every cell publishes its depth
//! 2. [`apply_wet_dry_friction`]: neighbourhood minimum depth, implicit friction
//! 3. [`broadcast_faces`]: inflow force-wetting, face caches, face broadcast
//! 4. [`compute_fluxes`] then [`apply_update`]: reconstruction, Riemann fluxes,
//!    draining limiter and the explicit update with per-cell CFL step
//!
//! A phase reads only what the previous phase published and writes only the
//! cell it is working on, so phases run serially or with rayon
//! ([`Execution`]) and give identical results.

mod execution;
mod faces;
mod iteration;
mod state;
mod update;
mod wetting_drying;

pub use execution::Execution;
pub use faces::broadcast_faces;
pub use iteration::{IterationStats, iterate};
pub use state::{Cell, FaceState, FloodState, SweState};
pub use update::{CellFluxes, apply_update, compute_fluxes};
pub use wetting_drying::{apply_wet_dry_friction, publish_min_depth};
