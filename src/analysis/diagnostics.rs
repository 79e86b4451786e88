//! Domain-wide flood diagnostics.

use serde::{Deserialize, Serialize};

use super::hazard_rating;
use crate::config::PhysicsConfig;
use crate::solver::FloodState;

/// Summary of the flood after one iteration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FloodDiagnostics {
    /// Stored water volume [m³]
    pub total_volume: f64,
    /// Largest depth [m]
    pub max_depth: f64,
    /// Largest velocity magnitude over wet cells [m/s]
    pub max_speed: f64,
    /// Largest hazard rating
    pub max_hazard: f64,
    /// Cells deeper than the dry tolerance
    pub wet_cells: usize,
}

impl FloodDiagnostics {
    /// Reduce over every in-domain cell.
    pub fn compute(state: &FloodState, physics: &PhysicsConfig) -> Self {
        let area = state.grid.cell_area();
        let mut d = Self::default();

        for cell in state.cells.iter().filter(|c| c.in_domain) {
            d.total_volume += cell.h * area;
            d.max_depth = d.max_depth.max(cell.h);
            if cell.h > physics.tol_h {
                d.wet_cells += 1;
                let (u, v) = cell.velocity(physics.tol_h);
                d.max_speed = d.max_speed.max(u.hypot(v));
            }
            let hr = hazard_rating(cell.h, cell.qx, cell.qy, physics.flood_threshold);
            d.max_hazard = d.max_hazard.max(hr);
        }
        d
    }

    /// Whether any cell reaches the flood threshold.
    pub fn is_flooding(&self, physics: &PhysicsConfig) -> bool {
        self.max_depth >= physics.flood_threshold
    }
}
