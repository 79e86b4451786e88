//! Ghost states for faces without an active neighbour.
//!
//! A face gets a ghost state when it lies on the domain edge or borders an
//! out-of-domain cell. The ghost copies the owning face's depth and surface
//! elevation and mirrors its tangential discharge; the normal discharge
//! depends on the edge behaviour:
//!
//! - transmissive: copied (free outflow)
//! - reflective: negated (wall)
//! - inflow window: replaced by the hydrograph discharge, pointing into the
//!   domain (`+q` through west/south edges, `-q` through east/north edges)

use crate::config::{BoundaryMode, InflowConfig, SolverConfig};
use crate::mesh::Grid;
use crate::solver::FaceState;
use crate::types::{Axis, Direction, Sides};

/// Edge behaviour evaluated at one simulation time.
#[derive(Clone, Copy, Debug)]
pub struct EdgeConditions<'a> {
    modes: &'a Sides<BoundaryMode>,
    inflow: Option<&'a InflowConfig>,
    time: f64,
    discharge: f64,
}

impl<'a> EdgeConditions<'a> {
    pub fn new(config: &'a SolverConfig, time: f64) -> Self {
        let inflow = config.inflow.as_ref();
        let discharge = inflow.map_or(0.0, |i| i.hydrograph.discharge(time));
        Self {
            modes: &config.boundaries,
            inflow,
            time,
            discharge,
        }
    }

    /// Hydrograph discharge at this time (zero without inflow).
    pub fn discharge(&self) -> f64 {
        self.discharge
    }

    /// True if cell `k` sits on the inflow edge inside the inflow window.
    pub fn in_inflow_window(&self, grid: &Grid, k: usize) -> bool {
        match self.inflow {
            Some(inflow) if grid.is_on_edge(k, inflow.edge) => {
                let (lo, hi) = grid.span_along_edge(k, inflow.edge);
                inflow.covers(lo, hi)
            }
            _ => false,
        }
    }

    /// Depth to force onto a dry inflow cell, if the inflow is active for it.
    pub fn forced_depth(&self, grid: &Grid, k: usize, h: f64, tol_h: f64) -> Option<f64> {
        let inflow = self.inflow?;
        if h.abs() < tol_h && inflow.is_active(self.time) && self.in_inflow_window(grid, k) {
            Some(inflow.init_depth)
        } else {
            None
        }
    }

    /// Ghost state across the face of cell `k` facing `dir`.
    pub fn ghost(&self, grid: &Grid, k: usize, own: &FaceState, dir: Direction) -> FaceState {
        let injects = self.inflow.is_some_and(|i| i.edge == dir) && self.in_inflow_window(grid, k);

        let own_normal = match dir.axis() {
            Axis::X => own.qx,
            Axis::Y => own.qy,
        };
        let normal = if injects {
            -dir.outward_sign() * self.discharge
        } else {
            match self.modes[dir] {
                BoundaryMode::Transmissive => own_normal,
                BoundaryMode::Reflective => -own_normal,
            }
        };

        match dir.axis() {
            Axis::X => FaceState::new(own.h, own.et, normal, own.qy),
            Axis::Y => FaceState::new(own.h, own.et, own.qx, normal),
        }
    }
}
