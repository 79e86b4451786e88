//! Neighbour exchange, Riemann fluxes and the finite-volume update (phase 4).
//!
//! For each face a cell pairs its own face state with the neighbour's
//! published one (or a ghost state at edges and inactive neighbours), runs the
//! hydrostatic reconstruction and solves the Riemann problem with `hll_x` or
//! `hll_y`. The explicit update is then
//!
//! ```text
//! h'  = h  - dt/dx (F_E - F_W) - dt/dy (G_N - G_S)
//! q'  = q  - dt/dx (F_E - F_W) - dt/dy (G_N - G_S) + dt S_bed
//! ```
//!
//! # Draining limiter
//!
//! Fluxes are computed in a first pass which also publishes each cell's
//! draining factor `θ = min(1, h / O)`, `O` being the depth its outgoing
//! mass fluxes would remove in one step. The update pass scales every face
//! flux by the `θ` of the cell the mass leaves, so a cell can never give away
//! more water than it holds. Both cells of a face scale by the same factor,
//! keeping the scheme conservative, and `θ = 1` wherever the CFL step already
//! keeps depths non-negative.

use crate::boundary::EdgeConditions;
use crate::config::{DRY_SENTINEL, SolverConfig};
use crate::flux::{hll_x, hll_y};
use crate::mesh::Grid;
use crate::solver::{Cell, Execution, FaceState, FloodState, SweState};
use crate::source::{HydrostaticReconstruction, bed_slope_source};
use crate::time::cell_time_step;
use crate::types::{Axis, Direction, FaceSide, Sides};

/// Per-cell result of the flux pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellFluxes {
    /// Numerical flux through each face, in global axis orientation
    pub flux: Sides<SweState>,
    /// Reconstructed face bed levels
    pub z_face: Sides<f64>,
    /// Reconstructed own-side depths
    pub h_face: Sides<f64>,
    /// Depth the outgoing mass fluxes would remove in one step
    pub outflow: f64,
    /// Draining factor in `[0, 1]`
    pub theta: f64,
}

impl Default for CellFluxes {
    fn default() -> Self {
        Self {
            flux: Sides::default(),
            z_face: Sides::default(),
            h_face: Sides::default(),
            outflow: 0.0,
            theta: 1.0,
        }
    }
}

/// Phase 4a: fluxes, face values and draining factor of every cell.
pub fn compute_fluxes(
    state: &FloodState,
    published: &[Option<FaceState>],
    edges: &EdgeConditions<'_>,
    config: &SolverConfig,
    dt: f64,
    exec: Execution,
) -> Vec<CellFluxes> {
    let grid = state.grid;
    exec.map_cells(state.n_cells(), |k| {
        let cell = &state.cells[k];
        if !cell.in_domain {
            return CellFluxes::default();
        }
        cell_fluxes(&grid, k, cell, published, edges, config, dt)
    })
}

fn cell_fluxes(
    grid: &Grid,
    k: usize,
    cell: &Cell,
    published: &[Option<FaceState>],
    edges: &EdgeConditions<'_>,
    config: &SolverConfig,
    dt: f64,
) -> CellFluxes {
    let physics = &config.physics;
    let wd = HydrostaticReconstruction::new(physics.tol_h);

    let mut out = CellFluxes::default();
    let mut outflow = 0.0;

    for dir in Direction::ALL {
        let own = cell.faces[dir];
        let other = grid
            .neighbor(k, dir)
            .and_then(|n| published[n])
            .unwrap_or_else(|| edges.ghost(grid, k, &own, dir));

        let (left, right) = match dir.own_side() {
            FaceSide::Left => (own, other),
            FaceSide::Right => (other, own),
        };
        let face = wd.reconstruct(&left, &right, dir);
        let (q_l, q_r) = (face.left.conserved(), face.right.conserved());
        let flux = match dir.axis() {
            Axis::X => hll_x(&q_l, &q_r, physics.g, physics.tol_h),
            Axis::Y => hll_y(&q_l, &q_r, physics.g, physics.tol_h),
        };

        out.flux[dir] = flux;
        out.z_face[dir] = face.z_face;
        out.h_face[dir] = face.own(dir).h;

        let leaving = dir.outward_sign() * flux.h;
        if leaving > 0.0 {
            outflow += dt / grid.spacing(dir) * leaving;
        }
    }

    out.outflow = outflow;
    if outflow > cell.h {
        out.theta = (cell.h / outflow).max(0.0);
    }
    out
}

/// Phase 4b: integrate every in-domain cell and refresh its local step.
pub fn apply_update(
    state: &mut FloodState,
    fluxes: &[CellFluxes],
    config: &SolverConfig,
    dt: f64,
    exec: Execution,
) {
    let grid = state.grid;
    let physics = &config.physics;

    exec.update_cells(&mut state.cells, |k, cell| {
        if !cell.in_domain {
            return;
        }
        let own = &fluxes[k];

        let mut gain = 0.0;
        let mut dq = SweState::zero();
        for dir in Direction::ALL {
            let flux = own.flux[dir];
            let sign = dir.outward_sign();
            let mass_out = sign * flux.h;
            let theta = if mass_out > 0.0 {
                own.theta
            } else if mass_out < 0.0 {
                grid.neighbor(k, dir).map_or(1.0, |n| fluxes[n].theta)
            } else {
                1.0
            };
            let scaled = flux * (theta * dt / grid.spacing(dir) * sign);
            if mass_out < 0.0 {
                gain -= scaled.h;
            }
            dq = dq + scaled;
        }

        let (s_x, s_y) = bed_slope_source(&own.z_face, &own.h_face, physics.g, grid.dx, grid.dy);

        // A drained cell keeps only what flows in
        let remaining = if own.theta < 1.0 { 0.0 } else { cell.h - own.outflow };
        cell.h = remaining + gain;
        cell.qx = cell.qx - dq.qx + dt * s_x;
        cell.qy = cell.qy - dq.qy + dt * s_y;

        if cell.h <= physics.tol_h {
            cell.qx = 0.0;
            cell.qy = 0.0;
            cell.time_step = DRY_SENTINEL;
        } else {
            cell.time_step = cell_time_step(&cell.conserved(), grid.dx, grid.dy, physics);
        }
    });
}
