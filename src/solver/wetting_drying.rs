//! Wet/dry classification and implicit friction (phases 1 and 2).
//!
//! Phase 1 publishes each cell's depth (out-of-domain cells publish the dry
//! sentinel). Phase 2 takes, for every in-domain cell, the minimum over its
//! own value and its in-domain neighbours'. A cell whose whole neighbourhood
//! is wet keeps that minimum and receives implicit Manning friction;
//! otherwise its `minh_loc` is reset to the sentinel.
//!
//! The sentinel is larger than any depth, so a dry in-domain cell still
//! counts as active for the face exchange that follows. This is what lets
//! water advance into dry cells.

use crate::config::{DRY_SENTINEL, PhysicsConfig};
use crate::mesh::Grid;
use crate::solver::{Execution, FloodState};
use crate::source::ManningFriction;
use crate::types::Direction;

/// Phase 1: depth published by every cell.
pub fn publish_min_depth(state: &FloodState, exec: Execution) -> Vec<f64> {
    exec.map_cells(state.n_cells(), |k| {
        let cell = &state.cells[k];
        if cell.in_domain { cell.h } else { DRY_SENTINEL }
    })
}

/// Phase 2: consume the published depths and apply friction where wet.
pub fn apply_wet_dry_friction(
    state: &mut FloodState,
    published: &[f64],
    physics: &PhysicsConfig,
    dt: f64,
    exec: Execution,
) {
    let grid = state.grid;
    let friction = ManningFriction::new(physics.g, physics.tol_h);

    exec.update_cells(&mut state.cells, |k, cell| {
        if !cell.in_domain {
            return;
        }

        let min_h = neighbourhood_min(&grid, published, k);
        if min_h > physics.tol_h {
            cell.minh_loc = min_h;
            let (qx, qy) = friction.implicit_update(cell.h, cell.qx, cell.qy, cell.manning, dt);
            cell.qx = qx;
            cell.qy = qy;
        } else {
            cell.minh_loc = DRY_SENTINEL;
        }
    });
}

fn neighbourhood_min(grid: &Grid, published: &[f64], k: usize) -> f64 {
    Direction::ALL
        .iter()
        .filter_map(|&d| grid.neighbor(k, d))
        .map(|n| published[n])
        .fold(published[k], f64::min)
}
