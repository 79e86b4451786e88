//! Local face reconstruction and broadcast (phase 3).
//!
//! Every in-domain cell first force-wets itself if it is a dry cell inside an
//! active inflow window, then copies `(h, η, qx, qy)` into its four face
//! caches. Active cells publish that face state for their neighbours;
//! inactive cells publish nothing.

use crate::boundary::EdgeConditions;
use crate::config::PhysicsConfig;
use crate::solver::{Execution, FaceState, FloodState};
use crate::types::Sides;

/// Phase 3: fill face caches and return the published face state per cell.
pub fn broadcast_faces(
    state: &mut FloodState,
    edges: &EdgeConditions<'_>,
    physics: &PhysicsConfig,
    exec: Execution,
) -> Vec<Option<FaceState>> {
    let grid = state.grid;
    let tol_h = physics.tol_h;

    exec.update_cells(&mut state.cells, |k, cell| {
        if !cell.in_domain {
            cell.faces = Sides::default();
            return;
        }
        if let Some(depth) = edges.forced_depth(&grid, k, cell.h, tol_h) {
            cell.h = depth;
            cell.minh_loc = depth;
        }
        cell.faces = Sides::uniform(cell.own_face());
    });

    exec.map_cells(state.n_cells(), |k| {
        let cell = &state.cells[k];
        cell.is_active(tol_h).then_some(cell.own_face())
    })
}
