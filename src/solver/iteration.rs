//! One solver iteration: phases 1 to 4 separated by buffer barriers.

use crate::boundary::EdgeConditions;
use crate::config::SolverConfig;
use crate::solver::{
    Execution, FloodState, apply_update, apply_wet_dry_friction, broadcast_faces,
    compute_fluxes, publish_min_depth,
};

/// Summary of one iteration's flux pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IterationStats {
    /// Cells whose outflow was limited to their depth
    pub drained_cells: usize,
    /// Inflow discharge applied this iteration [m²/s]
    pub inflow_discharge: f64,
}

/// Advance every cell by `dt` starting at simulation time `time`.
pub fn iterate(
    state: &mut FloodState,
    config: &SolverConfig,
    time: f64,
    dt: f64,
    exec: Execution,
) -> IterationStats {
    let published_depth = publish_min_depth(state, exec);
    apply_wet_dry_friction(state, &published_depth, &config.physics, dt, exec);

    let edges = EdgeConditions::new(config, time);
    let published_faces = broadcast_faces(state, &edges, &config.physics, exec);

    let fluxes = compute_fluxes(state, &published_faces, &edges, config, dt, exec);
    apply_update(state, &fluxes, config, dt, exec);

    IterationStats {
        drained_cells: fluxes.iter().filter(|f| f.theta < 1.0).count(),
        inflow_discharge: edges.discharge(),
    }
}
