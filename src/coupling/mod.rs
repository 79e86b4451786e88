//! Exchange with an external layer that reads the flood and edits the terrain.
//!
//! Once per iteration the coupled layer (for example a pedestrian model)
//! receives a read-only [`TerrainView`] of every cell and returns a batch of
//! [`TerrainEdit`]s. Within a batch all resets are applied before any raise:
//!
//! - `Reset` restores a cell's initial bed elevation and roughness
//! - `RaiseBed` sets `z0 = max(z0, value)`
//! - `RaiseRoughness` sets `n = max(n, value)`
//!
//! Terrain is therefore never lowered below its initial level except through
//! an explicit reset, which restores exactly that level.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::mesh::Grid;
use crate::solver::FloodState;

/// Flood state of one cell as seen by the coupled layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub x: usize,
    pub y: usize,
    pub in_domain: bool,
    pub z0: f64,
    pub h: f64,
    pub qx: f64,
    pub qy: f64,
    pub manning: f64,
}

/// Read-only access to the flood for one exchange.
#[derive(Clone, Copy, Debug)]
pub struct TerrainView<'a> {
    state: &'a FloodState,
}

impl<'a> TerrainView<'a> {
    pub fn new(state: &'a FloodState) -> Self {
        Self { state }
    }

    pub fn grid(&self) -> &Grid {
        &self.state.grid
    }

    pub fn snapshot(&self, x: usize, y: usize) -> Result<CellSnapshot> {
        let k = self.state.grid.checked_index(x, y)?;
        Ok(self.snapshot_at(k))
    }

    fn snapshot_at(&self, k: usize) -> CellSnapshot {
        let (x, y) = self.state.grid.coords(k);
        let c = &self.state.cells[k];
        CellSnapshot {
            x,
            y,
            in_domain: c.in_domain,
            z0: c.z0,
            h: c.h,
            qx: c.qx,
            qy: c.qy,
            manning: c.manning,
        }
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellSnapshot> + '_ {
        (0..self.state.n_cells()).map(move |k| self.snapshot_at(k))
    }
}

/// Terrain change requested by the coupled layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TerrainEdit {
    /// Raise the bed to at least `z0`
    RaiseBed { x: usize, y: usize, z0: f64 },
    /// Raise the Manning roughness to at least `manning`
    RaiseRoughness { x: usize, y: usize, manning: f64 },
    /// Restore initial bed elevation and roughness
    Reset { x: usize, y: usize },
}

impl TerrainEdit {
    fn cell(&self) -> (usize, usize) {
        match *self {
            TerrainEdit::RaiseBed { x, y, .. }
            | TerrainEdit::RaiseRoughness { x, y, .. }
            | TerrainEdit::Reset { x, y } => (x, y),
        }
    }

    fn is_reset(&self) -> bool {
        matches!(self, TerrainEdit::Reset { .. })
    }
}

/// External model exchanging data with the flood once per iteration.
pub trait CoupledLayer {
    /// Observe the flood at `time` and return the terrain edits to apply.
    fn exchange(&mut self, view: &TerrainView<'_>, time: f64) -> Vec<TerrainEdit>;
}

/// Counts of edits applied in one batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeedbackReport {
    pub resets: usize,
    pub bed_raises: usize,
    pub roughness_raises: usize,
    /// Edits addressed to out-of-domain cells
    pub skipped: usize,
}

/// Apply a batch of edits: resets first, then raises.
///
/// Fails without modifying anything if any edit addresses a cell outside
/// the grid.
pub fn apply_feedback(state: &mut FloodState, edits: &[TerrainEdit]) -> Result<FeedbackReport> {
    let mut indexed = Vec::with_capacity(edits.len());
    for edit in edits {
        let (x, y) = edit.cell();
        indexed.push((state.grid.checked_index(x, y)?, edit));
    }

    let mut report = FeedbackReport::default();
    let resets = indexed.iter().filter(|(_, e)| e.is_reset());
    let raises = indexed.iter().filter(|(_, e)| !e.is_reset());

    for &(k, edit) in resets.chain(raises) {
        let cell = &mut state.cells[k];
        if !cell.in_domain {
            report.skipped += 1;
            continue;
        }
        match *edit {
            TerrainEdit::Reset { .. } => {
                cell.z0 = cell.base_z0;
                cell.manning = cell.base_manning;
                report.resets += 1;
            }
            TerrainEdit::RaiseBed { z0, .. } => {
                cell.z0 = cell.z0.max(z0);
                report.bed_raises += 1;
            }
            TerrainEdit::RaiseRoughness { manning, .. } => {
                cell.manning = cell.manning.max(manning);
                report.roughness_raises += 1;
            }
        }
    }

    if report.skipped > 0 {
        warn!(skipped = report.skipped, "terrain edits addressed out-of-domain cells");
    }
    debug!(?report, "applied terrain feedback");
    Ok(report)
}

/// Layer that never edits the terrain.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoFeedback;

impl CoupledLayer for NoFeedback {
    fn exchange(&mut self, _view: &TerrainView<'_>, _time: f64) -> Vec<TerrainEdit> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GridConfig, SolverConfig};
    use crate::error::FloodError;
    use crate::mesh::InitialCondition;

    fn state() -> FloodState {
        let config = SolverConfig::new(GridConfig::new(3, 2, 1.0, 1.0));
        let mut ic = InitialCondition::dry(3, 2);
        ic.z0 = vec![1.0; 6];
        ic.in_domain[5] = false;
        FloodState::from_initial(&config, &ic).unwrap()
    }

    #[test]
    fn test_raise_never_lowers() {
        let mut s = state();
        apply_feedback(
            &mut s,
            &[
                TerrainEdit::RaiseBed { x: 0, y: 0, z0: 0.5 },
                TerrainEdit::RaiseBed { x: 1, y: 0, z0: 1.4 },
                TerrainEdit::RaiseRoughness { x: 1, y: 0, manning: 0.001 },
            ],
        )
        .unwrap();
        assert_eq!(s.cells[0].z0, 1.0);
        assert_eq!(s.cells[1].z0, 1.4);
        assert_eq!(s.cells[1].manning, s.cells[1].base_manning);
    }

    #[test]
    fn test_reset_applies_before_raise() {
        let mut s = state();
        s.cells[0].z0 = 3.0;
        s.cells[0].manning = 0.2;
        let report = apply_feedback(
            &mut s,
            &[
                TerrainEdit::RaiseBed { x: 0, y: 0, z0: 1.2 },
                TerrainEdit::Reset { x: 0, y: 0 },
            ],
        )
        .unwrap();
        assert_eq!(s.cells[0].z0, 1.2);
        assert_eq!(s.cells[0].manning, s.cells[0].base_manning);
        assert_eq!(report.resets, 1);
        assert_eq!(report.bed_raises, 1);
    }

    #[test]
    fn test_out_of_domain_edits_skipped() {
        let mut s = state();
        let report = apply_feedback(&mut s, &[TerrainEdit::RaiseBed { x: 2, y: 1, z0: 9.0 }]).unwrap();
        assert_eq!(report.skipped, 1);
        assert_eq!(s.cells[5].z0, 1.0);
    }

    #[test]
    fn test_out_of_range_rejected_atomically() {
        let mut s = state();
        let err = apply_feedback(
            &mut s,
            &[
                TerrainEdit::RaiseBed { x: 0, y: 0, z0: 5.0 },
                TerrainEdit::RaiseBed { x: 7, y: 0, z0: 5.0 },
            ],
        )
        .unwrap_err();
        assert!(matches!(err, FloodError::CellOutOfRange { x: 7, .. }));
        assert_eq!(s.cells[0].z0, 1.0);
    }

    #[test]
    fn test_view_snapshots() {
        let mut s = state();
        s.cells[4].h = 0.3;
        let view = TerrainView::new(&s);
        let snap = view.snapshot(1, 1).unwrap();
        assert_eq!(snap.h, 0.3);
        assert_eq!((snap.x, snap.y), (1, 1));
        assert_eq!(view.cells().count(), 6);
        assert!(view.snapshot(3, 0).is_err());
    }

    #[test]
    fn test_edit_serde_tagged() {
        let json = serde_json::to_string(&TerrainEdit::Reset { x: 1, y: 2 }).unwrap();
        assert_eq!(json, r#"{"kind":"reset","x":1,"y":2}"#);
    }
}
