//! Initial conditions for flood simulations.
//!
//! An [`InitialCondition`] holds per-cell bed elevation, depth, discharge and
//! domain mask in the grid's row-major order. Fields can be sampled at cell
//! centres, or averaged from the four corner nodes of each cell, which is how
//! terrain surveyed on a node lattice is brought onto the cell grid.

use crate::config::{BoundaryMode, GridConfig, SolverConfig, TimeConfig};
use crate::error::{FloodError, Result};
use crate::mesh::Grid;
use crate::types::Sides;

/// Per-cell initial state.
#[derive(Clone, Debug, PartialEq)]
pub struct InitialCondition {
    pub nx: usize,
    pub ny: usize,
    pub z0: Vec<f64>,
    pub h: Vec<f64>,
    pub qx: Vec<f64>,
    pub qy: Vec<f64>,
    pub in_domain: Vec<bool>,
}

impl InitialCondition {
    /// Flat, dry bed with every cell in the domain.
    pub fn dry(nx: usize, ny: usize) -> Self {
        let n = nx * ny;
        Self {
            nx,
            ny,
            z0: vec![0.0; n],
            h: vec![0.0; n],
            qx: vec![0.0; n],
            qy: vec![0.0; n],
            in_domain: vec![true; n],
        }
    }

    /// Sample bed `z(x, y)` and free surface `eta(x, y)` at cell centres.
    ///
    /// Depth is `max(0, eta - z)`; water starts at rest.
    pub fn from_functions<B, S>(grid: &Grid, bed: B, surface: S) -> Self
    where
        B: Fn(f64, f64) -> f64,
        S: Fn(f64, f64) -> f64,
    {
        let mut ic = Self::dry(grid.nx, grid.ny);
        for k in 0..grid.n_cells() {
            let (x, y) = grid.cell_center(k);
            let z = bed(x, y);
            ic.z0[k] = z;
            ic.h[k] = (surface(x, y) - z).max(0.0);
        }
        ic
    }

    /// Average node-lattice fields onto cell centres.
    ///
    /// Node arrays have `(nx + 1) * (ny + 1)` entries, row-major with `x`
    /// fastest; each cell takes the mean of its four corners.
    pub fn from_node_fields(
        grid: &Grid,
        z_nodes: &[f64],
        h_nodes: &[f64],
        qx_nodes: &[f64],
        qy_nodes: &[f64],
    ) -> Result<Self> {
        let n_nodes = (grid.nx + 1) * (grid.ny + 1);
        for (field, values) in [
            ("z_nodes", z_nodes),
            ("h_nodes", h_nodes),
            ("qx_nodes", qx_nodes),
            ("qy_nodes", qy_nodes),
        ] {
            if values.len() != n_nodes {
                return Err(FloodError::ShapeMismatch {
                    field,
                    expected: n_nodes,
                    actual: values.len(),
                });
            }
        }

        Ok(Self::average_nodes(grid, z_nodes, h_nodes, qx_nodes, qy_nodes))
    }

    /// Sample bed and surface on the node lattice, then average to cells.
    pub fn from_node_functions<B, S>(grid: &Grid, bed: B, surface: S) -> Self
    where
        B: Fn(f64, f64) -> f64,
        S: Fn(f64, f64, f64) -> f64,
    {
        let stride = grid.nx + 1;
        let n_nodes = stride * (grid.ny + 1);
        let mut z_nodes = vec![0.0; n_nodes];
        let mut h_nodes = vec![0.0; n_nodes];
        for j in 0..=grid.ny {
            for i in 0..=grid.nx {
                let x = i as f64 * grid.dx;
                let y = j as f64 * grid.dy;
                let z = bed(x, y);
                z_nodes[j * stride + i] = z;
                h_nodes[j * stride + i] = surface(x, y, z);
            }
        }
        let zeros = vec![0.0; n_nodes];
        Self::average_nodes(grid, &z_nodes, &h_nodes, &zeros, &zeros)
    }

    fn average_nodes(
        grid: &Grid,
        z_nodes: &[f64],
        h_nodes: &[f64],
        qx_nodes: &[f64],
        qy_nodes: &[f64],
    ) -> Self {
        let stride = grid.nx + 1;
        let corner_mean = |values: &[f64], x: usize, y: usize| {
            let sw = values[y * stride + x];
            let se = values[y * stride + x + 1];
            let nw = values[(y + 1) * stride + x];
            let ne = values[(y + 1) * stride + x + 1];
            0.25 * (sw + se + nw + ne)
        };

        let mut ic = Self::dry(grid.nx, grid.ny);
        for k in 0..grid.n_cells() {
            let (x, y) = grid.coords(k);
            ic.z0[k] = corner_mean(z_nodes, x, y);
            ic.h[k] = corner_mean(h_nodes, x, y);
            ic.qx[k] = corner_mean(qx_nodes, x, y);
            ic.qy[k] = corner_mean(qy_nodes, x, y);
        }
        ic
    }

    /// Mark cells outside the computational domain.
    pub fn with_mask<F>(mut self, grid: &Grid, in_domain: F) -> Self
    where
        F: Fn(f64, f64) -> bool,
    {
        for k in 0..grid.n_cells() {
            let (x, y) = grid.cell_center(k);
            self.in_domain[k] = in_domain(x, y);
        }
        self
    }

    /// Uniform initial discharge on every wet cell.
    pub fn with_discharge(mut self, qx: f64, qy: f64) -> Self {
        for k in 0..self.h.len() {
            if self.h[k] > 0.0 {
                self.qx[k] = qx;
                self.qy[k] = qy;
            }
        }
        self
    }

    pub(crate) fn check_shape(&self, grid: &Grid) -> Result<()> {
        let expected = grid.n_cells();
        for (field, actual) in [
            ("z0", self.z0.len()),
            ("h", self.h.len()),
            ("qx", self.qx.len()),
            ("qy", self.qy.len()),
            ("in_domain", self.in_domain.len()),
        ] {
            if actual != expected {
                return Err(FloodError::ShapeMismatch {
                    field,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}

/// Analytical terrain profiles.
pub mod profiles {
    /// Three conical humps on a 75 m x 30 m basin floor.
    ///
    /// Two small humps (radius 8 m, height 1 m) at (30, 6) and (30, 24) and a
    /// large one (radius 10 m, height 3 m) at (47.5, 15).
    pub fn three_humps(x: f64, y: f64) -> f64 {
        let r1 = ((x - 30.0).powi(2) + (y - 6.0).powi(2)).sqrt();
        let r2 = ((x - 30.0).powi(2) + (y - 24.0).powi(2)).sqrt();
        let r3 = ((x - 47.5).powi(2) + (y - 15.0).powi(2)).sqrt();
        let zb1 = (8.0 - r1) / 8.0;
        let zb2 = (8.0 - r2) / 8.0;
        let zb3 = 3.0 * (10.0 - r3) / 10.0;
        zb1.max(zb2).max(zb3).max(0.0)
    }

    /// Still water held behind a gate at `x = 16 m`.
    pub fn dam_break_depth(x: f64, bed: f64) -> f64 {
        const RESERVOIR_LEVEL: f64 = 1.875;
        if x <= 16.0 {
            (RESERVOIR_LEVEL - bed).max(0.0)
        } else {
            0.0
        }
    }
}

/// A ready-to-run configuration together with its initial state.
#[derive(Clone, Debug)]
pub struct Scenario {
    pub name: &'static str,
    pub config: SolverConfig,
    pub initial: InitialCondition,
}

impl Scenario {
    /// Dam break over three humps in a closed 75 m x 30 m basin.
    ///
    /// Terrain and depth are evaluated on the node lattice and averaged to
    /// cell centres.
    pub fn three_humps_dam_break(nx: usize, ny: usize) -> Self {
        let config = SolverConfig::new(GridConfig::from_extent(75.0, 30.0, nx, ny))
            .with_boundaries(Sides::uniform(BoundaryMode::Reflective))
            .with_time(TimeConfig::adaptive());
        let grid = Grid::from_config(&config.grid);
        let initial = InitialCondition::from_node_functions(
            &grid,
            profiles::three_humps,
            |x, _y, z| profiles::dam_break_depth(x, z),
        );
        Self {
            name: "three-humps",
            config,
            initial,
        }
    }

    /// Lake at rest over the three-humps terrain with free surface `level`.
    pub fn still_lake(nx: usize, ny: usize, level: f64) -> Self {
        let config = SolverConfig::new(GridConfig::from_extent(75.0, 30.0, nx, ny))
            .with_boundaries(Sides::uniform(BoundaryMode::Reflective));
        let grid = Grid::from_config(&config.grid);
        let initial =
            InitialCondition::from_functions(&grid, profiles::three_humps, |_, _| level);
        Self {
            name: "still-lake",
            config,
            initial,
        }
    }

    /// Look up a built-in scenario by name.
    pub fn by_name(name: &str, nx: usize, ny: usize) -> Option<Self> {
        match name {
            "three-humps" => Some(Self::three_humps_dam_break(nx, ny)),
            "still-lake" => Some(Self::still_lake(nx, ny, 1.0)),
            _ => None,
        }
    }

    pub const NAMES: [&'static str; 2] = ["three-humps", "still-lake"];
}
