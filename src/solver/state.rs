//! Cell state storage for the flood solver.
//!
//! Each cell carries its conserved variables `(h, qx, qy)`, bed elevation,
//! roughness, the four face caches filled during face reconstruction, and the
//! two per-iteration scalars published to the global reductions: the rolling
//! minimum depth `minh_loc` and the local CFL time step.

use std::ops::{Add, Mul, Sub};

use crate::config::{DRY_SENTINEL, SolverConfig};
use crate::error::{FloodError, Result};
use crate::mesh::{Grid, InitialCondition};
use crate::time::cell_time_step;
use crate::types::Sides;

// ============================================================================
// Conserved variables
// ============================================================================

/// Shallow-water conserved variables `(h, qx, qy)`.
///
/// Also used for flux vectors `(F_h, F_qx, F_qy)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SweState {
    /// Water depth [m]
    pub h: f64,
    /// Unit-width discharge along x [m²/s]
    pub qx: f64,
    /// Unit-width discharge along y [m²/s]
    pub qy: f64,
}

impl SweState {
    #[inline]
    pub fn new(h: f64, qx: f64, qy: f64) -> Self {
        Self { h, qx, qy }
    }

    #[inline]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Velocity `(u, v)`, zero at or below the dry tolerance.
    #[inline]
    pub fn velocity(&self, tol_h: f64) -> (f64, f64) {
        if self.h > tol_h {
            (self.qx / self.h, self.qy / self.h)
        } else {
            (0.0, 0.0)
        }
    }

    #[inline]
    pub fn is_dry(&self, tol_h: f64) -> bool {
        self.h <= tol_h
    }
}

impl Add for SweState {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.h + rhs.h, self.qx + rhs.qx, self.qy + rhs.qy)
    }
}

impl Sub for SweState {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.h - rhs.h, self.qx - rhs.qx, self.qy - rhs.qy)
    }
}

impl Mul<f64> for SweState {
    type Output = Self;

    fn mul(self, s: f64) -> Self {
        Self::new(self.h * s, self.qx * s, self.qy * s)
    }
}

impl Mul<SweState> for f64 {
    type Output = SweState;

    fn mul(self, q: SweState) -> SweState {
        q * self
    }
}

// ============================================================================
// Face values
// ============================================================================

/// Depth, free-surface elevation and discharge on one side of a face.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FaceState {
    pub h: f64,
    pub et: f64,
    pub qx: f64,
    pub qy: f64,
}

impl FaceState {
    #[inline]
    pub fn new(h: f64, et: f64, qx: f64, qy: f64) -> Self {
        Self { h, et, qx, qy }
    }

    /// Bed elevation implied by the face, `et - h`.
    #[inline]
    pub fn bed(&self) -> f64 {
        self.et - self.h
    }

    #[inline]
    pub fn conserved(&self) -> SweState {
        SweState::new(self.h, self.qx, self.qy)
    }
}

// ============================================================================
// Cells
// ============================================================================

/// One finite-volume cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    /// False for cells outside the computational domain
    pub in_domain: bool,
    /// Bed elevation [m]
    pub z0: f64,
    pub h: f64,
    pub qx: f64,
    pub qy: f64,
    /// Manning roughness [s/m^(1/3)]
    pub manning: f64,
    /// Bed elevation restored by an explicit reset
    pub base_z0: f64,
    /// Roughness restored by an explicit reset
    pub base_manning: f64,
    /// Rolling minimum depth over the cell and its neighbours
    pub minh_loc: f64,
    /// Local CFL time step, [`DRY_SENTINEL`] when dry
    pub time_step: f64,
    pub faces: Sides<FaceState>,
}

impl Cell {
    pub fn new(in_domain: bool, z0: f64, h: f64, qx: f64, qy: f64, manning: f64) -> Self {
        let (h, qx, qy) = if in_domain { (h, qx, qy) } else { (0.0, 0.0, 0.0) };
        Self {
            in_domain,
            z0,
            h,
            qx,
            qy,
            manning,
            base_z0: z0,
            base_manning: manning,
            minh_loc: if in_domain { h } else { DRY_SENTINEL },
            time_step: DRY_SENTINEL,
            faces: Sides::default(),
        }
    }

    /// Free-surface elevation `z0 + h`.
    #[inline]
    pub fn et(&self) -> f64 {
        self.z0 + self.h
    }

    #[inline]
    pub fn conserved(&self) -> SweState {
        SweState::new(self.h, self.qx, self.qy)
    }

    #[inline]
    pub fn velocity(&self, tol_h: f64) -> (f64, f64) {
        self.conserved().velocity(tol_h)
    }

    /// Cell takes part in the face exchange of this iteration.
    #[inline]
    pub fn is_active(&self, tol_h: f64) -> bool {
        self.in_domain && self.minh_loc > tol_h
    }

    /// Face value carrying the cell's own state.
    #[inline]
    pub fn own_face(&self) -> FaceState {
        FaceState::new(self.h, self.et(), self.qx, self.qy)
    }
}

// ============================================================================
// Whole-domain state
// ============================================================================

/// Grid geometry plus every cell.
#[derive(Clone, Debug, PartialEq)]
pub struct FloodState {
    pub grid: Grid,
    pub cells: Vec<Cell>,
}

impl FloodState {
    /// Build the cell array from an initial condition.
    ///
    /// Every cell starts with the configured Manning roughness, which also
    /// becomes its reset baseline. Local time steps are initialised from the
    /// CFL condition so the first global step can be chosen before any update.
    pub fn from_initial(config: &SolverConfig, initial: &InitialCondition) -> Result<Self> {
        let grid = Grid::from_config(&config.grid);
        initial.check_shape(&grid)?;

        let physics = &config.physics;
        let mut cells = Vec::with_capacity(grid.n_cells());
        for k in 0..grid.n_cells() {
            let (x, y) = grid.coords(k);
            let h = initial.h[k];
            if !(h.is_finite() && initial.z0[k].is_finite()) {
                return Err(FloodError::InvalidInitialState {
                    x,
                    y,
                    reason: "depth and bed elevation must be finite",
                });
            }
            if h < 0.0 {
                return Err(FloodError::InvalidInitialState {
                    x,
                    y,
                    reason: "negative depth",
                });
            }
            let mut cell = Cell::new(
                initial.in_domain[k],
                initial.z0[k],
                h,
                initial.qx[k],
                initial.qy[k],
                physics.manning,
            );
            if cell.in_domain {
                cell.time_step = cell_time_step(&cell.conserved(), grid.dx, grid.dy, physics);
            }
            cells.push(cell);
        }

        Ok(Self { grid, cells })
    }

    pub fn n_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn cell(&self, x: usize, y: usize) -> Result<&Cell> {
        let k = self.grid.checked_index(x, y)?;
        Ok(&self.cells[k])
    }

    pub fn cell_mut(&mut self, x: usize, y: usize) -> Result<&mut Cell> {
        let k = self.grid.checked_index(x, y)?;
        Ok(&mut self.cells[k])
    }

    /// Total stored water volume [m³].
    pub fn total_volume(&self) -> f64 {
        let area = self.grid.cell_area();
        self.cells
            .iter()
            .filter(|c| c.in_domain)
            .map(|c| c.h * area)
            .sum()
    }

    pub fn max_depth(&self) -> f64 {
        self.cells
            .iter()
            .filter(|c| c.in_domain)
            .map(|c| c.h)
            .fold(0.0, f64::max)
    }

    /// Smallest published local time step.
    pub fn min_time_step(&self) -> f64 {
        self.cells
            .iter()
            .map(|c| c.time_step)
            .fold(DRY_SENTINEL, f64::min)
    }

    pub fn depths(&self) -> Vec<f64> {
        self.cells.iter().map(|c| c.h).collect()
    }
}
