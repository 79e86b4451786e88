//! Structured rectangular grid geometry.
//!
//! Cells are stored row-major with `x` fastest: `index = y * nx + x`.
//! Cell `(x, y)` covers `[x dx, (x+1) dx] x [y dy, (y+1) dy]`.

use crate::config::GridConfig;
use crate::error::{FloodError, Result};
use crate::types::{Axis, Direction};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    pub nx: usize,
    pub ny: usize,
    pub dx: f64,
    pub dy: f64,
}

impl Grid {
    pub fn new(nx: usize, ny: usize, dx: f64, dy: f64) -> Self {
        Self { nx, ny, dx, dy }
    }

    pub fn from_config(config: &GridConfig) -> Self {
        Self::new(config.nx, config.ny, config.dx, config.dy)
    }

    #[inline]
    pub fn n_cells(&self) -> usize {
        self.nx * self.ny
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.nx + x
    }

    /// Checked index, failing for coordinates outside the grid.
    pub fn checked_index(&self, x: usize, y: usize) -> Result<usize> {
        if x < self.nx && y < self.ny {
            Ok(self.index(x, y))
        } else {
            Err(FloodError::CellOutOfRange {
                x,
                y,
                nx: self.nx,
                ny: self.ny,
            })
        }
    }

    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index % self.nx, index / self.nx)
    }

    /// Index of the neighbour in `dir`, or `None` past the domain edge.
    #[inline]
    pub fn neighbor(&self, index: usize, dir: Direction) -> Option<usize> {
        let (x, y) = self.coords(index);
        match dir {
            Direction::East if x + 1 < self.nx => Some(index + 1),
            Direction::West if x > 0 => Some(index - 1),
            Direction::North if y + 1 < self.ny => Some(index + self.nx),
            Direction::South if y > 0 => Some(index - self.nx),
            _ => None,
        }
    }

    /// True if the cell touches the domain edge facing `dir`.
    pub fn is_on_edge(&self, index: usize, dir: Direction) -> bool {
        self.neighbor(index, dir).is_none()
    }

    pub fn cell_center(&self, index: usize) -> (f64, f64) {
        let (x, y) = self.coords(index);
        ((x as f64 + 0.5) * self.dx, (y as f64 + 0.5) * self.dy)
    }

    /// Extent `[lo, hi]` of the cell along a domain edge facing `dir`.
    ///
    /// For north/south edges this is the x-range (west to east face); for
    /// east/west edges the y-range (south to north face).
    pub fn span_along_edge(&self, index: usize, dir: Direction) -> (f64, f64) {
        let (x, y) = self.coords(index);
        match dir.axis() {
            Axis::Y => (x as f64 * self.dx, (x + 1) as f64 * self.dx),
            Axis::X => (y as f64 * self.dy, (y + 1) as f64 * self.dy),
        }
    }

    /// Cell size normal to a face in `dir`.
    #[inline]
    pub fn spacing(&self, dir: Direction) -> f64 {
        match dir.axis() {
            Axis::X => self.dx,
            Axis::Y => self.dy,
        }
    }

    pub fn cell_area(&self) -> f64 {
        self.dx * self.dy
    }
}
