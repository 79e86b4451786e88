//! Serial or data-parallel execution of per-cell kernels.
//!
//! Every solver phase is a pure function of the previous phase's published
//! buffer plus the cell's own state, so running cells in any order or in
//! parallel gives bit-identical results.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::solver::Cell;

/// How per-cell kernels are scheduled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Execution {
    #[default]
    Serial,
    /// One rayon task per cell
    #[cfg(feature = "parallel")]
    Parallel,
}

impl Execution {
    /// Parallel when the crate is built with rayon support, serial otherwise.
    pub fn preferred() -> Self {
        #[cfg(feature = "parallel")]
        {
            Execution::Parallel
        }
        #[cfg(not(feature = "parallel"))]
        {
            Execution::Serial
        }
    }

    /// Evaluate `f` for every cell index and collect the results in order.
    pub(crate) fn map_cells<T, F>(self, n: usize, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(usize) -> T + Sync + Send,
    {
        match self {
            Execution::Serial => (0..n).map(f).collect(),
            #[cfg(feature = "parallel")]
            Execution::Parallel => (0..n).into_par_iter().map(f).collect(),
        }
    }

    /// Run `f` on every cell with exclusive access to that cell only.
    pub(crate) fn update_cells<F>(self, cells: &mut [Cell], f: F)
    where
        F: Fn(usize, &mut Cell) + Sync + Send,
    {
        match self {
            Execution::Serial => cells.iter_mut().enumerate().for_each(|(k, c)| f(k, c)),
            #[cfg(feature = "parallel")]
            Execution::Parallel => cells
                .par_iter_mut()
                .enumerate()
                .for_each(|(k, c)| f(k, c)),
        }
    }
}
