//! Time step control.

mod timestep;

pub use timestep::{StepRegime, TimeStepSelection, cell_time_step, select_time_step};
