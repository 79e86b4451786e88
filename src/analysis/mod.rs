//! Post-processing of the flood state: hazard rating, alarm and diagnostics.

mod diagnostics;
mod hazard;

pub use diagnostics::FloodDiagnostics;
pub use hazard::{FloodAlarm, hazard_rating};
