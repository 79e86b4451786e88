//! Time loop around the solver.
//!
//! # Example
//! ```
//! use flood_swe::mesh::Scenario;
//! use flood_swe::simulation::FloodSimulation;
//!
//! let scenario = Scenario::still_lake(15, 6, 1.0);
//! let mut sim = FloodSimulation::new(scenario.config, &scenario.initial).unwrap();
//! let result = sim.run_until(0.5);
//! assert!(result.success);
//! ```

mod runner;

pub use runner::{FloodSimulation, SimulationResult, StepReport};
