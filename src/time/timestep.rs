//! CFL time step per cell and the global step reduction.
//!
//! Every wet cell publishes
//!
//! ```text
//! dt_cell = min(CFL dx / (|u| + sqrt(g h)), CFL dy / (|v| + sqrt(g h)))
//! ```
//!
//! and dry cells publish [`DRY_SENTINEL`]. The global step is the minimum over
//! cells while the domain is flooding, a fixed step if static stepping is
//! configured, and the idle `dry_dt` otherwise.

use crate::config::{DRY_SENTINEL, PhysicsConfig, TimeConfig, TimeStepping};
use crate::solver::SweState;

/// Local CFL-limited step of one cell.
#[inline]
pub fn cell_time_step(q: &SweState, dx: f64, dy: f64, physics: &PhysicsConfig) -> f64 {
    if q.is_dry(physics.tol_h) {
        return DRY_SENTINEL;
    }
    let (u, v) = q.velocity(physics.tol_h);
    let c = (physics.g * q.h).sqrt();
    let dt_x = physics.cfl * dx / (u.abs() + c);
    let dt_y = physics.cfl * dy / (v.abs() + c);
    dt_x.min(dt_y)
}

/// Why the global step took its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepRegime {
    /// Minimum per-cell CFL step
    Adaptive,
    /// Adaptive step clipped to `dt_max`
    Capped,
    /// Configured static flooding step
    Static,
    /// No cell reaches the flood threshold
    Dry,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeStepSelection {
    pub dt: f64,
    pub regime: StepRegime,
}

/// Choose the global time step for the next iteration.
///
/// # Arguments
/// * `max_depth` - Largest in-domain depth
/// * `min_cell_step` - Smallest published per-cell step
pub fn select_time_step(
    max_depth: f64,
    min_cell_step: f64,
    physics: &PhysicsConfig,
    time: &TimeConfig,
) -> TimeStepSelection {
    let dry = TimeStepSelection {
        dt: time.dry_dt,
        regime: StepRegime::Dry,
    };

    if max_depth < physics.flood_threshold {
        return dry;
    }

    match time.stepping {
        TimeStepping::Static { dt } => TimeStepSelection {
            dt,
            regime: StepRegime::Static,
        },
        TimeStepping::Adaptive => {
            // Depth at the threshold but not above the dry tolerance publishes no step
            if min_cell_step >= DRY_SENTINEL {
                return dry;
            }
            match time.dt_max {
                Some(cap) if min_cell_step > cap => TimeStepSelection {
                    dt: cap,
                    regime: StepRegime::Capped,
                },
                _ => TimeStepSelection {
                    dt: min_cell_step,
                    regime: StepRegime::Adaptive,
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn test_cell_step_at_rest() {
        let physics = PhysicsConfig::default();
        let q = SweState::new(1.0, 0.0, 0.0);
        let dt = cell_time_step(&q, 1.0, 2.0, &physics);
        assert!((dt - 0.5 / physics.g.sqrt()).abs() < TOL);
    }

    #[test]
    fn test_cell_step_respects_cfl_bound() {
        let physics = PhysicsConfig::default();
        let q = SweState::new(0.8, 1.2, -0.4);
        let dt = cell_time_step(&q, 1.0, 1.0, &physics);
        let (u, v) = q.velocity(physics.tol_h);
        let c = (physics.g * q.h).sqrt();
        assert!(dt * (u.abs() + c) / 1.0 <= physics.cfl + TOL);
        assert!(dt * (v.abs() + c) / 1.0 <= physics.cfl + TOL);
    }

    #[test]
    fn test_cell_step_matches_cfl_formula_for_moving_water() {
        let physics = PhysicsConfig::default();
        let q = SweState::new(0.8, 1.2, -0.4);
        let (dx, dy) = (1.0, 2.0);
        let (u, v) = q.velocity(physics.tol_h);
        let a = (physics.g * q.h).sqrt();
        let expected = (physics.cfl * dx / (u.abs() + a)).min(physics.cfl * dy / (v.abs() + a));
        let dt = cell_time_step(&q, dx, dy, &physics);
        assert!((dt - expected).abs() < TOL, "dt = {dt}, expected {expected}");
    }

    #[test]
    fn test_dry_cell_publishes_sentinel() {
        let physics = PhysicsConfig::default();
        let q = SweState::new(1e-4, 0.0, 0.0);
        assert_eq!(cell_time_step(&q, 1.0, 1.0, &physics), DRY_SENTINEL);
    }

    #[test]
    fn test_select_modes() {
        let physics = PhysicsConfig::default();
        let adaptive = TimeConfig::adaptive().with_dry_dt(0.7);

        let dry = select_time_step(0.0, DRY_SENTINEL, &physics, &adaptive);
        assert_eq!(dry, TimeStepSelection { dt: 0.7, regime: StepRegime::Dry });

        let wet = select_time_step(1.0, 0.05, &physics, &adaptive);
        assert_eq!(wet.regime, StepRegime::Adaptive);
        assert_eq!(wet.dt, 0.05);

        let capped = select_time_step(1.0, 0.05, &physics, &adaptive.clone().with_dt_max(0.01));
        assert_eq!(capped, TimeStepSelection { dt: 0.01, regime: StepRegime::Capped });

        let fixed = select_time_step(1.0, 0.05, &physics, &TimeConfig::fixed(0.002));
        assert_eq!(fixed.regime, StepRegime::Static);
        assert_eq!(fixed.dt, 0.002);
    }

    #[test]
    fn test_threshold_depth_without_steps_falls_back() {
        let physics = PhysicsConfig::default();
        let sel = select_time_step(physics.flood_threshold, DRY_SENTINEL, &physics, &TimeConfig::adaptive());
        assert_eq!(sel.regime, StepRegime::Dry);
    }
}
