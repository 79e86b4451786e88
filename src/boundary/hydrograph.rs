//! Piecewise-linear inflow hydrograph.
//!
//! ```text
//!   q
//!   |          peak
//!   |          /\
//!   |         /  \
//!   |        /    \______ end
//!   |_______/
//!   initial
//!   +-------+---+---+------> t
//!         start peak end
//! ```

use serde::{Deserialize, Serialize};

use crate::config::finite;
use crate::error::ConfigError;

/// Unit-width discharge `q(t)` [m²/s] injected through the inflow window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hydrograph {
    pub start_time: f64,
    pub peak_time: f64,
    pub end_time: f64,
    pub initial_discharge: f64,
    pub peak_discharge: f64,
    pub end_discharge: f64,
}

impl Hydrograph {
    pub fn new(
        start_time: f64,
        peak_time: f64,
        end_time: f64,
        initial_discharge: f64,
        peak_discharge: f64,
        end_discharge: f64,
    ) -> Self {
        Self {
            start_time,
            peak_time,
            end_time,
            initial_discharge,
            peak_discharge,
            end_discharge,
        }
    }

    /// Constant discharge from `start_time` to `end_time`, zero outside.
    pub fn constant(start_time: f64, end_time: f64, discharge: f64) -> Self {
        Self::new(start_time, start_time, end_time, 0.0, discharge, discharge)
    }

    /// Discharge at time `t`.
    ///
    /// Zero-length ramps jump straight to the value at their end.
    pub fn discharge(&self, t: f64) -> f64 {
        if t <= self.start_time {
            self.initial_discharge
        } else if t < self.peak_time {
            let frac = (t - self.start_time) / (self.peak_time - self.start_time);
            self.initial_discharge + frac * (self.peak_discharge - self.initial_discharge)
        } else if t < self.end_time {
            let frac = (t - self.peak_time) / (self.end_time - self.peak_time);
            self.peak_discharge + frac * (self.end_discharge - self.peak_discharge)
        } else {
            self.end_discharge
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("hydrograph.start_time", self.start_time)?;
        finite("hydrograph.peak_time", self.peak_time)?;
        finite("hydrograph.end_time", self.end_time)?;
        finite("hydrograph.initial_discharge", self.initial_discharge)?;
        finite("hydrograph.peak_discharge", self.peak_discharge)?;
        finite("hydrograph.end_discharge", self.end_discharge)?;
        if self.peak_time < self.start_time || self.end_time < self.peak_time {
            return Err(ConfigError::Inconsistent(format!(
                "hydrograph times must satisfy start <= peak <= end, got {} / {} / {}",
                self.start_time, self.peak_time, self.end_time
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    fn triangle() -> Hydrograph {
        Hydrograph::new(0.0, 10.0, 20.0, 0.0, 2.0, 0.0)
    }

    #[test]
    fn test_triangle_shape() {
        let q = triangle();
        assert!((q.discharge(5.0) - 1.0).abs() < TOL);
        assert!((q.discharge(10.0) - 2.0).abs() < TOL);
        assert!((q.discharge(15.0) - 1.0).abs() < TOL);
        assert!(q.discharge(25.0).abs() < TOL);
    }

    #[test]
    fn test_before_start_holds_initial() {
        let q = Hydrograph::new(5.0, 10.0, 20.0, 0.3, 2.0, 0.1);
        assert_eq!(q.discharge(-1.0), 0.3);
        assert_eq!(q.discharge(5.0), 0.3);
    }

    #[test]
    fn test_decays_to_end_discharge() {
        let q = Hydrograph::new(0.0, 10.0, 20.0, 0.0, 2.0, 0.5);
        assert!((q.discharge(15.0) - 1.25).abs() < TOL);
        assert_eq!(q.discharge(20.0), 0.5);
        assert_eq!(q.discharge(1000.0), 0.5);
    }

    #[test]
    fn test_degenerate_ramps_jump() {
        let q = Hydrograph::constant(2.0, 8.0, 1.5);
        assert_eq!(q.discharge(2.0), 0.0);
        assert_eq!(q.discharge(2.0 + 1e-9), 1.5);
        assert_eq!(q.discharge(7.9), 1.5);
        assert_eq!(q.discharge(9.0), 1.5);
    }

    #[test]
    fn test_continuity_at_breakpoints() {
        let q = Hydrograph::new(1.0, 4.0, 9.0, 0.2, 3.0, 0.7);
        for &t in &[1.0, 4.0, 9.0] {
            let before = q.discharge(t - 1e-9);
            let after = q.discharge(t + 1e-9);
            assert!((before - after).abs() < 1e-6, "jump at t = {}", t);
        }
    }

    #[test]
    fn test_validate_ordering() {
        assert!(triangle().validate().is_ok());
        assert!(Hydrograph::new(10.0, 5.0, 20.0, 0.0, 1.0, 0.0).validate().is_err());
        assert!(Hydrograph::new(0.0, 5.0, 4.0, 0.0, 1.0, 0.0).validate().is_err());
        assert!(
            Hydrograph::new(0.0, 5.0, 10.0, f64::NAN, 1.0, 0.0)
                .validate()
                .is_err()
        );
    }
}
