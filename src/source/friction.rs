//! Implicit Manning bottom friction.
//!
//! Manning friction:
//!   S_qx = -Cf u |u|,  S_qy = -Cf v |u|,  Cf = g n² / h^{1/3}
//!
//! The source is stiff as h -> 0, so each momentum component is advanced with
//! a linearised implicit step whose denominator is the derivative of the
//! source with respect to that component:
//!
//! ```text
//! D_x = 1 + dt (Cf/h) (2u² + v²) / |u|
//! D_y = 1 + dt (Cf/h) (u² + 2v²) / |u|
//! q' = q + dt S / D
//! ```
//!
//! The update only ever removes momentum and never reverses the flow.

use crate::config::VELOCITY_EPS;

/// Manning friction with a per-cell roughness coefficient.
#[derive(Clone, Copy, Debug)]
pub struct ManningFriction {
    /// Gravitational acceleration (m/s²)
    pub g: f64,
    /// Minimum depth for friction (m)
    pub tol_h: f64,
}

impl ManningFriction {
    pub fn new(g: f64, tol_h: f64) -> Self {
        Self { g, tol_h }
    }

    /// Friction coefficient `Cf = g n² / h^{1/3}`.
    #[inline]
    pub fn coefficient(&self, h: f64, manning_n: f64) -> f64 {
        self.g * manning_n * manning_n / h.cbrt()
    }

    /// Apply one implicit friction step to `(qx, qy)`.
    ///
    /// No-op for dry cells, non-positive roughness, or water at rest.
    ///
    /// # Returns
    /// Updated `(qx, qy)`
    pub fn implicit_update(&self, h: f64, qx: f64, qy: f64, manning_n: f64, dt: f64) -> (f64, f64) {
        if h <= self.tol_h || manning_n <= 0.0 {
            return (qx, qy);
        }

        let u = qx / h;
        let v = qy / h;
        if u.abs() <= VELOCITY_EPS && v.abs() <= VELOCITY_EPS {
            return (qx, qy);
        }

        let speed = (u * u + v * v).sqrt();
        let cf = self.coefficient(h, manning_n);

        let s_fx = -cf * u * speed;
        let s_fy = -cf * v * speed;

        let d_x = 1.0 + dt * (cf / h) * (2.0 * u * u + v * v) / speed;
        let d_y = 1.0 + dt * (cf / h) * (u * u + 2.0 * v * v) / speed;

        (qx + dt * s_fx / d_x, qy + dt * s_fy / d_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const G: f64 = 9.80665;

    #[test]
    fn test_friction_opposes_flow() {
        let f = ManningFriction::new(G, 1e-3);
        let (qx, qy) = f.implicit_update(0.5, 0.4, -0.2, 0.03, 0.1);
        assert!(qx < 0.4 && qx > 0.0);
        assert!(qy > -0.2 && qy < 0.0);
    }

    #[test]
    fn test_large_step_never_reverses() {
        let f = ManningFriction::new(G, 1e-3);
        let (qx, qy) = f.implicit_update(0.01, 0.05, 0.05, 0.1, 1e6);
        assert!(qx >= 0.0, "qx reversed: {}", qx);
        assert!(qy >= 0.0, "qy reversed: {}", qy);
    }

    #[test]
    fn test_noop_cases() {
        let f = ManningFriction::new(G, 1e-3);
        assert_eq!(f.implicit_update(5e-4, 0.1, 0.1, 0.03, 1.0), (0.1, 0.1));
        assert_eq!(f.implicit_update(1.0, 0.1, 0.1, 0.0, 1.0), (0.1, 0.1));
        assert_eq!(f.implicit_update(1.0, 0.0, 0.0, 0.03, 1.0), (0.0, 0.0));
    }

    #[test]
    fn test_rougher_bed_removes_more_momentum() {
        let f = ManningFriction::new(G, 1e-3);
        let (smooth, _) = f.implicit_update(0.3, 0.3, 0.0, 0.018, 0.05);
        let (rough, _) = f.implicit_update(0.3, 0.3, 0.0, 0.06, 0.05);
        assert!(rough < smooth);
    }

    #[test]
    fn test_coefficient() {
        let f = ManningFriction::new(G, 1e-3);
        let cf = f.coefficient(8.0, 0.02);
        assert!((cf - G * 0.0004 / 2.0).abs() < 1e-14);
    }
}
