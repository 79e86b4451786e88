//! Physical fluxes of the 2D shallow-water equations.
//!
//! ```text
//! F(U) = (qx, qx²/h + g h²/2, qx qy/h)
//! G(U) = (qy, qx qy/h, qy²/h + g h²/2)
//! ```
//!
//! Both vanish for depths at or below the dry tolerance.

use crate::solver::SweState;

/// x-direction flux `F(h, qx, qy)`.
#[inline]
pub fn flux_x(q: &SweState, g: f64, tol_h: f64) -> SweState {
    if q.h <= tol_h {
        return SweState::zero();
    }
    SweState::new(
        q.qx,
        q.qx * q.qx / q.h + 0.5 * g * q.h * q.h,
        q.qx * q.qy / q.h,
    )
}

/// y-direction flux `G(h, qx, qy)`.
#[inline]
pub fn flux_y(q: &SweState, g: f64, tol_h: f64) -> SweState {
    if q.h <= tol_h {
        return SweState::zero();
    }
    SweState::new(
        q.qy,
        q.qx * q.qy / q.h,
        q.qy * q.qy / q.h + 0.5 * g * q.h * q.h,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const G: f64 = 9.80665;
    const TOL: f64 = 1e-12;

    #[test]
    fn test_still_water_is_pure_pressure() {
        let q = SweState::new(2.0, 0.0, 0.0);
        let f = flux_x(&q, G, 1e-3);
        assert_eq!(f.h, 0.0);
        assert!((f.qx - 0.5 * G * 4.0).abs() < TOL);
        assert_eq!(f.qy, 0.0);

        let g = flux_y(&q, G, 1e-3);
        assert_eq!(g.qx, 0.0);
        assert!((g.qy - 0.5 * G * 4.0).abs() < TOL);
    }

    #[test]
    fn test_fluxes_are_rotations() {
        let q = SweState::new(1.5, 0.6, -0.9);
        let swapped = SweState::new(1.5, -0.9, 0.6);
        let f = flux_x(&q, G, 1e-3);
        let g = flux_y(&swapped, G, 1e-3);
        assert!((f.h - g.h).abs() < TOL);
        assert!((f.qx - g.qy).abs() < TOL);
        assert!((f.qy - g.qx).abs() < TOL);
    }

    #[test]
    fn test_dry_flux_vanishes() {
        let q = SweState::new(5e-4, 1.0, 1.0);
        assert_eq!(flux_x(&q, G, 1e-3), SweState::zero());
        assert_eq!(flux_y(&q, G, 1e-3), SweState::zero());
    }
}
