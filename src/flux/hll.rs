//! HLL approximate Riemann solver with contact restoration for 2D shallow water.
//!
//! Wave speeds follow the two-rarefaction estimate:
//!
//! ```text
//! h* = ((a_L + a_R)/2 + (u_L - u_R)/4)² / g
//! u* = (u_L + u_R)/2 + a_L - a_R
//! s_L = min(u_L - a_L, u* - a*)      (u_R - 2 a_R if the left side is dry)
//! s_R = max(u_R + a_R, u* + a*)      (u_L + 2 a_L if the right side is dry)
//! ```
//!
//! Mass and normal momentum take the two-wave HLL average. The transverse
//! momentum is carried by the mass flux with the tangential velocity of the
//! upwind side of the contact wave `s_M`, which keeps shear layers sharp.
//!
//! Reference: Toro, "Shock-Capturing Methods for Free-Surface Shallow Flows", ch. 10

use crate::flux::physical::flux_x;
use crate::solver::SweState;

/// Numerical flux across an x-normal (east/west) face.
///
/// # Arguments
/// * `q_l` - State west of the face (h, qx, qy)
/// * `q_r` - State east of the face
/// * `g` - Gravitational acceleration
/// * `tol_h` - Dry-cell tolerance
///
/// # Returns
/// Flux vector as SweState (F_h, F_qx, F_qy)
pub fn hll_x(q_l: &SweState, q_r: &SweState, g: f64, tol_h: f64) -> SweState {
    hll_normal(q_l, q_r, g, tol_h)
}

/// Numerical flux across a y-normal (north/south) face.
///
/// `q_l` is the state south of the face, `q_r` the state north of it.
/// Returns (G_h, G_qx, G_qy).
pub fn hll_y(q_l: &SweState, q_r: &SweState, g: f64, tol_h: f64) -> SweState {
    let rotated = hll_normal(&swap_momentum(q_l), &swap_momentum(q_r), g, tol_h);
    swap_momentum(&rotated)
}

#[inline]
fn swap_momentum(q: &SweState) -> SweState {
    SweState::new(q.h, q.qy, q.qx)
}

/// HLL flux in the face-normal frame: `qx` normal, `qy` tangential.
fn hll_normal(q_l: &SweState, q_r: &SweState, g: f64, tol_h: f64) -> SweState {
    let dry_l = q_l.is_dry(tol_h);
    let dry_r = q_r.is_dry(tol_h);

    if dry_l && dry_r {
        return SweState::zero();
    }

    // Dry sides enter the wave-speed estimate as vacuum. Their momentum is
    // dropped with the depth, an O(tol_h·u) change to the jump term.
    let l = if dry_l { SweState::zero() } else { *q_l };
    let r = if dry_r { SweState::zero() } else { *q_r };
    let (u_l, v_l) = l.velocity(tol_h);
    let (u_r, v_r) = r.velocity(tol_h);

    let a_l = (g * l.h).sqrt();
    let a_r = (g * r.h).sqrt();

    let h_star = (0.5 * (a_l + a_r) + 0.25 * (u_l - u_r)).powi(2) / g;
    let u_star = 0.5 * (u_l + u_r) + a_l - a_r;
    let a_star = (g * h_star).sqrt();

    let s_l = if dry_l {
        u_r - 2.0 * a_r
    } else {
        (u_l - a_l).min(u_star - a_star)
    };
    let s_r = if dry_r {
        u_l + 2.0 * a_l
    } else {
        (u_r + a_r).max(u_star + a_star)
    };

    let f_l = flux_x(&l, g, tol_h);
    let f_r = flux_x(&r, g, tol_h);

    if s_l >= 0.0 {
        return f_l;
    }
    if s_r < 0.0 {
        return f_r;
    }

    // s_r > s_l whenever one side is wet
    let inv_ds = 1.0 / (s_r - s_l);
    let f_h = inv_ds * (s_r * f_l.h - s_l * f_r.h + s_l * s_r * (r.h - l.h));
    let f_qn = inv_ds * (s_r * f_l.qx - s_l * f_r.qx + s_l * s_r * (r.qx - l.qx));

    let s_m = contact_speed(s_l, s_r, l.h, r.h, u_l, u_r).unwrap_or(u_star);
    let v_upwind = if s_m >= 0.0 { v_l } else { v_r };

    SweState::new(f_h, f_qn, f_h * v_upwind)
}

/// Speed of the middle (shear) wave, `None` if its denominator degenerates.
///
/// With one side wet the denominator is strictly non-zero, so `None` only
/// arises from two vacuum states.
#[inline]
fn contact_speed(s_l: f64, s_r: f64, h_l: f64, h_r: f64, u_l: f64, u_r: f64) -> Option<f64> {
    let num = s_l * h_r * (u_r - s_r) - s_r * h_l * (u_l - s_l);
    let den = h_r * (u_r - s_r) - h_l * (u_l - s_l);
    let s_m = num / den;
    s_m.is_finite().then_some(s_m)
}
