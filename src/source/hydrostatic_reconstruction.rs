//! Depth-positivity-preserving face reconstruction for wet/dry fronts.
//!
//! Each face is reconciled to a single bed level `z* = max(z_L, z_R)`, and
//! both sides are re-expressed as depths above it:
//!
//! ```text
//! h*_L = max(0, η_L - z*)      q*_L = h*_L u_L
//! h*_R = max(0, η_R - z*)      q*_R = h*_R u_R
//! ```
//!
//! When the owning cell's free surface lies below `z*` (water against a
//! higher dry bank) the face bed is lowered by the deficit
//! `δ = z* - η_own`, which removes the spurious pressure the bank would
//! otherwise exert in the bed-slope source. Reconstructed depths are not
//! changed by `δ`, so the two cells sharing a face see identical Riemann
//! states and fluxes.
//!
//! Reference: Liang & Marche (2009), "Numerical resolution of well-balanced
//! shallow water equations with complex source terms", Adv. Water Resour.

use crate::solver::FaceState;
use crate::types::{Direction, FaceSide};

/// Reconciled face: bed level plus non-negative left/right states.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReconstructedFace {
    /// Face bed elevation used by the bed-slope source
    pub z_face: f64,
    pub left: FaceState,
    pub right: FaceState,
}

impl ReconstructedFace {
    /// Reconstructed state on the owning cell's side of the face.
    pub fn own(&self, dir: Direction) -> &FaceState {
        match dir.own_side() {
            FaceSide::Left => &self.left,
            FaceSide::Right => &self.right,
        }
    }
}

/// Hydrostatic reconstruction with a dry tolerance for velocity recovery.
///
/// # Example
/// ```
/// use flood_swe::source::HydrostaticReconstruction;
/// use flood_swe::solver::FaceState;
/// use flood_swe::types::Direction;
///
/// let wd = HydrostaticReconstruction::new(1e-3);
/// // Lake at rest, η = 2: left bed 0.5, right bed 1.5
/// let l = FaceState::new(1.5, 2.0, 0.0, 0.0);
/// let r = FaceState::new(0.5, 2.0, 0.0, 0.0);
/// let face = wd.reconstruct(&l, &r, Direction::East);
/// assert_eq!(face.left.h, face.right.h);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct HydrostaticReconstruction {
    pub tol_h: f64,
}

impl HydrostaticReconstruction {
    pub fn new(tol_h: f64) -> Self {
        Self { tol_h }
    }

    /// Reconstruct the Riemann states at a face.
    ///
    /// # Arguments
    /// * `left` - State on the smaller-coordinate side (west or south)
    /// * `right` - State on the larger-coordinate side (east or north)
    /// * `dir` - Face direction as seen from the owning cell
    pub fn reconstruct(
        &self,
        left: &FaceState,
        right: &FaceState,
        dir: Direction,
    ) -> ReconstructedFace {
        let (u_l, v_l) = left.conserved().velocity(self.tol_h);
        let (u_r, v_r) = right.conserved().velocity(self.tol_h);

        let mut z_face = left.bed().max(right.bed());

        let et_own = match dir.own_side() {
            FaceSide::Left => left.et,
            FaceSide::Right => right.et,
        };
        let delta = (z_face - et_own).max(0.0);

        let h_l = (left.et - z_face).max(0.0);
        let h_r = (right.et - z_face).max(0.0);

        let mut et_l = h_l + z_face;
        let mut et_r = h_r + z_face;
        if delta > 0.0 {
            z_face -= delta;
            et_l -= delta;
            et_r -= delta;
        }

        ReconstructedFace {
            z_face,
            left: FaceState::new(h_l, et_l, h_l * u_l, h_l * v_l),
            right: FaceState::new(h_r, et_r, h_r * u_r, h_r * v_r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    fn wd() -> HydrostaticReconstruction {
        HydrostaticReconstruction::new(1e-3)
    }

    #[test]
    fn test_lake_at_rest_equal_depths() {
        let l = FaceState::new(2.0, 3.0, 0.0, 0.0); // bed 1
        let r = FaceState::new(1.0, 3.0, 0.0, 0.0); // bed 2
        for dir in Direction::ALL {
            let face = wd().reconstruct(&l, &r, dir);
            assert!((face.left.h - 1.0).abs() < TOL);
            assert!((face.right.h - 1.0).abs() < TOL);
            assert!((face.z_face - 2.0).abs() < TOL);
        }
    }

    #[test]
    fn test_depths_never_negative() {
        // wet left against a high dry bank
        let l = FaceState::new(0.3, 1.3, 0.2, 0.0); // bed 1.0, η 1.3
        let r = FaceState::new(0.0, 2.0, 0.0, 0.0); // bed 2.0, dry
        for dir in Direction::ALL {
            let face = wd().reconstruct(&l, &r, dir);
            assert!(face.left.h >= 0.0 && face.right.h >= 0.0);
            assert_eq!(face.left.h, 0.0);
            assert_eq!(face.left.qx, 0.0);
        }
    }

    #[test]
    fn test_bank_lowers_face_bed_for_owner_only() {
        let l = FaceState::new(0.3, 1.3, 0.0, 0.0);
        let r = FaceState::new(0.0, 2.0, 0.0, 0.0);

        // East face owned by the wet left cell: bed drops to its surface
        let east = wd().reconstruct(&l, &r, Direction::East);
        assert!((east.z_face - 1.3).abs() < TOL);

        // West face owned by the dry right cell: its surface is the bank itself
        let west = wd().reconstruct(&l, &r, Direction::West);
        assert!((west.z_face - 2.0).abs() < TOL);

        // Riemann states agree for both owners
        assert_eq!(east.left.h, west.left.h);
        assert_eq!(east.right.h, west.right.h);
    }

    #[test]
    fn test_velocity_preserved() {
        let l = FaceState::new(2.0, 2.5, 1.0, -0.5); // u = 0.5, v = -0.25
        let r = FaceState::new(1.0, 2.0, 0.0, 0.0);
        let face = wd().reconstruct(&l, &r, Direction::North);
        // z* = max(0.5, 1.0) = 1.0, h*_L = 1.5
        assert!((face.left.h - 1.5).abs() < TOL);
        assert!((face.left.qx - 0.75).abs() < TOL);
        assert!((face.left.qy + 0.375).abs() < TOL);
        assert_eq!(face.own(Direction::North), &face.left);
        assert_eq!(face.own(Direction::South), &face.right);
    }

    #[test]
    fn test_dry_side_has_no_momentum() {
        let l = FaceState::new(5e-4, 1.0005, 1.0, 1.0);
        let r = FaceState::new(1.0, 2.0, 0.0, 0.0);
        let face = wd().reconstruct(&l, &r, Direction::East);
        assert_eq!(face.left.qx, 0.0);
        assert_eq!(face.left.qy, 0.0);
    }
}
