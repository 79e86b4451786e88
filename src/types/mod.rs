//! Small strongly-typed building blocks shared across the solver.
//!
//! - [`Direction`] names the four cell faces and knows which side of a
//!   left/right Riemann pair the owning cell occupies.
//! - [`Sides`] stores one value per direction with named fields.

mod direction;
mod sides;

pub use direction::{Axis, Direction, FaceSide};
pub use sides::Sides;
