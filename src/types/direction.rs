//! Compass directions of the four cell faces.
//!
//! The grid is indexed with `x` growing eastward and `y` growing northward,
//! so the east neighbour of `(x, y)` is `(x + 1, y)` and the north neighbour
//! is `(x, y + 1)`.
//!
//! Every face is shared by a *left* and a *right* state in the sense of the
//! Riemann problem (left = smaller coordinate). For the north and east faces
//! the owning cell is the left state, for south and west it is the right one.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four axis-aligned face directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

/// Which operand of a left/right face pair belongs to the cell doing the work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaceSide {
    Left,
    Right,
}

/// Coordinate axis normal to a face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Direction {
    /// All directions in the order N, E, S, W.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Direction pointing the other way.
    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Side of the face pair occupied by the owning cell.
    pub fn own_side(self) -> FaceSide {
        match self {
            Direction::North | Direction::East => FaceSide::Left,
            Direction::South | Direction::West => FaceSide::Right,
        }
    }

    /// Axis normal to a face in this direction.
    pub fn axis(self) -> Axis {
        match self {
            Direction::East | Direction::West => Axis::X,
            Direction::North | Direction::South => Axis::Y,
        }
    }

    /// Grid offset `(dx, dy)` towards the neighbour in this direction.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
        }
    }

    /// +1 if the direction points along the positive axis, -1 otherwise.
    pub fn outward_sign(self) -> f64 {
        match self {
            Direction::North | Direction::East => 1.0,
            Direction::South | Direction::West => -1.0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_is_involution() {
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
            assert_ne!(d.opposite(), d);
        }
    }

    #[test]
    fn test_own_side_matches_outward_sign() {
        for d in Direction::ALL {
            let expected = if d.outward_sign() > 0.0 {
                FaceSide::Left
            } else {
                FaceSide::Right
            };
            assert_eq!(d.own_side(), expected, "direction {}", d);
        }
    }

    #[test]
    fn test_offsets_cancel() {
        for d in Direction::ALL {
            let (ax, ay) = d.offset();
            let (bx, by) = d.opposite().offset();
            assert_eq!((ax + bx, ay + by), (0, 0));
        }
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Direction::West).unwrap();
        assert_eq!(json, "\"west\"");
        let d: Direction = serde_json::from_str("\"north\"").unwrap();
        assert_eq!(d, Direction::North);
    }
}
