//! Per-direction storage with named fields.
//!
//! Used for the four face caches of a cell and for per-edge boundary modes,
//! so that code indexes by [`Direction`] rather than by a positional array.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use super::Direction;

/// One value for each of the four directions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sides<T> {
    pub north: T,
    pub east: T,
    pub south: T,
    pub west: T,
}

impl<T> Sides<T> {
    pub fn new(north: T, east: T, south: T, west: T) -> Self {
        Self {
            north,
            east,
            south,
            west,
        }
    }

    /// Same value on all four sides.
    pub fn uniform(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            north: value.clone(),
            east: value.clone(),
            south: value.clone(),
            west: value,
        }
    }

    /// Build from a function of the direction.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(Direction) -> T,
    {
        Self {
            north: f(Direction::North),
            east: f(Direction::East),
            south: f(Direction::South),
            west: f(Direction::West),
        }
    }

    pub fn map<U, F>(self, mut f: F) -> Sides<U>
    where
        F: FnMut(T) -> U,
    {
        Sides {
            north: f(self.north),
            east: f(self.east),
            south: f(self.south),
            west: f(self.west),
        }
    }

    /// Iterate `(direction, value)` pairs in N, E, S, W order.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, &T)> {
        [
            (Direction::North, &self.north),
            (Direction::East, &self.east),
            (Direction::South, &self.south),
            (Direction::West, &self.west),
        ]
        .into_iter()
    }
}

impl<T> Index<Direction> for Sides<T> {
    type Output = T;

    fn index(&self, dir: Direction) -> &T {
        match dir {
            Direction::North => &self.north,
            Direction::East => &self.east,
            Direction::South => &self.south,
            Direction::West => &self.west,
        }
    }
}

impl<T> IndexMut<Direction> for Sides<T> {
    fn index_mut(&mut self, dir: Direction) -> &mut T {
        match dir {
            Direction::North => &mut self.north,
            Direction::East => &mut self.east,
            Direction::South => &mut self.south,
            Direction::West => &mut self.west,
        }
    }
}
