//! Tile grid geometry and continuous-space helpers.
//!
//! The board is a square grid of `TILE_SIZE` tiles. Entities carry
//! continuous positions; +x is east and +y is north.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::consts::TILE_SIZE;

/// A position on the tile grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// World coordinates of this tile's center.
    pub fn to_world(self) -> Vec2 {
        Vec2::new(self.x as f32 * TILE_SIZE, self.y as f32 * TILE_SIZE)
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Tile containing a continuous position.
pub fn tile_of(pos: Vec2) -> TilePos {
    TilePos::new(
        (pos.x / TILE_SIZE).round() as i32,
        (pos.y / TILE_SIZE).round() as i32,
    )
}

/// Distance between two points in whole tiles, rounded down.
pub fn tile_distance(a: Vec2, b: Vec2) -> i32 {
    ((a - b).length() / TILE_SIZE).floor() as i32
}

/// Unit heading of a vector. A degenerate vector falls back to due east
/// instead of crashing or going NaN.
pub fn heading_or_east(v: Vec2) -> Vec2 {
    v.try_normalize().unwrap_or(Vec2::X)
}

/// The four walking directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Tile step for this direction.
    pub fn step(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }
}

/// Candidate steps for an aimless monster. Staying put is listed three
/// times so it is three times as likely as any single direction.
pub const ROAM_STEPS: [(i32, i32); 11] = [
    (0, 0),
    (0, 0),
    (0, 0),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];
