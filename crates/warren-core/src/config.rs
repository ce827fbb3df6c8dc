//! Arena configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH, MIN_ARENA_SIDE};
use crate::geometry::TilePos;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("arena is {width}x{height} tiles, need at least {min}x{min} for a border plus interior")]
    ArenaTooSmall { width: i32, height: i32, min: i32 },
}

/// Dimensions of the playing field in tiles, border included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaConfig {
    pub width: i32,
    pub height: i32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

impl ArenaConfig {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_ARENA_SIDE || self.height < MIN_ARENA_SIDE {
            return Err(ConfigError::ArenaTooSmall {
                width: self.width,
                height: self.height,
                min: MIN_ARENA_SIDE,
            });
        }
        Ok(())
    }

    /// True for tiles on the outermost ring.
    pub fn is_border(&self, tile: TilePos) -> bool {
        tile.x == 0 || tile.y == 0 || tile.x == self.width - 1 || tile.y == self.height - 1
    }

    /// True for tiles strictly inside the border.
    pub fn is_interior(&self, tile: TilePos) -> bool {
        tile.x > 0 && tile.y > 0 && tile.x < self.width - 1 && tile.y < self.height - 1
    }

    /// Tile `depth` rows below the top border, in the given column.
    pub fn below_top(&self, x: i32, depth: i32) -> TilePos {
        TilePos::new(x, self.height - 1 - depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(ArenaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_too_small_rejected() {
        let cfg = ArenaConfig::new(2, 10);
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::ArenaTooSmall {
                width: 2,
                height: 10,
                min: MIN_ARENA_SIDE,
            })
        );
        assert!(ArenaConfig::new(10, 2).validate().is_err());
        assert!(ArenaConfig::new(3, 3).validate().is_ok());
    }

    #[test]
    fn test_border_and_interior_partition() {
        let cfg = ArenaConfig::new(5, 4);
        for x in 0..cfg.width {
            for y in 0..cfg.height {
                let t = TilePos::new(x, y);
                assert_ne!(cfg.is_border(t), cfg.is_interior(t));
            }
        }
        assert!(cfg.is_border(TilePos::new(0, 2)));
        assert!(cfg.is_interior(TilePos::new(1, 1)));
    }

    #[test]
    fn test_below_top() {
        let cfg = ArenaConfig::new(10, 8);
        assert_eq!(cfg.below_top(3, 2), TilePos::new(3, 5));
    }
}
