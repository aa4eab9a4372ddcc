//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a creature. Allocated once and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CreatureId(pub u64);

impl fmt::Display for CreatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Continuous position in world units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn distance(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Integer tile coordinate on the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

impl TileCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another coordinate, in tiles
    pub fn manhattan_distance(&self, other: &TileCoord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Food information for a single tile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoodTile {
    pub energy_available: f32,
    pub is_deadly: bool,
}

impl FoodTile {
    pub fn food(energy_available: f32) -> Self {
        Self {
            energy_available,
            is_deadly: false,
        }
    }

    pub fn water() -> Self {
        Self {
            energy_available: 0.0,
            is_deadly: true,
        }
    }

    /// Returned for positions that do not resolve to a known tile
    pub fn sentinel() -> Self {
        Self::water()
    }
}

/// Dimensions of the world. `width` and `height` are in tiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: u32,
    pub height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
}

impl WorldBounds {
    /// Horizontal extent in world units
    pub fn extent_x(&self) -> f32 {
        self.width as f32 * self.tile_width as f32
    }

    /// Vertical extent in world units
    pub fn extent_y(&self) -> f32 {
        self.height as f32 * self.tile_height as f32
    }

    /// Tile containing a world position. `None` for negative or non-finite positions.
    pub fn tile_at(&self, pos: Position) -> Option<TileCoord> {
        if !pos.x.is_finite() || !pos.y.is_finite() || pos.x < 0.0 || pos.y < 0.0 {
            return None;
        }
        let x = (pos.x / self.tile_width as f32).floor();
        let y = (pos.y / self.tile_height as f32).floor();
        if x > i32::MAX as f32 || y > i32::MAX as f32 {
            return None;
        }
        Some(TileCoord::new(x as i32, y as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan_distance() {
        let a = TileCoord::new(0, 0);
        let b = TileCoord::new(3, -4);
        assert_eq!(a.manhattan_distance(&b), 7);
    }

    #[test]
    fn test_tile_at() {
        let bounds = WorldBounds {
            width: 10,
            height: 10,
            tile_width: 16,
            tile_height: 8,
        };
        assert_eq!(bounds.tile_at(Position::new(0.0, 0.0)), Some(TileCoord::new(0, 0)));
        assert_eq!(bounds.tile_at(Position::new(31.9, 8.0)), Some(TileCoord::new(1, 1)));
        assert_eq!(bounds.tile_at(Position::new(-0.5, 3.0)), None);
        assert_eq!(bounds.tile_at(Position::new(f32::NAN, 3.0)), None);
    }

    #[test]
    fn test_sentinel_is_deadly_and_empty() {
        let tile = FoodTile::sentinel();
        assert!(tile.is_deadly);
        assert_eq!(tile.energy_available, 0.0);
    }

    #[test]
    fn test_extent() {
        let bounds = WorldBounds {
            width: 4,
            height: 3,
            tile_width: 32,
            tile_height: 16,
        };
        assert_eq!(bounds.extent_x(), 128.0);
        assert_eq!(bounds.extent_y(), 48.0);
    }
}
