//! Food field and world bounds queried by creatures.

use gevo_core::{Error, FoodTile, Position, Result, TileCoord, WorldBounds, WorldConfig};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

/// Read-only view of the world shared by all think tasks.
///
/// `query_tile` must answer for any position. Positions that do not resolve
/// to a known tile get [`FoodTile::sentinel`].
pub trait Environment: Send + Sync {
    fn query_tile(&self, position: Position) -> FoodTile;

    fn world_bounds(&self) -> WorldBounds;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerKind {
    Water,
    Food,
}

/// An already-parsed tile layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileLayer {
    pub kind: LayerKind,
    pub tiles: Vec<TileCoord>,
}

impl TileLayer {
    pub fn new(kind: LayerKind, tiles: Vec<TileCoord>) -> Self {
        Self { kind, tiles }
    }
}

/// Tile-based food field
#[derive(Debug, Clone)]
pub struct TileMap {
    bounds: WorldBounds,
    tiles: HashMap<TileCoord, FoodTile>,
}

impl TileMap {
    /// Build the food field from parsed layers.
    ///
    /// Water tiles are deadly and hold no food. A food tile holds
    /// `(1 / d) * fertility`, `d` being the Manhattan distance in tiles to the
    /// closest water tile. Food without any water is a fatal error since the
    /// stored food would be undefined.
    pub fn from_layers(config: &WorldConfig, layers: &[TileLayer]) -> Result<Self> {
        let water: Vec<TileCoord> = layers
            .iter()
            .filter(|layer| layer.kind == LayerKind::Water)
            .flat_map(|layer| layer.tiles.iter().copied())
            .collect();

        let has_food = layers
            .iter()
            .any(|layer| layer.kind == LayerKind::Food && !layer.tiles.is_empty());
        if has_food && water.is_empty() {
            return Err(Error::MissingLayer(
                "food tiles present but no water layer to derive fertility from".to_string(),
            ));
        }

        let mut tiles = HashMap::new();
        for layer in layers {
            for &coord in &layer.tiles {
                let tile = match layer.kind {
                    LayerKind::Water => FoodTile::water(),
                    LayerKind::Food => {
                        let distance = water
                            .iter()
                            .map(|w| w.manhattan_distance(&coord))
                            .min()
                            .unwrap_or(1)
                            .max(1);
                        FoodTile::food(config.fertility / distance as f32)
                    }
                };

                if tiles.insert(coord, tile).is_some() {
                    warn!(x = coord.x, y = coord.y, "Overlapping tiles detected");
                }
            }
        }

        info!(
            tiles = tiles.len(),
            water_tiles = water.len(),
            "Tile map built"
        );

        Ok(Self {
            bounds: config.bounds(),
            tiles,
        })
    }

    /// Layers for a map bordered by water, with a few random ponds and food
    /// everywhere else.
    pub fn generate_layers<R: Rng>(config: &WorldConfig, rng: &mut R, ponds: usize) -> Vec<TileLayer> {
        let width = config.width as i32;
        let height = config.height as i32;

        let mut water = Vec::new();
        for y in 0..height {
            for x in 0..width {
                if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                    water.push(TileCoord::new(x, y));
                }
            }
        }

        if width > 2 && height > 2 {
            for _ in 0..ponds {
                let x = rng.gen_range(1..width - 1);
                let y = rng.gen_range(1..height - 1);
                water.push(TileCoord::new(x, y));
            }
        }

        let water_set: HashSet<TileCoord> = water.iter().copied().collect();
        let food = (1..height - 1)
            .flat_map(|y| (1..width - 1).map(move |x| TileCoord::new(x, y)))
            .filter(|coord| !water_set.contains(coord))
            .collect();

        vec![
            TileLayer::new(LayerKind::Water, water),
            TileLayer::new(LayerKind::Food, food),
        ]
    }

    pub fn get(&self, coord: TileCoord) -> Option<&FoodTile> {
        self.tiles.get(&coord)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

impl Environment for TileMap {
    fn query_tile(&self, position: Position) -> FoodTile {
        let tile = self
            .bounds
            .tile_at(position)
            .and_then(|coord| self.tiles.get(&coord));

        match tile {
            Some(tile) => *tile,
            None => {
                debug!(x = position.x, y = position.y, "Query of a nonexistent tile");
                FoodTile::sentinel()
            }
        }
    }

    fn world_bounds(&self) -> WorldBounds {
        self.bounds
    }
}

/// Environment returning the same tile everywhere
#[derive(Debug, Clone, Copy)]
pub struct UniformEnvironment {
    pub bounds: WorldBounds,
    pub tile: FoodTile,
}

impl Environment for UniformEnvironment {
    fn query_tile(&self, _position: Position) -> FoodTile {
        self.tile
    }

    fn world_bounds(&self) -> WorldBounds {
        self.bounds
    }
}
