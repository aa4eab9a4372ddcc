//! Configuration types for the simulation.

use crate::error::{Error, Result};
use crate::types::WorldBounds;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// World configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Width of the world in tiles
    pub width: u32,
    /// Height of the world in tiles
    pub height: u32,
    /// Width of one tile in world units
    pub tile_width: u32,
    /// Height of one tile in world units
    pub tile_height: u32,
    /// Scales the food stored on tiles near water
    pub fertility: f32,
}

impl WorldConfig {
    pub fn bounds(&self) -> WorldBounds {
        WorldBounds {
            width: self.width,
            height: self.height,
            tile_width: self.tile_width,
            tile_height: self.tile_height,
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            tile_width: 32,
            tile_height: 32,
            fertility: 1.5,
        }
    }
}

/// Energy costs and gains applied every tick
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyConfig {
    /// Stored energy of a freshly spawned creature
    pub initial_energy: f32,
    /// diameter = stored energy * size_multiplier
    pub size_multiplier: f32,
    /// body mass = diameter * mass_multiplier
    pub mass_multiplier: f32,
    /// Flat cost paid every tick
    pub base_food_cost: f32,
    /// Cost per unit of |position delta|
    pub movement_food_cost: f32,
    /// Cost per degree of |rotation delta|
    pub rotation_food_cost: f32,
    /// Cost per unit of eat output
    pub eat_food_cost: f32,
    /// Penalty for eating on a deadly tile
    pub deadly_tile_food_cost: f32,
    /// Creatures below this reserve are removed
    pub death_threshold: f32,
}

impl EnergyConfig {
    pub fn diameter_for(&self, energy: f32) -> f32 {
        energy * self.size_multiplier
    }
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            initial_energy: 8.0,
            size_multiplier: 4.0,
            mass_multiplier: 5.0,
            base_food_cost: 0.3,
            movement_food_cost: 0.4,
            rotation_food_cost: 0.1,
            eat_food_cost: 0.2,
            deadly_tile_food_cost: 10.0,
            death_threshold: 0.3,
        }
    }
}

/// Contact-triggered mating rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReproductionConfig {
    /// Both creatures must have a mate output strictly above this
    pub mate_threshold: f32,
    /// Chance that a qualifying contact produces offspring
    pub mate_probability: f64,
}

impl Default for ReproductionConfig {
    fn default() -> Self {
        Self {
            mate_threshold: 5.0,
            mate_probability: 0.01,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Population is topped up to this size at the start of every tick
    pub min_population: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self { min_population: 300 }
    }
}

/// Full simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of ticks to run
    pub num_ticks: u64,
    /// Random seed for reproducibility
    pub seed: u64,
    /// Ticks between population metric events, 0 disables them
    pub metrics_interval: u64,
    pub world: WorldConfig,
    pub energy: EnergyConfig,
    pub reproduction: ReproductionConfig,
    pub population: PopulationConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_ticks: 10_000,
            seed: 0,
            metrics_interval: 100,
            world: WorldConfig::default(),
            energy: EnergyConfig::default(),
            reproduction: ReproductionConfig::default(),
            population: PopulationConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        debug!(path = %path.display(), seed = config.seed, "Loaded simulation config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let world = &self.world;
        if world.width == 0 || world.height == 0 {
            return Err(Error::Config("world dimensions must be positive".to_string()));
        }
        if world.tile_width == 0 || world.tile_height == 0 {
            return Err(Error::Config("tile dimensions must be positive".to_string()));
        }

        let p = self.reproduction.mate_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(Error::Config(format!(
                "mate_probability must be within [0, 1], got {}",
                p
            )));
        }

        let energy = &self.energy;
        if !energy.initial_energy.is_finite() || energy.initial_energy < energy.death_threshold {
            return Err(Error::Config(format!(
                "initial_energy {} must be finite and not below death_threshold {}",
                energy.initial_energy, energy.death_threshold
            )));
        }
        if energy.size_multiplier < 0.0 {
            return Err(Error::Config("size_multiplier must not be negative".to_string()));
        }

        // Spawn placement keeps a tile of clearance from both walls plus the
        // creature's own diameter, which only fits if the world is wide enough.
        let diameter = energy.diameter_for(energy.initial_energy);
        let bounds = world.bounds();
        let min_x = 4.0 * world.tile_width as f32 + 2.0 * diameter;
        let min_y = 4.0 * world.tile_height as f32 + 2.0 * diameter;
        if bounds.extent_x() < min_x || bounds.extent_y() < min_y {
            return Err(Error::Config(format!(
                "world extent {}x{} too small to place creatures of diameter {} (need {}x{})",
                bounds.extent_x(),
                bounds.extent_y(),
                diameter,
                min_x,
                min_y
            )));
        }

        Ok(())
    }
}
