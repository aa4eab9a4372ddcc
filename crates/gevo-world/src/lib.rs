//! World simulation engine.
//!
//! Creatures live on a tiled map, sense the tile under them, think with a
//! small fixed network and pay for everything they do out of an energy
//! reserve. Contacts reported by the physics side drive mating and predation.

pub mod creature;
pub mod energy;
pub mod environment;
pub mod placement;
pub mod population;
pub mod registry;
pub mod reproduction;
pub mod simulation;

pub use creature::{Creature, CreatureData};
pub use energy::{apply_tick, TickOutcome};
pub use environment::{Environment, LayerKind, TileLayer, TileMap, UniformEnvironment};
pub use placement::place;
pub use population::{CreatureHandle, Population, PopulationManager, SpawnCause};
pub use registry::{BodyRegistry, BodySpec, NullRegistry, RecordingRegistry, RegistryEvent};
pub use reproduction::{ContactEvent, ContactOutcome, ReproductionCoordinator};
pub use simulation::{Simulation, SimulationResult, TickReport};
