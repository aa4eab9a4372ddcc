//! Creature state.

use crate::environment::Environment;
use crate::registry::BodySpec;
use gevo_brain::{Controller, Outputs, SensorSnapshot};
use gevo_core::{CreatureId, EnergyConfig, Position};
use serde::{Deserialize, Serialize};

/// A creature living on the map
#[derive(Debug, Clone)]
pub struct Creature {
    id: CreatureId,
    pub position: Position,
    /// Heading in degrees, kept within `[0, 360)`
    pub rotation: f32,
    energy: f32,
    diameter: f32,
    size_multiplier: f32,
    pub controller: Controller,
    /// Outputs of the latest think phase
    pub outputs: Outputs,
    pub birth_tick: u64,
}

impl Creature {
    pub fn new(
        id: CreatureId,
        position: Position,
        controller: Controller,
        energy_config: &EnergyConfig,
        birth_tick: u64,
    ) -> Self {
        let mut creature = Self {
            id,
            position,
            rotation: 0.0,
            energy: 0.0,
            diameter: 0.0,
            size_multiplier: energy_config.size_multiplier,
            controller,
            outputs: Outputs::default(),
            birth_tick,
        };
        creature.set_energy(energy_config.initial_energy);
        creature
    }

    pub fn id(&self) -> CreatureId {
        self.id
    }

    pub fn energy(&self) -> f32 {
        self.energy
    }

    /// Set the energy reserve. The diameter follows it.
    pub fn set_energy(&mut self, energy: f32) {
        self.energy = energy;
        // clamp for rendering, NaN renders as nothing
        self.diameter = (energy * self.size_multiplier).max(0.0);
    }

    pub fn diameter(&self) -> f32 {
        self.diameter
    }

    /// Whether the reserve has fallen below `threshold`. NaN counts as starved.
    pub fn is_starved(&self, threshold: f32) -> bool {
        !(self.energy >= threshold)
    }

    pub fn sense(&self, env: &dyn Environment) -> SensorSnapshot {
        SensorSnapshot {
            rotation: self.rotation,
            stored_energy: self.energy,
            vision_food: env.query_tile(self.position).energy_available,
        }
    }

    /// Sample the sensors and run the controller. Touches only this creature.
    pub fn think(&mut self, env: &dyn Environment) -> Outputs {
        let snapshot = self.sense(env);
        self.outputs = self.controller.evaluate(&snapshot);
        self.outputs
    }

    pub fn body(&self, mass_multiplier: f32) -> BodySpec {
        BodySpec {
            id: self.id,
            position: self.position,
            rotation: self.rotation,
            diameter: self.diameter,
            mass: self.diameter * mass_multiplier,
        }
    }
}

/// Serializable creature data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureData {
    pub id: CreatureId,
    pub position: Position,
    pub rotation: f32,
    pub diameter: f32,
    pub energy: f32,
    pub outputs: Outputs,
    pub birth_tick: u64,
}

impl From<&Creature> for CreatureData {
    fn from(creature: &Creature) -> Self {
        Self {
            id: creature.id,
            position: creature.position,
            rotation: creature.rotation,
            diameter: creature.diameter,
            energy: creature.energy,
            outputs: creature.outputs,
            birth_tick: creature.birth_tick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::UniformEnvironment;
    use gevo_brain::{OutputSignal, HIDDEN_COUNT};
    use gevo_core::{FoodTile, WorldBounds};

    fn creature() -> Creature {
        let controller =
            Controller::with_weights([0.5; HIDDEN_COUNT - 1], [0.0; OutputSignal::COUNT]);
        Creature::new(
            CreatureId(1),
            Position::new(10.0, 10.0),
            controller,
            &EnergyConfig::default(),
            0,
        )
    }

    #[test]
    fn test_creature_creation() {
        let creature = creature();
        assert_eq!(creature.id(), CreatureId(1));
        assert_eq!(creature.energy(), 8.0);
        assert_eq!(creature.diameter(), 32.0);
        assert!(!creature.is_starved(0.3));
    }

    #[test]
    fn test_diameter_tracks_energy() {
        let mut creature = creature();
        creature.set_energy(2.5);
        assert_eq!(creature.diameter(), 10.0);

        creature.set_energy(-1.0);
        assert_eq!(creature.diameter(), 0.0);
        assert!(creature.is_starved(0.3));

        creature.set_energy(f32::NAN);
        assert_eq!(creature.diameter(), 0.0);
        assert!(creature.is_starved(0.3));
    }

    #[test]
    fn test_sense_reads_tile_under_creature() {
        let env = UniformEnvironment {
            bounds: WorldBounds {
                width: 10,
                height: 10,
                tile_width: 16,
                tile_height: 16,
            },
            tile: FoodTile::food(0.75),
        };
        let mut creature = creature();
        creature.rotation = 45.0;

        let snapshot = creature.sense(&env);
        assert_eq!(snapshot.rotation, 45.0);
        assert_eq!(snapshot.stored_energy, 8.0);
        assert_eq!(snapshot.vision_food, 0.75);

        let outputs = creature.think(&env);
        assert_eq!(outputs, creature.outputs);
        assert_eq!(outputs, Outputs::default());
    }

    #[test]
    fn test_creature_data() {
        let creature = creature();
        let data = CreatureData::from(&creature);
        assert_eq!(data.id, creature.id());
        assert_eq!(data.energy, 8.0);
        assert_eq!(data.diameter, 32.0);

        let body = creature.body(5.0);
        assert_eq!(body.mass, 160.0);
    }
}
