//! Per-tick energy economy: movement, costs, eating and starvation.

use crate::creature::Creature;
use crate::environment::Environment;
use gevo_brain::Outputs;
use gevo_core::angle::add_degrees;
use gevo_core::EnergyConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Survived,
    /// Reserve fell below the death threshold; the creature must be removed
    Starved,
}

/// Apply one tick of movement and energy bookkeeping to a creature.
///
/// Non-finite outputs are not trapped: they flow into rotation, position and
/// energy, and a NaN reserve is reported as [`TickOutcome::Starved`].
pub fn apply_tick(
    creature: &mut Creature,
    outputs: &Outputs,
    env: &dyn Environment,
    config: &EnergyConfig,
) -> TickOutcome {
    let rotation_delta = outputs.rotation_delta();
    let position_delta = outputs.position_delta();

    // The stored heading feeds sin/cos as is
    creature.rotation = add_degrees(creature.rotation, rotation_delta);
    creature.position = creature.position.add(
        creature.rotation.sin() * position_delta,
        creature.rotation.cos() * position_delta,
    );

    let mut energy = creature.energy();
    energy -= rotation_delta.abs() * config.rotation_food_cost
        + position_delta.abs() * config.movement_food_cost
        + config.base_food_cost;

    let eat = outputs.eat();
    if eat > 0.0 {
        energy -= eat * config.eat_food_cost;
        let tile = env.query_tile(creature.position);
        energy += tile.energy_available;
        if tile.is_deadly {
            energy -= config.deadly_tile_food_cost;
        }
    }

    creature.set_energy(energy);

    if creature.is_starved(config.death_threshold) {
        TickOutcome::Starved
    } else {
        TickOutcome::Survived
    }
}
