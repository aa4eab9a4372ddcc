//! Stand-in contact source: reports every pair of overlapping bodies.

use gevo_core::{CreatureId, Position};
use gevo_world::{ContactEvent, PopulationManager};

struct Circle {
    id: CreatureId,
    center: Position,
    radius: f32,
}

/// Pairs of creatures whose circles overlap, lower id first.
///
/// Bodies with no diameter are not solid and never touch anything.
pub fn detect(population: &PopulationManager) -> Vec<ContactEvent> {
    let circles: Vec<Circle> = population
        .snapshot()
        .iter()
        .filter_map(|(id, handle)| {
            let creature = handle.lock();
            (creature.diameter() > 0.0).then(|| Circle {
                id: *id,
                center: creature.position,
                radius: creature.diameter() / 2.0,
            })
        })
        .collect();

    let mut contacts = Vec::new();
    for (i, a) in circles.iter().enumerate() {
        for b in &circles[i + 1..] {
            if a.center.distance(&b.center) < a.radius + b.radius {
                contacts.push(ContactEvent::new(a.id, b.id));
            }
        }
    }
    contacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use gevo_core::{EnergyConfig, WorldBounds};
    use gevo_world::{NullRegistry, Population, SpawnCause};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::sync::Arc;

    fn manager() -> PopulationManager {
        PopulationManager::new(Population::new(
            EnergyConfig::default(),
            WorldBounds {
                width: 64,
                height: 64,
                tile_width: 32,
                tile_height: 32,
            },
            0,
            Arc::new(NullRegistry),
            ChaCha8Rng::seed_from_u64(3),
        ))
    }

    fn spawn_at(manager: &PopulationManager, x: f32, y: f32) -> CreatureId {
        let id = manager.spawn(SpawnCause::TopUp);
        manager.get(id).unwrap().lock().position = Position::new(x, y);
        id
    }

    #[test]
    fn test_overlapping_bodies_touch() {
        let manager = manager();
        // default diameter is 32
        let a = spawn_at(&manager, 100.0, 100.0);
        let b = spawn_at(&manager, 120.0, 100.0);
        spawn_at(&manager, 400.0, 400.0);

        assert_eq!(detect(&manager), vec![ContactEvent::new(a, b)]);
    }

    #[test]
    fn test_touching_edges_do_not_count() {
        let manager = manager();
        spawn_at(&manager, 100.0, 100.0);
        spawn_at(&manager, 132.0, 100.0);

        assert!(detect(&manager).is_empty());
    }

    #[test]
    fn test_drained_bodies_are_not_solid() {
        let manager = manager();
        let a = spawn_at(&manager, 100.0, 100.0);
        spawn_at(&manager, 101.0, 100.0);
        manager.get(a).unwrap().lock().set_energy(0.0);

        assert!(detect(&manager).is_empty());
    }
}
