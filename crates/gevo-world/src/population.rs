//! Ownership of the live creature collection.
//!
//! All membership changes go through a single [`parking_lot::Mutex`] held by
//! [`PopulationManager`]. Each creature additionally sits behind its own
//! mutex so the think phase can work on creatures without touching the
//! population lock.

use crate::creature::{Creature, CreatureData};
use crate::placement;
use crate::registry::BodyRegistry;
use gevo_brain::Controller;
use gevo_core::{CreatureId, EnergyConfig, EnergySummary, PopulationStats, WorldBounds};
use parking_lot::{Mutex, MutexGuard};
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

pub type CreatureHandle = Arc<Mutex<Creature>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnCause {
    TopUp,
    Offspring,
}

/// The live creatures and everything needed to create new ones
pub struct Population {
    creatures: HashMap<CreatureId, CreatureHandle>,
    next_id: u64,
    rng: ChaCha8Rng,
    energy: EnergyConfig,
    bounds: WorldBounds,
    min_population: usize,
    registry: Arc<dyn BodyRegistry>,
    stats: PopulationStats,
    tick: u64,
}

impl Population {
    pub fn new(
        energy: EnergyConfig,
        bounds: WorldBounds,
        min_population: usize,
        registry: Arc<dyn BodyRegistry>,
        rng: ChaCha8Rng,
    ) -> Self {
        Self {
            creatures: HashMap::new(),
            next_id: 0,
            rng,
            energy,
            bounds,
            min_population,
            registry,
            stats: PopulationStats::new(),
            tick: 0,
        }
    }

    /// Create a creature with fresh random weights at a wall-clear position,
    /// register its body and start tracking it.
    pub fn spawn(&mut self, cause: SpawnCause) -> CreatureId {
        let id = CreatureId(self.next_id);
        self.next_id += 1;

        let controller = Controller::random(&mut self.rng, self.energy.initial_energy);
        let diameter = self.energy.diameter_for(self.energy.initial_energy);
        let position = placement::place(&self.bounds, diameter, &mut self.rng);

        let creature = Creature::new(id, position, controller, &self.energy, self.tick);
        self.registry.register(creature.body(self.energy.mass_multiplier));
        self.creatures.insert(id, Arc::new(Mutex::new(creature)));

        match cause {
            SpawnCause::TopUp => self.stats.topped_up += 1,
            SpawnCause::Offspring => self.stats.offspring += 1,
        }

        trace!(
            creature_id = %id,
            cause = ?cause,
            x = position.x,
            y = position.y,
            tick = self.tick,
            "Creature spawned"
        );
        id
    }

    /// Stop tracking a creature and deregister its body. Removing an id that
    /// is not a member is a no-op.
    pub fn remove(&mut self, id: CreatureId) -> Option<CreatureHandle> {
        let handle = self.creatures.remove(&id)?;
        self.registry.deregister(id);
        Some(handle)
    }

    /// Spawn until the population reaches its minimum. Returns how many were
    /// spawned.
    pub fn top_up(&mut self) -> usize {
        let mut spawned = 0;
        while self.creatures.len() < self.min_population {
            self.spawn(SpawnCause::TopUp);
            spawned += 1;
        }
        if spawned > 0 {
            debug!(spawned, population = self.creatures.len(), tick = self.tick, "Population topped up");
        }
        spawned
    }

    pub fn get(&self, id: CreatureId) -> Option<CreatureHandle> {
        self.creatures.get(&id).cloned()
    }

    pub fn contains(&self, id: CreatureId) -> bool {
        self.creatures.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    /// Handles of all members, ordered by id
    pub fn snapshot(&self) -> Vec<(CreatureId, CreatureHandle)> {
        let mut members: Vec<_> = self
            .creatures
            .iter()
            .map(|(id, handle)| (*id, handle.clone()))
            .collect();
        members.sort_by_key(|(id, _)| *id);
        members
    }

    pub fn min_population(&self) -> usize {
        self.min_population
    }

    pub fn stats(&self) -> &PopulationStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut PopulationStats {
        &mut self.stats
    }

    pub(crate) fn set_tick(&mut self, tick: u64) {
        self.tick = tick;
    }
}

/// Shared, lock-guarded handle to a [`Population`]
#[derive(Clone)]
pub struct PopulationManager {
    inner: Arc<Mutex<Population>>,
}

impl PopulationManager {
    pub fn new(population: Population) -> Self {
        Self {
            inner: Arc::new(Mutex::new(population)),
        }
    }

    /// Hold the population lock for a batch of operations.
    ///
    /// Creature locks may be taken while this is held, never the other way
    /// round.
    pub fn lock(&self) -> MutexGuard<'_, Population> {
        self.inner.lock()
    }

    pub fn spawn(&self, cause: SpawnCause) -> CreatureId {
        self.inner.lock().spawn(cause)
    }

    pub fn remove(&self, id: CreatureId) -> Option<CreatureHandle> {
        self.inner.lock().remove(id)
    }

    pub fn top_up(&self) -> usize {
        self.inner.lock().top_up()
    }

    pub fn get(&self, id: CreatureId) -> Option<CreatureHandle> {
        self.inner.lock().get(id)
    }

    pub fn contains(&self, id: CreatureId) -> bool {
        self.inner.lock().contains(id)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn snapshot(&self) -> Vec<(CreatureId, CreatureHandle)> {
        self.inner.lock().snapshot()
    }

    pub fn stats(&self) -> PopulationStats {
        self.inner.lock().stats().clone()
    }

    /// Serializable copy of every member, ordered by id
    pub fn creature_data(&self) -> Vec<CreatureData> {
        self.snapshot()
            .iter()
            .map(|(_, handle)| CreatureData::from(&*handle.lock()))
            .collect()
    }

    pub fn energy_summary(&self) -> EnergySummary {
        let members = self.snapshot();
        EnergySummary::from_values(members.iter().map(|(_, handle)| handle.lock().energy()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{RecordingRegistry, RegistryEvent};
    use rand::SeedableRng;

    fn bounds() -> WorldBounds {
        WorldBounds {
            width: 64,
            height: 64,
            tile_width: 32,
            tile_height: 32,
        }
    }

    fn population(min: usize, registry: Arc<RecordingRegistry>) -> Population {
        Population::new(
            EnergyConfig::default(),
            bounds(),
            min,
            registry,
            ChaCha8Rng::seed_from_u64(42),
        )
    }

    #[test]
    fn test_spawn_assigns_fresh_ids() {
        let registry = Arc::new(RecordingRegistry::new());
        let mut population = population(0, registry.clone());

        let a = population.spawn(SpawnCause::TopUp);
        let b = population.spawn(SpawnCause::Offspring);
        population.remove(a);
        let c = population.spawn(SpawnCause::TopUp);

        assert_ne!(a, b);
        assert_ne!(c, a);
        assert_ne!(c, b);
        assert_eq!(population.len(), 2);
        assert_eq!(population.stats().topped_up, 2);
        assert_eq!(population.stats().offspring, 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_spawned_creature_defaults() {
        let registry = Arc::new(RecordingRegistry::new());
        let mut population = population(0, registry.clone());
        let id = population.spawn(SpawnCause::TopUp);

        let handle = population.get(id).unwrap();
        let creature = handle.lock();
        assert_eq!(creature.energy(), 8.0);
        assert_eq!(creature.diameter(), 32.0);
        assert_eq!(creature.rotation, 0.0);

        let body = registry.body(id).unwrap();
        assert_eq!(body.diameter, 32.0);
        assert_eq!(body.mass, 160.0);
        assert_eq!(body.position, creature.position);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let registry = Arc::new(RecordingRegistry::new());
        let mut population = population(0, registry.clone());
        let id = population.spawn(SpawnCause::TopUp);

        assert!(population.remove(id).is_some());
        assert!(population.remove(id).is_none());
        assert!(population.remove(CreatureId(999)).is_none());
        assert!(population.is_empty());
        assert_eq!(
            registry.events(),
            vec![RegistryEvent::Registered(id), RegistryEvent::Deregistered(id)]
        );
    }

    #[test]
    fn test_top_up_reaches_minimum() {
        let registry = Arc::new(RecordingRegistry::new());
        let mut population = population(25, registry);

        assert_eq!(population.top_up(), 25);
        assert_eq!(population.len(), 25);
        assert_eq!(population.top_up(), 0);

        let victims: Vec<_> = population.snapshot().iter().take(5).map(|(id, _)| *id).collect();
        for id in victims {
            population.remove(id);
        }
        assert_eq!(population.top_up(), 5);
        assert_eq!(population.len(), 25);
    }

    #[test]
    fn test_snapshot_is_ordered() {
        let registry = Arc::new(RecordingRegistry::new());
        let mut population = population(10, registry);
        population.top_up();

        let ids: Vec<_> = population.snapshot().iter().map(|(id, _)| *id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_manager_summaries() {
        let registry = Arc::new(RecordingRegistry::new());
        let manager = PopulationManager::new(population(4, registry));
        manager.top_up();

        let data = manager.creature_data();
        assert_eq!(data.len(), 4);
        assert!(data.iter().all(|c| c.energy == 8.0));

        let summary = manager.energy_summary();
        assert_eq!(summary.count, 4);
        assert_eq!(summary.mean, 8.0);
    }
}
