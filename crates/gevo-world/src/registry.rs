//! Hand-off of creature bodies to rendering and physics collaborators.

use gevo_core::{CreatureId, Position};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Shape and placement of a creature's body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    pub id: CreatureId,
    pub position: Position,
    /// Degrees
    pub rotation: f32,
    pub diameter: f32,
    pub mass: f32,
}

/// Rendering/physics side of the creature lifecycle.
///
/// Called with the population lock held, implementations must not call back
/// into the population.
pub trait BodyRegistry: Send + Sync {
    fn register(&self, body: BodySpec);

    fn update(&self, body: BodySpec);

    fn deregister(&self, id: CreatureId);
}

/// Registry for runs without any renderer or physics engine
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRegistry;

impl BodyRegistry for NullRegistry {
    fn register(&self, _body: BodySpec) {}

    fn update(&self, _body: BodySpec) {}

    fn deregister(&self, _id: CreatureId) {}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegistryEvent {
    Registered(CreatureId),
    Deregistered(CreatureId),
}

#[derive(Debug, Default)]
struct RecordingState {
    bodies: HashMap<CreatureId, BodySpec>,
    events: Vec<RegistryEvent>,
}

/// Registry that keeps the latest body of every registered creature
#[derive(Debug, Default)]
pub struct RecordingRegistry {
    state: Mutex<RecordingState>,
}

impl RecordingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(&self, id: CreatureId) -> Option<BodySpec> {
        self.state.lock().bodies.get(&id).copied()
    }

    pub fn bodies(&self) -> Vec<BodySpec> {
        self.state.lock().bodies.values().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.state.lock().bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn events(&self) -> Vec<RegistryEvent> {
        self.state.lock().events.clone()
    }
}

impl BodyRegistry for RecordingRegistry {
    fn register(&self, body: BodySpec) {
        let mut state = self.state.lock();
        state.bodies.insert(body.id, body);
        state.events.push(RegistryEvent::Registered(body.id));
    }

    fn update(&self, body: BodySpec) {
        let mut state = self.state.lock();
        if let Some(existing) = state.bodies.get_mut(&body.id) {
            *existing = body;
        }
    }

    fn deregister(&self, id: CreatureId) {
        let mut state = self.state.lock();
        if state.bodies.remove(&id).is_some() {
            state.events.push(RegistryEvent::Deregistered(id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(id: u64, diameter: f32) -> BodySpec {
        BodySpec {
            id: CreatureId(id),
            position: Position::new(1.0, 2.0),
            rotation: 0.0,
            diameter,
            mass: diameter * 5.0,
        }
    }

    #[test]
    fn test_recording_registry_lifecycle() {
        let registry = RecordingRegistry::new();
        registry.register(body(1, 32.0));
        registry.update(body(1, 16.0));
        // updates for unknown bodies are dropped
        registry.update(body(2, 16.0));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.body(CreatureId(1)).unwrap().diameter, 16.0);

        registry.deregister(CreatureId(1));
        registry.deregister(CreatureId(1));
        assert!(registry.is_empty());
        assert_eq!(
            registry.events(),
            vec![
                RegistryEvent::Registered(CreatureId(1)),
                RegistryEvent::Deregistered(CreatureId(1)),
            ]
        );
    }
}
