//! Contact-driven mating and predation.

use crate::population::{PopulationManager, SpawnCause};
use gevo_core::{CreatureId, ReproductionConfig};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info, trace};

/// Two solid bodies touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactEvent {
    pub entity_a: CreatureId,
    pub entity_b: CreatureId,
}

impl ContactEvent {
    pub fn new(entity_a: CreatureId, entity_b: CreatureId) -> Self {
        Self { entity_a, entity_b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactOutcome {
    /// At least one side is not a tracked creature
    Ignored,
    /// Both wanted to mate and the roll succeeded
    Offspring(CreatureId),
    /// Both wanted to mate but the roll failed
    NoOffspring,
    /// `predator` drained the energy of `prey`
    Predation { predator: CreatureId, prey: CreatureId },
    /// Equal reserves, nobody wins
    Standoff,
}

/// Reacts to contact events by mutating the population.
///
/// Offspring get fresh random weights; nothing is inherited from the parents.
pub struct ReproductionCoordinator {
    population: PopulationManager,
    config: ReproductionConfig,
    rng: ChaCha8Rng,
}

impl ReproductionCoordinator {
    pub fn new(population: PopulationManager, config: ReproductionConfig, rng: ChaCha8Rng) -> Self {
        Self {
            population,
            config,
            rng,
        }
    }

    /// Resolve one contact under the population lock.
    pub fn handle(&mut self, event: ContactEvent) -> ContactOutcome {
        let mut population = self.population.lock();

        let (a, b) = (event.entity_a, event.entity_b);
        let (handle_a, handle_b) = match (population.get(a), population.get(b)) {
            (Some(ha), Some(hb)) if a != b => (ha, hb),
            _ => {
                population.stats_mut().ignored_contacts += 1;
                trace!(entity_a = %a, entity_b = %b, "Contact ignored");
                return ContactOutcome::Ignored;
            }
        };

        // Lock creatures in id order so two creature locks are always taken
        // the same way round
        let (mut first, mut second) = if a < b {
            let first = handle_a.lock();
            (first, handle_b.lock())
        } else {
            let second = handle_b.lock();
            (handle_a.lock(), second)
        };
        let (creature_a, creature_b) = (&mut *first, &mut *second);

        let threshold = self.config.mate_threshold;
        if creature_a.outputs.mate() > threshold && creature_b.outputs.mate() > threshold {
            drop(first);
            drop(second);
            population.stats_mut().mating_contacts += 1;

            if self.rng.gen::<f64>() >= self.config.mate_probability {
                return ContactOutcome::NoOffspring;
            }

            let offspring = population.spawn(SpawnCause::Offspring);
            info!(
                event = "offspring_born",
                parent_a = %a,
                parent_b = %b,
                offspring_id = %offspring,
                population = population.len(),
                "Creatures mated"
            );
            return ContactOutcome::Offspring(offspring);
        }

        let (predator, prey) = if creature_a.energy() > creature_b.energy() {
            (creature_a, creature_b)
        } else if creature_b.energy() > creature_a.energy() {
            (creature_b, creature_a)
        } else {
            return ContactOutcome::Standoff;
        };

        // Removal happens in the next apply phase once the reserve is checked
        prey.set_energy(0.0);
        let (predator, prey) = (predator.id(), prey.id());
        drop(first);
        drop(second);

        population.stats_mut().predations += 1;
        debug!(predator_id = %predator, prey_id = %prey, "Creature drained by predator");
        ContactOutcome::Predation { predator, prey }
    }

    /// Process contacts until every sender is dropped.
    pub async fn run(mut self, mut contacts: mpsc::Receiver<ContactEvent>) -> u64 {
        let mut handled = 0;
        while let Some(event) = contacts.recv().await {
            self.handle(event);
            handled += 1;
        }
        debug!(handled, "Contact feed closed");
        handled
    }
}
