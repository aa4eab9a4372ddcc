//! Tick orchestration: top-up, concurrent think, barrier, sequential apply.

use crate::creature::CreatureData;
use crate::energy::{self, TickOutcome};
use crate::environment::Environment;
use crate::population::{CreatureHandle, Population, PopulationManager};
use crate::registry::BodyRegistry;
use crate::reproduction::ReproductionCoordinator;
use gevo_core::{CreatureId, Error, PopulationStats, Result, SimulationConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, event, info, instrument, Level};

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    /// Spawned by the top-up phase
    pub spawned: usize,
    /// Members that took part in think and apply
    pub evaluated: usize,
    /// Removed by the apply phase
    pub starved: usize,
    /// Population size when the tick finished
    pub population: usize,
}

pub struct Simulation {
    population: PopulationManager,
    env: Arc<dyn Environment>,
    registry: Arc<dyn BodyRegistry>,
    config: SimulationConfig,
    tick: u64,
}

impl Simulation {
    pub fn new(
        config: SimulationConfig,
        env: Arc<dyn Environment>,
        registry: Arc<dyn BodyRegistry>,
    ) -> Result<Self> {
        config.validate()?;

        // Placement clearance was checked against the configured world only
        let bounds = env.world_bounds();
        if bounds != config.world.bounds() {
            return Err(Error::Config(format!(
                "environment bounds {:?} differ from configured world {:?}",
                bounds,
                config.world.bounds()
            )));
        }

        let population = Population::new(
            config.energy.clone(),
            bounds,
            config.population.min_population,
            registry.clone(),
            ChaCha8Rng::seed_from_u64(config.seed),
        );

        Ok(Self {
            population: PopulationManager::new(population),
            env,
            registry,
            config,
            tick: 0,
        })
    }

    /// A coordinator sharing this simulation's population, seeded from the
    /// configured seed so runs stay reproducible.
    pub fn reproduction_coordinator(&self) -> ReproductionCoordinator {
        ReproductionCoordinator::new(
            self.population.clone(),
            self.config.reproduction.clone(),
            ChaCha8Rng::seed_from_u64(self.config.seed.wrapping_add(1)),
        )
    }

    /// Execute one tick.
    pub fn step(&mut self) -> Result<TickReport> {
        self.tick += 1;

        // Top-up
        let spawned = {
            let mut population = self.population.lock();
            population.set_tick(self.tick);
            population.top_up()
        };

        // Contacts landing after this point only show up next tick
        let members = self.population.snapshot();

        self.think(&members);
        let starved = self.apply(&members);

        let report = TickReport {
            tick: self.tick,
            spawned,
            evaluated: members.len(),
            starved,
            population: self.population.len(),
        };

        if self.config.metrics_interval > 0 && self.tick % self.config.metrics_interval == 0 {
            self.emit_population_metrics();
        }

        Ok(report)
    }

    /// Evaluate every controller in parallel. Returns once all are done.
    fn think(&self, members: &[(CreatureId, CreatureHandle)]) {
        let env = self.env.as_ref();
        members.par_iter().for_each(|(_, handle)| {
            handle.lock().think(env);
        });
    }

    /// Apply outputs in id order and remove starved creatures.
    fn apply(&self, members: &[(CreatureId, CreatureHandle)]) -> usize {
        let energy_config = &self.config.energy;
        let mut starved = 0;

        for (id, handle) in members {
            let (outcome, body, energy) = {
                let mut creature = handle.lock();
                let outputs = creature.outputs;
                let outcome = energy::apply_tick(&mut creature, &outputs, self.env.as_ref(), energy_config);
                (outcome, creature.body(energy_config.mass_multiplier), creature.energy())
            };

            match outcome {
                TickOutcome::Survived => self.registry.update(body),
                TickOutcome::Starved => {
                    let mut population = self.population.lock();
                    if population.remove(*id).is_some() {
                        population.stats_mut().starved += 1;
                        starved += 1;
                        debug!(
                            event = "creature_death",
                            creature_id = %id,
                            tick = self.tick,
                            final_energy = energy,
                            "Creature starved"
                        );
                    }
                }
            }
        }

        starved
    }

    /// Run for the configured number of ticks
    pub fn run(&mut self) -> Result<SimulationResult> {
        self.run_until(&AtomicBool::new(false))
    }

    /// Run for the configured number of ticks or until `stop` is set
    pub fn run_until(&mut self, stop: &AtomicBool) -> Result<SimulationResult> {
        self.run_with(stop, |_, _| {})
    }

    /// Like [`Simulation::run_until`], calling `after_tick` once every tick
    /// has fully applied.
    #[instrument(skip(self, stop, after_tick), fields(num_ticks = self.config.num_ticks, seed = self.config.seed))]
    pub fn run_with<F>(&mut self, stop: &AtomicBool, mut after_tick: F) -> Result<SimulationResult>
    where
        F: FnMut(&Simulation, &TickReport),
    {
        info!("Starting simulation for {} ticks", self.config.num_ticks);

        let first_tick = self.tick;
        while self.tick - first_tick < self.config.num_ticks {
            if stop.load(Ordering::Relaxed) {
                info!(tick = self.tick, "Stop requested");
                break;
            }
            let report = self.step()?;
            after_tick(self, &report);
        }

        self.emit_summary();
        Ok(self.collect_results())
    }

    fn emit_population_metrics(&self) {
        let stats = self.population.stats();
        let energy = self.population.energy_summary();

        info!(
            event = "population_metrics",
            tick = self.tick,
            total_population = energy.count,
            avg_energy = energy.mean,
            min_energy = energy.min,
            max_energy = energy.max,
            topped_up = stats.topped_up,
            offspring = stats.offspring,
            starved = stats.starved,
            predations = stats.predations,
            mating_contacts = stats.mating_contacts,
            "Population metrics snapshot"
        );

        event!(
            Level::INFO,
            gauge_name = "population_total",
            gauge_value = energy.count,
            tick = self.tick,
            "Population gauge"
        );
    }

    fn emit_summary(&self) {
        let stats = self.population.stats();
        info!(
            event = "run_summary",
            final_tick = self.tick,
            population = self.population.len(),
            total_spawned = stats.total_spawned(),
            offspring = stats.offspring,
            starved = stats.starved,
            predations = stats.predations,
            mating_success_rate = format!("{:.2}%", stats.mating_success_rate() * 100.0),
            ignored_contacts = stats.ignored_contacts,
            "Simulation complete"
        );
    }

    fn collect_results(&self) -> SimulationResult {
        SimulationResult {
            total_ticks: self.tick,
            stats: self.population.stats(),
            survivors: self.population.creature_data(),
        }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn population(&self) -> &PopulationManager {
        &self.population
    }

    pub fn environment(&self) -> &Arc<dyn Environment> {
        &self.env
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn stats(&self) -> PopulationStats {
        self.population.stats()
    }

    pub fn creature_data(&self) -> Vec<CreatureData> {
        self.population.creature_data()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub total_ticks: u64,
    pub stats: PopulationStats,
    pub survivors: Vec<CreatureData>,
}
