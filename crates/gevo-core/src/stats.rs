//! Population statistics tracking.

use serde::{Deserialize, Serialize};

/// Running counters for a simulation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationStats {
    /// Creatures spawned by the minimum-population top-up
    pub topped_up: u64,
    /// Creatures spawned by mating
    pub offspring: u64,
    /// Creatures removed for dropping below the death threshold
    pub starved: u64,
    /// Contacts in which one creature drained the other
    pub predations: u64,
    /// Mutual mating contacts, successful or not
    pub mating_contacts: u64,
    /// Contacts that did not involve two tracked creatures
    pub ignored_contacts: u64,
}

impl PopulationStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_spawned(&self) -> u64 {
        self.topped_up + self.offspring
    }

    /// Fraction of mating contacts that produced offspring
    pub fn mating_success_rate(&self) -> f64 {
        if self.mating_contacts == 0 {
            0.0
        } else {
            self.offspring as f64 / self.mating_contacts as f64
        }
    }
}

/// Min/mean/max of the energy reserves of a population
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergySummary {
    pub count: usize,
    pub mean: f32,
    pub min: f32,
    pub max: f32,
}

impl EnergySummary {
    pub fn from_values<I: IntoIterator<Item = f32>>(values: I) -> Self {
        let mut summary = Self {
            count: 0,
            mean: 0.0,
            min: f32::INFINITY,
            max: f32::NEG_INFINITY,
        };

        for value in values {
            // incremental mean
            let n = summary.count as f32;
            summary.mean = (summary.mean * n + value) / (n + 1.0);
            summary.min = summary.min.min(value);
            summary.max = summary.max.max(value);
            summary.count += 1;
        }

        if summary.count == 0 {
            return Self::default();
        }
        summary
    }
}
