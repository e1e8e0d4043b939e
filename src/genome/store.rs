//! Owner of the live genome with bounded in-place updates

use crate::core::error::Result;
use crate::genome::{Genome, GenomeParam};

/// Holds the session genome. Callers serialise access (see `SharedEngine`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenomeStore {
    genome: Genome,
}

impl GenomeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_genome(genome: Genome) -> Self {
        Self { genome }
    }

    pub fn get(&self, param: GenomeParam) -> f64 {
        self.genome.get(param)
    }

    /// Look up a parameter by name
    pub fn get_named(&self, name: &str) -> Result<f64> {
        Ok(self.get(name.parse()?))
    }

    /// Add `delta` and clamp into [0, 1]. Returns the new value.
    pub fn update(&mut self, param: GenomeParam, delta: f64) -> f64 {
        let current = self.genome.get(param);
        self.genome.set(param, current + delta);
        self.genome.get(param)
    }

    /// Name-keyed update; unknown names are `InvalidParameter`
    pub fn update_named(&mut self, name: &str, delta: f64) -> Result<f64> {
        let param: GenomeParam = name.parse()?;
        Ok(self.update(param, delta))
    }

    pub fn snapshot(&self) -> Genome {
        self.genome
    }

    pub fn restore(&mut self, genome: Genome) {
        // Re-clamp in case the genome was built outside `Genome::set`
        let mut restored = Genome::default();
        for (param, value) in genome.iter() {
            restored.set(param, value);
        }
        self.genome = restored;
    }

    pub fn genome(&self) -> &Genome {
        &self.genome
    }
}
