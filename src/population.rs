//! A generation of networks, and the bookkeeping needed to evolve, save and resume it.

use crate::{
    config::Config,
    error::NeatError,
    random::WyRng,
    reproduce::{by_fitness, next_generation},
    Network, Persist,
};
use serde::{Deserialize, Serialize};
use std::{
    path::Path,
    time::{SystemTime, UNIX_EPOCH},
};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Population {
    seed: u64,
    size: usize,
    /// creation time, in seconds since the epoch
    name: String,
    generation_count: usize,
    config: Config,
    rng: WyRng,
    current_generation: Vec<Network>,
}

impl Population {
    /// `size` fresh networks seeded with `seed`, each given one edge so that it can act
    pub fn new(seed: u64, size: usize) -> Result<Self, NeatError> {
        Self::with_config(seed, size, Config::default())
    }

    pub fn with_config(seed: u64, size: usize, config: Config) -> Result<Self, NeatError> {
        let mut rng = WyRng::seeded(seed);
        let mut current_generation = Vec::with_capacity(size);
        for _ in 0..size {
            let mut network = Network::new(config.grid);
            network.edge_mutation_with(&config.sampler, config.max_attempts, &mut rng)?;
            current_generation.push(network);
        }

        let name = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or_default();

        Ok(Self {
            seed,
            size,
            name: format!("{name}"),
            generation_count: 1,
            config,
            rng,
            current_generation,
        })
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Target number of networks per generation
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn generation_count(&self) -> usize {
        self.generation_count
    }

    /// Called by whoever drives the run, once a generation has been advanced
    pub fn increment_generation(&mut self) {
        self.generation_count += 1;
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn networks(&self) -> &[Network] {
        &self.current_generation
    }

    /// The current generation, to be played and scored
    #[inline]
    pub fn networks_mut(&mut self) -> &mut [Network] {
        &mut self.current_generation
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.current_generation.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.current_generation.is_empty()
    }

    /// Best scored network, NaN fitness counting as the worst
    pub fn fittest(&self) -> Option<&Network> {
        self.current_generation.iter().max_by(|l, r| by_fitness(l, r))
    }

    /// Replace the current, scored generation with its offspring. On error the current
    /// generation is kept, though it may have been reordered.
    pub fn create_next_generation(&mut self) -> Result<&mut Self, NeatError> {
        self.current_generation = next_generation(
            &mut self.current_generation,
            self.size,
            &self.config,
            &mut self.rng,
        )?;
        Ok(self)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), NeatError> {
        self.to_file(&path)?;
        info!(
            path = %path.as_ref().display(),
            generation = self.generation_count,
            networks = self.len(),
            "saved population"
        );
        Ok(())
    }

    /// Load a saved population. Every network must read the configured grid.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, NeatError> {
        let population = Self::from_file(&path)?;
        let expected = population.config.grid;
        if expected.checked_cells().is_none() {
            return Err(NeatError::InvalidGrid {
                width: expected.width,
                height: expected.height,
            });
        }
        if let Some((index, network)) = population
            .current_generation
            .iter()
            .enumerate()
            .find(|(_, n)| n.grid() != expected)
        {
            return Err(NeatError::ForeignGrid {
                index,
                expected,
                found: network.grid(),
            });
        }

        info!(
            path = %path.as_ref().display(),
            generation = population.generation_count,
            networks = population.len(),
            "loaded population"
        );
        Ok(population)
    }
}
