//! The seam between a population and whatever game its networks play.
//!
//! A [Scenario] plays one network to completion and reports how it did; [evolve] scores every
//! network that way, asks the hooks whether to stop, and advances the population.

use crate::{error::NeatError, Network, Population};
use core::ops::ControlFlow;
use tracing::{debug, info};

/// How a single run went: progress made and time taken
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Outcome {
    pub points: f64,
    pub time: f64,
}

pub trait Scenario {
    /// Drive `network` through one run, calling [Network::evaluate] once per tick
    fn play(&mut self, network: &mut Network) -> Outcome;
}

pub struct Stats<'a> {
    pub generation: usize,
    pub population: &'a Population,
}

impl Stats<'_> {
    pub fn fittest(&self) -> Option<&Network> {
        self.population.fittest()
    }

    pub fn any_fitter_than(&self, target: f64) -> bool {
        self.population
            .networks()
            .iter()
            .any(|network| network.fitness() > target)
    }
}

pub enum EvolutionTarget {
    Fitness(f64),
    Generation(usize),
}

impl EvolutionTarget {
    fn satisfied(&self, population: &Population) -> bool {
        match self {
            Self::Fitness(t) => population.fittest().is_some_and(|n| n.fitness() >= *t),
            Self::Generation(t) => *t <= population.generation_count(),
        }
    }
}

pub type Hook = Box<dyn FnMut(&mut Stats<'_>) -> ControlFlow<()>>;

#[derive(Default)]
pub struct EvolutionHooks {
    hooks: Vec<Hook>,
}

impl EvolutionHooks {
    pub fn new(hooks: Vec<Hook>) -> Self {
        Self { hooks }
    }

    pub fn push(&mut self, hook: impl FnMut(&mut Stats<'_>) -> ControlFlow<()> + 'static) {
        self.hooks.push(Box::new(hook));
    }

    /// Run every hook, even after one breaks
    fn fire(&mut self, mut stats: Stats<'_>) -> ControlFlow<()> {
        let mut flow = ControlFlow::Continue(());
        for hook in self.hooks.iter_mut() {
            if hook(&mut stats).is_break() {
                flow = ControlFlow::Break(());
            }
        }
        flow
    }
}

/// Play and score every network of the current generation
pub fn score(population: &mut Population, scenario: &mut impl Scenario) {
    for network in population.networks_mut() {
        let Outcome { points, time } = scenario.play(network);
        network.update_fitness(points, time);
    }
}

/// Score and advance `population` until `target` is met or a hook breaks. The last
/// generation is left scored but not advanced; returns its generation count.
pub fn evolve(
    population: &mut Population,
    scenario: &mut impl Scenario,
    target: EvolutionTarget,
    mut hooks: EvolutionHooks,
) -> Result<usize, NeatError> {
    loop {
        score(population, scenario);

        let generation = population.generation_count();
        debug!(
            generation,
            best = population.fittest().map(Network::fitness),
            "generation scored"
        );

        let flow = hooks.fire(Stats {
            generation,
            population,
        });
        if flow.is_break() || target.satisfied(population) {
            info!(generation, "evolution stopped");
            break Ok(generation);
        }

        population.create_next_generation()?;
        population.increment_generation();
    }
}
