use core::ops::ControlFlow;
use gadaneat::{
    constants::{GADANEAT_GRID_HEIGHT, GADANEAT_GRID_WIDTH},
    evolve, random, EvolutionHooks, EvolutionTarget, NeatError, Network, Outcome, Population,
    Scenario,
};
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

const GENERATIONS: usize = 30;
const POPULATION: usize = 100;

/// Player position inside the sensor window
const PLAYER_ROW: usize = 12;
const PLAYER_COL: usize = 13;

/// A flat run to the right, broken by pits that have to be jumped
struct Corridor {
    pits: Vec<bool>,
    max_ticks: usize,
    /// ticks without progress before the run is called off
    patience: usize,
}

impl Corridor {
    fn new(length: usize) -> Self {
        let pits = (0..length).map(|x| x > 20 && x % 17 < 2).collect();
        Self {
            pits,
            max_ticks: 600,
            patience: 30,
        }
    }

    fn pit(&self, x: i64) -> bool {
        usize::try_from(x).is_ok_and(|x| self.pits.get(x).copied().unwrap_or(false))
    }

    /// Ground below the player reads as solid, pits as hazards, everything else as air
    fn sense(&self, x: i64, values: &mut [f64]) {
        values.fill(0.);
        for col in 0..GADANEAT_GRID_WIDTH {
            let world = x + col as i64 - PLAYER_COL as i64;
            let idx = (PLAYER_ROW + 1) * GADANEAT_GRID_WIDTH + col;
            values[idx] = match world {
                w if w < 0 || w >= self.pits.len() as i64 => 0.,
                w if self.pit(w) => -1.,
                _ => 1.,
            };
        }
    }
}

impl Scenario for Corridor {
    fn play(&mut self, network: &mut Network) -> Outcome {
        let mut values = vec![0.; GADANEAT_GRID_WIDTH * GADANEAT_GRID_HEIGHT];
        let (mut x, mut best, mut airborne, mut idle) = (0i64, 0i64, 0usize, 0usize);
        let mut tick = 0;

        while tick < self.max_ticks && idle < self.patience {
            tick += 1;
            self.sense(x, &mut values);
            let actions = network.evaluate(&values);

            if actions.jump && airborne == 0 {
                airborne = 4;
            }
            match (actions.left, actions.right) {
                (true, false) => x = (x - 1).max(0),
                (false, true) => x += 1,
                _ => (),
            }
            airborne = airborne.saturating_sub(1);

            if airborne == 0 && self.pit(x) {
                break;
            }
            if x as usize >= self.pits.len() {
                best = x;
                break;
            }
            if x > best {
                best = x;
                idle = 0;
            } else {
                idle += 1;
            }
        }

        Outcome {
            points: best as f64 * 10.,
            time: tick as f64 / 60.,
        }
    }
}

fn main() -> Result<(), NeatError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let seed = random::seed();
    let mut population = Population::new(seed, POPULATION)?;
    info!(seed, name = population.name(), "population created");

    let mut hooks = EvolutionHooks::default();
    hooks.push(|stats| {
        if let Some(fittest) = stats.fittest() {
            info!(
                generation = stats.generation,
                fitness = fittest.fitness(),
                hidden = fittest.hidden().len(),
                edges = fittest.edges().len(),
                "fittest"
            );
        }
        ControlFlow::Continue(())
    });

    let mut corridor = Corridor::new(300);
    evolve(
        &mut population,
        &mut corridor,
        EvolutionTarget::Generation(GENERATIONS),
        hooks,
    )?;

    let path = env::temp_dir().join(format!("gadaneat-{}.json", population.name()));
    population.save_to_file(&path)?;
    Ok(())
}
