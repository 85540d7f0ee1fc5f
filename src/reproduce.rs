//! Functions related to advancing a whole generation: ranking, elitism and reproduction by
//! mutation.

use crate::{config::Config, error::NeatError, Network};
use core::cmp::Ordering;
use rand::{seq::SliceRandom, Rng};
use tracing::{debug, info, warn};

/// Order two networks by fitness, with NaN below every score
pub fn by_fitness(l: &Network, r: &Network) -> Ordering {
    match (l.fitness().is_nan(), r.fitness().is_nan()) {
        (false, false) => l.fitness().total_cmp(&r.fitness()),
        (l_nan, r_nan) => r_nan.cmp(&l_nan),
    }
}

/// Sort networks by descending fitness, NaN last
pub fn rank(networks: &mut [Network]) {
    networks.sort_by(|l, r| by_fitness(r, l));
}

/// How many networks of a ranked slice share the top fitness
pub fn plateau(ranked: &[Network]) -> usize {
    ranked.first().map_or(0, |top| {
        ranked
            .iter()
            .take_while(|n| n.fitness() == top.fitness())
            .count()
    })
}

/// Elites to keep out of `current` networks, aiming for `size`. Rounds down when the
/// generation is at or above its target size and up when below, so the size drifts back.
pub fn elite_count(current: usize, size: usize, percent: usize) -> usize {
    let share = current * percent;
    if current >= size {
        share / 100
    } else {
        share.div_ceil(100)
    }
}

/// Produce the generation after `current`. The elites come through unchanged, then every
/// elite gets `edge_passes` edge-mutated copies and `node_passes` node-mutated copies.
///
/// A copy whose mutation fails is dropped, so the next generation may come out a little
/// short. Only when every mutation fails is the last failure returned.
///
/// `current` is left ranked, with a large enough tie for first shuffled.
pub fn next_generation(
    current: &mut [Network],
    size: usize,
    config: &Config,
    rng: &mut impl Rng,
) -> Result<Vec<Network>, NeatError> {
    if current.is_empty() {
        return Err(NeatError::EmptyGeneration);
    }

    rank(current);
    let tied = plateau(current);
    if tied * 100 >= size * config.plateau_percent {
        current[..tied].shuffle(rng);
        debug!(tied, fitness = current[0].fitness(), "shuffled plateau");
    }

    let count = match elite_count(current.len(), size, config.elite_percent) {
        0 => {
            warn!(current = current.len(), size, "too few networks for an elite, keeping one");
            1
        }
        n => n.min(current.len()),
    };
    let elites = &current[..count];

    let mut next = Vec::with_capacity(count * config.brood());
    next.extend_from_slice(elites);
    let mut dropped = 0;
    let mut last_failure = None;

    for _ in 0..config.edge_passes {
        for (place, elite) in elites.iter().enumerate() {
            let mut child = elite.clone();
            match child
                .edge_mutation_with(&config.sampler, config.max_attempts, rng)
                .map(|_| ())
            {
                Ok(()) => next.push(child),
                Err(e) => {
                    warn!(place, error = %e, "edge mutation failed, dropping child");
                    dropped += 1;
                    last_failure = Some(e);
                }
            }
        }
    }

    for _ in 0..config.node_passes {
        for (place, elite) in elites.iter().enumerate() {
            let mut child = elite.clone();
            match child.node_mutation(rng).map(|_| ()) {
                Ok(()) => next.push(child),
                Err(e) => {
                    warn!(place, error = %e, "node mutation failed, dropping child");
                    dropped += 1;
                    last_failure = Some(e);
                }
            }
        }
    }

    if next.len() == count {
        if let Some(e) = last_failure {
            return Err(e.into());
        }
    }

    info!(
        best = elites[0].fitness(),
        elites = count,
        dropped,
        size = next.len(),
        "generation reproduced"
    );
    Ok(next)
}
