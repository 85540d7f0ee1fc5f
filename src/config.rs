//! Knobs of a run. Defaults come from [crate::constants]; a [Config] travels inside its
//! [crate::Population] so a reloaded run continues with the settings it started with.

use crate::{
    constants::{
        GADANEAT_EDGE_MUTATION_PASSES, GADANEAT_ELITE_PERCENT, GADANEAT_MUTATION_MAX_ATTEMPTS,
        GADANEAT_NODE_MUTATION_PASSES, GADANEAT_PLATEAU_PERCENT,
    },
    grid::{Grid, InputSampler},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sensor grid every network reads
    pub grid: Grid,
    /// Where edge mutation looks for input cells
    pub sampler: InputSampler,
    /// Percent of a generation carried over unchanged
    pub elite_percent: usize,
    /// Percent of the target size a tie for first must reach to be shuffled
    pub plateau_percent: usize,
    /// Edge-mutated copies made of every elite
    pub edge_passes: usize,
    /// Node-mutated copies made of every elite
    pub node_passes: usize,
    /// Attempt cap for a single edge mutation
    pub max_attempts: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: Grid::default(),
            sampler: InputSampler::default(),
            elite_percent: GADANEAT_ELITE_PERCENT,
            plateau_percent: GADANEAT_PLATEAU_PERCENT,
            edge_passes: GADANEAT_EDGE_MUTATION_PASSES,
            node_passes: GADANEAT_NODE_MUTATION_PASSES,
            max_attempts: GADANEAT_MUTATION_MAX_ATTEMPTS,
        }
    }
}

impl Config {
    /// Offspring per elite, the elite itself included
    pub fn brood(&self) -> usize {
        1 + self.edge_passes + self.node_passes
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Persist;

    #[test]
    fn test_default_keeps_size() {
        let config = Config::default();
        // ten percent elites, each becoming ten networks
        assert_eq!(config.brood() * config.elite_percent, 100);
    }

    #[test]
    fn test_partial_file() {
        let config = Config::from_json(r#"{"edge_passes": 4, "sampler": {"mean_row": 3.0}}"#)
            .unwrap();
        assert_eq!(config.edge_passes, 4);
        assert_eq!(config.sampler.mean_row, 3.);
        assert_eq!(config.sampler.var_row, InputSampler::default().var_row);
        assert_eq!(config.elite_percent, GADANEAT_ELITE_PERCENT);
        assert_eq!(config.grid, Grid::default());
    }
}
