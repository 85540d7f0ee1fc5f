//! Centralized constants for gadaneat evolution parameters.
//!
//! All configurable defaults are defined here with the `GADANEAT_` prefix.
//! [crate::Config] and [crate::grid::InputSampler] take their defaults from these.

// ============================================================================
// Sensor Grid
// ============================================================================

/// Number of grid columns seen by a network
pub const GADANEAT_GRID_WIDTH: usize = 27;

/// Number of grid rows seen by a network
pub const GADANEAT_GRID_HEIGHT: usize = 18;

/// Number of action nodes: left, right, jump
pub const GADANEAT_OUTPUT_COUNT: usize = 3;

// ============================================================================
// Layers
// ============================================================================

/// Layer of every input node
pub const GADANEAT_INPUT_LAYER: u32 = 0;

/// Layer of every output node, one above anything that may feed them at creation time
pub const GADANEAT_OUTPUT_LAYER: u32 = 1;

// ============================================================================
// Input Sampling
// ============================================================================

/// Row around which new input connections cluster (the player's usual position)
pub const GADANEAT_SAMPLER_MEAN_ROW: f64 = 12.0;

/// Variance of the sampled row
pub const GADANEAT_SAMPLER_VAR_ROW: f64 = 4.0;

/// Column around which new input connections cluster
pub const GADANEAT_SAMPLER_MEAN_COL: f64 = 13.0;

/// Variance of the sampled column
pub const GADANEAT_SAMPLER_VAR_COL: f64 = 15.0;

/// Gaussian draws rejected for landing off-grid before an attempt is given up
pub const GADANEAT_SAMPLER_MAX_DRAWS: usize = 1_000;

// ============================================================================
// Mutation
// ============================================================================

/// Candidate edges tried by a single edge mutation before reporting exhaustion
pub const GADANEAT_MUTATION_MAX_ATTEMPTS: usize = 10_000;

// ============================================================================
// Fitness
// ============================================================================

/// Fitness lost per unit of time spent in an episode
pub const GADANEAT_TIME_PENALTY: f64 = 50.0;

// ============================================================================
// Reproduction Parameters
// ============================================================================

/// Percent of a generation kept unchanged as elites
pub const GADANEAT_ELITE_PERCENT: usize = 10;

/// Percent of the target size a top-fitness tie must reach before it is shuffled
pub const GADANEAT_PLATEAU_PERCENT: usize = 10;

/// Passes over the elites producing edge-mutated offspring
pub const GADANEAT_EDGE_MUTATION_PASSES: usize = 8;

/// Passes over the elites producing node-mutated offspring
pub const GADANEAT_NODE_MUTATION_PASSES: usize = 1;
