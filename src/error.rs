//! Errors raised while building, mutating, reproducing and persisting networks.

use crate::grid::Grid;
use thiserror::Error;

/// Reasons an edge may not be placed between two nodes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EdgeError {
    #[error("node {index} is out of range for a network of {len} nodes")]
    OutOfRange { index: usize, len: usize },

    #[error("edge {begin} -> {end} starts at an output node")]
    FromOutput { begin: usize, end: usize },

    #[error("edge {begin} -> {end} ends at an input node")]
    IntoInput { begin: usize, end: usize },

    #[error("edge {begin} -> {end} does not ascend (layer {begin_layer} -> {end_layer})")]
    NotAscending {
        begin: usize,
        end: usize,
        begin_layer: u32,
        end_layer: u32,
    },

    #[error("edge {begin} -> {end} already exists")]
    Duplicate { begin: usize, end: usize },

    #[error("weight {0} is not one of -1, +1")]
    InvalidWeight(i64),
}

/// Expected, recoverable failures of the structural mutation operators
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    #[error("no valid edge found after {attempts} attempts")]
    Exhausted { attempts: usize },

    #[error("network has no edges to split")]
    NoEdges,
}

#[derive(Debug, Error)]
pub enum NeatError {
    #[error(transparent)]
    Edge(#[from] EdgeError),

    #[error(transparent)]
    Mutation(#[from] MutationError),

    #[error("cannot advance a generation of zero networks")]
    EmptyGeneration,

    #[error("network has {found} nodes, but its grid needs at least {expected}")]
    GridMismatch { expected: usize, found: usize },

    #[error("a {width}x{height} grid has more cells than can be addressed")]
    InvalidGrid { width: usize, height: usize },

    #[error("network {index} reads a {found:?}, the population is configured for {expected:?}")]
    ForeignGrid {
        index: usize,
        expected: Grid,
        found: Grid,
    },

    #[error("{kind} node at index {index} breaks the index convention")]
    MisplacedNode { kind: &'static str, index: usize },

    #[error("edge {begin} -> {end} is not registered on its endpoints")]
    Unregistered { begin: usize, end: usize },

    #[error("{edges} edges, but {incoming} incoming and {outgoing} outgoing registrations")]
    AdjacencyMismatch {
        edges: usize,
        incoming: usize,
        outgoing: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
