//! Controllers whose topology grows by mutation. A [Network] is both the evolved genome and the
//! thing that gets evaluated: nodes live in an append-only arena and edges refer to them by
//! index, so copying a network is a plain deep clone.

pub mod edge;
pub mod mutate;
pub mod node;

pub use edge::{Edge, Weight};
pub use node::{sign, Node, NodeKind};

use crate::{
    constants::{
        GADANEAT_INPUT_LAYER, GADANEAT_OUTPUT_COUNT, GADANEAT_OUTPUT_LAYER, GADANEAT_TIME_PENALTY,
    },
    error::{EdgeError, NeatError},
    grid::Grid,
};
use core::ops::Range;
use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Which buttons a network presses for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Actions {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl From<Actions> for [bool; 3] {
    fn from(a: Actions) -> Self {
        [a.left, a.right, a.jump]
    }
}

/// Nodes are indexed `[inputs | left, right, jump | hidden...]`, with inputs in row-major grid
/// order and hidden nodes in creation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "Blueprint", try_from = "Blueprint")]
pub struct Network {
    grid: Grid,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    fitness: f64,
}

impl Default for Network {
    fn default() -> Self {
        Self::new(Grid::default())
    }
}

impl Network {
    /// A network without hidden nodes or edges, reading `grid`
    pub fn new(grid: Grid) -> Self {
        let mut nodes = Vec::with_capacity(grid.cells() + GADANEAT_OUTPUT_COUNT);
        for _ in 0..grid.cells() {
            nodes.push(Node::new(NodeKind::Input, GADANEAT_INPUT_LAYER));
        }
        for _ in 0..GADANEAT_OUTPUT_COUNT {
            nodes.push(Node::new(NodeKind::Output, GADANEAT_OUTPUT_LAYER));
        }

        Self {
            grid,
            nodes,
            edges: Vec::new(),
            fitness: 0.,
        }
    }

    #[inline]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    #[inline]
    pub fn inputs(&self) -> Range<usize> {
        0..self.grid.cells()
    }

    #[inline]
    pub fn outputs(&self) -> Range<usize> {
        let start = self.grid.cells();
        start..start + GADANEAT_OUTPUT_COUNT
    }

    #[inline]
    pub fn hidden(&self) -> Range<usize> {
        self.outputs().end..self.nodes.len()
    }

    /// Score an episode: points earned, less a penalty for the time it took. A NaN score
    /// ranks below every other.
    pub fn update_fitness(&mut self, points: f64, time: f64) {
        self.fitness = points - GADANEAT_TIME_PENALTY * time;
    }

    /// Feed one sensor snapshot through the network. Inputs take `values` as-is, hidden nodes
    /// fire in ascending layer order, outputs fire last. A network with negative fitness never
    /// presses anything.
    ///
    /// # Panics
    /// If `values` doesn't hold exactly one value per grid cell.
    pub fn evaluate(&mut self, values: &[f64]) -> Actions {
        assert_eq!(
            values.len(),
            self.grid.cells(),
            "expected one value per grid cell"
        );

        for (node, v) in self.nodes.iter_mut().zip(values) {
            node.set_out(*v);
        }

        // same-layer hidden nodes never share an edge, so ties may fire in any order
        let mut order = self.hidden().collect::<Vec<_>>();
        order.sort_by_key(|&idx| self.nodes[idx].layer());
        for idx in order.into_iter().chain(self.outputs()) {
            let potential = self.nodes[idx].potential(&self.nodes);
            self.nodes[idx].fire(potential);
        }

        if self.fitness < 0. {
            return Actions::default();
        }

        let o = self.outputs().start;
        Actions {
            left: self.nodes[o].out() > 0.,
            right: self.nodes[o + 1].out() > 0.,
            jump: self.nodes[o + 2].out() > 0.,
        }
    }

    /// Whether an edge begin -> end exists, whatever its weight
    pub fn has_edge(&self, begin: usize, end: usize) -> bool {
        self.nodes
            .get(begin)
            .is_some_and(|n| n.outgoing().iter().any(|e| e.end == end))
    }

    /// Add an edge, registering it on both of its endpoints.
    pub fn try_connect(&mut self, begin: usize, end: usize, weight: Weight) -> Result<(), EdgeError> {
        let edge = Edge::new(begin, end, weight);
        edge.check(&self.nodes)?;
        if self.has_edge(begin, end) {
            return Err(EdgeError::Duplicate { begin, end });
        }

        self.nodes[begin].register_outgoing(edge);
        self.nodes[end].register_incoming(edge);
        self.edges.push(edge);
        Ok(())
    }

    /// Add an edge the caller knows to be valid.
    ///
    /// # Panics
    /// If the edge would break the network's structure, see [Network::try_connect].
    pub fn connect(&mut self, begin: usize, end: usize, weight: Weight) {
        if let Err(e) = self.try_connect(begin, end, weight) {
            panic!("invalid edge: {e}");
        }
    }

    /// Remove the edge at `idx` of [Network::edges] from the network and its endpoints
    pub(crate) fn disconnect(&mut self, idx: usize) -> Edge {
        let edge = self.edges.swap_remove(idx);
        self.nodes[edge.begin].unregister_outgoing(edge.end);
        self.nodes[edge.end].unregister_incoming(edge.begin);
        edge
    }

    pub(crate) fn push_hidden(&mut self, layer: u32) -> usize {
        self.nodes.push(Node::new(NodeKind::Hidden, layer));
        self.nodes.len() - 1
    }

    /// Check every structural invariant: node kinds sit where the index convention puts them,
    /// inputs and outputs keep their layers, every edge is valid and unique, and the adjacency
    /// registered on nodes agrees with the edge list.
    pub fn validate(&self) -> Result<(), NeatError> {
        let fixed = self
            .grid
            .checked_cells()
            .and_then(|cells| cells.checked_add(GADANEAT_OUTPUT_COUNT))
            .ok_or(NeatError::InvalidGrid {
                width: self.grid.width,
                height: self.grid.height,
            })?;
        if self.nodes.len() < fixed {
            return Err(NeatError::GridMismatch {
                expected: fixed,
                found: self.nodes.len(),
            });
        }

        for (index, node) in self.nodes.iter().enumerate() {
            let (kind, layer) = if self.inputs().contains(&index) {
                (NodeKind::Input, Some(GADANEAT_INPUT_LAYER))
            } else if self.outputs().contains(&index) {
                (NodeKind::Output, Some(GADANEAT_OUTPUT_LAYER))
            } else {
                (NodeKind::Hidden, None)
            };

            if node.kind() != kind || layer.is_some_and(|l| l != node.layer()) {
                return Err(NeatError::MisplacedNode {
                    kind: node.kind().name(),
                    index,
                });
            }
        }

        let mut seen = FxHashSet::default();
        for edge in self.edges.iter() {
            edge.check(&self.nodes)?;
            if !seen.insert(edge.path()) {
                return Err(EdgeError::Duplicate {
                    begin: edge.begin,
                    end: edge.end,
                }
                .into());
            }
            if !self.nodes[edge.begin].outgoing().contains(edge)
                || !self.nodes[edge.end].incoming().contains(edge)
            {
                return Err(NeatError::Unregistered {
                    begin: edge.begin,
                    end: edge.end,
                });
            }
        }

        let registered = self
            .nodes
            .iter()
            .map(|n| (n.incoming().len(), n.outgoing().len()))
            .fold((0, 0), |(i, o), (ni, no)| (i + ni, o + no));
        if registered != (self.edges.len(), self.edges.len()) {
            return Err(NeatError::AdjacencyMismatch {
                edges: self.edges.len(),
                incoming: registered.0,
                outgoing: registered.1,
            });
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct NodeRecord {
    kind: NodeKind,
    layer: u32,
}

/// What gets written for a [Network]. Node outputs are transient and adjacency is rebuilt
/// from the edge list on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Blueprint {
    grid: Grid,
    nodes: Vec<NodeRecord>,
    edges: Vec<Edge>,
    fitness: f64,
}

impl From<Network> for Blueprint {
    fn from(network: Network) -> Self {
        Self {
            grid: network.grid,
            nodes: network
                .nodes
                .iter()
                .map(|n| NodeRecord {
                    kind: n.kind(),
                    layer: n.layer(),
                })
                .collect(),
            edges: network.edges,
            fitness: network.fitness,
        }
    }
}

impl TryFrom<Blueprint> for Network {
    type Error = NeatError;

    fn try_from(blueprint: Blueprint) -> Result<Self, Self::Error> {
        let mut network = Network {
            grid: blueprint.grid,
            nodes: blueprint
                .nodes
                .into_iter()
                .map(|r| Node::new(r.kind, r.layer))
                .collect(),
            edges: Vec::with_capacity(blueprint.edges.len()),
            fitness: blueprint.fitness,
        };

        for edge in blueprint.edges {
            network.try_connect(edge.begin, edge.end, edge.weight)?;
        }
        network.validate()?;
        Ok(network)
    }
}
