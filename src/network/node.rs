use super::Edge;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// One sensor cell. Only ever has outgoing edges, and its output is assigned, not computed
    Input,
    Hidden,
    /// One action. Only ever has incoming edges
    Output,
}

impl NodeKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Hidden => "hidden",
            Self::Output => "output",
        }
    }
}

/// sign(x), with sign(0) = 0
#[inline]
pub fn sign(x: f64) -> f64 {
    if x > 0. {
        1.
    } else if x < 0. {
        -1.
    } else {
        0.
    }
}

/// A vertex of a [super::Network]. Edges touching it are registered here as well as on the
/// network, incoming edges by their source and outgoing ones by their target.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    kind: NodeKind,
    layer: u32,
    out: f64,
    incoming: Vec<Edge>,
    outgoing: Vec<Edge>,
}

impl Node {
    pub fn new(kind: NodeKind, layer: u32) -> Self {
        Self {
            kind,
            layer,
            out: 0.,
            incoming: Vec::new(),
            outgoing: Vec::new(),
        }
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    #[inline]
    pub fn layer(&self) -> u32 {
        self.layer
    }

    #[inline]
    pub(crate) fn set_layer(&mut self, layer: u32) {
        self.layer = layer;
    }

    #[inline]
    pub fn out(&self) -> f64 {
        self.out
    }

    #[inline]
    pub(crate) fn set_out(&mut self, out: f64) {
        self.out = out;
    }

    #[inline]
    pub fn incoming(&self) -> &[Edge] {
        &self.incoming
    }

    #[inline]
    pub fn outgoing(&self) -> &[Edge] {
        &self.outgoing
    }

    pub(crate) fn register_incoming(&mut self, edge: Edge) {
        assert!(self.kind != NodeKind::Input, "input nodes take no edges");
        self.incoming.push(edge);
    }

    pub(crate) fn register_outgoing(&mut self, edge: Edge) {
        assert!(self.kind != NodeKind::Output, "output nodes give no edges");
        self.outgoing.push(edge);
    }

    pub(crate) fn unregister_incoming(&mut self, begin: usize) {
        self.incoming.retain(|e| e.begin != begin);
    }

    pub(crate) fn unregister_outgoing(&mut self, end: usize) {
        self.outgoing.retain(|e| e.end != end);
    }

    /// Weighted sum of the outputs feeding this node
    pub fn potential(&self, nodes: &[Node]) -> f64 {
        self.incoming
            .iter()
            .map(|e| e.weight.value() * nodes[e.begin].out)
            .sum()
    }

    /// Take on the sign of some potential
    pub(crate) fn fire(&mut self, potential: f64) {
        debug_assert!(self.kind != NodeKind::Input, "input nodes are assigned, not fired");
        self.out = sign(potential);
    }
}
