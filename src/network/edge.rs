use super::{Node, NodeKind};
use crate::error::EdgeError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The two weights an edge may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum Weight {
    Negative,
    Positive,
}

impl Weight {
    /// Either weight, with equal chance
    pub fn random(rng: &mut impl Rng) -> Self {
        if rng.random_bool(0.5) {
            Self::Positive
        } else {
            Self::Negative
        }
    }

    #[inline]
    pub fn value(self) -> f64 {
        match self {
            Self::Negative => -1.,
            Self::Positive => 1.,
        }
    }
}

impl From<Weight> for i64 {
    fn from(w: Weight) -> Self {
        match w {
            Weight::Negative => -1,
            Weight::Positive => 1,
        }
    }
}

impl TryFrom<i64> for Weight {
    type Error = EdgeError;

    fn try_from(v: i64) -> Result<Self, Self::Error> {
        match v {
            -1 => Ok(Self::Negative),
            1 => Ok(Self::Positive),
            _ => Err(EdgeError::InvalidWeight(v)),
        }
    }
}

/// A directed, weighted connection between two nodes of the same network, by index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub begin: usize,
    pub end: usize,
    pub weight: Weight,
}

impl Edge {
    pub fn new(begin: usize, end: usize, weight: Weight) -> Self {
        Self { begin, end, weight }
    }

    #[inline]
    pub fn path(&self) -> (usize, usize) {
        (self.begin, self.end)
    }

    /// Whether this edge may exist among `nodes`: both endpoints exist, it doesn't leave an
    /// output or enter an input, and unless it ends at an output it strictly ascends in layer.
    /// Says nothing about duplicates.
    pub fn check(&self, nodes: &[Node]) -> Result<(), EdgeError> {
        let (begin, end) = self.path();
        for index in [begin, end] {
            if index >= nodes.len() {
                return Err(EdgeError::OutOfRange {
                    index,
                    len: nodes.len(),
                });
            }
        }

        let (b, e) = (&nodes[begin], &nodes[end]);
        match (b.kind(), e.kind()) {
            (NodeKind::Output, _) => Err(EdgeError::FromOutput { begin, end }),
            (_, NodeKind::Input) => Err(EdgeError::IntoInput { begin, end }),
            (_, NodeKind::Output) => Ok(()),
            _ if b.layer() < e.layer() => Ok(()),
            _ => Err(EdgeError::NotAscending {
                begin,
                end,
                begin_layer: b.layer(),
                end_layer: e.layer(),
            }),
        }
    }
}
