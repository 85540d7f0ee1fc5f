//! The two structural mutations: growing a new edge, and splitting an edge around a new node.

use super::{Network, NodeKind, Weight};
use crate::{
    constants::GADANEAT_MUTATION_MAX_ATTEMPTS, error::MutationError, grid::InputSampler,
};
use rand::Rng;
use tracing::{debug, trace, warn};

impl Network {
    /// Add one new edge, sourcing input cells around the player's usual position.
    pub fn edge_mutation(&mut self, rng: &mut impl Rng) -> Result<&mut Self, MutationError> {
        self.edge_mutation_with(&InputSampler::default(), GADANEAT_MUTATION_MAX_ATTEMPTS, rng)
    }

    /// Add one new edge. Candidates are drawn until one is valid and not already present,
    /// at most `max_attempts` times.
    ///
    /// A candidate whose end sits below its begin is turned around rather than thrown away, so
    /// the edge always runs from the lower to the higher layer.
    pub fn edge_mutation_with(
        &mut self,
        sampler: &InputSampler,
        max_attempts: usize,
        rng: &mut impl Rng,
    ) -> Result<&mut Self, MutationError> {
        for attempt in 0..max_attempts {
            let Some((begin, end)) = self.candidate_path(sampler, rng) else {
                trace!(attempt, "no input cell sampled");
                continue;
            };
            let weight = Weight::random(rng);

            let Some((begin, end)) = self.orient(begin, end) else {
                trace!(attempt, begin, end, "same layer");
                continue;
            };

            if self.has_edge(begin, end) {
                trace!(attempt, begin, end, "already connected");
                continue;
            }

            self.connect(begin, end, weight);
            debug!(
                begin,
                end,
                weight = i64::from(weight),
                edges = self.edges().len(),
                "edge mutation"
            );
            return Ok(self);
        }

        warn!(max_attempts, nodes = self.nodes().len(), "edge mutation exhausted");
        Err(MutationError::Exhausted {
            attempts: max_attempts,
        })
    }

    /// Draw an unoriented (begin, end) pair. Begin is picked over inputs and hidden nodes in
    /// proportion to their counts, where an input is then chosen by `sampler` and a hidden node
    /// uniformly. End is uniform over hidden and output nodes.
    fn candidate_path(&self, sampler: &InputSampler, rng: &mut impl Rng) -> Option<(usize, usize)> {
        let inputs = self.inputs();
        let hidden = self.hidden();

        let pool = inputs.len() + hidden.len();
        if pool == 0 {
            return None;
        }

        let begin = if rng.random_range(0..pool) < inputs.len() {
            sampler.sample(self.grid(), rng)?
        } else {
            rng.random_range(hidden)
        };

        // outputs and hidden nodes are contiguous
        let end = rng.random_range(self.outputs().start..self.nodes().len());
        Some((begin, end))
    }

    /// Keep an edge into an output or up the layers as is, flip one pointing down the layers,
    /// and refuse one within a layer
    fn orient(&self, begin: usize, end: usize) -> Option<(usize, usize)> {
        let (b, e) = (&self.nodes()[begin], &self.nodes()[end]);
        if e.kind() == NodeKind::Output || b.layer() < e.layer() {
            Some((begin, end))
        } else if e.layer() < b.layer() {
            Some((end, begin))
        } else {
            None
        }
    }

    /// Replace a random edge begin -> end with begin -> new -> end. The first half weighs +1,
    /// the second keeps the old weight. If the new node leaves no room below a hidden `end`,
    /// `end` and everything it feeds is pushed up the layers.
    pub fn node_mutation(&mut self, rng: &mut impl Rng) -> Result<&mut Self, MutationError> {
        if self.edges().is_empty() {
            return Err(MutationError::NoEdges);
        }

        let edge = self.disconnect(rng.random_range(0..self.edges().len()));
        let layer = self.nodes()[edge.begin].layer() + 1;
        self.lift(edge.end, layer + 1);

        let center = self.push_hidden(layer);
        self.connect(edge.begin, center, Weight::Positive);
        self.connect(center, edge.end, edge.weight);

        debug!(
            begin = edge.begin,
            end = edge.end,
            center,
            layer,
            nodes = self.nodes().len(),
            "node mutation"
        );
        Ok(self)
    }

    /// Raise hidden node `idx` to at least `layer`, then raise whatever it feeds to stay above
    /// it, transitively. Outputs keep their layer as they always fire last.
    fn lift(&mut self, idx: usize, layer: u32) {
        let mut pending = vec![(idx, layer)];
        while let Some((idx, layer)) = pending.pop() {
            let node = &mut self.nodes[idx];
            if node.kind() != NodeKind::Hidden || node.layer() >= layer {
                continue;
            }

            node.set_layer(layer);
            pending.extend(node.outgoing().iter().map(|e| (e.end, layer + 1)));
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        error::MutationError,
        grid::Grid,
        network::{Edge, Network},
        random::WyRng,
        test_t,
    };
    use rand::{
        rngs::{SmallRng, StdRng},
        SeedableRng,
    };

    fn assert_layered(network: &Network) {
        network.validate().unwrap();
        for e in network.edges() {
            let (b, n) = (&network.nodes()[e.begin], &network.nodes()[e.end]);
            assert!(
                n.kind() == NodeKind::Output || b.layer() < n.layer(),
                "{e:?} breaks layering: {} -> {}",
                b.layer(),
                n.layer()
            );
        }
    }

    // a sampler that always lands on the 2x1 grid
    fn centered() -> InputSampler {
        InputSampler {
            mean_row: 0.5,
            var_row: 0.01,
            mean_col: 1.,
            var_col: 0.25,
            ..Default::default()
        }
    }

    test_t!(edge_mutation_adds_one[T: WyRng | StdRng | SmallRng]() {
        let mut rng = T::seed_from_u64(17);
        let mut network = Network::default();
        for count in 1..=200 {
            network.edge_mutation(&mut rng).unwrap();
            assert_eq!(network.edges().len(), count);
            assert_layered(&network);
        }
    });

    test_t!(edge_mutation_with_hidden[T: WyRng | StdRng | SmallRng]() {
        let mut rng = T::seed_from_u64(5);
        let mut network = Network::default();
        network.edge_mutation(&mut rng).unwrap();
        for _ in 0..30 {
            network.node_mutation(&mut rng).unwrap();
            let before = network.edges().len();
            network.edge_mutation(&mut rng).unwrap();
            assert_eq!(network.edges().len(), before + 1);
            assert_layered(&network);
        }
    });

    test_t!(node_mutation_splits[T: WyRng | StdRng | SmallRng]() {
        let mut rng = T::seed_from_u64(23);
        let mut network = Network::default();
        for _ in 0..10 {
            network.edge_mutation(&mut rng).unwrap();
        }

        for _ in 0..100 {
            let before = network.clone();
            network.node_mutation(&mut rng).unwrap();

            assert_eq!(network.nodes().len(), before.nodes().len() + 1);
            assert_eq!(network.edges().len(), before.edges().len() + 1);
            assert_layered(&network);

            let center = network.nodes().len() - 1;
            let removed = before
                .edges()
                .iter()
                .filter(|e| !network.edges().contains(e))
                .collect::<Vec<_>>();
            assert_eq!(removed.len(), 1);
            let removed = removed[0];
            assert!(!network.has_edge(removed.begin, removed.end));
            assert!(network
                .edges()
                .contains(&Edge::new(removed.begin, center, Weight::Positive)));
            assert!(network
                .edges()
                .contains(&Edge::new(center, removed.end, removed.weight)));
            assert_eq!(
                network.nodes()[center].layer(),
                network.nodes()[removed.begin].layer() + 1
            );
        }
    });

    #[test]
    fn test_node_mutation_single_edge() {
        let mut network = Network::new(Grid::new(2, 1));
        network.connect(1, 3, Weight::Negative);
        network.node_mutation(&mut WyRng::seeded(0)).unwrap();

        assert_eq!(
            network.edges(),
            &[
                Edge::new(1, 5, Weight::Positive),
                Edge::new(5, 3, Weight::Negative)
            ]
        );
        assert_eq!(network.nodes()[5].kind(), NodeKind::Hidden);
        assert_eq!(network.nodes()[5].layer(), 1);
        // output layers are never pushed
        assert_eq!(network.nodes()[3].layer(), 1);
        assert_layered(&network);
    }

    #[test]
    fn test_lift_transitive() {
        // 0 -> a(1) -> b(2) -> c(3) -> left
        let mut network = Network::new(Grid::new(2, 1));
        let a = network.push_hidden(1);
        let b = network.push_hidden(2);
        let c = network.push_hidden(3);
        network.connect(0, a, Weight::Positive);
        network.connect(a, b, Weight::Negative);
        network.connect(b, c, Weight::Positive);
        network.connect(c, 2, Weight::Positive);

        network.lift(a, 2);
        assert_eq!(network.nodes()[a].layer(), 2);
        assert_eq!(network.nodes()[b].layer(), 3);
        assert_eq!(network.nodes()[c].layer(), 4);
        assert_eq!(network.nodes()[2].layer(), 1);
        assert_layered(&network);
    }

    #[test]
    fn test_node_mutation_lifts_descendants() {
        // splitting 0 -> a puts the new node on layer 1, so a, b and c must all move up one,
        // not only a
        let mut network = Network::new(Grid::new(2, 1));
        let a = network.push_hidden(1);
        let b = network.push_hidden(2);
        let c = network.push_hidden(3);
        network.connect(0, a, Weight::Positive);
        network.connect(a, b, Weight::Negative);
        network.connect(b, c, Weight::Positive);
        network.connect(c, 2, Weight::Positive);
        network.connect(1, c, Weight::Negative);

        let mut hits = 0;
        for seed in 0..64 {
            let mut split = network.clone();
            split.node_mutation(&mut WyRng::seeded(seed)).unwrap();
            assert_layered(&split);
            if split.has_edge(0, a) {
                continue;
            }

            hits += 1;
            let center = split.nodes().len() - 1;
            assert_eq!(split.nodes()[center].layer(), 1);
            assert_eq!(split.nodes()[a].layer(), 2);
            assert_eq!(split.nodes()[b].layer(), 3);
            assert_eq!(split.nodes()[c].layer(), 4);
        }
        assert!(hits > 0, "0 -> a never split");
    }

    #[test]
    fn test_node_mutation_lift_regression() {
        // a chain where pushing only the immediate successor leaves b level with a
        let mut network = Network::new(Grid::new(2, 1));
        let a = network.push_hidden(1);
        let b = network.push_hidden(2);
        network.connect(0, a, Weight::Positive);
        network.connect(a, b, Weight::Positive);
        network.connect(b, 4, Weight::Negative);

        // split every edge many times over, from many seeds
        for seed in 0..50 {
            let mut network = network.clone();
            let mut rng = WyRng::seeded(seed);
            for _ in 0..20 {
                network.node_mutation(&mut rng).unwrap();
                assert_layered(&network);
            }
        }
    }

    #[test]
    fn test_lift_skips_higher() {
        let mut network = Network::new(Grid::new(2, 1));
        let a = network.push_hidden(1);
        let b = network.push_hidden(5);
        network.connect(a, b, Weight::Positive);
        network.lift(a, 2);
        assert_eq!(network.nodes()[a].layer(), 2);
        assert_eq!(network.nodes()[b].layer(), 5);
    }

    #[test]
    fn test_node_mutation_no_edges() {
        let mut network = Network::default();
        assert_eq!(
            network.node_mutation(&mut WyRng::seeded(0)).unwrap_err(),
            MutationError::NoEdges
        );
        assert_eq!(network.nodes().len(), 489);
    }

    #[test]
    fn test_edge_mutation_saturated() {
        let mut network = Network::new(Grid::new(1, 1));
        let mut rng = WyRng::seeded(2);
        let sampler = InputSampler {
            mean_row: 0.5,
            var_row: 0.01,
            mean_col: 0.5,
            var_col: 0.01,
            ..Default::default()
        };

        // one input, three outputs, so exactly three edges fit
        for _ in 0..3 {
            network.edge_mutation_with(&sampler, 10_000, &mut rng).unwrap();
        }
        assert_eq!(
            network
                .edge_mutation_with(&sampler, 500, &mut rng)
                .unwrap_err(),
            MutationError::Exhausted { attempts: 500 }
        );
        assert_eq!(network.edges().len(), 3);
    }

    #[test]
    fn test_edge_mutation_zero_attempts() {
        let mut network = Network::default();
        assert_eq!(
            network
                .edge_mutation_with(&InputSampler::default(), 0, &mut WyRng::seeded(0))
                .unwrap_err(),
            MutationError::Exhausted { attempts: 0 }
        );
    }

    #[test]
    fn test_orient() {
        let mut network = Network::new(Grid::new(2, 1));
        let low = network.push_hidden(1);
        let high = network.push_hidden(2);
        let level = network.push_hidden(2);

        assert_eq!(network.orient(0, low), Some((0, low)));
        assert_eq!(network.orient(high, 2), Some((high, 2)));
        assert_eq!(network.orient(high, low), Some((low, high)));
        assert_eq!(network.orient(high, level), None);
        assert_eq!(network.orient(high, high), None);
    }

    #[test]
    fn test_candidate_path_ranges() {
        let mut network = Network::new(Grid::new(2, 1));
        network.push_hidden(1);
        network.push_hidden(2);
        let mut rng = WyRng::seeded(8);
        for _ in 0..1_000 {
            let (begin, end) = network.candidate_path(&centered(), &mut rng).unwrap();
            assert!(!network.outputs().contains(&begin));
            assert!(!network.inputs().contains(&end));
        }
    }

    #[test]
    fn test_mutations_chain() {
        let mut rng = WyRng::seeded(99);
        let mut network = Network::default();
        network
            .edge_mutation(&mut rng)
            .unwrap()
            .node_mutation(&mut rng)
            .unwrap()
            .edge_mutation(&mut rng)
            .unwrap();
        assert_eq!(network.edges().len(), 3);
        assert_eq!(network.hidden().len(), 1);
    }

    #[test]
    fn test_all_zero_after_growth() {
        let mut rng = WyRng::seeded(31);
        let mut network = Network::default();
        network.edge_mutation(&mut rng).unwrap();
        for _ in 0..50 {
            network.edge_mutation(&mut rng).unwrap();
            network.node_mutation(&mut rng).unwrap();
            let a = network.evaluate(&[0.; 486]);
            assert_eq!(<[bool; 3]>::from(a), [false; 3]);
        }
    }
}
