//! Capacitated Bipartite Matching via Minimum-Cost Maximum Flow
//!
//! A matching problem pairs items of a left set with items of a right set.
//! Every left item is matched at most once, every right item at most
//! `capacity(right)` times, and the total weight of the chosen pairs is
//! minimized among all matchings of maximum size.
//!
//! The problem is reduced to a flow network
//!
//! ```text
//! S --(1, 1)--> left --(w(l, r), 1)--> right --(1, capacity(r))--> T
//! ```
//!
//! and solved with [`MinCostFlowSolver`]. Pairs are read back from the
//! left-to-right edges that carry flow.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashSet;
use std::fmt;

use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::algorithm::graph::min_cost_flow::{FlowError, MinCostFlowSolver};
use crate::algorithm::traits::{AlgorithmError, VertexId};
use crate::data_structures::flow::FlowAssignment;
use crate::data_structures::graph::{Capacity, Graph, Weight};
use crate::data_structures::network::Network;

/// Matching errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MatchingError {
    #[error("Flow computation failed: {0}")]
    Flow(#[from] FlowError),

    #[error("Invalid matching network: {0}")]
    Network(#[from] AlgorithmError),
}

/// Vertex payload of a matching network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MatchNode<L, R> {
    Source,
    Sink,
    Left(L),
    Right(R),
}

impl<L: fmt::Display, R: fmt::Display> fmt::Display for MatchNode<L, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchNode::Source => write!(f, "S"),
            MatchNode::Sink => write!(f, "T"),
            MatchNode::Left(left) => write!(f, "{}", left),
            MatchNode::Right(right) => write!(f, "{}", right),
        }
    }
}

/// One matched pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingPair<L, R> {
    pub left: L,
    pub right: R,
}

/// Matching read back from a flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matching<L, R> {
    /// Matched pairs in edge-list order of the solved network
    pub pairs: Vec<MatchingPair<L, R>>,
    /// Left items without a partner
    pub unmatched_lefts: usize,
    /// Right items that received no left item at all
    pub unmatched_rights: usize,
    /// Cost of the underlying flow
    pub cost: f64,
}

impl<L, R> Matching<L, R> {
    /// Every left item has a partner
    pub fn is_perfect(&self) -> bool {
        self.unmatched_lefts == 0
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Left and right item sets plus the solver used on them
#[derive(Debug, Clone)]
pub struct MatchingProblem<L, R> {
    pub lefts: Vec<L>,
    pub rights: Vec<R>,
    solver: MinCostFlowSolver,
}

impl<L: Clone, R: Clone> MatchingProblem<L, R> {
    pub fn new(lefts: Vec<L>, rights: Vec<R>) -> Self {
        Self {
            lefts,
            rights,
            solver: MinCostFlowSolver::default(),
        }
    }

    /// Replaces the flow solver, e.g. to change its iteration bound
    pub fn with_solver(mut self, solver: MinCostFlowSolver) -> Self {
        self.solver = solver;
        self
    }

    /// Builds the flow network of this problem
    ///
    /// `weights(l, r)` returns `None` when `l` must not be paired with `r`.
    /// Vertices are inserted as source, lefts, rights, sink; edges as
    /// `S -> l` followed by the edges out of `l` for each left in turn, then
    /// every `r -> T`.
    pub fn build_network<W, C>(
        &self,
        weights: W,
        capacities: C,
    ) -> Result<Network<MatchNode<L, R>>, AlgorithmError>
    where
        W: Fn(&L, &R) -> Option<Weight>,
        C: Fn(&R) -> Capacity,
    {
        let mut graph = Graph::new();
        let source = graph.add_vertex(MatchNode::Source);
        let left_ids: Vec<VertexId> = self
            .lefts
            .iter()
            .map(|l| graph.add_vertex(MatchNode::Left(l.clone())))
            .collect();
        let right_ids: Vec<VertexId> = self
            .rights
            .iter()
            .map(|r| graph.add_vertex(MatchNode::Right(r.clone())))
            .collect();
        let sink = graph.add_vertex(MatchNode::Sink);

        for (left, &left_id) in self.lefts.iter().zip(&left_ids) {
            graph.add_edge(source, left_id, 1.0, 1.0)?;

            for (right, &right_id) in self.rights.iter().zip(&right_ids) {
                if let Some(weight) = weights(left, right) {
                    graph.add_edge(left_id, right_id, weight, 1.0)?;
                }
            }
        }

        for (right, &right_id) in self.rights.iter().zip(&right_ids) {
            graph.add_edge(right_id, sink, 1.0, capacities(right))?;
        }

        debug!(
            "matching network: {} lefts, {} rights, {} edges",
            left_ids.len(),
            right_ids.len(),
            graph.edge_count()
        );

        Network::new(graph, source, sink)
    }

    /// Reads the matched pairs out of `flow`
    ///
    /// Edges carrying flow that neither leave the source nor enter the sink
    /// connect a left to a right and become pairs.
    pub fn interpret_flow(
        &self,
        network: &Network<MatchNode<L, R>>,
        flow: &FlowAssignment,
    ) -> Matching<L, R> {
        let graph = network.graph();
        let mut pairs = Vec::new();
        let mut matched_rights = HashSet::new();

        for (edge_id, _) in flow.nonzero() {
            let Some(edge) = graph.edge(edge_id) else {
                continue;
            };
            if edge.from == network.source() || edge.to == network.sink() {
                continue;
            }

            if let (Some(MatchNode::Left(left)), Some(MatchNode::Right(right))) =
                (graph.node(edge.from), graph.node(edge.to))
            {
                matched_rights.insert(edge.to);
                pairs.push(MatchingPair {
                    left: left.clone(),
                    right: right.clone(),
                });
            }
        }

        let matching = Matching {
            unmatched_lefts: self.lefts.len().saturating_sub(pairs.len()),
            unmatched_rights: self.rights.len().saturating_sub(matched_rights.len()),
            cost: network.flow_cost(flow),
            pairs,
        };

        if !matching.is_perfect() {
            warn!(
                "no perfect matching exists; best approximation leaves {} left and {} right items unmatched",
                matching.unmatched_lefts, matching.unmatched_rights
            );
        }

        matching
    }

    /// Maximum matching of minimum total weight
    pub fn solve<W, C>(&self, weights: W, capacities: C) -> Result<Matching<L, R>, MatchingError>
    where
        W: Fn(&L, &R) -> Option<Weight>,
        C: Fn(&R) -> Capacity,
    {
        let network = self.build_network(weights, capacities)?;
        self.solve_network(&network)
    }

    /// Solves `iterations` times, shuffling the edge order before each run
    ///
    /// All returned matchings have the same size and cost; they may differ in
    /// which of several equally good pairs were chosen.
    pub fn solve_many<G, W, C>(
        &self,
        iterations: usize,
        rng: &mut G,
        weights: W,
        capacities: C,
    ) -> Result<Vec<Matching<L, R>>, MatchingError>
    where
        G: Rng + ?Sized,
        W: Fn(&L, &R) -> Option<Weight>,
        C: Fn(&R) -> Capacity,
    {
        let mut network = self.build_network(weights, capacities)?;
        let mut matchings = Vec::with_capacity(iterations);

        for _ in 0..iterations {
            network.graph_mut().shuffle_edges(rng);
            matchings.push(self.solve_network(&network)?);
        }

        Ok(matchings)
    }

    fn solve_network(
        &self,
        network: &Network<MatchNode<L, R>>,
    ) -> Result<Matching<L, R>, MatchingError> {
        let result = self.solver.solve(network)?;
        Ok(self.interpret_flow(network, &result.flow))
    }
}
