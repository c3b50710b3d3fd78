//! Bellman–Ford–Moore single-source distance labelling
//!
//! Runs up to |V| relaxation passes over the whole edge list in edge-list
//! order, so negative edge weights (residual reverse arcs) are handled. A pass
//! that changes no label ends the loop early; the labels are then a fixed
//! point and further passes could not alter them.
//!
//! Negative cycles are not reported here. Their effect is visible to the
//! reconstruction routines in [`super::shortest_path`], which reject labels
//! that are not a fixed point.
//!
//! Complexity: O(|V| · |E|) time, O(|V|) space.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;

use log::trace;

use crate::algorithm::traits::VertexId;
use crate::data_structures::graph::{Graph, Weight};

/// Distance labels from a single source
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Distances {
    source: Option<VertexId>,
    labels: HashMap<VertexId, Weight>,
    passes: usize,
}

impl Distances {
    /// Label of `v`; `+inf` when unreached or unknown
    #[inline]
    pub fn get(&self, v: VertexId) -> Weight {
        self.labels.get(&v).copied().unwrap_or(Weight::INFINITY)
    }

    #[inline]
    pub fn is_reachable(&self, v: VertexId) -> bool {
        self.get(v).is_finite()
    }

    pub fn source(&self) -> Option<VertexId> {
        self.source
    }

    /// Relaxation passes actually performed
    pub fn passes(&self) -> usize {
        self.passes
    }

    pub fn iter(&self) -> impl Iterator<Item = (VertexId, Weight)> + '_ {
        self.labels.iter().map(|(&v, &d)| (v, d))
    }
}

impl FromIterator<(VertexId, Weight)> for Distances {
    fn from_iter<I: IntoIterator<Item = (VertexId, Weight)>>(iter: I) -> Self {
        Self {
            source: None,
            labels: iter.into_iter().collect(),
            passes: 0,
        }
    }
}

/// Distance from `source` to every vertex of `graph`
pub fn bellman_ford_moore<T>(graph: &Graph<T>, source: VertexId) -> Distances {
    let mut labels: HashMap<VertexId, Weight> = graph
        .vertices()
        .iter()
        .map(|&v| (v, if v == source { 0.0 } else { Weight::INFINITY }))
        .collect();

    let mut passes = 0;
    for _ in 0..graph.vertex_count() {
        passes += 1;
        let mut changed = false;

        for edge in graph.edges() {
            let from = labels.get(&edge.from).copied().unwrap_or(Weight::INFINITY);
            if !from.is_finite() {
                continue;
            }

            let candidate = from + edge.weight;
            let to = labels.entry(edge.to).or_insert(Weight::INFINITY);
            if candidate < *to {
                *to = candidate;
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }

    trace!(
        "bellman-ford-moore from {} settled after {} passes over {} edges",
        source,
        passes,
        graph.edge_count()
    );

    Distances {
        source: Some(source),
        labels,
        passes,
    }
}
