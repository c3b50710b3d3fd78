//! Paths produced by traversal and shortest-path reconstruction
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{EdgeId, VertexId};
use crate::data_structures::graph::{Capacity, Graph, Weight};

/// Path failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// No path exists; the normal termination signal of the flow driver
    #[error("no path from {from} to {to}")]
    NoPath { from: VertexId, to: VertexId },

    /// Reconstruction met a vertex whose label is driven by a negative cycle
    #[error("detected a negative cycle at {vertex}")]
    NegativeCycleDetected { vertex: VertexId },
}

/// Directed path, ordered from its first vertex to its last
///
/// `edges[i]` leads from `vertices[i]` to `vertices[i + 1]`. Edge handles
/// refer to the graph the path was reconstructed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    vertices: Vec<VertexId>,
    edges: Vec<EdgeId>,
}

impl Path {
    /// Path consisting of a single vertex and no edges
    pub fn trivial(vertex: VertexId) -> Self {
        Self {
            vertices: vec![vertex],
            edges: Vec::new(),
        }
    }

    /// Builds a path from sequences collected while walking back from the target
    pub(crate) fn from_backward_walk(mut vertices: Vec<VertexId>, mut edges: Vec<EdgeId>) -> Self {
        vertices.reverse();
        edges.reverse();
        debug_assert_eq!(vertices.len(), edges.len() + 1);
        Self { vertices, edges }
    }

    /// Rewrites edge handles, e.g. from a tie-tree back to the graph it was built from
    pub(crate) fn map_edges(self, f: impl FnMut(EdgeId) -> EdgeId) -> Self {
        Self {
            vertices: self.vertices,
            edges: self.edges.into_iter().map(f).collect(),
        }
    }

    #[inline]
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    #[inline]
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// First vertex; `None` only for an empty path, e.g. one read from JSON
    pub fn source(&self) -> Option<VertexId> {
        self.vertices.first().copied()
    }

    pub fn target(&self) -> Option<VertexId> {
        self.vertices.last().copied()
    }

    /// Number of edges on the path
    #[inline]
    pub fn hop_count(&self) -> usize {
        self.edges.len()
    }

    /// Sum of edge weights in `graph`
    pub fn total_weight<T>(&self, graph: &Graph<T>) -> Weight {
        self.edges
            .iter()
            .filter_map(|&id| graph.edge(id))
            .map(|edge| edge.weight)
            .sum()
    }

    /// Minimum capacity along the path; infinite for a trivial path
    pub fn bottleneck<T>(&self, graph: &Graph<T>) -> Capacity {
        self.edges
            .iter()
            .filter_map(|&id| graph.edge(id))
            .map(|edge| edge.capacity)
            .fold(Capacity::INFINITY, Capacity::min)
    }

    /// Whether some vertex occurs twice
    pub fn has_repeated_vertex(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.vertices.len());
        !self.vertices.iter().all(|v| seen.insert(*v))
    }
}
