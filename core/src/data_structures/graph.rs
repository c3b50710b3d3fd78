//! Weighted directed graph with arena-owned node values
//!
//! Node values supplied by the caller are moved into a `NodeArena` and
//! addressed through `VertexId` handles, so vertex identity is handle
//! identity and never depends on value equality. The arena is shared through
//! an `Arc`, which lets derived graphs (residual graphs, tie-trees) reuse the
//! vertex set of the graph they were built from without copying node values.
//!
//! Adjacency queries are linear scans over the edge list. Edge-list order is
//! significant: every traversal in this crate visits edges in that order and
//! uses it to break ties.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{AlgorithmError, EdgeId, VertexId};
use crate::data_structures::flow::FlowAssignment;

/// Signed edge weight (cost per unit of flow)
pub type Weight = f64;

/// Edge capacity
pub type Capacity = f64;

/// Append-only storage for caller-owned node values
#[derive(Debug, Clone)]
pub struct NodeArena<T> {
    nodes: Vec<T>,
}

impl<T> NodeArena<T> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Moves a node value into the arena and returns its handle
    pub fn insert(&mut self, value: T) -> VertexId {
        let id = VertexId(self.nodes.len());
        self.nodes.push(value);
        id
    }

    pub fn get(&self, id: VertexId) -> Option<&T> {
        self.nodes.get(id.as_usize())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<T> Default for NodeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Directed arc
///
/// Authored edges carry `is_reverse == false` and no back-link. Arcs
/// synthesized for residual graphs always link back to the original edge they
/// were derived from; only those can be reverse arcs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: Weight,
    pub capacity: Capacity,
    pub is_reverse: bool,
    pub original: Option<EdgeId>,
}

impl Edge {
    /// Creates an authored edge
    pub fn new(from: VertexId, to: VertexId, weight: Weight, capacity: Capacity) -> Self {
        Self {
            from,
            to,
            weight,
            capacity,
            is_reverse: false,
            original: None,
        }
    }

    /// Residual arc in the direction of `original`, carrying what is left of its capacity
    pub fn forward_arc(original_id: EdgeId, original: &Edge, residual: Capacity) -> Self {
        Self {
            from: original.from,
            to: original.to,
            weight: original.weight,
            capacity: residual,
            is_reverse: false,
            original: Some(original_id),
        }
    }

    /// Residual arc against the direction of `original`, allowing `flow` to be cancelled
    pub fn reverse_arc(original_id: EdgeId, original: &Edge, flow: Capacity) -> Self {
        Self {
            from: original.to,
            to: original.from,
            weight: -original.weight,
            capacity: flow,
            is_reverse: true,
            original: Some(original_id),
        }
    }

    /// The edge whose flow this arc moves: the back-link if any, else `own_id`
    #[inline]
    pub fn original_or(&self, own_id: EdgeId) -> EdgeId {
        self.original.unwrap_or(own_id)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] [{}] (wgt {}, cap {})",
            self.from, self.to, self.weight, self.capacity
        )
    }
}

/// Weighted directed graph
#[derive(Debug)]
pub struct Graph<T> {
    /// Node values shared with every graph derived from this one
    nodes: Arc<NodeArena<T>>,

    /// Vertex set in insertion order
    vertices: Vec<VertexId>,

    /// Edge list; `EdgeId(i)` is `edges[i]`
    edges: Vec<Edge>,
}

impl<T> Clone for Graph<T> {
    fn clone(&self) -> Self {
        Self {
            nodes: Arc::clone(&self.nodes),
            vertices: self.vertices.clone(),
            edges: self.edges.clone(),
        }
    }
}

impl<T> Default for Graph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Graph<T> {
    /// Creates an empty graph
    pub fn new() -> Self {
        Self {
            nodes: Arc::new(NodeArena::new()),
            vertices: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Graph over the same vertex set and node arena, with no edges
    pub fn with_same_vertices(&self) -> Self {
        Self {
            nodes: Arc::clone(&self.nodes),
            vertices: self.vertices.clone(),
            edges: Vec::new(),
        }
    }

    /// Adds an authored edge
    ///
    /// Rejects endpoints outside the vertex set, a second edge for the same
    /// ordered pair, non-finite weights and negative or NaN capacities.
    /// Infinite capacities are accepted.
    pub fn add_edge(
        &mut self,
        from: VertexId,
        to: VertexId,
        weight: Weight,
        capacity: Capacity,
    ) -> Result<EdgeId, AlgorithmError> {
        for endpoint in [from, to] {
            if !self.contains_vertex(endpoint) {
                return Err(AlgorithmError::InvalidVertex(endpoint));
            }
        }

        if self.find_edge(from, to).is_some() {
            return Err(AlgorithmError::DuplicateEdge(from, to));
        }

        if !weight.is_finite() {
            return Err(AlgorithmError::InvalidWeight { from, to, weight });
        }

        if capacity.is_nan() || capacity < 0.0 {
            return Err(AlgorithmError::InvalidCapacity { from, to, capacity });
        }

        Ok(self.push_edge(Edge::new(from, to, weight, capacity)))
    }

    /// Appends an edge without validation
    ///
    /// Used for synthesized arcs, which are always addressed by handle and may
    /// therefore share an ordered pair with another arc.
    pub fn push_edge(&mut self, edge: Edge) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.edges.push(edge);
        id
    }

    #[inline]
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.as_usize())
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_vertex(&self, v: VertexId) -> bool {
        self.vertices.contains(&v)
    }

    /// Node value behind a vertex of this graph
    pub fn node(&self, v: VertexId) -> Option<&T> {
        if self.contains_vertex(v) {
            self.nodes.get(v)
        } else {
            None
        }
    }

    /// Edges with their handles, in edge-list order
    pub fn edges_with_ids(&self) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, edge)| (EdgeId(i), edge))
    }

    /// Outgoing edges of `v` in edge-list order
    pub fn outgoing_edges(&self, v: VertexId) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.edges_with_ids().filter(move |(_, edge)| edge.from == v)
    }

    /// Incoming edges of `v` in edge-list order
    pub fn incoming_edges(&self, v: VertexId) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.edges_with_ids().filter(move |(_, edge)| edge.to == v)
    }

    /// Outgoing neighbours of `v`
    pub fn neighbors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.outgoing_edges(v).map(|(_, edge)| edge.to)
    }

    /// First edge from `from` to `to`, if any
    pub fn find_edge(&self, from: VertexId, to: VertexId) -> Option<EdgeId> {
        self.edges_with_ids()
            .find(|(_, edge)| edge.from == from && edge.to == to)
            .map(|(id, _)| id)
    }

    /// Randomly permutes the edge list; previously issued `EdgeId`s become stale
    pub fn shuffle_edges<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.edges.shuffle(rng);
    }

    /// Total cost `sum(weight * flow)` of a flow over this graph's edges
    pub fn flow_cost(&self, flow: &FlowAssignment) -> f64 {
        self.edges_with_ids()
            .map(|(id, edge)| edge.weight * flow.get(id))
            .sum()
    }

    /// Renders every edge with the flow it carries
    pub fn display_with_flow<'a>(&'a self, flow: &'a FlowAssignment) -> FlowDisplay<'a, T> {
        FlowDisplay { graph: self, flow }
    }
}

impl<T: Clone> Graph<T> {
    /// Moves a node value into the graph and returns its vertex handle
    pub fn add_vertex(&mut self, value: T) -> VertexId {
        let id = Arc::make_mut(&mut self.nodes).insert(value);
        self.vertices.push(id);
        id
    }
}

impl<T: fmt::Display> Graph<T> {
    fn write_vertex(&self, f: &mut fmt::Formatter<'_>, v: VertexId) -> fmt::Result {
        match self.nodes.get(v) {
            Some(node) => write!(f, "[{}]", node),
            None => write!(f, "[{}]", v),
        }
    }

    fn write_edge(&self, f: &mut fmt::Formatter<'_>, edge: &Edge) -> fmt::Result {
        self.write_vertex(f, edge.from)?;
        f.write_str(" ")?;
        self.write_vertex(f, edge.to)?;
        write!(f, " (wgt {}, cap {})", edge.weight, edge.capacity)
    }

    fn write_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "--- Graph of {} nodes and {} edges ---",
            self.vertex_count(),
            self.edge_count()
        )
    }
}

impl<T: fmt::Display> fmt::Display for Graph<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_header(f)?;
        for edge in &self.edges {
            self.write_edge(f, edge)?;
            f.write_str("\n")?;
        }
        f.write_str("---\n")
    }
}

/// `Display` adapter returned by [`Graph::display_with_flow`]
pub struct FlowDisplay<'a, T> {
    graph: &'a Graph<T>,
    flow: &'a FlowAssignment,
}

impl<T: fmt::Display> fmt::Display for FlowDisplay<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.graph.write_header(f)?;
        for (id, edge) in self.graph.edges_with_ids() {
            self.graph.write_edge(f, edge)?;
            writeln!(f, " -> {}", self.flow.get(id))?;
        }
        f.write_str("---\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn triangle() -> (Graph<&'static str>, [VertexId; 3]) {
        let mut graph = Graph::new();
        let a = graph.add_vertex("A");
        let b = graph.add_vertex("B");
        let c = graph.add_vertex("C");
        graph.add_edge(a, b, 1.0, 2.0).unwrap();
        graph.add_edge(b, c, 2.0, 3.0).unwrap();
        graph.add_edge(a, c, 5.0, 1.0).unwrap();
        (graph, [a, b, c])
    }

    #[test]
    fn test_graph_creation_and_basic_operations() {
        let (graph, [a, b, c]) = triangle();

        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.node(b), Some(&"B"));
        assert_eq!(graph.find_edge(a, b), Some(EdgeId(0)));
        assert_eq!(graph.find_edge(c, a), None);
    }

    #[test]
    fn test_adjacency_queries_preserve_edge_order() {
        let (graph, [a, b, c]) = triangle();

        let out: Vec<EdgeId> = graph.outgoing_edges(a).map(|(id, _)| id).collect();
        assert_eq!(out, vec![EdgeId(0), EdgeId(2)]);

        let incoming: Vec<EdgeId> = graph.incoming_edges(c).map(|(id, _)| id).collect();
        assert_eq!(incoming, vec![EdgeId(1), EdgeId(2)]);

        let neighbors: Vec<VertexId> = graph.neighbors(a).collect();
        assert_eq!(neighbors, vec![b, c]);
    }

    #[test]
    fn test_unknown_vertex_queries_are_empty() {
        let (graph, _) = triangle();
        let stranger = VertexId(99);

        assert_eq!(graph.outgoing_edges(stranger).count(), 0);
        assert_eq!(graph.incoming_edges(stranger).count(), 0);
        assert_eq!(graph.neighbors(stranger).count(), 0);
        assert!(graph.node(stranger).is_none());
    }

    #[test]
    fn test_edge_validation() {
        let (mut graph, [a, b, c]) = triangle();

        assert_eq!(
            graph.add_edge(a, b, 1.0, 1.0),
            Err(AlgorithmError::DuplicateEdge(a, b))
        );
        assert!(matches!(
            graph.add_edge(b, a, f64::NAN, 1.0),
            Err(AlgorithmError::InvalidWeight { .. })
        ));
        for weight in [f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(
                graph.add_edge(b, a, weight, 1.0),
                Err(AlgorithmError::InvalidWeight { from: b, to: a, weight })
            );
        }
        assert!(graph.add_edge(c, a, 1.0, f64::INFINITY).is_ok());
        assert!(matches!(
            graph.add_edge(b, a, 1.0, -1.0),
            Err(AlgorithmError::InvalidCapacity { .. })
        ));
        assert_eq!(
            graph.add_edge(a, VertexId(17), 1.0, 1.0),
            Err(AlgorithmError::InvalidVertex(VertexId(17)))
        );

        // The reverse direction is a different ordered pair
        assert!(graph.add_edge(b, a, -1.0, 0.0).is_ok());
    }

    #[test]
    fn test_derived_graph_shares_vertices() {
        let (graph, [a, _, _]) = triangle();
        let derived = graph.with_same_vertices();

        assert_eq!(derived.vertex_count(), 3);
        assert_eq!(derived.edge_count(), 0);
        assert_eq!(derived.node(a), Some(&"A"));
    }

    #[test]
    fn test_synthesized_arcs() {
        let (graph, _) = triangle();
        let original = graph.edge(EdgeId(1)).unwrap();

        let forward = Edge::forward_arc(EdgeId(1), original, 1.5);
        assert_eq!(forward.from, original.from);
        assert_eq!(forward.capacity, 1.5);
        assert!(!forward.is_reverse);

        let reverse = Edge::reverse_arc(EdgeId(1), original, 0.5);
        assert_eq!(reverse.from, original.to);
        assert_eq!(reverse.to, original.from);
        assert_eq!(reverse.weight, -2.0);
        assert!(reverse.is_reverse);
        assert_eq!(reverse.original_or(EdgeId(9)), EdgeId(1));
    }

    #[test]
    fn test_display() {
        let (graph, _) = triangle();
        let rendered = graph.to_string();

        assert!(rendered.starts_with("--- Graph of 3 nodes and 3 edges ---\n"));
        assert!(rendered.contains("[A] [B] (wgt 1, cap 2)\n"));
        assert!(rendered.ends_with("---\n"));

        let mut flow = FlowAssignment::for_graph(&graph);
        flow.set(EdgeId(0), 2.0);
        let rendered = graph.display_with_flow(&flow).to_string();
        assert!(rendered.contains("[A] [B] (wgt 1, cap 2) -> 2\n"));
        assert!(rendered.contains("[B] [C] (wgt 2, cap 3) -> 0\n"));
    }

    #[test]
    fn test_shuffle_keeps_edge_set() {
        let (mut graph, _) = triangle();
        let before = graph.edges().to_vec();
        let mut rng = StdRng::seed_from_u64(7);

        graph.shuffle_edges(&mut rng);

        assert_eq!(graph.edge_count(), before.len());
        for edge in &before {
            assert!(graph.edges().contains(edge));
        }
    }

    #[test]
    fn test_flow_cost() {
        let (graph, _) = triangle();
        let mut flow = FlowAssignment::for_graph(&graph);
        flow.set(EdgeId(0), 2.0);
        flow.set(EdgeId(2), 1.0);

        assert_eq!(graph.flow_cost(&flow), 2.0 * 1.0 + 1.0 * 5.0);
    }
}
