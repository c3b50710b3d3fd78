//! Flow assignment over the edges of a graph
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{EdgeId, VertexId};
use crate::data_structures::graph::Graph;

/// Amount of flow carried by an edge
pub type Flow = f64;

/// One flow value per edge, indexed by `EdgeId`
///
/// Bounds (`0 <= flow <= capacity`) are not enforced here; they hold by
/// construction for flows produced by the solver and can be checked with
/// [`crate::validation::correctness::verify_flow`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowAssignment {
    values: Vec<Flow>,
}

impl FlowAssignment {
    /// All-zero flow over `edge_count` edges
    pub fn zero(edge_count: usize) -> Self {
        Self {
            values: vec![0.0; edge_count],
        }
    }

    /// All-zero flow over the edges of `graph`
    pub fn for_graph<T>(graph: &Graph<T>) -> Self {
        Self::zero(graph.edge_count())
    }

    /// Flow on `edge`; edges outside the assignment carry nothing
    #[inline]
    pub fn get(&self, edge: EdgeId) -> Flow {
        self.values.get(edge.as_usize()).copied().unwrap_or(0.0)
    }

    /// Sets the flow on `edge`, growing the assignment if needed
    pub fn set(&mut self, edge: EdgeId, value: Flow) {
        let index = edge.as_usize();
        if index >= self.values.len() {
            self.values.resize(index + 1, 0.0);
        }
        self.values[index] = value;
    }

    /// Adds `delta` (possibly negative) to the flow on `edge`
    pub fn add(&mut self, edge: EdgeId, delta: Flow) {
        let current = self.get(edge);
        self.set(edge, current + delta);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EdgeId, Flow)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &value)| (EdgeId(i), value))
    }

    /// Edges carrying non-zero flow
    pub fn nonzero(&self) -> impl Iterator<Item = (EdgeId, Flow)> + '_ {
        self.iter().filter(|&(_, value)| value != 0.0)
    }

    /// Net flow leaving `vertex` in `graph`: out-flow minus in-flow
    pub fn net_outflow<T>(&self, graph: &Graph<T>, vertex: VertexId) -> Flow {
        let out: Flow = graph.outgoing_edges(vertex).map(|(id, _)| self.get(id)).sum();
        let incoming: Flow = graph.incoming_edges(vertex).map(|(id, _)| self.get(id)).sum();
        out - incoming
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_flow() {
        let flow = FlowAssignment::zero(3);
        assert_eq!(flow.len(), 3);
        assert!(flow.iter().all(|(_, value)| value == 0.0));
        assert_eq!(flow.nonzero().count(), 0);
    }

    #[test]
    fn test_set_and_add() {
        let mut flow = FlowAssignment::zero(2);
        flow.set(EdgeId(0), 3.0);
        flow.add(EdgeId(0), -1.0);
        flow.add(EdgeId(4), 2.0);

        assert_eq!(flow.get(EdgeId(0)), 2.0);
        assert_eq!(flow.get(EdgeId(4)), 2.0);
        assert_eq!(flow.get(EdgeId(9)), 0.0);
        assert_eq!(flow.len(), 5);
        assert_eq!(
            flow.nonzero().collect::<Vec<_>>(),
            vec![(EdgeId(0), 2.0), (EdgeId(4), 2.0)]
        );
    }

    #[test]
    fn test_net_outflow() {
        let mut graph = Graph::new();
        let s = graph.add_vertex("S");
        let a = graph.add_vertex("A");
        let t = graph.add_vertex("T");
        let sa = graph.add_edge(s, a, 1.0, 4.0).unwrap();
        let at = graph.add_edge(a, t, 1.0, 4.0).unwrap();

        let mut flow = FlowAssignment::for_graph(&graph);
        flow.set(sa, 3.0);
        flow.set(at, 3.0);

        assert_eq!(flow.net_outflow(&graph, s), 3.0);
        assert_eq!(flow.net_outflow(&graph, a), 0.0);
        assert_eq!(flow.net_outflow(&graph, t), -3.0);
    }

    #[test]
    fn test_serde_roundtrip_shape() {
        let mut flow = FlowAssignment::zero(2);
        flow.set(EdgeId(1), 1.5);

        let json = serde_json::to_string(&flow).unwrap();
        assert_eq!(json, r#"{"values":[0.0,1.5]}"#);
    }
}
