//! Residual network construction
//!
//! For each original edge `e` carrying `flow(e)`:
//! - a forward arc with capacity `capacity(e) - flow(e)` when that is positive;
//! - a reverse arc with negated weight and capacity `flow(e)` when the flow is
//!   positive.
//!
//! Both arcs link back to `e`, so augmenting along a residual path translates
//! directly into flow changes on the original edges. The residual network is
//! a fresh value sharing the node arena of its input; nothing is mutated.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::trace;

use crate::algorithm::traits::AlgorithmError;
use crate::data_structures::flow::FlowAssignment;
use crate::data_structures::graph::Edge;
use crate::data_structures::network::Network;

/// Residual network of `network` under `flow`
pub fn residual_network<T>(
    network: &Network<T>,
    flow: &FlowAssignment,
) -> Result<Network<T>, AlgorithmError> {
    let original = network.graph();
    let mut residual = original.with_same_vertices();

    for (edge_id, edge) in original.edges_with_ids() {
        let carried = flow.get(edge_id);

        let remaining = edge.capacity - carried;
        if remaining > 0.0 {
            residual.push_edge(Edge::forward_arc(edge_id, edge, remaining));
        }

        if carried > 0.0 {
            residual.push_edge(Edge::reverse_arc(edge_id, edge, carried));
        }
    }

    trace!(
        "residual network: {} arcs from {} original edges",
        residual.edge_count(),
        original.edge_count()
    );

    Network::new(residual, network.source(), network.sink())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::traits::{EdgeId, VertexId};
    use crate::data_structures::graph::Graph;

    fn two_layer_network() -> (Network<&'static str>, Vec<EdgeId>, [VertexId; 6]) {
        let mut graph = Graph::new();
        let a = graph.add_vertex("A");
        let b = graph.add_vertex("B");
        let c = graph.add_vertex("C");
        let d = graph.add_vertex("D");
        let s = graph.add_vertex("S");
        let t = graph.add_vertex("T");

        let edges = vec![
            graph.add_edge(s, a, 1.0, 5.0).unwrap(),
            graph.add_edge(s, b, 1.0, 5.0).unwrap(),
            graph.add_edge(a, c, 1.0, 3.0).unwrap(),
            graph.add_edge(a, d, 1.0, 2.0).unwrap(),
            graph.add_edge(b, c, 1.0, 1.0).unwrap(),
            graph.add_edge(b, d, 1.0, 7.0).unwrap(),
            graph.add_edge(c, t, 1.0, 2.0).unwrap(),
            graph.add_edge(d, t, 1.0, 2.0).unwrap(),
        ];

        (Network::new(graph, s, t).unwrap(), edges, [a, b, c, d, s, t])
    }

    #[test]
    fn test_zero_flow_residual_is_a_copy() {
        let (network, _, _) = two_layer_network();
        let flow = FlowAssignment::for_graph(network.graph());

        let residual = residual_network(&network, &flow).unwrap();
        assert_eq!(residual.graph().edge_count(), 8);
        assert!(residual.graph().edges().iter().all(|e| !e.is_reverse));
        assert_eq!(residual.source(), network.source());
        assert_eq!(residual.sink(), network.sink());

        for (id, arc) in residual.graph().edges_with_ids() {
            let original = network.graph().edge(id).unwrap();
            assert_eq!(arc.original, Some(id));
            assert_eq!(arc.capacity, original.capacity);
            assert_eq!(arc.weight, original.weight);
        }
    }

    #[test]
    fn test_partial_flow_residual() {
        let (network, e, [a, _, c, d, s, t]) = two_layer_network();
        let mut flow = FlowAssignment::for_graph(network.graph());
        flow.set(e[0], 3.0);
        flow.set(e[2], 1.0);
        flow.set(e[3], 2.0);
        flow.set(e[6], 1.0);
        flow.set(e[7], 2.0);

        let residual = residual_network(&network, &flow).unwrap();
        let arcs = residual.graph().edges();

        // S->A: forward 2 and reverse 3
        let sa: Vec<&Edge> = arcs.iter().filter(|arc| arc.original == Some(e[0])).collect();
        assert_eq!(sa.len(), 2);
        assert_eq!((sa[0].from, sa[0].to, sa[0].capacity), (s, a, 2.0));
        assert!(sa[1].is_reverse);
        assert_eq!((sa[1].from, sa[1].to, sa[1].capacity, sa[1].weight), (a, s, 3.0, -1.0));

        // A->D saturated: reverse arc only
        let ad: Vec<&Edge> = arcs.iter().filter(|arc| arc.original == Some(e[3])).collect();
        assert_eq!(ad.len(), 1);
        assert!(ad[0].is_reverse);
        assert_eq!((ad[0].from, ad[0].to), (d, a));

        // D->T saturated, C->T half used
        let into_t: Vec<&Edge> = arcs.iter().filter(|arc| arc.to == t).collect();
        assert_eq!(into_t.len(), 1);
        assert_eq!((into_t[0].from, into_t[0].capacity), (c, 1.0));

        // 8 forward candidates minus 1 saturated (A->D) and 1 saturated (D->T), plus 5 reverse
        assert_eq!(arcs.len(), 6 + 5);
    }

    #[test]
    fn test_inputs_are_untouched() {
        let (network, e, _) = two_layer_network();
        let mut flow = FlowAssignment::for_graph(network.graph());
        flow.set(e[1], 4.0);
        let before_graph = network.graph().edges().to_vec();
        let before_flow = flow.clone();

        let _ = residual_network(&network, &flow).unwrap();

        assert_eq!(network.graph().edges(), before_graph.as_slice());
        assert_eq!(flow, before_flow);
    }
}
