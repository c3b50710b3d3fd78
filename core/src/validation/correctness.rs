//! Flow Correctness Verification
//!
//! Independent checks of a flow against the network it was computed on:
//!
//! * one flow value per edge;
//! * feasibility, `0 <= flow(e) <= capacity(e)` on every edge;
//! * conservation at every vertex other than source and sink;
//! * value equality, flow out of the source equals flow into the sink.
//!
//! All comparisons use an absolute tolerance. A passing flow yields a
//! [`FlowCertificate`] with its value and cost.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{EdgeId, VertexId};
use crate::data_structures::flow::{Flow, FlowAssignment};
use crate::data_structures::network::Network;

/// Verification failures
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VerificationError {
    #[error("Flow has {actual} entries but the network has {expected} edges")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Negative flow {flow} on edge {edge}")]
    NegativeFlow { edge: EdgeId, flow: Flow },

    #[error("Flow {flow} on edge {edge} exceeds capacity {capacity}")]
    CapacityViolated {
        edge: EdgeId,
        flow: Flow,
        capacity: Flow,
    },

    #[error("Conservation violated at {vertex}: net outflow {imbalance}")]
    ConservationViolated { vertex: VertexId, imbalance: Flow },

    #[error("Source emits {source_out} but sink absorbs {sink_in}")]
    ValueMismatch { source_out: Flow, sink_in: Flow },
}

/// Proof that a flow passed verification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowCertificate {
    pub value: Flow,
    pub cost: f64,
}

/// Verifies `flow` on `network` within `tolerance`
pub fn verify_flow<T>(
    network: &Network<T>,
    flow: &FlowAssignment,
    tolerance: f64,
) -> Result<FlowCertificate, VerificationError> {
    let graph = network.graph();

    if flow.len() != graph.edge_count() {
        return Err(VerificationError::LengthMismatch {
            expected: graph.edge_count(),
            actual: flow.len(),
        });
    }

    for (edge_id, edge) in graph.edges_with_ids() {
        let carried = flow.get(edge_id);
        if carried < -tolerance {
            return Err(VerificationError::NegativeFlow {
                edge: edge_id,
                flow: carried,
            });
        }
        if carried > edge.capacity + tolerance {
            return Err(VerificationError::CapacityViolated {
                edge: edge_id,
                flow: carried,
                capacity: edge.capacity,
            });
        }
    }

    for &vertex in graph.vertices() {
        if vertex == network.source() || vertex == network.sink() {
            continue;
        }

        let imbalance = flow.net_outflow(graph, vertex);
        if imbalance.abs() > tolerance {
            return Err(VerificationError::ConservationViolated { vertex, imbalance });
        }
    }

    let source_out = flow.net_outflow(graph, network.source());
    let sink_in = -flow.net_outflow(graph, network.sink());
    if (source_out - sink_in).abs() > tolerance {
        return Err(VerificationError::ValueMismatch { source_out, sink_in });
    }

    Ok(FlowCertificate {
        value: source_out,
        cost: network.flow_cost(flow),
    })
}
