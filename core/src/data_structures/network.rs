//! Flow network: a graph with a designated source and sink
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt;

use crate::algorithm::traits::{AlgorithmError, VertexId};
use crate::data_structures::flow::{Flow, FlowAssignment};
use crate::data_structures::graph::Graph;

/// Graph plus source and sink vertices
///
/// Topology is fixed once the network is built; solvers only read it.
#[derive(Debug)]
pub struct Network<T> {
    graph: Graph<T>,
    source: VertexId,
    sink: VertexId,
}

impl<T> Clone for Network<T> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph.clone(),
            source: self.source,
            sink: self.sink,
        }
    }
}

impl<T> Network<T> {
    /// Wraps `graph`, checking that source and sink are distinct vertices of it
    pub fn new(graph: Graph<T>, source: VertexId, sink: VertexId) -> Result<Self, AlgorithmError> {
        for terminal in [source, sink] {
            if !graph.contains_vertex(terminal) {
                return Err(AlgorithmError::InvalidVertex(terminal));
            }
        }

        if source == sink {
            return Err(AlgorithmError::InvalidNetwork(format!(
                "source and sink are both {}",
                source
            )));
        }

        Ok(Self { graph, source, sink })
    }

    #[inline]
    pub fn graph(&self) -> &Graph<T> {
        &self.graph
    }

    /// Mutable access for edge reordering; handles held outside become stale
    #[inline]
    pub fn graph_mut(&mut self) -> &mut Graph<T> {
        &mut self.graph
    }

    #[inline]
    pub fn source(&self) -> VertexId {
        self.source
    }

    #[inline]
    pub fn sink(&self) -> VertexId {
        self.sink
    }

    /// Flow value: net flow leaving the source
    pub fn flow_value(&self, flow: &FlowAssignment) -> Flow {
        flow.net_outflow(&self.graph, self.source)
    }

    /// Total cost `sum(weight * flow)`
    pub fn flow_cost(&self, flow: &FlowAssignment) -> f64 {
        self.graph.flow_cost(flow)
    }

    pub fn into_graph(self) -> Graph<T> {
        self.graph
    }
}

impl<T: fmt::Display> fmt::Display for Network<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "source {} sink {}", self.source, self.sink)?;
        fmt::Display::fmt(&self.graph, f)
    }
}
