//! Minimum-cost maximum-flow engine
//!
//! Successive shortest augmenting paths over a residual network, labelled
//! with Bellman–Ford–Moore and tie-broken toward the fewest hops, plus the
//! traversal, reconstruction and verification building blocks it rests on
//! and a capacitated bipartite matching client.
//!
//! ```
//! use flow_core::{min_cost_max_flow, Graph, Network};
//!
//! let mut graph = Graph::new();
//! let s = graph.add_vertex("S");
//! let a = graph.add_vertex("A");
//! let t = graph.add_vertex("T");
//! let sa = graph.add_edge(s, a, 1.0, 3.0)?;
//! graph.add_edge(a, t, 2.0, 2.0)?;
//!
//! let network = Network::new(graph, s, t)?;
//! let flow = min_cost_max_flow(&network)?;
//! assert_eq!(flow.get(sa), 2.0);
//! assert_eq!(network.flow_cost(&flow), 6.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod data_structures;
pub mod validation;

pub use crate::algorithm::{
    min_cost_max_flow, Algorithm, AlgorithmError, EdgeId, FlowError, MatchingProblem,
    MinCostFlowResult, MinCostFlowSolver, Path, PathError, SolverConfig, VertexId,
};
pub use crate::data_structures::{Capacity, Edge, Flow, FlowAssignment, Graph, Network, Weight};
pub use crate::validation::{verify_flow, FlowCertificate, VerificationError};
