//! Minimum-Cost Maximum Flow by Successive Shortest Augmenting Paths
//!
//! Each round rebuilds the residual network from the current flow, labels it
//! with Bellman–Ford–Moore from the source (reverse arcs carry negative
//! weights), reconstructs the fewest-hop path among all cheapest source-sink
//! paths, and pushes the path's bottleneck capacity along it. The loop ends
//! when the sink is no longer reachable.
//!
//! # Correctness
//!
//! Every augmentation follows a cheapest residual path, so the flow after
//! each round is of minimum cost among flows of its value, provided the
//! original weights admit no negative cycle. A negative cycle surfaces during
//! reconstruction and is reported as [`FlowError::NegativeCycle`] instead of
//! silently ending the search.
//!
//! # Termination
//!
//! Every augmentation saturates at least one residual arc. The loop is still
//! bounded by `max_iterations` and fails with
//! [`FlowError::IterationLimitExceeded`] once the bound is hit.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::time::Instant;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::algorithm::graph::residual::residual_network;
use crate::algorithm::path_finding::bellman_ford::bellman_ford_moore;
use crate::algorithm::path_finding::bfs::bfs;
use crate::algorithm::path_finding::path::{Path, PathError};
use crate::algorithm::path_finding::shortest_path::{
    shortest_path_with_min_hop_from_distances, DEFAULT_TIE_TOLERANCE,
};
use crate::algorithm::traits::{
    Algorithm, AlgorithmError, AlgorithmParameter, EdgeId, ParameterConstraints, ParameterType,
    VertexId,
};
use crate::data_structures::flow::{Flow, FlowAssignment};
use crate::data_structures::graph::{Graph, Weight};
use crate::data_structures::network::Network;
use crate::validation::correctness::{verify_flow, VerificationError};

/// Default bound on the number of augmentations
pub const DEFAULT_MAX_ITERATIONS: usize = 100_000;

/// Default tolerance used by post-solve verification
pub const DEFAULT_VERIFY_TOLERANCE: f64 = 1e-6;

/// Flow algorithm errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FlowError {
    #[error("Network construction error: {0}")]
    Network(#[from] AlgorithmError),

    #[error("Negative cycle detected at {vertex}")]
    NegativeCycle { vertex: VertexId },

    #[error("Iteration limit of {limit} augmentations exceeded")]
    IterationLimitExceeded { limit: usize },

    #[error("Augmenting path has unbounded capacity")]
    UnboundedFlow,

    #[error("Residual arc {0} not found")]
    UnknownArc(EdgeId),

    #[error("Flow verification failed: {0}")]
    Verification(#[from] VerificationError),
}

/// Solver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Upper bound on augmentations
    pub max_iterations: usize,

    /// Absolute tolerance for "edge attains the shortest distance"
    pub tie_tolerance: Weight,

    /// Check conservation, feasibility and value equality after solving
    pub verify_result: bool,

    /// Tolerance of the post-solve check
    pub verify_tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tie_tolerance: DEFAULT_TIE_TOLERANCE,
            verify_result: true,
            verify_tolerance: DEFAULT_VERIFY_TOLERANCE,
        }
    }
}

impl SolverConfig {
    /// Parses a JSON configuration; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, AlgorithmError> {
        let config: Self = serde_json::from_str(json).map_err(|e| AlgorithmError::InvalidParameter {
            name: "config".to_string(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AlgorithmError> {
        if self.max_iterations == 0 {
            return Err(invalid("max_iterations", "must be a positive integer"));
        }
        if !(self.tie_tolerance.is_finite() && self.tie_tolerance >= 0.0) {
            return Err(invalid("tie_tolerance", "must be a finite non-negative number"));
        }
        if !(self.verify_tolerance.is_finite() && self.verify_tolerance >= 0.0) {
            return Err(invalid("verify_tolerance", "must be a finite non-negative number"));
        }
        Ok(())
    }
}

fn invalid(name: &str, reason: &str) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

/// One augmentation: the path taken and the amount pushed along it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowPath {
    /// Path vertices from source to sink
    pub path: Vec<VertexId>,
    /// Flow amount along path
    pub flow: Flow,
    /// Residual cost of one unit along the path
    pub unit_cost: Weight,
}

/// Solver performance metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowMetrics {
    /// Number of augmentations performed
    pub augmentations: usize,
    /// Bellman–Ford–Moore passes summed over all rounds
    pub relaxation_passes: usize,
    /// Algorithm execution time
    pub execution_time_ms: f64,
}

/// Minimum-cost maximum flow with its derived quantities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinCostFlowResult {
    /// Flow per original edge
    pub flow: FlowAssignment,
    /// Maximum flow value
    pub value: Flow,
    /// Total cost of the flow
    pub cost: f64,
    /// Augmenting paths in the order they were used
    pub flow_paths: Vec<FlowPath>,
    /// Source side of a minimum cut
    pub min_cut: Vec<VertexId>,
    /// Algorithm performance metrics
    pub metrics: FlowMetrics,
}

/// Pushes the bottleneck of `path` through the original edges behind its arcs
///
/// Forward arcs add to the flow of their original edge, reverse arcs subtract
/// from it. Returns the amount pushed.
pub fn augment_flow<T>(
    flow: &mut FlowAssignment,
    residual: &Graph<T>,
    path: &Path,
) -> Result<Flow, FlowError> {
    let bottleneck = path.bottleneck(residual);
    if bottleneck.is_infinite() {
        return Err(FlowError::UnboundedFlow);
    }

    for &arc_id in path.edges() {
        let arc = residual.edge(arc_id).ok_or(FlowError::UnknownArc(arc_id))?;
        let original = arc.original_or(arc_id);
        if arc.is_reverse {
            flow.add(original, -bottleneck);
        } else {
            flow.add(original, bottleneck);
        }
    }

    Ok(bottleneck)
}

/// Successive shortest path solver
#[derive(Debug, Clone, Default)]
pub struct MinCostFlowSolver {
    config: SolverConfig,
}

impl MinCostFlowSolver {
    pub fn new(config: SolverConfig) -> Result<Self, AlgorithmError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Computes a minimum-cost maximum flow of `network`
    pub fn solve<T>(&self, network: &Network<T>) -> Result<MinCostFlowResult, FlowError> {
        let start_time = Instant::now();
        let source = network.source();
        let sink = network.sink();

        let mut flow = FlowAssignment::for_graph(network.graph());
        let mut flow_paths = Vec::new();
        let mut metrics = FlowMetrics::default();

        let min_cut = loop {
            let residual = residual_network(network, &flow)?;
            let distances = bellman_ford_moore(residual.graph(), source);
            metrics.relaxation_passes += distances.passes();

            let path = match shortest_path_with_min_hop_from_distances(
                residual.graph(),
                &distances,
                source,
                sink,
                self.config.tie_tolerance,
            ) {
                Ok(path) => path,
                Err(PathError::NoPath { .. }) => {
                    let mut side: Vec<VertexId> =
                        bfs(residual.graph(), source, None).depths.into_keys().collect();
                    side.sort_unstable();
                    break side;
                }
                Err(PathError::NegativeCycleDetected { vertex }) => {
                    return Err(FlowError::NegativeCycle { vertex });
                }
            };

            if metrics.augmentations >= self.config.max_iterations {
                return Err(FlowError::IterationLimitExceeded {
                    limit: self.config.max_iterations,
                });
            }

            let unit_cost = path.total_weight(residual.graph());
            let pushed = augment_flow(&mut flow, residual.graph(), &path)?;
            metrics.augmentations += 1;

            debug!(
                "augmentation {}: pushed {} along {} arcs at unit cost {}",
                metrics.augmentations,
                pushed,
                path.hop_count(),
                unit_cost
            );

            flow_paths.push(FlowPath {
                path: path.vertices().to_vec(),
                flow: pushed,
                unit_cost,
            });
        };

        if self.config.verify_result {
            verify_flow(network, &flow, self.config.verify_tolerance)?;
        }

        let value = network.flow_value(&flow);
        let cost = network.flow_cost(&flow);
        metrics.execution_time_ms = start_time.elapsed().as_secs_f64() * 1000.0;

        info!(
            "min-cost max-flow: value {} cost {} after {} augmentations",
            value, cost, metrics.augmentations
        );

        Ok(MinCostFlowResult {
            flow,
            value,
            cost,
            flow_paths,
            min_cut,
            metrics,
        })
    }
}

/// Minimum-cost maximum flow of `network` with the default configuration
pub fn min_cost_max_flow<T>(network: &Network<T>) -> Result<FlowAssignment, FlowError> {
    MinCostFlowSolver::default()
        .solve(network)
        .map(|result| result.flow)
}

impl Algorithm for MinCostFlowSolver {
    fn name(&self) -> &'static str {
        "Successive Shortest Paths"
    }

    fn category(&self) -> &'static str {
        "network_flow"
    }

    fn description(&self) -> &'static str {
        "Minimum-cost maximum flow by repeated augmentation along fewest-hop cheapest residual paths, \
         labelled with Bellman-Ford-Moore. O(F * |V| * |E|) for integral flow value F."
    }

    fn parameters(&self) -> Vec<AlgorithmParameter> {
        let non_negative = Some(ParameterConstraints {
            min: Some(0.0),
            max: None,
        });

        vec![
            AlgorithmParameter {
                name: "max_iterations".to_string(),
                value: self.config.max_iterations.to_string(),
                value_type: ParameterType::Integer,
                constraints: Some(ParameterConstraints {
                    min: Some(1.0),
                    max: None,
                }),
            },
            AlgorithmParameter {
                name: "tie_tolerance".to_string(),
                value: self.config.tie_tolerance.to_string(),
                value_type: ParameterType::Float,
                constraints: non_negative.clone(),
            },
            AlgorithmParameter {
                name: "verify_result".to_string(),
                value: self.config.verify_result.to_string(),
                value_type: ParameterType::Boolean,
                constraints: None,
            },
            AlgorithmParameter {
                name: "verify_tolerance".to_string(),
                value: self.config.verify_tolerance.to_string(),
                value_type: ParameterType::Float,
                constraints: non_negative,
            },
        ]
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError> {
        let mut config = self.config.clone();
        match name {
            "max_iterations" => {
                config.max_iterations = value
                    .parse::<usize>()
                    .map_err(|_| invalid(name, "must be a positive integer"))?;
            }
            "tie_tolerance" => {
                config.tie_tolerance = value
                    .parse::<f64>()
                    .map_err(|_| invalid(name, "must be a finite non-negative number"))?;
            }
            "verify_result" => {
                config.verify_result = value
                    .parse::<bool>()
                    .map_err(|_| invalid(name, "must be true or false"))?;
            }
            "verify_tolerance" => {
                config.verify_tolerance = value
                    .parse::<f64>()
                    .map_err(|_| invalid(name, "must be a finite non-negative number"))?;
            }
            _ => return Err(invalid(name, "unknown parameter")),
        }

        config.validate()?;
        self.config = config;
        Ok(())
    }

    fn get_parameter(&self, name: &str) -> Option<String> {
        self.parameters()
            .into_iter()
            .find(|p| p.name == name)
            .map(|p| p.value)
    }
}
