//! Network flow algorithms and their clients
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod matching;
pub mod min_cost_flow;
pub mod residual;

pub use self::matching::{Matching, MatchingError, MatchingPair, MatchingProblem, MatchNode};
pub use self::min_cost_flow::{
    augment_flow, min_cost_max_flow, FlowError, FlowMetrics, FlowPath, MinCostFlowResult,
    MinCostFlowSolver, SolverConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_VERIFY_TOLERANCE,
};
pub use self::residual::residual_network;
