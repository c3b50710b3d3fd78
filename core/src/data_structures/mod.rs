//! Graph, network and flow representations shared by every algorithm
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod flow;
pub mod graph;
pub mod network;

pub use self::flow::{Flow, FlowAssignment};
pub use self::graph::{Capacity, Edge, Graph, NodeArena, Weight};
pub use self::network::Network;
