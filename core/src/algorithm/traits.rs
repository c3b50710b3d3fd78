//! Core algorithm trait definitions for the flow engine
//!
//! This module establishes the shared vocabulary of the crate: strongly typed
//! vertex and edge handles, the construction-level error type, and the
//! `Algorithm` trait through which solvers expose their tunable parameters.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Vertex handle: an index into the node arena of a graph.
///
/// Two handles denote the same logical vertex iff they are equal. The node
/// value itself is never compared.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct VertexId(pub usize);

impl VertexId {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Edge handle: the position of an edge in its graph's edge list
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct EdgeId(pub usize);

impl EdgeId {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Parameter type enumeration for type-safe parameter handling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParameterType {
    Integer,
    Float,
    Boolean,
}

/// Parameter constraints for validating algorithm parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterConstraints {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Algorithm parameter with strongly typed values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmParameter {
    pub name: String,
    pub value: String,
    pub value_type: ParameterType,
    pub constraints: Option<ParameterConstraints>,
}

/// Errors raised while building graphs or configuring algorithms
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AlgorithmError {
    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Invalid vertex: {0}")]
    InvalidVertex(VertexId),

    #[error("Duplicate edge from {0} to {1}")]
    DuplicateEdge(VertexId, VertexId),

    #[error("Invalid weight on edge from {from} to {to}: {weight}")]
    InvalidWeight { from: VertexId, to: VertexId, weight: f64 },

    #[error("Invalid capacity on edge from {from} to {to}: {capacity}")]
    InvalidCapacity { from: VertexId, to: VertexId, capacity: f64 },

    #[error("Invalid network: {0}")]
    InvalidNetwork(String),
}

/// Common surface of the solvers in this crate
///
/// Parameters travel as strings so that callers can wire them from any
/// configuration source; each implementation validates its own names.
pub trait Algorithm {
    /// Returns the algorithm's descriptive name
    fn name(&self) -> &'static str;

    /// Returns the algorithm's category (e.g. network_flow)
    fn category(&self) -> &'static str;

    /// Returns a short description with complexity notes
    fn description(&self) -> &'static str;

    /// Returns supported parameters with their current values
    fn parameters(&self) -> Vec<AlgorithmParameter>;

    /// Sets algorithm parameter with type validation
    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError>;

    /// Gets algorithm parameter value
    fn get_parameter(&self, name: &str) -> Option<String>;

    /// All parameters as a name/value map
    fn get_parameters(&self) -> HashMap<String, String> {
        self.parameters()
            .into_iter()
            .map(|p| (p.name, p.value))
            .collect()
    }
}
