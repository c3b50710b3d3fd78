//! Post-solve verification of flows
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod correctness;

pub use self::correctness::{verify_flow, FlowCertificate, VerificationError};
