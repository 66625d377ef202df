// Copyright 2025 Cowboy AI, LLC.

//! Error types for chain construction and push cascades
//!
//! Absence is not an error: it travels through a chain as a first-class
//! outcome. The variants here cover everything else that can stop a push.

use thiserror::Error;

use crate::identifiers::NodeId;

/// Errors that can occur while pushing through a chain
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    /// The payload of an absent channel value was requested
    #[error("No value")]
    NoValue,

    /// A transform signalled zero, or more than one, outcome for one input
    #[error("Contract violation at node {node}: transform signalled {emissions} outcomes, expected exactly 1")]
    ContractViolation {
        /// Step whose transform broke the contract
        node: NodeId,
        /// Number of outcomes signalled so far
        emissions: usize,
    },

    /// Fault raised by user code (a transform or a sink callback)
    #[error("Fault: {0}")]
    Fault(String),

    /// Configuration could not be read
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for chain operations
pub type ChainResult<T> = Result<T, ChainError>;

impl From<serde_json::Error> for ChainError {
    fn from(err: serde_json::Error) -> Self {
        ChainError::InvalidConfig(err.to_string())
    }
}

impl ChainError {
    /// Create a fault raised by user code
    pub fn fault(msg: impl Into<String>) -> Self {
        ChainError::Fault(msg.into())
    }

    /// Check if this error is a contract violation
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, ChainError::ContractViolation { .. })
    }
}
