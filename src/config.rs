// Copyright 2025 Cowboy AI, LLC.

//! Chain configuration
//!
//! A configuration is attached to a source and handed down to every step
//! wired below it, so one setting governs the whole chain.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::ChainResult;

/// How a step reacts when its transform does not signal exactly one outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ContractPolicy {
    /// Deliver every emission as made; nothing is checked
    #[default]
    Permissive,
    /// Deliver as made and log each violating invocation
    Warn,
    /// Refuse a second emission and report a missing one as an error
    Strict,
}

/// Configuration shared by every node of one chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ChainConfig {
    /// Name used in log records
    pub name: String,
    /// Handling of transforms that break the one-outcome contract
    pub contract: ContractPolicy,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            name: "chain".to_string(),
            contract: ContractPolicy::Permissive,
        }
    }
}

impl ChainConfig {
    /// Create a default configuration with the given name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Replace the contract policy
    pub fn with_contract(mut self, contract: ContractPolicy) -> Self {
        self.contract = contract;
        self
    }

    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> ChainResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ChainError;

    #[test]
    fn test_default_config() {
        let config = ChainConfig::default();
        assert_eq!(config.name, "chain");
        assert_eq!(config.contract, ContractPolicy::Permissive);
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = ChainConfig::from_json_str(r#"{ "contract": "strict" }"#).unwrap();
        assert_eq!(config.name, "chain");
        assert_eq!(config.contract, ContractPolicy::Strict);

        let config = ChainConfig::from_json_str(r#"{ "name": "pricing" }"#).unwrap();
        assert_eq!(config, ChainConfig::named("pricing"));
    }

    #[test]
    fn test_from_json_rejects_unknown_policy() {
        let err = ChainConfig::from_json_str(r#"{ "contract": "lenient" }"#).unwrap_err();
        assert!(matches!(err, ChainError::InvalidConfig(_)));
    }

    #[test]
    fn test_round_trip_through_json() {
        let config = ChainConfig::named("orders").with_contract(ContractPolicy::Warn);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"warn\""));
        assert_eq!(ChainConfig::from_json_str(&json).unwrap(), config);
    }
}
