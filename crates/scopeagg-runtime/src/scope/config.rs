//! Scoped aggregate configuration
//!
//! Declarative form of a [`ScopedAggregateBuilder`](super::ScopedAggregateBuilder)
//! with string scope keys. Parsed from YAML or JSON text supplied by the caller.

use crate::error::{Result, RuntimeError};
use scopeagg_core::{FeatureDescriptor, PersonalDataType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Scoped aggregate configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopedAggregateConfig {
    /// Label embedded as the `scope_name` extension
    pub scope_name: String,

    /// Keys to scope by
    #[serde(default)]
    pub scope_keys: Vec<String>,

    /// Base features to scope
    #[serde(default)]
    pub features: Vec<ScopedFeatureSpec>,
}

/// A base feature to scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopedFeatureSpec {
    /// Base feature name
    pub name: String,

    /// Privacy tags of the base feature
    #[serde(default)]
    pub personal_data_types: BTreeSet<PersonalDataType>,
}

impl ScopedAggregateConfig {
    /// Parse a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| RuntimeError::Config(format!("Failed to parse YAML: {}", e)))?;
        config.log_loaded();
        Ok(config)
    }

    /// Parse a JSON document
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)
            .map_err(|e| RuntimeError::Config(format!("Failed to parse JSON: {}", e)))?;
        config.log_loaded();
        Ok(config)
    }

    /// Continuous descriptors for the configured base features
    pub fn feature_descriptors(&self) -> Vec<FeatureDescriptor> {
        self.features
            .iter()
            .map(|spec| {
                FeatureDescriptor::continuous(
                    spec.name.clone(),
                    spec.personal_data_types.iter().copied(),
                )
            })
            .collect()
    }

    fn log_loaded(&self) {
        debug!(
            "Loaded scoped aggregate config '{}': {} features, {} keys",
            self.scope_name,
            self.features.len(),
            self.scope_keys.len()
        );
    }
}
