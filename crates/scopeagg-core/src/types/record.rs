//! Record containers
//!
//! Two container formats move feature values between pipeline stages:
//! - [`DataRecord`]: wide ids, dynamically typed values
//! - [`CompactDataRecord`]: narrow ids and values, optional continuous section

use super::feature::FeatureId;
use crate::error::Result;
use super::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Record with wide feature ids and dynamically typed values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataRecord {
    /// Continuous features keyed by feature id
    #[serde(default)]
    pub continuous_features: HashMap<i64, Value>,
}

impl DataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a continuous feature (builder style)
    pub fn with_continuous(mut self, id: impl Into<FeatureId>, value: impl Into<Value>) -> Self {
        self.set_continuous(id, value);
        self
    }

    /// Set a continuous feature, replacing any previous value
    pub fn set_continuous(&mut self, id: impl Into<FeatureId>, value: impl Into<Value>) {
        let id: FeatureId = id.into();
        self.continuous_features.insert(id.as_i64(), value.into());
    }

    /// Get a continuous feature value
    pub fn continuous(&self, id: impl Into<FeatureId>) -> Option<&Value> {
        let id: FeatureId = id.into();
        self.continuous_features.get(&id.as_i64())
    }

    pub fn len(&self) -> usize {
        self.continuous_features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.continuous_features.is_empty()
    }
}

/// Record with narrow ids and values
///
/// A missing continuous section is equivalent to an empty one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompactDataRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuous_features: Option<HashMap<i32, f32>>,
}

impl CompactDataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a continuous feature (builder style)
    pub fn with_continuous(mut self, id: i32, value: f32) -> Self {
        self.continuous_features
            .get_or_insert_with(HashMap::new)
            .insert(id, value);
        self
    }

    /// Add a continuous feature by its full id
    ///
    /// Fails if the id does not fit in 32 bits.
    pub fn with_feature(self, id: FeatureId, value: f32) -> Result<Self> {
        Ok(self.with_continuous(id.to_compact()?, value))
    }

    pub fn is_empty(&self) -> bool {
        self.continuous_features
            .as_ref()
            .map(|features| features.is_empty())
            .unwrap_or(true)
    }
}
