//! Scoped aggregate record builder
//!
//! Re-labels each key partition's raw feature values under the scoped feature
//! for (feature, key) and merges every partition into one record.

use super::adapter::{compact_record_values, data_record_values, FeatureValueMap};
use super::config::ScopedAggregateConfig;
use super::index::{ScopeKey, ScopedFeatureIndex};
use crate::error::Result;
use scopeagg_core::{
    CompactDataRecord, DataRecord, FeatureContext, FeatureDescriptor, PersonalDataType, Value,
};
use std::borrow::Borrow;
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, trace};

/// Builds scoped aggregate records for a fixed set of features and keys
///
/// All scoped descriptors are computed in [`ScopedAggregateBuilder::new`].
/// Every other method only reads, so a builder can be shared freely across
/// threads.
#[derive(Debug, Clone)]
pub struct ScopedAggregateBuilder<K> {
    features_to_scope: Vec<FeatureDescriptor>,
    scope_keys: HashSet<K>,
    scope_name: String,
    index: ScopedFeatureIndex<K>,
}

impl<K: ScopeKey> ScopedAggregateBuilder<K> {
    /// Create a builder, eagerly indexing every (feature, key) pair
    ///
    /// Memory use is proportional to `|features| x |keys|`.
    pub fn new<R>(
        features_to_scope: impl IntoIterator<Item = FeatureDescriptor>,
        scope_keys: impl IntoIterator<Item = K>,
        scope_name: impl Into<String>,
        personal_data_types: R,
    ) -> Result<Self>
    where
        R: Fn(Option<&FeatureDescriptor>) -> BTreeSet<PersonalDataType>,
    {
        let mut names = HashSet::new();
        let features_to_scope: Vec<FeatureDescriptor> = features_to_scope
            .into_iter()
            .filter(|feature| {
                let first = names.insert(feature.name().to_string());
                if !first {
                    trace!(
                        "Skipping duplicate feature name: {} ({})",
                        feature.name(),
                        feature.id()
                    );
                }
                first
            })
            .collect();
        let scope_keys: HashSet<K> = scope_keys.into_iter().collect();
        let scope_name = scope_name.into();

        let index = ScopedFeatureIndex::build(
            &features_to_scope,
            &scope_keys,
            &scope_name,
            personal_data_types,
        )?;

        debug!(
            "Created scoped aggregate builder '{}' with {} scoped features",
            scope_name,
            index.len()
        );

        Ok(Self {
            features_to_scope,
            scope_keys,
            scope_name,
            index,
        })
    }

    /// Build records from raw value maps keyed by scope key
    ///
    /// Keys outside the configured set and features absent from a partition
    /// contribute nothing to the result.
    pub fn build_aggregates(&self, partitions: &HashMap<K, FeatureValueMap>) -> DataRecord {
        self.merge_partitions(partitions.iter())
    }

    /// Build records from [`DataRecord`] partitions
    ///
    /// Fails if any partition holds a non-numeric continuous value.
    pub fn build_from_data_records(&self, partitions: &HashMap<K, DataRecord>) -> Result<DataRecord> {
        let converted = partitions
            .iter()
            .map(|(key, record)| Ok((key, data_record_values(record)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(self.merge_partitions(converted))
    }

    /// Build records from [`CompactDataRecord`] partitions
    pub fn build_from_compact_records(&self, partitions: &HashMap<K, CompactDataRecord>) -> DataRecord {
        self.merge_partitions(
            partitions
                .iter()
                .map(|(key, record)| (key, compact_record_values(record))),
        )
    }

    fn merge_partitions<'a, I, M>(&self, partitions: I) -> DataRecord
    where
        K: 'a,
        I: IntoIterator<Item = (&'a K, M)>,
        M: Borrow<FeatureValueMap>,
    {
        let mut record = DataRecord::new();

        for (key, values) in partitions {
            let values = values.borrow();

            if !self.scope_keys.contains(key) {
                trace!(
                    "Ignoring partition for unsupported key '{}' ({} values)",
                    key.scope_value(),
                    values.len()
                );
                continue;
            }

            for feature in &self.features_to_scope {
                let Some(scoped) = self.index.get(feature.name(), key) else {
                    continue;
                };

                match values.get(&feature.id()) {
                    Some(value) => record.set_continuous(scoped.id(), Value::Number(*value)),
                    None => trace!(
                        "No value for {} under key '{}'",
                        feature.name(),
                        key.scope_value()
                    ),
                }
            }
        }

        trace!("Built scoped aggregate record with {} features", record.len());
        record
    }

    /// Every scoped feature this builder can emit
    pub fn feature_context(&self) -> FeatureContext {
        FeatureContext::from_features(self.index.descriptors().cloned())
    }

    /// Scoped descriptor for a base feature name and key
    pub fn scoped_feature(&self, feature_name: &str, key: &K) -> Option<&FeatureDescriptor> {
        self.index.get(feature_name, key)
    }

    pub fn features_to_scope(&self) -> &[FeatureDescriptor] {
        &self.features_to_scope
    }

    pub fn scope_keys(&self) -> &HashSet<K> {
        &self.scope_keys
    }

    pub fn scope_name(&self) -> &str {
        &self.scope_name
    }

    pub fn index(&self) -> &ScopedFeatureIndex<K> {
        &self.index
    }
}

impl ScopedAggregateBuilder<String> {
    /// Create a builder from a declarative configuration
    pub fn from_config<R>(config: &ScopedAggregateConfig, personal_data_types: R) -> Result<Self>
    where
        R: Fn(Option<&FeatureDescriptor>) -> BTreeSet<PersonalDataType>,
    {
        Self::new(
            config.feature_descriptors(),
            config.scope_keys.iter().cloned(),
            config.scope_name.clone(),
            personal_data_types,
        )
    }
}
