//! Ingestion adapters
//!
//! Convert the two record containers into the raw value map consumed by
//! [`ScopedAggregateBuilder::build_aggregates`](super::ScopedAggregateBuilder::build_aggregates).

use crate::error::{Result, RuntimeError};
use scopeagg_core::{CompactDataRecord, DataRecord, FeatureId};
use std::collections::HashMap;

/// Raw feature values of one key partition, keyed by base feature id
pub type FeatureValueMap = HashMap<FeatureId, f64>;

/// Continuous features of a [`DataRecord`]
///
/// Fails on the first value that is not numeric.
pub fn data_record_values(record: &DataRecord) -> Result<FeatureValueMap> {
    record
        .continuous_features
        .iter()
        .map(|(id, value)| {
            value
                .as_number()
                .map(|n| (FeatureId(*id), n))
                .map_err(|source| RuntimeError::Conversion {
                    feature_id: *id,
                    source,
                })
        })
        .collect()
}

/// Continuous features of a [`CompactDataRecord`], widened
pub fn compact_record_values(record: &CompactDataRecord) -> FeatureValueMap {
    record
        .continuous_features
        .as_ref()
        .map(|features| {
            features
                .iter()
                .map(|(id, value)| (FeatureId::from(*id), f64::from(*value)))
                .collect()
        })
        .unwrap_or_default()
}
