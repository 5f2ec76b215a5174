//! ScopeAgg Runtime - Scoped aggregate feature records
//!
//! Derives one synthetic feature per (base feature, scope key) pair and
//! re-labels key-partitioned raw feature values under those features.
//!
//! The (feature, key) index is computed eagerly when a
//! [`ScopedAggregateBuilder`] is constructed and never mutated afterwards, so a
//! builder can be shared across threads without locking. Its size is
//! `|features| x |keys|`; callers with high-cardinality keys should size
//! accordingly.

pub mod error;
pub mod scope;

// Re-export main types
pub use error::{Result, RuntimeError};
pub use scope::{
    compact_record_values, compose_scoped_name, data_record_values, inherit_personal_data_types,
    FeatureValueMap, ScopeKey, ScopedAggregateBuilder, ScopedAggregateConfig, ScopedFeatureIndex,
    ScopedFeatureSpec, ScopedName,
};
