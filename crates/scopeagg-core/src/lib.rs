//! ScopeAgg Core - Core types for scoped aggregate features
//!
//! This crate provides the type system shared by the scoped aggregate runtime:
//! - Value types for raw feature values
//! - Feature descriptors and their numeric identifiers
//! - Record containers exchanged between pipeline stages
//! - Feature contexts (the schema of a set of features)
//! - Error types

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::CoreError;
pub use types::{
    CompactDataRecord, DataRecord, FeatureConfig, FeatureContext, FeatureDescriptor, FeatureId,
    FeatureType, PersonalDataType, Value,
};
