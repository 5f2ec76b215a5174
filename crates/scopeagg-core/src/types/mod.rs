//! Type system for scoped aggregate features
//!
//! This module contains:
//! - Value types
//! - Feature descriptors
//! - Record containers
//! - Feature contexts

pub mod context;
pub mod feature;
pub mod record;
pub mod value;

pub use context::FeatureContext;
pub use feature::{FeatureConfig, FeatureDescriptor, FeatureId, FeatureType, PersonalDataType};
pub use record::{CompactDataRecord, DataRecord};
pub use value::Value;
