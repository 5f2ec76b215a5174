//! Scoped aggregate features
//!
//! - `naming`: scoped feature name composition
//! - `index`: eager (feature, key) -> scoped descriptor index
//! - `adapter`: record container -> raw value map conversion
//! - `builder`: record building and feature context export
//! - `config`: declarative builder configuration

pub mod adapter;
pub mod builder;
pub mod config;
pub mod index;
pub mod naming;

pub use adapter::{compact_record_values, data_record_values, FeatureValueMap};
pub use builder::ScopedAggregateBuilder;
pub use config::{ScopedAggregateConfig, ScopedFeatureSpec};
pub use index::{inherit_personal_data_types, ScopeKey, ScopedFeatureIndex};
pub use naming::{compose_scoped_name, ScopedName};
