//! Runtime error types

use scopeagg_core::{CoreError, FeatureId};
use thiserror::Error;

/// Runtime error
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// A raw value could not be converted to a continuous feature value
    #[error("Conversion failed for feature {feature_id}: {source}")]
    Conversion {
        feature_id: i64,
        #[source]
        source: CoreError,
    },

    /// Two distinct (feature, key) pairs produced the same scoped feature id
    #[error("Duplicate scoped feature id {id}: '{first}' and '{second}'")]
    DuplicateFeatureId {
        id: FeatureId,
        first: String,
        second: String,
    },

    /// Configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
