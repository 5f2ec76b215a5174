//! Feature descriptors
//!
//! A feature descriptor is the immutable identity of one feature column: a
//! numeric id, a dotted name, a value type, privacy tags and an ordered list of
//! extension attributes. Descriptors compare and hash by id only.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use twox_hash::XxHash64;

/// Seed for feature id hashing. Changing it renumbers every feature.
const FEATURE_ID_SEED: u64 = 0;

/// Numeric feature identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureId(pub i64);

impl FeatureId {
    /// Derive the id of a feature from its name and extensions
    ///
    /// The id is the low 32 bits of a stable xxHash64 of [`canonical_name`],
    /// sign-extended, so the same (name, extensions) pair always maps to the
    /// same id across processes and every derived id fits a
    /// [`CompactDataRecord`](super::record::CompactDataRecord) key.
    pub fn derive(name: &str, extensions: &[(String, String)]) -> Self {
        let mut hasher = XxHash64::with_seed(FEATURE_ID_SEED);
        hasher.write(canonical_name(name, extensions).as_bytes());
        FeatureId(i64::from(hasher.finish() as u32 as i32))
    }

    pub fn as_i64(self) -> i64 {
        self.0
    }

    /// Narrow to the 32-bit id used by compact records
    pub fn to_compact(self) -> Result<i32> {
        i32::try_from(self.0).map_err(|_| {
            CoreError::InvalidValue(format!("feature id {} does not fit in 32 bits", self.0))
        })
    }
}

impl From<i64> for FeatureId {
    fn from(id: i64) -> Self {
        FeatureId(id)
    }
}

impl From<i32> for FeatureId {
    fn from(id: i32) -> Self {
        FeatureId(i64::from(id))
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Render a name with its extensions, e.g. `a.scoped.b(scope_name=X,scope=Y)`
pub fn canonical_name(name: &str, extensions: &[(String, String)]) -> String {
    if extensions.is_empty() {
        return name.to_string();
    }

    let rendered: Vec<String> = extensions
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect();
    format!("{}({})", name, rendered.join(","))
}

/// Declared value type of a feature
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureType {
    /// Real-valued feature
    #[default]
    Continuous,
    /// Boolean feature
    Binary,
    /// Integer-valued feature
    Discrete,
    /// Free text feature
    Text,
}

impl FeatureType {
    pub fn type_name(&self) -> &'static str {
        match self {
            FeatureType::Continuous => "continuous",
            FeatureType::Binary => "binary",
            FeatureType::Discrete => "discrete",
            FeatureType::Text => "text",
        }
    }
}

/// Personal data classification attached to a feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalDataType {
    UserId,
    DeviceId,
    IpAddress,
    Location,
    EngagementsPrivate,
    EngagementsPublic,
    UserState,
    ContentId,
}

/// Everything needed to construct a [`FeatureDescriptor`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureConfig {
    pub name: String,
    pub feature_type: FeatureType,
    /// Declared extension dimensions. Duplicates are kept as given.
    pub extension_dimensions: Vec<String>,
    pub personal_data_types: BTreeSet<PersonalDataType>,
    /// Extension attributes, in declaration order
    pub extensions: Vec<(String, String)>,
}

impl FeatureConfig {
    /// Create a config for a continuous feature with no tags or extensions
    pub fn continuous(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Immutable feature descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureDescriptor {
    id: FeatureId,
    name: String,
    feature_type: FeatureType,
    #[serde(default)]
    personal_data_types: BTreeSet<PersonalDataType>,
    #[serde(default)]
    extension_dimensions: Vec<String>,
    #[serde(default)]
    extensions: Vec<(String, String)>,
}

impl FeatureDescriptor {
    /// Construct a descriptor, deriving its id from name and extensions
    pub fn new(config: FeatureConfig) -> Self {
        let id = FeatureId::derive(&config.name, &config.extensions);
        Self::with_id(id, config)
    }

    /// Construct a descriptor whose id was assigned elsewhere
    pub fn with_id(id: FeatureId, config: FeatureConfig) -> Self {
        log::trace!("Created feature descriptor {} ({})", config.name, id);

        Self {
            id,
            name: config.name,
            feature_type: config.feature_type,
            personal_data_types: config.personal_data_types,
            extension_dimensions: config.extension_dimensions,
            extensions: config.extensions,
        }
    }

    /// Shorthand for a continuous feature with the given privacy tags
    pub fn continuous(
        name: impl Into<String>,
        personal_data_types: impl IntoIterator<Item = PersonalDataType>,
    ) -> Self {
        Self::new(FeatureConfig {
            personal_data_types: personal_data_types.into_iter().collect(),
            ..FeatureConfig::continuous(name)
        })
    }

    pub fn id(&self) -> FeatureId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn feature_type(&self) -> FeatureType {
        self.feature_type
    }

    pub fn personal_data_types(&self) -> &BTreeSet<PersonalDataType> {
        &self.personal_data_types
    }

    pub fn extension_dimensions(&self) -> &[String] {
        &self.extension_dimensions
    }

    pub fn extensions(&self) -> &[(String, String)] {
        &self.extensions
    }

    /// Value of the first extension with the given key
    pub fn extension(&self, key: &str) -> Option<&str> {
        self.extensions
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Name including rendered extensions
    pub fn full_name(&self) -> String {
        canonical_name(&self.name, &self.extensions)
    }
}

impl PartialEq for FeatureDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for FeatureDescriptor {}

impl Hash for FeatureDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for FeatureDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.full_name(), self.feature_type.type_name())
    }
}
