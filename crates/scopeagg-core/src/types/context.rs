//! Feature contexts
//!
//! A feature context is the complete set of feature descriptors a consumer may
//! see in a record. It is what gets registered with downstream schema systems.

use super::feature::{FeatureDescriptor, FeatureId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Ordered, duplicate-free collection of feature descriptors
///
/// Serializes as a plain list of descriptors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<FeatureDescriptor>", into = "Vec<FeatureDescriptor>")]
pub struct FeatureContext {
    features: Vec<FeatureDescriptor>,
    /// Feature id -> position in `features`
    positions: HashMap<FeatureId, usize>,
}

impl FeatureContext {
    /// Build a context from descriptors
    ///
    /// Descriptors are sorted by full name, then id. Duplicate ids keep the
    /// first occurrence.
    pub fn from_features(features: impl IntoIterator<Item = FeatureDescriptor>) -> Self {
        let mut seen = HashSet::new();
        let mut features: Vec<FeatureDescriptor> = features
            .into_iter()
            .filter(|feature| seen.insert(feature.id()))
            .collect();

        features.sort_by(|a, b| {
            a.full_name()
                .cmp(&b.full_name())
                .then_with(|| a.id().cmp(&b.id()))
        });

        let positions = features
            .iter()
            .enumerate()
            .map(|(position, feature)| (feature.id(), position))
            .collect();

        log::debug!("Built feature context with {} features", features.len());
        Self {
            features,
            positions,
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FeatureDescriptor> {
        self.features.iter()
    }

    pub fn get(&self, id: FeatureId) -> Option<&FeatureDescriptor> {
        self.positions
            .get(&id)
            .and_then(|position| self.features.get(*position))
    }

    pub fn contains(&self, feature: &FeatureDescriptor) -> bool {
        self.get(feature.id()).is_some()
    }

    /// Full names of all features, in context order
    pub fn feature_names(&self) -> Vec<String> {
        self.features.iter().map(|f| f.full_name()).collect()
    }
}

impl From<Vec<FeatureDescriptor>> for FeatureContext {
    fn from(features: Vec<FeatureDescriptor>) -> Self {
        Self::from_features(features)
    }
}

impl From<FeatureContext> for Vec<FeatureDescriptor> {
    fn from(context: FeatureContext) -> Self {
        context.features
    }
}

impl<'a> IntoIterator for &'a FeatureContext {
    type Item = &'a FeatureDescriptor;
    type IntoIter = std::slice::Iter<'a, FeatureDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}

impl IntoIterator for FeatureContext {
    type Item = FeatureDescriptor;
    type IntoIter = std::vec::IntoIter<FeatureDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.into_iter()
    }
}
