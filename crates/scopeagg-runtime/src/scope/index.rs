//! Scoped feature index
//!
//! Maps every (base feature name, scope key) pair to the scoped descriptor
//! generated for it. The index is built once from the full cross product of
//! features and keys and is read-only afterwards.

use super::naming::{compose_scoped_name, ScopedName};
use crate::error::{Result, RuntimeError};
use scopeagg_core::{FeatureConfig, FeatureDescriptor, FeatureId, FeatureType, PersonalDataType};
use std::collections::{BTreeSet, HashMap};
use std::fmt::Display;
use std::hash::Hash;
use tracing::{debug, trace};

/// A value that features can be scoped by
///
/// Keys must hash and compare consistently with their string rendering: two
/// keys that render to the same string produce the same scoped feature id.
pub trait ScopeKey: Eq + Hash + Clone {
    /// Canonical string form embedded in scoped feature names
    fn scope_value(&self) -> String;
}

impl<T> ScopeKey for T
where
    T: Eq + Hash + Clone + Display,
{
    fn scope_value(&self) -> String {
        self.to_string()
    }
}

/// Privacy rule that passes the base feature's tags through unchanged
pub fn inherit_personal_data_types(
    feature: Option<&FeatureDescriptor>,
) -> BTreeSet<PersonalDataType> {
    feature
        .map(|f| f.personal_data_types().clone())
        .unwrap_or_default()
}

/// Immutable (feature name, key) -> scoped descriptor index
#[derive(Debug, Clone)]
pub struct ScopedFeatureIndex<K> {
    /// Base feature name -> key -> scoped descriptor
    entries: HashMap<String, HashMap<K, FeatureDescriptor>>,
    len: usize,
}

impl<K: ScopeKey> ScopedFeatureIndex<K> {
    /// Build the index over the cross product of `features` and `keys`
    ///
    /// `personal_data_types` is applied to each base feature to tag its scoped
    /// descriptors. Features sharing a name are indexed once. Fails if two
    /// different pairs would produce the same scoped id.
    pub fn build<'a, R>(
        features: impl IntoIterator<Item = &'a FeatureDescriptor>,
        keys: impl IntoIterator<Item = &'a K>,
        scope_name: &str,
        personal_data_types: R,
    ) -> Result<Self>
    where
        K: 'a,
        R: Fn(Option<&FeatureDescriptor>) -> BTreeSet<PersonalDataType>,
    {
        let keys: Vec<(&K, String)> = keys.into_iter().map(|k| (k, k.scope_value())).collect();

        let mut entries: HashMap<String, HashMap<K, FeatureDescriptor>> = HashMap::new();
        let mut owners: HashMap<FeatureId, String> = HashMap::new();
        let mut len = 0;

        for feature in features {
            if entries.contains_key(feature.name()) {
                trace!("Skipping duplicate feature name: {}", feature.name());
                continue;
            }

            let tags = personal_data_types(Some(feature));
            let mut by_key = HashMap::with_capacity(keys.len());

            for (key, scope_value) in &keys {
                let ScopedName { name, extensions } =
                    compose_scoped_name(feature.name(), scope_value, scope_name);

                let descriptor = FeatureDescriptor::new(FeatureConfig {
                    name,
                    feature_type: FeatureType::Continuous,
                    extension_dimensions: ScopedName::extension_dimensions(),
                    personal_data_types: tags.clone(),
                    extensions,
                });

                if let Some(first) = owners.insert(descriptor.id(), descriptor.full_name()) {
                    return Err(RuntimeError::DuplicateFeatureId {
                        id: descriptor.id(),
                        first,
                        second: descriptor.full_name(),
                    });
                }

                by_key.insert((*key).clone(), descriptor);
                len += 1;
            }

            entries.insert(feature.name().to_string(), by_key);
        }

        debug!(
            "Built scoped feature index: {} features x {} keys = {} entries (scope: {})",
            entries.len(),
            keys.len(),
            len,
            scope_name
        );

        Ok(Self { entries, len })
    }

    /// Scoped descriptor for a base feature name and key
    pub fn get(&self, feature_name: &str, key: &K) -> Option<&FeatureDescriptor> {
        self.entries.get(feature_name)?.get(key)
    }

    /// All scoped descriptors, in no particular order
    pub fn descriptors(&self) -> impl Iterator<Item = &FeatureDescriptor> {
        self.entries.values().flat_map(|by_key| by_key.values())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn base_features() -> Vec<FeatureDescriptor> {
        vec![
            FeatureDescriptor::continuous("u.pair.count", [PersonalDataType::UserId]),
            FeatureDescriptor::continuous("u.pair.sum", []),
            FeatureDescriptor::continuous("total", []),
        ]
    }

    #[test]
    fn test_index_is_full_cross_product() {
        let keys = vec!["Recap".to_string(), "WhoToFollow".to_string()];
        let features = base_features();
        let index =
            ScopedFeatureIndex::build(&features, &keys, "InjectionType", inherit_personal_data_types)
                .unwrap();

        assert_eq!(index.len(), 6);
        assert_eq!(index.descriptors().count(), 6);

        let ids: HashSet<FeatureId> = index.descriptors().map(|d| d.id()).collect();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn test_lookup_by_name_and_key() {
        let keys = vec!["Recap".to_string()];
        let features = base_features();
        let index =
            ScopedFeatureIndex::build(&features, &keys, "InjectionType", inherit_personal_data_types)
                .unwrap();

        let scoped = index.get("u.pair.count", &"Recap".to_string()).unwrap();
        assert_eq!(scoped.name(), "u.scoped.pair.count");
        assert_eq!(scoped.extension("scope"), Some("Recap"));
        assert_eq!(scoped.extension("scope_name"), Some("InjectionType"));
        assert_eq!(scoped.feature_type(), FeatureType::Continuous);
        assert_eq!(
            scoped.extension_dimensions(),
            &["scope_name".to_string(), "scope".to_string()]
        );

        assert!(index.get("u.pair.count", &"Unknown".to_string()).is_none());
        assert!(index.get("missing", &"Recap".to_string()).is_none());
    }

    #[test]
    fn test_privacy_tags_come_from_rule() {
        let keys = vec![1u32];
        let features = base_features();

        let inherited =
            ScopedFeatureIndex::build(&features, &keys, "Slot", inherit_personal_data_types)
                .unwrap();
        let scoped = inherited.get("u.pair.count", &1).unwrap();
        assert!(scoped.personal_data_types().contains(&PersonalDataType::UserId));

        let fixed = ScopedFeatureIndex::build(&features, &keys, "Slot", |_| {
            [PersonalDataType::EngagementsPrivate].into_iter().collect()
        })
        .unwrap();
        let scoped = fixed.get("total", &1).unwrap();
        assert_eq!(scoped.personal_data_types().len(), 1);
        assert!(scoped
            .personal_data_types()
            .contains(&PersonalDataType::EngagementsPrivate));
    }

    #[test]
    fn test_keys_with_same_rendering_collide() {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        enum Surface {
            Home,
            HomeLatest,
        }

        impl Display for Surface {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    Surface::Home | Surface::HomeLatest => write!(f, "home"),
                }
            }
        }

        let keys = vec![Surface::Home, Surface::HomeLatest];
        let features = base_features();
        let result = ScopedFeatureIndex::build(&features, &keys, "Surface", inherit_personal_data_types);

        assert!(matches!(result, Err(RuntimeError::DuplicateFeatureId { .. })));
    }

    #[test]
    fn test_duplicate_feature_names_are_indexed_once() {
        let features = vec![
            FeatureDescriptor::continuous("a.b", []),
            FeatureDescriptor::continuous("a.b", [PersonalDataType::UserId]),
        ];
        let keys = vec!["k".to_string()];
        let index =
            ScopedFeatureIndex::build(&features, &keys, "S", inherit_personal_data_types).unwrap();

        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_empty_inputs() {
        let features: Vec<FeatureDescriptor> = Vec::new();
        let keys = vec!["k".to_string()];
        let index =
            ScopedFeatureIndex::build(&features, &keys, "S", inherit_personal_data_types).unwrap();
        assert!(index.is_empty());

        let features = base_features();
        let keys: Vec<String> = Vec::new();
        let index =
            ScopedFeatureIndex::build(&features, &keys, "S", inherit_personal_data_types).unwrap();
        assert!(index.is_empty());
    }
}
