//! Static table of version adapters.

use std::collections::HashMap;
use std::sync::Arc;

use mc_bridge_proto::VersionIdentifier;

use crate::adapter::CapabilityAdapter;
use crate::adapters;
use crate::error::RegistryError;

/// Exact-match lookup from host revision to adapter.
///
/// There is no nearest-version fallback: adjacent revisions are not assumed
/// to share internal representations, so an unlisted revision is unsupported.
pub struct AdapterRegistry {
    by_version: HashMap<VersionIdentifier, Arc<dyn CapabilityAdapter>>,
}

impl AdapterRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Every adapter compiled into this build.
    pub fn builtin() -> Result<Self, RegistryError> {
        adapters::register_builtin(Self::builder()).build()
    }

    pub fn resolve(&self, version: &VersionIdentifier) -> Option<Arc<dyn CapabilityAdapter>> {
        self.by_version.get(version).cloned()
    }

    /// Registered identifiers, in ascending version order.
    pub fn versions(&self) -> Vec<&VersionIdentifier> {
        let mut versions: Vec<_> = self.by_version.keys().collect();
        versions.sort();
        versions
    }

    pub fn is_empty(&self) -> bool {
        self.by_version.is_empty()
    }
}

/// Collects registrations; [`RegistryBuilder::build`] rejects a bad table.
#[derive(Default)]
pub struct RegistryBuilder {
    entries: Vec<(Vec<String>, Arc<dyn CapabilityAdapter>)>,
}

impl RegistryBuilder {
    pub fn register(
        self,
        versions: &[&str],
        adapter: impl CapabilityAdapter + 'static,
    ) -> Self {
        self.register_shared(versions, Arc::new(adapter))
    }

    pub fn register_shared(
        mut self,
        versions: &[&str],
        adapter: Arc<dyn CapabilityAdapter>,
    ) -> Self {
        let versions = versions.iter().map(|v| (*v).to_owned()).collect();
        self.entries.push((versions, adapter));
        self
    }

    pub fn build(self) -> Result<AdapterRegistry, RegistryError> {
        let mut by_version: HashMap<VersionIdentifier, Arc<dyn CapabilityAdapter>> =
            HashMap::new();
        for (versions, adapter) in self.entries {
            if versions.is_empty() {
                return Err(RegistryError::NoVersions(adapter.name()));
            }
            for raw in versions {
                let version = VersionIdentifier::new(raw.as_str()).map_err(|_| {
                    RegistryError::InvalidVersion {
                        adapter: adapter.name(),
                        raw: raw.clone(),
                    }
                })?;
                if let Some(existing) = by_version.get(&version) {
                    return Err(RegistryError::DuplicateVersion {
                        version,
                        first: existing.name(),
                        second: adapter.name(),
                    });
                }
                by_version.insert(version, Arc::clone(&adapter));
            }
        }
        Ok(AdapterRegistry { by_version })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::NamedAdapter;

    fn v(s: &str) -> VersionIdentifier {
        VersionIdentifier::new(s).unwrap()
    }

    #[test]
    fn every_registered_version_resolves_to_its_adapter() {
        let registry = AdapterRegistry::builder()
            .register(&["1.17", "v1_17_R1"], NamedAdapter::new("a17", "1.17"))
            .register(&["1.18"], NamedAdapter::new("a18", "1.18"))
            .build()
            .unwrap();

        for (version, name) in [("1.17", "a17"), ("v1_17_R1", "a17"), ("1.18", "a18")] {
            let adapter = registry.resolve(&v(version)).unwrap();
            assert_eq!(adapter.name(), name);
        }
        assert!(registry.resolve(&v("1.19")).is_none());
        assert!(registry.resolve(&v("9.9.9-unknown")).is_none());
    }

    #[test]
    fn no_nearest_version_fallback() {
        let registry = AdapterRegistry::builder()
            .register(&["1.18"], NamedAdapter::new("a18", "1.18"))
            .build()
            .unwrap();
        assert!(registry.resolve(&v("1.18.1")).is_none());
        assert!(registry.resolve(&v("1.18.0")).is_none());
    }

    #[test]
    fn registration_order_is_irrelevant() {
        let forward = AdapterRegistry::builder()
            .register(&["1.17"], NamedAdapter::new("a17", "1.17"))
            .register(&["1.18"], NamedAdapter::new("a18", "1.18"))
            .build()
            .unwrap();
        let reverse = AdapterRegistry::builder()
            .register(&["1.18"], NamedAdapter::new("a18", "1.18"))
            .register(&["1.17"], NamedAdapter::new("a17", "1.17"))
            .build()
            .unwrap();
        for version in ["1.17", "1.18"] {
            assert_eq!(
                forward.resolve(&v(version)).unwrap().name(),
                reverse.resolve(&v(version)).unwrap().name()
            );
        }
        assert_eq!(forward.versions(), reverse.versions());
    }

    #[test]
    fn duplicate_version_fails_build() {
        let result = AdapterRegistry::builder()
            .register(&["1.18"], NamedAdapter::new("first", "1.18"))
            .register(&["1.19", "1.18"], NamedAdapter::new("second", "1.19"))
            .build();
        match result {
            Err(RegistryError::DuplicateVersion {
                version,
                first,
                second,
            }) => {
                assert_eq!(version.as_str(), "1.18");
                assert_eq!(first, "first");
                assert_eq!(second, "second");
            }
            Err(other) => panic!("expected DuplicateVersion, got {other:?}"),
            Ok(_) => panic!("expected DuplicateVersion, build succeeded"),
        }
    }

    #[test]
    fn empty_or_invalid_versions_fail_build() {
        assert!(matches!(
            AdapterRegistry::builder()
                .register(&[], NamedAdapter::new("none", "1.18"))
                .build(),
            Err(RegistryError::NoVersions("none"))
        ));
        assert!(matches!(
            AdapterRegistry::builder()
                .register(&[" "], NamedAdapter::new("blank", "1.18"))
                .build(),
            Err(RegistryError::InvalidVersion { adapter: "blank", .. })
        ));
    }

    #[test]
    fn builtin_table_is_consistent() {
        let registry = AdapterRegistry::builtin().unwrap();
        assert!(!registry.is_empty());
        for version in registry.versions() {
            assert!(registry.resolve(version).is_some());
        }
    }

    #[test]
    fn versions_sorted() {
        let registry = AdapterRegistry::builder()
            .register(&["1.18", "1.9"], NamedAdapter::new("a", "1.18"))
            .build()
            .unwrap();
        let versions: Vec<&str> = registry.versions().iter().map(|v| v.as_str()).collect();
        assert_eq!(versions, ["1.9", "1.18"]);
    }
}
