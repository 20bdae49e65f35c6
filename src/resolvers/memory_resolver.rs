use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::acl::PermissionSet;
use crate::resolvers::{PermissionResolver, ResolutionError};

/// A fixed table of permission sets keyed by path. Primarily intended for tests and for callers
/// that already have the ACL data on hand.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MemoryResolver {
    permissions: HashMap<PathBuf, PermissionSet>,
}

impl MemoryResolver {
    /// Loads a JSON object mapping paths to permission sets.
    #[cfg(feature = "serde")]
    pub fn from_json(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, permissions: PermissionSet) {
        self.permissions.insert(path.into(), permissions);
    }

    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: impl Into<PathBuf>, permissions: PermissionSet) -> Self {
        self.insert(path, permissions);
        self
    }
}

#[async_trait]
impl PermissionResolver for MemoryResolver {
    async fn resolve(&self, path: &Path) -> Result<PermissionSet, ResolutionError> {
        self.permissions
            .get(path)
            .cloned()
            .ok_or_else(|| ResolutionError::NotFound(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::acl::PermissionBits;

    #[tokio::test]
    async fn test_known_and_unknown_paths() {
        let set = PermissionSet::from_mode("alice", "eng", 0o640);
        let resolver = MemoryResolver::new().with("/srv/data", set.clone());

        assert_eq!(resolver.len(), 1);

        let resolved = resolver.resolve(Path::new("/srv/data")).await.unwrap();
        assert_eq!(resolved, set);

        let missing = resolver.resolve(Path::new("/srv/other")).await;
        assert!(matches!(missing, Err(ResolutionError::NotFound(p)) if p == Path::new("/srv/other")));
    }

    #[tokio::test]
    async fn test_insert_replaces() {
        let mut resolver = MemoryResolver::new();
        resolver.insert("/a", PermissionSet::from_mode("alice", "eng", 0o600));
        resolver.insert(
            "/a",
            PermissionSet::builder("bob", "eng")
                .owner(PermissionBits::ALL)
                .build(),
        );

        let resolved = resolver.resolve(Path::new("/a")).await.unwrap();
        assert_eq!(resolved.owner_name(), "bob");
        assert_eq!(resolver.len(), 1);
    }

    #[cfg(feature = "serde")]
    #[tokio::test]
    async fn test_json_fixture_round_trip() {
        let resolver = MemoryResolver::new().with(
            "/srv/data",
            PermissionSet::builder("alice", "eng")
                .mask(PermissionBits::from(0o5))
                .named_user("bob", PermissionBits::from(0o6))
                .build(),
        );

        let encoded = serde_json::to_string(&resolver).unwrap();
        let decoded = MemoryResolver::from_json(&encoded).unwrap();

        assert_eq!(
            decoded.resolve(Path::new("/srv/data")).await.unwrap(),
            resolver.resolve(Path::new("/srv/data")).await.unwrap()
        );
    }
}
