use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::acl::PermissionSet;
use crate::resolvers::{PermissionResolver, ResolutionError};

/// A native fallback for systems without the acl utilities. Only the classic permission mode is
/// read so the result is always a minimal ACL, extended entries present on the path are not
/// visible to this resolver.
///
/// No user database lookups are performed, the owner and group are named by their numeric IDs
/// (`"1000"`) and identities checked against these sets need to use the same numbering.
#[derive(Debug, Clone, Default)]
pub struct ModeResolver;

impl ModeResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PermissionResolver for ModeResolver {
    async fn resolve(&self, path: &Path) -> Result<PermissionSet, ResolutionError> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|err| match err.kind() {
                std::io::ErrorKind::NotFound => ResolutionError::NotFound(PathBuf::from(path)),
                std::io::ErrorKind::PermissionDenied => {
                    ResolutionError::PermissionDenied(PathBuf::from(path))
                }
                _ => ResolutionError::Io(err),
            })?;

        tracing::debug!(
            path = %path.display(),
            uid = metadata.uid(),
            gid = metadata.gid(),
            mode = %format!("{:o}", metadata.mode()),
            "mode_resolver::resolve"
        );

        Ok(PermissionSet::from_mode(
            metadata.uid().to_string(),
            metadata.gid().to_string(),
            metadata.mode(),
        ))
    }
}
