use std::path::{Path, PathBuf};

use futures::future::join_all;

use crate::acl::{AccessMode, Identity};
use crate::engine::{self, AccessDecision};
use crate::error::AclCheckResult;
use crate::resolvers::{PermissionResolver, ResolutionError};

/// Answers access questions about paths by pairing a [`PermissionResolver`] with the decision
/// engine. The permission set of a path is resolved completely before the engine looks at it and
/// is thrown away once the decision has been made, nothing is cached between checks.
#[derive(Debug, Clone)]
pub struct AccessChecker<R> {
    resolver: R,
}

impl<R: PermissionResolver> AccessChecker<R> {
    /// Returns whether the identity is granted the requested mode on the path. Resolution
    /// failures are passed back unchanged, it is up to the caller to treat them as a denial.
    pub async fn check(
        &self,
        identity: &Identity,
        path: impl AsRef<Path>,
        mode: AccessMode,
    ) -> Result<bool, ResolutionError> {
        let decision = self.explain(identity, path, mode).await?;
        Ok(decision.is_granted())
    }

    /// Explains the decision for every path, in the order provided. The paths are resolved
    /// concurrently but each decision only ever sees its own fully resolved permission set.
    pub async fn check_all<P: AsRef<Path>>(
        &self,
        identity: &Identity,
        paths: &[P],
        mode: AccessMode,
    ) -> Vec<(PathBuf, Result<AccessDecision, ResolutionError>)> {
        let checks = paths.iter().map(|path| async move {
            let path = path.as_ref();
            (path.to_path_buf(), self.explain(identity, path, mode).await)
        });

        join_all(checks).await
    }

    /// A variant of [`Self::check`] that takes the requested mode in its `rwx` text form. Invalid
    /// or empty modes are rejected before anything gets resolved.
    pub async fn check_str(
        &self,
        identity: &Identity,
        path: impl AsRef<Path>,
        mode: &str,
    ) -> AclCheckResult<bool> {
        let mode: AccessMode = mode.parse()?;
        Ok(self.check(identity, path, mode).await?)
    }

    pub async fn explain(
        &self,
        identity: &Identity,
        path: impl AsRef<Path>,
        mode: AccessMode,
    ) -> Result<AccessDecision, ResolutionError> {
        let path = path.as_ref();
        let permissions = self.resolver.resolve(path).await?;
        let decision = engine::evaluate(identity, &permissions, mode);

        tracing::debug!(
            path = %path.display(),
            user = identity.name(),
            %mode,
            %decision,
            "access_checker::decision"
        );

        Ok(decision)
    }

    /// Deny by default form of [`Self::check`]. Any failure to resolve the permissions of the
    /// path is logged and results in a denial.
    pub async fn is_permitted(
        &self,
        identity: &Identity,
        path: impl AsRef<Path>,
        mode: AccessMode,
    ) -> bool {
        let path = path.as_ref();

        match self.check(identity, path, mode).await {
            Ok(granted) => granted,
            Err(err) => {
                tracing::warn!(path = %path.display(), "denying access, unable to resolve permissions: {err}");
                false
            }
        }
    }

    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }
}
