use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::acl::PermissionSet;
use crate::codec::GetfaclParseError;

/// The seam between the decision engine and wherever ACL metadata actually lives. Implementors
/// turn a path into a fully materialized [`PermissionSet`], the engine never sees partial results
/// and never guesses at a default when resolution fails.
///
/// Any backend is interchangeable as long as it honors this contract: parsing the output of a
/// system tool, native ACL syscalls, or a set of test fixtures.
#[async_trait]
pub trait PermissionResolver: Send + Sync {
    /// Produce the complete permission picture of the provided path. A single call is one unit
    /// of work, implementors shouldn't return until every entry (including the default ACL of a
    /// directory) has been collected.
    async fn resolve(&self, path: &Path) -> Result<PermissionSet, ResolutionError>;
}

#[async_trait]
impl<R: PermissionResolver + ?Sized> PermissionResolver for Box<R> {
    async fn resolve(&self, path: &Path) -> Result<PermissionSet, ResolutionError> {
        (**self).resolve(path).await
    }
}

#[async_trait]
impl<R: PermissionResolver + ?Sized> PermissionResolver for std::sync::Arc<R> {
    async fn resolve(&self, path: &Path) -> Result<PermissionSet, ResolutionError> {
        (**self).resolve(path).await
    }
}

/// Failures to produce a [`PermissionSet`] for a path. Callers must treat every one of these as a
/// denial, a resolution failure never grants access.
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    /// An error specific to the underlying implementation that doesn't fit any of the other
    /// categories.
    #[error("implementation specific error: {0}")]
    Implementation(String),

    #[error("an I/O error occurred: {0}")]
    Io(#[from] std::io::Error),

    /// The ACL listing was produced but couldn't be understood.
    #[error("failed to parse acl listing: {0}")]
    Malformed(#[from] GetfaclParseError),

    #[error("path does not exist: {}", .0.display())]
    NotFound(PathBuf),

    /// The resolver isn't allowed to read the ACL metadata of the path. This says nothing about
    /// the access the requesting identity would have had.
    #[error("insufficient privilege to read acl of {}", .0.display())]
    PermissionDenied(PathBuf),

    /// The external tool ran but reported a failure that couldn't be attributed to a more
    /// specific cause.
    #[error("acl tool exited unsuccessfully (status {status:?}): {stderr}")]
    ToolFailure { status: Option<i32>, stderr: String },

    /// The external tool needed to read ACLs isn't installed or couldn't be launched.
    #[error("acl tool unavailable: {0}")]
    ToolUnavailable(String),
}
