use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;

use crate::acl::PermissionSet;
use crate::codec::parse_getfacl;
use crate::resolvers::{PermissionResolver, ResolutionError};

pub const DEFAULT_GETFACL_BINARY: &str = "/usr/bin/getfacl";

/// Resolves permissions by running the system `getfacl` tool and parsing its listing. This works
/// anywhere the acl utilities are installed but spawns a process per lookup, it is in no way
/// performant and callers checking many paths should prefer a native backend when one exists.
#[derive(Debug, Clone)]
pub struct GetfaclResolver {
    binary: PathBuf,
}

impl GetfaclResolver {
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn new() -> Self {
        Self {
            binary: PathBuf::from(DEFAULT_GETFACL_BINARY),
        }
    }

    /// Use a different getfacl executable, either an absolute path or a name looked up in
    /// `PATH`.
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }
}

impl GetfaclResolver {
    // failures are classified by their diagnostic text which is only stable in the C locale
    fn command(&self, path: &Path) -> Command {
        let mut command = Command::new(&self.binary);
        command
            .env("LC_ALL", "C")
            .arg("--absolute-names")
            .arg("--")
            .arg(path);

        command
    }
}

impl Default for GetfaclResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PermissionResolver for GetfaclResolver {
    async fn resolve(&self, path: &Path) -> Result<PermissionSet, ResolutionError> {
        tracing::debug!(binary = %self.binary.display(), path = %path.display(), "getfacl::resolve");

        let output = self
            .command(path)
            .output()
            .await
            .map_err(|err| match err.kind() {
                std::io::ErrorKind::NotFound => {
                    ResolutionError::ToolUnavailable(self.binary.display().to_string())
                }
                _ => ResolutionError::Io(err),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::debug!(status = ?output.status.code(), %stderr, "getfacl::failed");

            return Err(classify_failure(path, output.status.code(), stderr));
        }

        let listing = String::from_utf8(output.stdout).map_err(|_| {
            ResolutionError::Implementation("getfacl produced a non UTF-8 listing".to_string())
        })?;

        let permissions = parse_getfacl(&listing)?;
        tracing::trace!(?permissions, "getfacl::resolved");

        Ok(permissions)
    }
}

/// Maps an unsuccessful getfacl run onto the most specific error the diagnostic allows.
fn classify_failure(path: &Path, status: Option<i32>, stderr: String) -> ResolutionError {
    if stderr.contains("No such file or directory") {
        ResolutionError::NotFound(path.to_path_buf())
    } else if stderr.contains("Permission denied") {
        ResolutionError::PermissionDenied(path.to_path_buf())
    } else {
        ResolutionError::ToolFailure { status, stderr }
    }
}
