//! Helpers for reporting on the compiled version of the library, both for calling applications and
//! for the `--version` output of the command line tool.

/// Reports the full version and various useful build settings as a well-formatted and
/// semi-structured string.
pub fn full_version() -> String {
    format!(
        "build-profile={} build-timestamp={} features={} repo-version={}",
        env!("BUILD_PROFILE"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_FEATURES"),
        env!("REPO_VERSION"),
    )
}

/// Only the core version information from the build, for when the full report is too noisy.
pub fn minimal_version() -> String {
    format!("repo-version={}", env!("REPO_VERSION"))
}
