use std::path::PathBuf;
use std::process::ExitCode;

use aclcheck::prelude::*;
use clap::{ArgAction, Parser};

/// Check whether POSIX ACLs grant a user access to one or more paths.
#[derive(Debug, Parser)]
#[command(name = "aclcheck", version = env!("REPO_VERSION"), about)]
struct Cli {
    /// Name of the user requesting access.
    #[arg(short, long)]
    user: String,

    /// A group the user is a member of, may be repeated.
    #[arg(short, long = "group")]
    groups: Vec<String>,

    /// Requested access as any combination of r, w, and x.
    #[arg(short, long, default_value = "r")]
    mode: AccessMode,

    /// Print the rule that produced each decision.
    #[arg(long)]
    explain: bool,

    /// Only consult the classic permission mode with numeric owner and group names, ignoring any
    /// extended ACL entries.
    #[arg(long)]
    mode_only: bool,

    /// getfacl executable used to read ACLs.
    #[cfg(feature = "getfacl")]
    #[arg(long, env = "ACLCHECK_GETFACL", default_value = DEFAULT_GETFACL_BINARY)]
    getfacl: PathBuf,

    /// Increase logging verbosity, may be repeated.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[arg(required = true)]
    paths: Vec<PathBuf>,
}

impl Cli {
    fn resolver(&self) -> AclCheckResult<Box<dyn PermissionResolver>> {
        if self.mode_only {
            return mode_resolver();
        }

        #[cfg(feature = "getfacl")]
        return Ok(Box::new(GetfaclResolver::new().with_binary(&self.getfacl)));

        #[cfg(not(feature = "getfacl"))]
        mode_resolver()
    }
}

#[cfg(unix)]
fn mode_resolver() -> AclCheckResult<Box<dyn PermissionResolver>> {
    Ok(Box::new(ModeResolver::new()))
}

#[cfg(not(unix))]
fn mode_resolver() -> AclCheckResult<Box<dyn PermissionResolver>> {
    Err(AclCheckError::from("mode based resolution is only available on unix"))
}

fn init_logging(verbosity: u8) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing::Level;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{EnvFilter, Layer};

    let default_level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(std::io::stderr());
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(non_blocking_writer)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(stderr_layer).init();

    guard
}

async fn run(cli: &Cli) -> AclCheckResult<bool> {
    let identity = Identity::new(cli.user.as_str(), cli.groups.iter().map(String::as_str));
    let checker = AccessChecker::new(cli.resolver()?);

    check_paths(&checker, &identity, &cli.paths, cli.mode, cli.explain).await
}

/// Prints a verdict line per path. Returns true only when every path was granted.
async fn check_paths<R: PermissionResolver>(
    checker: &AccessChecker<R>,
    identity: &Identity,
    paths: &[PathBuf],
    mode: AccessMode,
    explain: bool,
) -> AclCheckResult<bool> {
    let mut all_granted = true;
    let mut failures = 0;

    for (path, result) in checker.check_all(identity, paths, mode).await {
        match result {
            Ok(decision) => {
                let verdict = if decision.is_granted() { "granted" } else { "denied" };
                all_granted &= decision.is_granted();

                if explain {
                    println!("{verdict}\t{}\t{}", path.display(), decision.reason());
                } else {
                    println!("{verdict}\t{}", path.display());
                }
            }
            Err(err) => {
                tracing::error!(path = %path.display(), "{err}");
                println!("error\t{}\t{err}", path.display());
                failures += 1;
            }
        }
    }

    if failures > 0 {
        return Err(AclCheckError::from(format!(
            "failed to resolve permissions for {failures} path(s)"
        )));
    }

    Ok(all_granted)
}

/// 0 when everything was granted, 1 when any path was denied, 2 when the check couldn't be made.
fn exit_status(outcome: &AclCheckResult<bool>) -> u8 {
    match outcome {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(_) => 2,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = init_logging(cli.verbose);

    tracing::debug!("running aclcheck {}", full_version());

    let outcome = run(&cli).await;
    if let Err(err) = &outcome {
        eprintln!("aclcheck: {err}");
    }

    ExitCode::from(exit_status(&outcome))
}
