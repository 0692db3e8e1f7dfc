//! External compiler invocation.
//!
//! Runs `<compiler> -std=c++17 [-I dir] -c <file> -o /dev/null` with a time
//! budget. Only the exit status matters; stderr is kept for the report.

use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::process::Command;
use tracing::debug;

use crate::config::CompilerConfig;
use cq_core::{FailureKind, VerifyError};

#[cfg(windows)]
const NULL_OUTPUT: &str = "NUL";
#[cfg(not(windows))]
const NULL_OUTPUT: &str = "/dev/null";

/// Budget for `<compiler> --version`.
pub const VERSION_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome of a single compiler invocation.
#[derive(Debug, Clone)]
pub struct CompileOutcome {
    /// None on success
    pub failure: Option<FailureKind>,
    pub duration: Duration,
}

/// Build the compiler command for `file`.
pub fn command(compiler: &CompilerConfig, file: &Path, include_dir: Option<&Path>) -> Command {
    let mut cmd = Command::new(&compiler.program);
    cmd.args(&compiler.leading_args).arg(&compiler.std_flag);
    if let Some(dir) = include_dir {
        cmd.arg("-I").arg(dir);
    }
    cmd.arg("-c")
        .arg(file)
        .arg("-o")
        .arg(NULL_OUTPUT)
        .stdin(Stdio::null())
        .kill_on_drop(true);
    cmd
}

/// Compile `file` and wait at most `timeout`.
///
/// A timed-out compiler is killed when its future is dropped.
pub async fn compile(
    compiler: &CompilerConfig,
    file: &Path,
    include_dir: Option<&Path>,
    timeout: Duration,
) -> CompileOutcome {
    let start = Instant::now();
    let mut cmd = command(compiler, file, include_dir);
    debug!(command = ?cmd.as_std(), ?timeout, "invoking compiler");

    let result = tokio::time::timeout(timeout, cmd.output()).await;
    let duration = start.elapsed();

    let failure = match result {
        Ok(Ok(output)) if output.status.success() => None,
        Ok(Ok(output)) => Some(FailureKind::Compiler {
            stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
        }),
        Ok(Err(e)) => Some(FailureKind::Spawn {
            reason: format!("{}: {}", compiler.program, e),
        }),
        Err(_) => Some(FailureKind::Timeout { after: timeout }),
    };

    debug!(file = %file.display(), ?duration, ok = failure.is_none(), "compiler finished");

    CompileOutcome { failure, duration }
}

/// Check that the compiler can be started at all.
///
/// Runs `<compiler> [leading_args] --version` and returns its first output line.
pub async fn check_version(
    compiler: &CompilerConfig,
    timeout: Duration,
) -> Result<String, VerifyError> {
    let unavailable = |reason: String| VerifyError::CompilerUnavailable {
        program: compiler.program.clone(),
        reason,
    };

    let output = tokio::time::timeout(
        timeout,
        Command::new(&compiler.program)
            .args(&compiler.leading_args)
            .arg("--version")
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output(),
    )
    .await
    .map_err(|_| unavailable(format!("--version timed out after {:?}", timeout)))?
    .map_err(|e| unavailable(e.to_string()))?;

    if !output.status.success() {
        return Err(unavailable(format!("--version exited with {}", output.status)));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout.lines().next().unwrap_or_default().trim().to_string())
}

/// Extract the first diagnostic line from compiler stderr.
pub fn first_error_line(stderr: &str) -> Option<&str> {
    stderr
        .lines()
        .find(|l| l.contains("error:") || l.contains("fatal error"))
        .or_else(|| stderr.lines().find(|l| !l.trim().is_empty()))
}
