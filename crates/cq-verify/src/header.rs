//! Standalone header check.
//!
//! A header passes if a translation unit containing only
//!
//! ```cpp
//! #include "/abs/path/to/header.hpp"
//! int main() { return 0; }
//! ```
//!
//! compiles. The unit lives in a scratch file that is removed on every exit
//! path, including timeout.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::compiler;
use crate::config::VerifyConfig;
use crate::guard::GuardCheck;
use cq_core::{CheckKind, CheckResult, FailureKind};

/// Source text of the synthesized unit for `header`.
pub fn translation_unit(header: &Path) -> String {
    format!(
        "#include \"{}\"\nint main() {{ return 0; }}\n",
        include_literal(header)
    )
}

/// `path` as the body of a quoted `#include`.
#[cfg(windows)]
fn include_literal(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// `path` as the body of a quoted `#include`.
///
/// Backslashes and quotes are legal in unix file names and must be escaped.
#[cfg(not(windows))]
fn include_literal(path: &Path) -> String {
    let raw = path.to_string_lossy();
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c == '\\' || c == '"' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Write the synthesized unit for `header` into `dir`.
///
/// The returned file is deleted when dropped.
pub fn write_scratch_unit(header: &Path, dir: &Path) -> std::io::Result<NamedTempFile> {
    let stem = header
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut scratch = tempfile::Builder::new()
        .prefix(&format!("test_{}_", stem))
        .suffix(".cpp")
        .tempfile_in(dir)?;

    scratch.write_all(translation_unit(&absolute(header)).as_bytes())?;
    scratch.flush()?;
    Ok(scratch)
}

/// Check one header: include guard, then standalone compile.
pub async fn check(header: &Path, config: &VerifyConfig) -> CheckResult {
    let contents = match tokio::fs::read(header).await {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            return CheckResult::fail(
                header,
                CheckKind::Header,
                FailureKind::Io {
                    reason: format!("failed to read {}: {}", header.display(), e),
                },
                Duration::ZERO,
            );
        }
    };

    let guard = GuardCheck::check(&config.guard_prefix, header, &contents);
    if !guard.present {
        debug!(header = %header.display(), expected = %guard.expected, "include guard missing");
    }
    let warnings = guard.warning();

    let scratch = match write_scratch_unit(header, &config.scratch_dir()) {
        Ok(scratch) => scratch,
        Err(e) => {
            return CheckResult::fail(
                header,
                CheckKind::Header,
                FailureKind::Io {
                    reason: format!("failed to write scratch unit: {}", e),
                },
                Duration::ZERO,
            )
            .with_warnings(warnings);
        }
    };

    let outcome = compiler::compile(
        &config.compiler,
        scratch.path(),
        None,
        config.header_timeout,
    )
    .await;

    if let Err(e) = scratch.close() {
        warn!(header = %header.display(), error = %e, "failed to remove scratch unit");
    }

    let result = match outcome.failure {
        None => CheckResult::pass(header, CheckKind::Header, outcome.duration),
        Some(failure) => CheckResult::fail(header, CheckKind::Header, failure, outcome.duration),
    };
    result.with_warnings(warnings)
}

fn absolute(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
