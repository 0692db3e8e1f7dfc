//! Source file check.
//!
//! Compiles the file in place with `-I <src dir>`.

use std::path::Path;

use crate::compiler;
use crate::config::VerifyConfig;
use cq_core::{CheckKind, CheckResult};

/// Check one source file against the header directory.
pub async fn check(source: &Path, include_dir: &Path, config: &VerifyConfig) -> CheckResult {
    let outcome = compiler::compile(
        &config.compiler,
        source,
        Some(include_dir),
        config.source_timeout,
    )
    .await;

    match outcome.failure {
        None => CheckResult::pass(source, CheckKind::Source, outcome.duration),
        Some(failure) => CheckResult::fail(source, CheckKind::Source, failure, outcome.duration),
    }
}
