//! Run-level errors.
//!
//! Per-file problems never surface here; they become failed
//! [`CheckResult`](crate::CheckResult)s instead.

use std::path::PathBuf;

/// Errors that abort a verification run before any file is checked.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// The directory to scan does not exist or is not a directory.
    #[error("Source directory not found: {}", .0.display())]
    RootMissing(PathBuf),

    /// The compiler could not be started or rejected `--version`.
    #[error("Compiler '{program}' is not usable: {reason}")]
    CompilerUnavailable { program: String, reason: String },
}
