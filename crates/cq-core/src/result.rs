//! Per-file check results.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Serialize, Serializer};

/// What kind of file a check ran against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckKind {
    /// Header, compiled through a synthesized translation unit
    Header,
    /// Source file, compiled directly against the header directory
    Source,
}

impl CheckKind {
    /// Get the display name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            CheckKind::Header => "Header",
            CheckKind::Source => "Source",
        }
    }
}

/// Why a check failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureKind {
    /// Compiler exited with a non-zero status
    Compiler { stderr: String },
    /// Compiler did not finish within its budget
    Timeout {
        #[serde(rename = "after_ms", serialize_with = "serialize_ms")]
        after: Duration,
    },
    /// Compiler process could not be started
    Spawn { reason: String },
    /// Reading the file or writing the scratch unit failed
    Io { reason: String },
}

impl FailureKind {
    /// Short description used as the result message.
    pub fn describe(&self, kind: CheckKind) -> String {
        match self {
            FailureKind::Compiler { .. } => format!("{} compilation failed", kind.name()),
            FailureKind::Timeout { after } => {
                format!("Compilation timed out after {}s", after.as_secs_f64())
            }
            FailureKind::Spawn { reason } => format!("Failed to run compiler: {}", reason),
            FailureKind::Io { reason } => format!("I/O error: {}", reason),
        }
    }
}

/// Result of checking a single file.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    /// File that was checked
    pub path: PathBuf,
    /// Header or source
    pub kind: CheckKind,
    /// Whether the compile check passed
    pub passed: bool,
    /// Human-readable outcome
    pub message: Option<String>,
    /// Failure details (None when passed)
    pub failure: Option<FailureKind>,
    /// Non-fatal findings, such as a missing include guard
    pub warnings: Vec<String>,
    /// Time spent in the compile step
    #[serde(rename = "duration_ms", serialize_with = "serialize_ms")]
    pub duration: Duration,
}

impl CheckResult {
    /// Create a passing result.
    #[must_use]
    pub fn pass(path: impl Into<PathBuf>, kind: CheckKind, duration: Duration) -> Self {
        Self {
            path: path.into(),
            kind,
            passed: true,
            message: Some(format!("{} compiles successfully", kind.name())),
            failure: None,
            warnings: Vec::new(),
            duration,
        }
    }

    /// Create a failing result.
    #[must_use]
    pub fn fail(
        path: impl Into<PathBuf>,
        kind: CheckKind,
        failure: FailureKind,
        duration: Duration,
    ) -> Self {
        Self {
            path: path.into(),
            kind,
            passed: false,
            message: Some(failure.describe(kind)),
            failure: Some(failure),
            warnings: Vec::new(),
            duration,
        }
    }

    /// Attach warnings.
    pub fn with_warnings(mut self, warnings: impl IntoIterator<Item = String>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    /// Whether this result failed because of a timeout.
    pub fn timed_out(&self) -> bool {
        matches!(self.failure, Some(FailureKind::Timeout { .. }))
    }

    /// Captured compiler stderr, if the compiler rejected the file.
    pub fn compiler_stderr(&self) -> Option<&str> {
        match &self.failure {
            Some(FailureKind::Compiler { stderr }) => Some(stderr),
            _ => None,
        }
    }
}

fn serialize_ms<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}
