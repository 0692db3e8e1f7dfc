//! # cq-verify
//!
//! Header and source verification for a C++ tree.
//!
//! For every file under `<root>/src` the verifier runs, in order:
//!
//! | Step | Files | Budget | Effect on exit code |
//! |------|-------|--------|---------------------|
//! | include guard | headers | - | none (warning only) |
//! | standalone compile | headers | 5s | fail on error/timeout |
//! | compile with `-I src` | sources | 10s | fail on error/timeout |
//!
//! Files are checked one at a time. A failing file never aborts the run.

pub mod compiler;
pub mod config;
pub mod discover;
pub mod guard;
pub mod header;
pub mod report;
pub mod runner;
pub mod source;

pub use config::{CompilerConfig, VerifyConfig};
pub use cq_core::{CheckKind, CheckResult, FailureKind, VerificationSummary, VerifyError};
pub use discover::{discover, Discovered};
pub use guard::{expected_guard, GuardCheck};
pub use report::{OutputFormat, Reporter};
pub use runner::{Progress, VerificationRun, Verifier};
