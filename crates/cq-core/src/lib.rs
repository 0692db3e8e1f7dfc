//! # cq-core
//!
//! Core types for verifying a C++ source tree.
//!
//! Every file checked produces one [`CheckResult`]. Results are folded into a
//! [`VerificationSummary`], which decides the process exit code:
//!
//! | Outcome | Counts as | Exit |
//! |---------|-----------|------|
//! | compiles, guard present | pass | 0 |
//! | compiles, guard missing | pass + warning | 0 |
//! | compiler error | fail | 1 |
//! | timeout | fail | 1 |

pub mod error;
pub mod result;
pub mod summary;

pub use error::VerifyError;
pub use result::{CheckKind, CheckResult, FailureKind};
pub use summary::VerificationSummary;
