//! Aggregated counts for the final report.

use serde::Serialize;

use crate::result::{CheckKind, CheckResult};

/// Pass/fail counts derived from a run's [`CheckResult`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VerificationSummary {
    pub header_total: usize,
    pub header_passed: usize,
    pub source_total: usize,
    pub source_passed: usize,
    /// Include-guard warnings (never affect the exit code)
    pub guard_warnings: usize,
}

impl VerificationSummary {
    /// Count a slice of results.
    pub fn from_results(results: &[CheckResult]) -> Self {
        let mut summary = Self::default();
        for result in results {
            summary.record(result);
        }
        summary
    }

    /// Add one result to the counts.
    pub fn record(&mut self, result: &CheckResult) {
        match result.kind {
            CheckKind::Header => {
                self.header_total += 1;
                if result.passed {
                    self.header_passed += 1;
                }
            }
            CheckKind::Source => {
                self.source_total += 1;
                if result.passed {
                    self.source_passed += 1;
                }
            }
        }
        self.guard_warnings += result.warnings.len();
    }

    pub fn header_failures(&self) -> usize {
        self.header_total - self.header_passed
    }

    pub fn source_failures(&self) -> usize {
        self.source_total - self.source_passed
    }

    /// Total failed checks across headers and sources.
    pub fn failures(&self) -> usize {
        self.header_failures() + self.source_failures()
    }

    /// True when no check failed (including the empty run).
    pub fn all_passed(&self) -> bool {
        self.failures() == 0
    }

    /// Process exit code: 0 if everything passed, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.all_passed() {
            0
        } else {
            1
        }
    }
}
