//! Sequential verification run.
//!
//! Discovers files, then checks every header followed by every source, one
//! at a time. Per-file failures are recorded and the run continues.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::compiler;
use crate::config::VerifyConfig;
use crate::discover::{discover, Discovered};
use crate::{header, source};
use cq_core::{CheckKind, CheckResult, VerificationSummary, VerifyError};

/// Observer for run progress.
///
/// All methods default to no-ops.
pub trait Progress {
    fn discovered(&mut self, _src_dir: &Path, _found: &Discovered) {}
    fn section(&mut self, _kind: CheckKind) {}
    fn checking(&mut self, _path: &Path) {}
    fn checked(&mut self, _result: &CheckResult) {}
}

impl Progress for () {}

/// Everything a run produced.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationRun {
    pub src_dir: PathBuf,
    pub summary: VerificationSummary,
    pub results: Vec<CheckResult>,
}

impl VerificationRun {
    /// Results that failed, in check order.
    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|r| !r.passed)
    }
}

/// Runs header and source checks for one project.
pub struct Verifier {
    config: VerifyConfig,
}

impl Verifier {
    /// Create a verifier with the given config.
    pub fn new(config: VerifyConfig) -> Self {
        Self { config }
    }

    /// Run without progress output.
    pub async fn run(&self) -> Result<VerificationRun, VerifyError> {
        self.run_with(&mut ()).await
    }

    /// Run, reporting progress to `progress`.
    ///
    /// Only discovery and compiler version-check errors are returned; every per-file
    /// problem becomes a failed [`CheckResult`].
    pub async fn run_with<P: Progress>(
        &self,
        progress: &mut P,
    ) -> Result<VerificationRun, VerifyError> {
        let src_dir = self.config.src_dir();
        let found = discover(&src_dir, &self.config)?;
        info!(
            src_dir = %src_dir.display(),
            headers = found.headers.len(),
            sources = found.sources.len(),
            "starting verification"
        );
        progress.discovered(&src_dir, &found);

        if self.config.check_compiler && !found.is_empty() {
            let version = compiler::check_version(&self.config.compiler, compiler::VERSION_TIMEOUT).await?;
            debug!(compiler = %self.config.compiler.program, %version, "compiler found");
        }

        let mut results = Vec::with_capacity(found.headers.len() + found.sources.len());

        progress.section(CheckKind::Header);
        for path in &found.headers {
            progress.checking(path);
            let result = header::check(path, &self.config).await;
            debug!(path = %path.display(), passed = result.passed, "header checked");
            progress.checked(&result);
            results.push(result);
        }

        progress.section(CheckKind::Source);
        for path in &found.sources {
            progress.checking(path);
            let result = source::check(path, &src_dir, &self.config).await;
            debug!(path = %path.display(), passed = result.passed, "source checked");
            progress.checked(&result);
            results.push(result);
        }

        let summary = VerificationSummary::from_results(&results);
        info!(failures = summary.failures(), "verification finished");

        Ok(VerificationRun {
            src_dir,
            summary,
            results,
        })
    }
}
