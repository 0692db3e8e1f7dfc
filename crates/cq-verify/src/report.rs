//! Human-readable and JSON reporting.

use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

use colored::Colorize;

use crate::compiler::first_error_line;
use crate::discover::Discovered;
use crate::runner::{Progress, VerificationRun};
use cq_core::{CheckKind, CheckResult, FailureKind, VerificationSummary};

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid output format: {}. Must be 'text' or 'json'", s)),
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Prints progress while a run is in flight and the summary at the end.
///
/// In JSON mode nothing is printed until [`Reporter::finish`].
pub struct Reporter {
    format: OutputFormat,
}

impl Reporter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print the opening banner.
    pub fn start(&self, root: &Path) {
        if self.format == OutputFormat::Text {
            println!("{}", "=== Cyqle1 Header and Source Verification ===".yellow());
            println!("Project root: {}", root.display());
            println!();
        }
    }

    /// Print the final report for `run`.
    pub fn finish(&self, run: &VerificationRun) -> Result<(), serde_json::Error> {
        match self.format {
            OutputFormat::Text => {
                print!("{}", format_summary(&run.summary));
                Ok(())
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(run)?);
                Ok(())
            }
        }
    }
}

impl Progress for Reporter {
    fn discovered(&mut self, _src_dir: &Path, found: &Discovered) {
        if self.format == OutputFormat::Text {
            println!("Found {} header files", found.headers.len());
            println!("Found {} source files", found.sources.len());
            println!();
        }
    }

    fn section(&mut self, kind: CheckKind) {
        if self.format == OutputFormat::Text {
            println!("{}", format!("--- Checking {} Files ---", kind.name()).yellow());
        }
    }

    fn checking(&mut self, path: &Path) {
        if self.format == OutputFormat::Text {
            println!("{}", format!("Checking: {}", path.display()).blue());
        }
    }

    fn checked(&mut self, result: &CheckResult) {
        if self.format == OutputFormat::Text {
            println!("{}", format_result(result));
        }
    }
}

/// Format the lines printed after a file was checked.
pub fn format_result(result: &CheckResult) -> String {
    let mut out = String::new();

    for warning in &result.warnings {
        out.push_str(&format!("  {}\n", format!("Warning: {}", warning).yellow()));
    }

    let message = result.message.as_deref().unwrap_or_default();
    if result.passed {
        out.push_str(&format!("  {}\n", format!("✓ {}", message).green()));
    } else {
        out.push_str(&format!("  {}\n", format!("Error: {}", message).red()));
        if let Some(stderr) = result.compiler_stderr() {
            // Full dump, with the first diagnostic highlighted in place.
            let first = first_error_line(stderr);
            for line in stderr.lines() {
                if Some(line) == first {
                    out.push_str(&format!("    {}\n", line.bold()));
                } else {
                    out.push_str(&format!("    {}\n", line));
                }
            }
        } else if let Some(failure) = &result.failure {
            if let FailureKind::Spawn { reason } | FailureKind::Io { reason } = failure {
                out.push_str(&format!("    {}\n", reason));
            }
        }
    }

    out
}

/// Format the closing summary block.
pub fn format_summary(summary: &VerificationSummary) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", "=== Verification Summary ===".yellow()));
    out.push_str(&format!(
        "Headers: {}/{} passed\n",
        summary.header_passed, summary.header_total
    ));
    out.push_str(&format!(
        "Sources: {}/{} passed\n",
        summary.source_passed, summary.source_total
    ));
    if summary.guard_warnings > 0 {
        out.push_str(&format!(
            "{}\n",
            format!("Include guard warnings: {}", summary.guard_warnings).yellow()
        ));
    }
    out.push('\n');

    if summary.all_passed() {
        out.push_str(&format!("{}\n", "✓ All files compile successfully!".green()));
    } else {
        out.push_str(&format!(
            "{}\n",
            format!("✗ Found {} compilation errors", summary.failures()).red()
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_format_summary_pass() {
        plain();
        let summary = VerificationSummary {
            header_total: 3,
            header_passed: 3,
            source_total: 2,
            source_passed: 2,
            guard_warnings: 0,
        };
        let report = format_summary(&summary);
        assert!(report.contains("Headers: 3/3 passed"));
        assert!(report.contains("Sources: 2/2 passed"));
        assert!(report.contains("All files compile successfully"));
        assert!(!report.contains("Include guard warnings"));
    }

    #[test]
    fn test_format_summary_fail() {
        plain();
        let summary = VerificationSummary {
            header_total: 3,
            header_passed: 2,
            source_total: 2,
            source_passed: 1,
            guard_warnings: 4,
        };
        let report = format_summary(&summary);
        assert!(report.contains("Headers: 2/3 passed"));
        assert!(report.contains("Found 2 compilation errors"));
        assert!(report.contains("Include guard warnings: 4"));
    }

    #[test]
    fn test_format_result_failure_shows_stderr() {
        plain();
        let result = CheckResult::fail(
            "src/foo.hpp",
            CheckKind::Header,
            FailureKind::Compiler {
                stderr: "In file included from t.cpp:1:\nfoo.hpp:2:1: error: bad".to_string(),
            },
            Duration::ZERO,
        )
        .with_warnings(vec!["Missing or incorrect include guard".to_string()]);

        let text = format_result(&result);
        assert!(text.contains("Warning: Missing or incorrect include guard"));
        assert!(text.contains("Error: Header compilation failed"));
        assert!(text.contains("    In file included from t.cpp:1:\n"));
        assert!(text.contains("    foo.hpp:2:1: error: bad\n"));
    }

    #[test]
    fn test_format_result_prints_error_line_once() {
        plain();
        let result = CheckResult::fail(
            "src/a.cpp",
            CheckKind::Source,
            FailureKind::Compiler {
                stderr: "a.cpp: In function 'int main()':\na.cpp:3:5: error: 'x' was not declared\n"
                    .to_string(),
            },
            Duration::ZERO,
        );

        let text = format_result(&result);
        assert_eq!(text.matches("error: 'x' was not declared").count(), 1);
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_format_result_timeout() {
        plain();
        let result = CheckResult::fail(
            "src/a.cpp",
            CheckKind::Source,
            FailureKind::Timeout { after: Duration::from_secs(10) },
            Duration::from_secs(10),
        );
        let text = format_result(&result);
        assert!(text.contains("Error: Compilation timed out after 10s"));
    }

    #[test]
    fn test_format_result_pass() {
        plain();
        let result = CheckResult::pass("src/a.cpp", CheckKind::Source, Duration::ZERO);
        assert_eq!(format_result(&result), "  ✓ Source compiles successfully\n");
    }
}
