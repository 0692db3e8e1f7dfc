//! CLI for verifying headers and sources under `<root>/src`.
//!
//! # Usage
//!
//! ```bash
//! # Check ./src with g++ (or $CXX)
//! cargo run -p cq-verify
//!
//! # Another project, with clang and machine-readable output
//! cargo run -p cq-verify -- --root ../plugin --compiler clang++ --format json
//! ```
//!
//! Exit code 0 means every check passed, 1 means at least one failed.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use cq_verify::{OutputFormat, Reporter, Verifier, VerifyConfig};

/// Check include guards and standalone compilation of C++ headers and sources.
#[derive(Debug, Parser)]
#[command(name = "cq-verify", version, about)]
struct Args {
    /// Project root; files are discovered under <ROOT>/src
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Compiler to invoke (defaults to $CXX, then g++)
    #[arg(long)]
    compiler: Option<String>,

    /// Include guard prefix
    #[arg(long)]
    prefix: Option<String>,

    /// Report format: text or json
    #[arg(long, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Shorthand for `--format json`
    #[arg(long, conflicts_with = "format")]
    json: bool,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.no_color {
        colored::control::set_override(false);
    }

    let mut config = VerifyConfig::for_root(&args.root).from_env();
    if let Some(program) = args.compiler {
        config.compiler.program = program;
    }
    if let Some(prefix) = args.prefix {
        config.guard_prefix = prefix;
    }
    config.check_compiler = true;

    let format = if args.json {
        OutputFormat::Json
    } else {
        args.format
    };
    let mut reporter = Reporter::new(format);
    reporter.start(&config.root);

    let verifier = Verifier::new(config);
    let run = match verifier.run_with(&mut reporter).await {
        Ok(run) => run,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = reporter.finish(&run) {
        eprintln!("Failed to write report: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::from(run.summary.exit_code())
}

/// Initialize tracing/logging on stderr.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::{fmt, prelude::*};

    let default = if verbose { "cq_verify=debug,warn" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
