//! Verification configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable that overrides the compiler program.
pub const COMPILER_ENV: &str = "CXX";

/// How to invoke the C++ compiler.
///
/// The final command line is
/// `<program> [leading_args...] <std_flag> [-I dir] -c <file> -o <null>`.
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    /// Compiler executable
    pub program: String,
    /// Arguments placed before everything else (wrappers, `-c` scripts in tests)
    pub leading_args: Vec<String>,
    /// Language standard flag
    pub std_flag: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            program: "g++".to_string(),
            leading_args: Vec::new(),
            std_flag: "-std=c++17".to_string(),
        }
    }
}

impl CompilerConfig {
    /// Use a specific compiler program.
    pub fn program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    /// Run a shell script in place of the compiler.
    ///
    /// Expands to `sh -c <script> sh`, so the regular compiler arguments
    /// land in `$1..$n` and the script decides the exit status.
    pub fn shell(script: impl Into<String>) -> Self {
        Self {
            program: "sh".to_string(),
            leading_args: vec!["-c".to_string(), script.into(), "sh".to_string()],
            ..Default::default()
        }
    }
}

/// Configuration for a verification run.
#[derive(Debug, Clone)]
pub struct VerifyConfig {
    /// Project root
    pub root: PathBuf,
    /// Directory under `root` that is scanned and used as the include path
    pub src_subdir: PathBuf,
    /// Extensions treated as headers (without the dot)
    pub header_extensions: Vec<String>,
    /// Extensions treated as sources (without the dot)
    pub source_extensions: Vec<String>,
    /// Prefix of the expected include guard token
    pub guard_prefix: String,
    /// Compiler invocation
    pub compiler: CompilerConfig,
    /// Budget for one standalone header compile
    pub header_timeout: Duration,
    /// Budget for one source compile
    pub source_timeout: Duration,
    /// Where synthesized translation units are written (None = system temp dir)
    pub scratch_dir: Option<PathBuf>,
    /// Run `<compiler> --version` before checking any file
    pub check_compiler: bool,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            src_subdir: PathBuf::from("src"),
            header_extensions: vec!["h".to_string(), "hpp".to_string()],
            source_extensions: vec!["cpp".to_string()],
            guard_prefix: "CYQLE1".to_string(),
            compiler: CompilerConfig::default(),
            header_timeout: Duration::from_secs(5),
            source_timeout: Duration::from_secs(10),
            scratch_dir: None,
            check_compiler: false,
        }
    }
}

impl VerifyConfig {
    /// Default config rooted at `root`.
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Apply environment overrides (`CXX`).
    pub fn from_env(mut self) -> Self {
        if let Ok(program) = std::env::var(COMPILER_ENV) {
            let program = program.trim();
            if !program.is_empty() {
                self.compiler.program = program.to_string();
            }
        }
        self
    }

    /// Directory that is scanned and passed to `-I`.
    pub fn src_dir(&self) -> PathBuf {
        self.root.join(&self.src_subdir)
    }

    /// Scratch directory for synthesized units.
    pub fn scratch_dir(&self) -> PathBuf {
        self.scratch_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    /// Whether `path` has one of the header extensions.
    pub fn is_header(&self, path: &Path) -> bool {
        has_extension(path, &self.header_extensions)
    }

    /// Whether `path` has one of the source extensions.
    pub fn is_source(&self, path: &Path) -> bool {
        has_extension(path, &self.source_extensions)
    }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map_or(false, |ext| extensions.iter().any(|want| want == ext))
}
