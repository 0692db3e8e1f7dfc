//! End-to-end checks against a real `g++`.
//!
//! Each test returns early when `g++` is not installed.

use std::fs;
use std::path::Path;
use std::process::Command;

use cq_verify::{CheckKind, Verifier, VerifyConfig};
use tempfile::TempDir;

fn have_gxx() -> bool {
    let found = Command::new("g++")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false);
    if !found {
        eprintln!("g++ not found; skipping");
    }
    found
}

fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    fs::create_dir_all(&src).unwrap();
    for (rel, contents) in files {
        let path = src.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }
    dir
}

fn config(root: &Path) -> VerifyConfig {
    let mut config = VerifyConfig::for_root(root);
    config.scratch_dir = Some(root.to_path_buf());
    config.check_compiler = true;
    config
}

fn scratch_files(root: &Path) -> usize {
    fs::read_dir(root)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with("test_"))
        .count()
}

#[tokio::test]
async fn test_guarded_header_passes() {
    if !have_gxx() {
        return;
    }
    let dir = project(&[(
        "foo.hpp",
        "#ifndef CYQLE1_FOO_HPP\n#define CYQLE1_FOO_HPP\n\n#include <vector>\n\ninline int foo() { return static_cast<int>(std::vector<int>{1, 2}.size()); }\n\n#endif\n",
    )]);

    let run = Verifier::new(config(dir.path())).run().await.unwrap();
    assert_eq!(run.results.len(), 1);
    let result = &run.results[0];
    assert!(result.passed, "{:?}", result);
    assert!(result.warnings.is_empty());
    assert_eq!(run.summary.exit_code(), 0);
    assert_eq!(scratch_files(dir.path()), 0);
}

#[tokio::test]
async fn test_unguarded_header_warns_and_compiles() {
    if !have_gxx() {
        return;
    }
    let dir = project(&[("plain.h", "inline int plain() { return 2; }\n")]);

    let run = Verifier::new(config(dir.path())).run().await.unwrap();
    let result = &run.results[0];
    assert!(result.passed, "{:?}", result);
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("#ifndef CYQLE1_PLAIN_H"));
    assert_eq!(run.summary.guard_warnings, 1);
    assert!(run.summary.all_passed());
}

#[tokio::test]
async fn test_unguarded_broken_header_fails() {
    if !have_gxx() {
        return;
    }
    let dir = project(&[("broken.h", "#include \"does_not_exist.h\"\n")]);

    let run = Verifier::new(config(dir.path())).run().await.unwrap();
    let result = &run.results[0];
    assert!(!result.passed);
    assert_eq!(result.warnings.len(), 1);
    assert!(result
        .compiler_stderr()
        .unwrap_or_default()
        .contains("does_not_exist.h"));
    assert_eq!(run.summary.failures(), 1);
    assert_eq!(run.summary.exit_code(), 1);
    assert_eq!(scratch_files(dir.path()), 0);
}

#[tokio::test]
async fn test_source_uses_header_dir() {
    if !have_gxx() {
        return;
    }
    let dir = project(&[
        (
            "dsp/gain.h",
            "#ifndef CYQLE1_GAIN_H\n#define CYQLE1_GAIN_H\nfloat gain(float x);\n#endif\n",
        ),
        (
            "dsp/gain.cpp",
            "#include \"dsp/gain.h\"\nfloat gain(float x) { return x * 2.0f; }\n",
        ),
        ("bad.cpp", "int broken( { }\n"),
    ]);

    let run = Verifier::new(config(dir.path())).run().await.unwrap();
    assert_eq!(run.summary.header_total, 1);
    assert_eq!(run.summary.header_passed, 1);
    assert_eq!(run.summary.source_total, 2);
    assert_eq!(run.summary.source_passed, 1);

    let failed: Vec<_> = run.failures().collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].kind, CheckKind::Source);
    assert!(failed[0].path.ends_with("bad.cpp"));
}
