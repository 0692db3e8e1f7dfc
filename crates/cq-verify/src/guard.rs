//! Include guard checking.
//!
//! Every header must open with `#ifndef <PREFIX>_<FILE_NAME>` where the file
//! name is uppercased and `.` becomes `_`:
//! - GOOD: `foo.hpp` guarded by `#ifndef CYQLE1_FOO_HPP`
//! - BAD: `foo.hpp` guarded by `#ifndef FOO_HPP` or `#pragma once`
//!
//! A missing guard is a warning. It never fails the run.

use std::path::Path;

/// Derive the guard token for a header file name.
pub fn expected_guard(prefix: &str, file_name: &str) -> String {
    format!("{}_{}", prefix, file_name.to_uppercase().replace('.', "_"))
}

/// Outcome of checking one header's include guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardCheck {
    /// Token the header should define
    pub expected: String,
    /// Whether `#ifndef <expected>` appears in the contents
    pub present: bool,
}

impl GuardCheck {
    /// Check `contents` of the header at `path`.
    pub fn check(prefix: &str, path: &Path, contents: &str) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let expected = expected_guard(prefix, &file_name);
        let present = contents.contains(&format!("#ifndef {}", expected));
        Self { expected, present }
    }

    /// The guard-opening line the header should contain.
    pub fn expected_line(&self) -> String {
        format!("#ifndef {}", self.expected)
    }

    /// Warning text, if the guard is missing.
    pub fn warning(&self) -> Option<String> {
        if self.present {
            None
        } else {
            Some(format!(
                "Missing or incorrect include guard (expected: {})",
                self.expected_line()
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_guard() {
        assert_eq!(expected_guard("CYQLE1", "foo.hpp"), "CYQLE1_FOO_HPP");
        assert_eq!(expected_guard("CYQLE1", "EffectChain.h"), "CYQLE1_EFFECTCHAIN_H");
        assert_eq!(expected_guard("CYQLE1", "a.b.h"), "CYQLE1_A_B_H");
        // Only dots are rewritten
        assert_eq!(expected_guard("P", "my-file.h"), "P_MY-FILE_H");
    }

    #[test]
    fn test_guard_present() {
        let contents = "#ifndef CYQLE1_FOO_HPP\n#define CYQLE1_FOO_HPP\nint f();\n#endif\n";
        let check = GuardCheck::check("CYQLE1", Path::new("src/dsp/foo.hpp"), contents);
        assert!(check.present);
        assert!(check.warning().is_none());
    }

    #[test]
    fn test_guard_missing() {
        let check = GuardCheck::check("CYQLE1", Path::new("foo.hpp"), "#pragma once\nint f();\n");
        assert!(!check.present);
        let warning = check.warning().unwrap();
        assert!(warning.contains("#ifndef CYQLE1_FOO_HPP"));
    }

    #[test]
    fn test_guard_wrong_token() {
        let contents = "#ifndef FOO_HPP\n#define FOO_HPP\n#endif\n";
        let check = GuardCheck::check("CYQLE1", Path::new("foo.hpp"), contents);
        assert!(!check.present);
    }

    #[test]
    fn test_guard_requires_ifndef() {
        // Mentioning the token elsewhere is not enough.
        let contents = "#define CYQLE1_FOO_HPP\n";
        let check = GuardCheck::check("CYQLE1", Path::new("foo.hpp"), contents);
        assert!(!check.present);
    }
}
