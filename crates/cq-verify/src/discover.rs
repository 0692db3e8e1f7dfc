//! File discovery.
//!
//! Walks the source directory and splits files into headers and sources by
//! extension. Nothing else is filtered: hidden, git-ignored and symlinked
//! files are included. Entries that cannot be read are skipped with a
//! warning.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::{debug, warn};

use crate::config::VerifyConfig;
use cq_core::VerifyError;

/// Files found under the source directory, in traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovered {
    pub headers: Vec<PathBuf>,
    pub sources: Vec<PathBuf>,
}

impl Discovered {
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.sources.is_empty()
    }
}

/// Recursively collect header and source files beneath `root`.
///
/// Fails if `root` does not exist or is not a directory.
pub fn discover(root: &Path, config: &VerifyConfig) -> Result<Discovered, VerifyError> {
    if !root.is_dir() {
        return Err(VerifyError::RootMissing(root.to_path_buf()));
    }

    let mut found = Discovered::default();

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(root = %root.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };

        // Follows symlinks, unlike `entry.file_type()`.
        let path = entry.into_path();
        if !path.is_file() {
            continue;
        }

        if config.is_header(&path) {
            found.headers.push(path);
        } else if config.is_source(&path) {
            found.sources.push(path);
        }
    }

    debug!(
        root = %root.display(),
        headers = found.headers.len(),
        sources = found.sources.len(),
        "discovery finished"
    );

    Ok(found)
}
