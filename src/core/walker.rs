//! Recursive file enumeration with extension and path-exclusion filters.
//!
//! Resilience policy: anything the walker cannot read contributes nothing.
//! A migration scan over a large tree must not abort because one
//! subdirectory is unreadable, so permission errors and broken entries are
//! skipped without surfacing an error. Symlink cycles are not guarded.

use std::fs;
use std::path::{Path, PathBuf};

use crate::rules::ScanProfile;

/// Depth-first collection of candidate files under `root`.
///
/// A path is excluded when any exclusion substring occurs anywhere in its
/// joined string form, which hides whole subtrees, not just basenames.
/// Each call re-walks from scratch; nothing is cached between runs.
pub fn walk(root: &Path, profile: &ScanProfile) -> Vec<PathBuf> {
    let mut results = Vec::new();
    collect(root, profile, &mut results);
    results
}

fn collect(dir: &Path, profile: &ScanProfile, results: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if is_excluded(&path, profile.exclusions) {
            continue;
        }

        // Follows symlinks; a dangling link is skipped here.
        let Ok(metadata) = fs::metadata(&path) else {
            continue;
        };

        if metadata.is_dir() {
            collect(&path, profile, results);
        } else if has_extension(&path, profile.extensions) {
            results.push(path);
        }
    }
}

fn is_excluded(path: &Path, exclusions: &[&str]) -> bool {
    let joined = path.to_string_lossy();
    exclusions.iter().any(|needle| joined.contains(needle))
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    let joined = path.to_string_lossy();
    extensions.iter().any(|ext| joined.ends_with(ext))
}

// ============================================================================
// Tests
// ============================================================================
