//! Dot-entry ignore policies.
//!
//! Directories are never ignored here; the walker decides structurally what
//! to descend into. These predicates only mark non-directory entries whose
//! path involves a dot component, per the configured policy.

use crate::classify::EntryType;
use crate::config::SumConfig;
use std::path::Path;

fn basename_starts_with_dot(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

fn path_contains_dot_segment(path: &Path) -> bool {
    path.to_string_lossy().contains("/.")
}

/// Whether an entry is excluded from traversal output by a dot policy.
pub fn should_ignore(path: &Path, raw_type: EntryType, config: &SumConfig) -> bool {
    debug_assert!(path.is_absolute());

    if raw_type == EntryType::Dir {
        return false;
    }

    let dot_base = basename_starts_with_dot(path);
    let dot_segment = path_contains_dot_segment(path);

    // A dot somewhere above the basename means a dot directory on the path.
    if config.ignore_dot_dir && !dot_base && dot_segment {
        return true;
    }

    if config.ignore_dot_file && dot_base {
        return true;
    }

    if config.ignore_dot && (dot_base || dot_segment) {
        return true;
    }

    false
}
