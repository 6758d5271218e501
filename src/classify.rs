//! Filesystem entry classification and symlink resolution.
//!
//! Raw classification never follows a trailing symlink; resolved
//! classification follows chains hop by hop until a non-symlink type remains.
//! A stat/lstat failure classifies as `Invalid` rather than erroring, so a
//! single unreadable entry is reported per entry instead of killing the run.

use crate::error::Error;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Hop budget for symlink chains, matching the kernel's ELOOP limit.
const MAX_SYMLINK_HOPS: usize = 40;

/// Closed set of entry types the walker dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    Dir,
    Reg,
    Device,
    Symlink,
    Unsupported,
    Invalid,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Dir => "directory",
            EntryType::Reg => "regular file",
            EntryType::Device => "device",
            EntryType::Symlink => "symlink",
            EntryType::Unsupported => "unsupported file",
            EntryType::Invalid => "invalid file",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn mode_type(ft: fs::FileType) -> EntryType {
    if ft.is_dir() {
        return EntryType::Dir;
    }
    if ft.is_file() {
        return EntryType::Reg;
    }
    if ft.is_symlink() {
        return EntryType::Symlink;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::FileTypeExt;
        if ft.is_block_device() || ft.is_char_device() {
            return EntryType::Device;
        }
    }
    EntryType::Unsupported
}

/// Classify an entry without following a trailing symlink (lstat).
pub fn raw_entry_type(path: &Path) -> EntryType {
    match fs::symlink_metadata(path) {
        Ok(meta) => mode_type(meta.file_type()),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "lstat failed");
            EntryType::Invalid
        }
    }
}

/// Classify an entry following symlinks (stat).
pub fn entry_type(path: &Path) -> EntryType {
    match fs::metadata(path) {
        Ok(meta) => mode_type(meta.file_type()),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "stat failed");
            EntryType::Invalid
        }
    }
}

/// Resolve a symlink chain to its final non-symlink target.
///
/// Relative targets are resolved against the link's containing directory,
/// never the working directory. Fails closed to `Invalid` on a broken link or
/// once the hop budget is exhausted; the returned type is never `Symlink`.
pub fn resolve_symlink(path: &Path) -> (PathBuf, EntryType) {
    debug_assert!(path.is_absolute());
    let mut current = path.to_path_buf();

    for _ in 0..MAX_SYMLINK_HOPS {
        let target = match fs::read_link(&current) {
            Ok(t) => t,
            Err(e) => {
                debug!(path = %current.display(), error = %e, "readlink failed");
                return (current, EntryType::Invalid);
            }
        };

        current = if target.is_absolute() {
            target
        } else {
            match current.parent() {
                Some(dir) => dir.join(target),
                None => return (current, EntryType::Invalid),
            }
        };
        debug_assert!(current.is_absolute());

        let t = raw_entry_type(&current);
        if t != EntryType::Symlink {
            return (current, t);
        }
    }

    debug!(path = %path.display(), "symlink chain exceeds hop budget");
    (current, EntryType::Invalid)
}

/// Canonicalize a top-level input path: resolves symlinks, `.`/`..` segments
/// and redundant separators.
///
/// A dangling symlink input is tolerated and yields `None` (the input is
/// treated as nonexistent rather than as an error); any other failure
/// propagates.
pub fn canonicalize_input(path: &Path) -> Result<Option<PathBuf>, Error> {
    match dunce::canonicalize(path) {
        Ok(p) => {
            debug_assert!(p.is_absolute());
            debug_assert!(p.to_string_lossy() == "/" || !p.to_string_lossy().ends_with('/'));
            Ok(Some(p))
        }
        Err(canon_err) => match fs::symlink_metadata(path) {
            Ok(meta) if meta.file_type().is_symlink() => {
                debug!(path = %path.display(), "ignoring dangling top-level symlink");
                Ok(None)
            }
            Ok(_) => Err(Error::Io(canon_err)),
            Err(lstat_err) => Err(Error::Io(lstat_err)),
        },
    }
}
