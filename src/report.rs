//! Output formatting: path realization against the input prefix, checksum
//! line layout and the end-of-run summary.

use crate::classify::{self, EntryType};
use crate::stat::StatSummary;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Anchors relative-path realization for one traversal: the input directory
/// itself, or the parent directory of a file input. Never ends with a slash.
#[derive(Debug, Clone)]
pub struct PathContext {
    prefix: PathBuf,
    absolute: bool,
}

impl PathContext {
    pub fn new(prefix: PathBuf, absolute: bool) -> Self {
        debug_assert!(prefix.is_absolute());
        debug_assert!(
            prefix.to_string_lossy() == "/" || !prefix.to_string_lossy().ends_with('/')
        );
        Self { prefix, absolute }
    }

    pub fn prefix(&self) -> &Path {
        &self.prefix
    }

    /// Human-facing rendering of an absolute path.
    ///
    /// The prefix itself renders as `.`; paths under the prefix render
    /// relative to it; anything else (typically a symlink target outside the
    /// tree) renders unchanged. `absolute` overrides all of that.
    pub fn realize(&self, path: &Path) -> String {
        debug_assert!(path.is_absolute());
        let path_str = path.to_string_lossy();

        if self.absolute {
            return path_str.into_owned();
        }

        let prefix_cow = self.prefix.to_string_lossy();
        let prefix_str: &str = &prefix_cow;
        if path_str == prefix_str {
            ".".to_string()
        } else if prefix_str == "/" {
            path_str[1..].to_string()
        } else if let Some(rest) = path_str
            .strip_prefix(prefix_str)
            .and_then(|r| r.strip_prefix('/'))
        {
            debug_assert!(!rest.starts_with('/'));
            rest.to_string()
        } else {
            path_str.into_owned()
        }
    }
}

/// shaXsum-compatible output line: `<hex>  <path>`, columns swappable.
pub fn xsum_line(hex_sum: &str, path: &str, swap: bool) -> String {
    if swap {
        format!("{}  {}", path, hex_sum)
    } else {
        format!("{}  {}", hex_sum, path)
    }
}

/// `N <noun>` with naive pluralization; "directory" becomes "directories".
pub fn num_format(n: u64, noun: &str) -> String {
    if n == 1 {
        return format!("{} {}", n, noun);
    }
    if let Some(stem) = noun.strip_suffix("directory") {
        format!("{} {}directories", n, stem)
    } else {
        format!("{} {}s", n, noun)
    }
}

/// Unsupported and invalid listings; printed unconditionally at end of run.
pub fn write_soft_listings<W: Write>(
    w: &mut W,
    stats: &StatSummary,
    ctx: &PathContext,
) -> std::io::Result<()> {
    write_listing(w, stats.unsupported(), "unsupported file", ctx)?;
    write_listing(w, stats.invalid(), "invalid file", ctx)?;
    Ok(())
}

/// Verbose summary: counts and byte totals per hashed type, then the ignored
/// listing.
pub fn write_verbose_stats<W: Write>(
    w: &mut W,
    stats: &StatSummary,
    ctx: &PathContext,
) -> std::io::Result<()> {
    let indent = " ";

    writeln!(w, "{}", num_format(stats.num_total(), "file"))?;
    let pairs = [
        (stats.num_directories(), "directory"),
        (stats.num_regulars(), "regular file"),
        (stats.num_devices(), "device"),
        (stats.num_symlinks(), "symlink"),
    ];
    for (n, noun) in pairs {
        if n > 0 {
            writeln!(w, "{}{}", indent, num_format(n, noun))?;
        }
    }

    writeln!(w, "{}", num_format(stats.written_total(), "byte"))?;
    let written = [
        (stats.written_directory(), "directory byte"),
        (stats.written_regular(), "regular file byte"),
        (stats.written_device(), "device byte"),
        (stats.written_symlink(), "symlink byte"),
    ];
    for (n, noun) in written {
        if n > 0 {
            writeln!(w, "{}{}", indent, num_format(n, noun))?;
        }
    }

    write_listing(w, stats.ignored(), "ignored file", ctx)?;
    Ok(())
}

fn write_listing<W: Write>(
    w: &mut W,
    paths: &[PathBuf],
    noun: &str,
    ctx: &PathContext,
) -> std::io::Result<()> {
    if paths.is_empty() {
        return Ok(());
    }
    writeln!(w, "{}", num_format(paths.len() as u64, noun))?;

    for path in paths {
        let realized = ctx.realize(path);
        let raw = classify::raw_entry_type(path);
        if raw == EntryType::Symlink {
            let resolved = classify::entry_type(path);
            writeln!(w, "{} ({} -> {})", realized, raw, resolved)?;
        } else {
            writeln!(w, "{} ({})", realized, raw)?;
        }
    }
    Ok(())
}
