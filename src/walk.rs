//! Depth-first traversal and per-entry dispatch.
//!
//! One `Traversal` is created per top-level input and owns all traversal
//! state: the path context, the stat collector and the optional squash
//! accumulator. Nothing is shared across inputs.

use crate::classify::{self, EntryType};
use crate::config::SumConfig;
use crate::error::Error;
use crate::filter;
use crate::hash;
use crate::report::{self, PathContext};
use crate::squash::SquashAccumulator;
use crate::stat::StatSummary;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Digest one top-level input and write its report.
///
/// The input is canonicalized first; a dangling symlink input is silently
/// skipped. Hard per-entry I/O errors abort the traversal and propagate.
pub fn process_input<W: Write>(input: &Path, config: &SumConfig, out: &mut W) -> Result<(), Error> {
    let root = match classify::canonicalize_input(input)? {
        Some(root) => root,
        None => return Ok(()),
    };

    // The canonical input decides the prefix anchoring relative paths.
    let raw = classify::raw_entry_type(&root);
    let prefix = match raw {
        EntryType::Dir => root.clone(),
        EntryType::Reg | EntryType::Device => root
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| Error::InvalidPath(root.display().to_string()))?,
        other => {
            return Err(Error::UnsupportedInput {
                path: root,
                kind: other,
            })
        }
    };
    debug_assert_eq!(classify::raw_entry_type(&prefix), EntryType::Dir);

    Traversal::new(root, prefix, config, out).run()
}

struct Traversal<'a, W: Write> {
    root: PathBuf,
    ctx: PathContext,
    config: &'a SumConfig,
    stats: StatSummary,
    squash: Option<SquashAccumulator>,
    out: &'a mut W,
}

impl<'a, W: Write> Traversal<'a, W> {
    fn new(root: PathBuf, prefix: PathBuf, config: &'a SumConfig, out: &'a mut W) -> Self {
        let squash = config
            .squash
            .map(|policy| SquashAccumulator::new(policy, &config.algorithm));
        Self {
            root,
            ctx: PathContext::new(prefix, config.absolute),
            config,
            stats: StatSummary::new(),
            squash,
            out,
        }
    }

    fn run(mut self) -> Result<(), Error> {
        if self.config.sorted {
            // Buffer the whole path set and visit in lexicographic order so
            // identical trees dispatch identically regardless of how the OS
            // enumerates directories.
            let mut paths = Vec::new();
            for entry in WalkDir::new(&self.root) {
                paths.push(entry?.into_path());
            }
            paths.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
            for path in paths {
                self.dispatch(&path)?;
            }
        } else {
            for entry in WalkDir::new(&self.root) {
                let path = entry?.into_path();
                self.dispatch(&path)?;
            }
        }

        if self.config.verbose {
            report::write_verbose_stats(self.out, &self.stats, &self.ctx)?;
        }
        report::write_soft_listings(self.out, &self.stats, &self.ctx)?;

        if let Some(acc) = self.squash.take() {
            let tag = acc.policy().tag();
            let buf = acc.finalize();
            if self.config.verbose {
                writeln!(
                    self.out,
                    "{}",
                    report::num_format(buf.len() as u64, "squashed byte")
                )?;
            }
            let (_, sum) = hash::hash_bytes(&buf, &self.config.algorithm)?;
            let hex = hash::hex_sum(&sum);
            if self.verify_mismatch(&hex) {
                return Ok(());
            }
            if self.config.hash_only {
                writeln!(self.out, "{}", hex)?;
            } else {
                let label = format!("{}:{}", tag, self.ctx.realize(&self.root));
                writeln!(
                    self.out,
                    "{}",
                    report::xsum_line(&hex, &label, self.config.swap)
                )?;
            }
        }

        Ok(())
    }

    fn dispatch(&mut self, path: &Path) -> Result<(), Error> {
        debug_assert!(path.is_absolute());
        let raw = classify::raw_entry_type(path);
        debug!(path = %path.display(), kind = %raw, "visit");

        if filter::should_ignore(path, raw, self.config) {
            self.stats.record_ignored(path);
            return Ok(());
        }

        match raw {
            EntryType::Symlink => {
                if self.config.ignore_symlink {
                    self.stats.record_ignored(path);
                    return Ok(());
                }
                if !self.config.follow_symlinks {
                    return self.handle_symlink(path);
                }
                let (target, resolved) = classify::resolve_symlink(path);
                match resolved {
                    // A symlink to a directory is neither descended nor
                    // counted as ignored.
                    EntryType::Dir => Ok(()),
                    EntryType::Reg | EntryType::Device => {
                        self.handle_file(&target, Some(path), resolved)
                    }
                    EntryType::Unsupported => {
                        self.stats.record_unsupported(path);
                        Ok(())
                    }
                    EntryType::Invalid => {
                        self.stats.record_invalid(path);
                        Ok(())
                    }
                    EntryType::Symlink => unreachable!("unresolved symlink chain"),
                }
            }
            EntryType::Dir => {
                // The traversal root is visited but never hashed or printed.
                if path == self.root {
                    return Ok(());
                }
                if self.squash.is_some() {
                    self.handle_directory(path)
                } else {
                    Ok(())
                }
            }
            EntryType::Reg | EntryType::Device => self.handle_file(path, None, raw),
            EntryType::Unsupported => {
                self.stats.record_unsupported(path);
                Ok(())
            }
            EntryType::Invalid => {
                self.stats.record_invalid(path);
                Ok(())
            }
        }
    }

    /// Regular file or device content, streamed. `link` is set when the entry
    /// was reached through a symlink and holds the link's own path.
    fn handle_file(
        &mut self,
        path: &Path,
        link: Option<&Path>,
        resolved: EntryType,
    ) -> Result<(), Error> {
        let (written, sum) = hash::hash_file(path, &self.config.algorithm)?;
        debug_assert!(!sum.is_empty());
        self.stats.record_hashed(path, resolved, written);

        let hex = hash::hex_sum(&sum);
        if self.verify_mismatch(&hex) {
            return Ok(());
        }

        if self.config.hash_only {
            return self.emit(&hex, None, &sum);
        }

        let mut realized = self.ctx.realize(path);
        if let Some(link) = link {
            realized = format!("{} -> {}", self.ctx.realize(link), realized);
        }
        self.emit(&hex, Some(&realized), &sum)
    }

    /// Symlink in no-follow mode: the digest covers the link's own basename,
    /// never the target's bytes; the printed line shows `link -> target`.
    fn handle_symlink(&mut self, path: &Path) -> Result<(), Error> {
        let target = fs::read_link(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| Error::InvalidPath(path.display().to_string()))?;

        let (written, sum) = hash::hash_string(&name, &self.config.algorithm)?;
        debug_assert!(!sum.is_empty());
        self.stats.record_hashed(path, EntryType::Symlink, written);

        let hex = hash::hex_sum(&sum);
        if self.verify_mismatch(&hex) {
            return Ok(());
        }

        if self.config.hash_only {
            return self.emit(&hex, None, &sum);
        }

        let realized = format!(
            "{} -> {}",
            self.ctx.realize(path),
            target.to_string_lossy()
        );
        self.emit(&hex, Some(&realized), &sum)
    }

    /// Directory in squash mode: the payload is the prefix-relative path, so
    /// empty directories still shape the aggregate digest.
    fn handle_directory(&mut self, path: &Path) -> Result<(), Error> {
        let realized = self.ctx.realize(path);
        let (written, sum) = hash::hash_string(&realized, &self.config.algorithm)?;
        debug_assert!(!sum.is_empty());
        self.stats.record_hashed(path, EntryType::Dir, written);

        let hex = hash::hex_sum(&sum);
        if self.verify_mismatch(&hex) {
            return Ok(());
        }

        if self.config.hash_only {
            self.emit(&hex, None, &sum)
        } else {
            self.emit(&hex, Some(&realized), &sum)
        }
    }

    fn verify_mismatch(&self, hex: &str) -> bool {
        match self.config.verify {
            Some(ref want) => want != hex,
            None => false,
        }
    }

    /// Route one surviving entry to the squash accumulator or the writer.
    /// `realized` is `None` in hash-only mode.
    fn emit(&mut self, hex: &str, realized: Option<&str>, sum: &[u8]) -> Result<(), Error> {
        match (&mut self.squash, realized) {
            (Some(acc), Some(realized)) => {
                let mut payload = realized.as_bytes().to_vec();
                payload.extend_from_slice(sum);
                acc.update(&payload)?;
            }
            (Some(acc), None) => acc.update(sum)?,
            (None, Some(realized)) => {
                if realized == "." {
                    writeln!(self.out, "{}", hex)?;
                } else {
                    writeln!(
                        self.out,
                        "{}",
                        report::xsum_line(hex, realized, self.config.swap)
                    )?;
                }
            }
            (None, None) => writeln!(self.out, "{}", hex)?,
        }
        Ok(())
    }
}
