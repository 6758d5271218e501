//! Invocation configuration.
//!
//! One `SumConfig` is built from the CLI (or by hand in tests) and validated
//! once before any traversal starts; every component reads it immutably.

use crate::error::Error;
use crate::hash;
use crate::squash::SquashPolicy;

#[derive(Debug, Clone)]
pub struct SumConfig {
    /// Digest algorithm name, lowercase.
    pub algorithm: String,
    /// Verification digest (lowercase hex); entries not matching it are
    /// suppressed from output.
    pub verify: Option<String>,
    /// Print digests without paths.
    pub hash_only: bool,
    /// Ignore any dot entry (file or directory segment).
    pub ignore_dot: bool,
    /// Ignore entries under a dot directory.
    pub ignore_dot_dir: bool,
    /// Ignore dot-named files.
    pub ignore_dot_file: bool,
    /// Exclude symlinks entirely, before target resolution.
    pub ignore_symlink: bool,
    /// Follow symlinks to their targets (false = lstat mode).
    pub follow_symlinks: bool,
    /// Print absolute paths instead of InputPrefix-relative ones.
    pub absolute: bool,
    /// Swap digest and path columns.
    pub swap: bool,
    /// Squash per-entry digests into one aggregate digest.
    pub squash: Option<SquashPolicy>,
    /// Collect and sort all paths before dispatching, for deterministic order.
    pub sorted: bool,
    /// End-of-run summary reporting.
    pub verbose: bool,
}

impl Default for SumConfig {
    fn default() -> Self {
        Self {
            algorithm: hash::SHA256.to_string(),
            verify: None,
            hash_only: false,
            ignore_dot: false,
            ignore_dot_dir: false,
            ignore_dot_file: false,
            ignore_symlink: false,
            follow_symlinks: true,
            absolute: false,
            swap: false,
            squash: None,
            sorted: false,
            verbose: false,
        }
    }
}

impl SumConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_algorithm(mut self, algorithm: &str) -> Self {
        self.algorithm = algorithm.to_ascii_lowercase();
        self
    }

    pub fn with_verify(mut self, verify: Option<String>) -> Self {
        self.verify = verify;
        self
    }

    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    pub fn with_squash(mut self, policy: Option<SquashPolicy>) -> Self {
        self.squash = policy;
        // Chained squashing is order-dependent; only a sorted walk makes it
        // reproducible.
        if matches!(self.squash, Some(SquashPolicy::Chain)) {
            self.sorted = true;
        }
        self
    }

    pub fn with_sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    /// Pre-traversal configuration checks. Failures here are fatal before any
    /// entry is visited.
    pub fn validate(&mut self) -> Result<(), Error> {
        hash::validate_algorithm(&self.algorithm)?;

        if let Some(ref raw) = self.verify {
            let normalized = hash::normalize_hex_sum(raw)
                .ok_or_else(|| Error::InvalidVerifyDigest(raw.clone()))?;
            self.verify = Some(normalized);
        }

        if matches!(self.squash, Some(SquashPolicy::Chain)) && !self.sorted {
            self.sorted = true;
        }

        Ok(())
    }
}
