//! Squash aggregation: folding per-entry digests into one tree digest.
//!
//! Two mutually exclusive policies, selected at runtime and fixed for the
//! whole invocation. `Set` collects per-entry digests into a sorted multiset
//! so the aggregate is invariant to visit order; `Chain` re-digests a running
//! accumulator per entry, so the aggregate depends on visit order and is only
//! reproducible together with the walker's sorted mode.

use crate::error::Error;
use crate::hash;
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SquashPolicy {
    /// Order-independent multiset of per-entry digests.
    Set,
    /// Order-dependent incremental chaining.
    Chain,
}

impl SquashPolicy {
    /// Label printed with the aggregate line; the digit doubles as the
    /// aggregate format version.
    pub fn tag(&self) -> &'static str {
        match self {
            SquashPolicy::Set => "squash1",
            SquashPolicy::Chain => "squash2",
        }
    }
}

/// Per-input accumulator. Created at traversal start, updated once per
/// surviving entry, finalized once, then discarded.
#[derive(Debug)]
pub struct SquashAccumulator {
    policy: SquashPolicy,
    algorithm: String,
    /// `Set`: one hex digest per entry. `Chain`: singleton running digest.
    sums: Vec<Vec<u8>>,
}

impl SquashAccumulator {
    pub fn new(policy: SquashPolicy, algorithm: &str) -> Self {
        Self {
            policy,
            algorithm: algorithm.to_string(),
            sums: Vec::new(),
        }
    }

    pub fn policy(&self) -> SquashPolicy {
        self.policy
    }

    /// Fold one entry's canonical payload (realized path bytes followed by
    /// its digest, or the digest alone in hash-only mode) into the
    /// accumulator.
    pub fn update(&mut self, payload: &[u8]) -> Result<(), Error> {
        match self.policy {
            SquashPolicy::Set => {
                // Digest each payload so the collected set stays small.
                let (_, sum) = hash::hash_bytes(payload, &self.algorithm)?;
                self.sums.push(sum);
            }
            SquashPolicy::Chain => {
                let mut buf = self.sums.pop().unwrap_or_default();
                buf.extend_from_slice(payload);
                let (_, sum) = hash::hash_bytes(&buf, &self.algorithm)?;
                self.sums.push(sum);
            }
        }
        Ok(())
    }

    /// Final aggregate buffer; digested once more by the caller and printed
    /// like a per-entry digest.
    pub fn finalize(self) -> Vec<u8> {
        match self.policy {
            SquashPolicy::Set => {
                let mut hex_sums: Vec<String> =
                    self.sums.iter().map(|s| hash::hex_sum(s)).collect();
                hex_sums.sort_unstable();
                hex_sums.concat().into_bytes()
            }
            SquashPolicy::Chain => self.sums.into_iter().next().unwrap_or_default(),
        }
    }
}
