//! treesum: recursive message digests for directory trees.
//!
//! Walks a filesystem subtree depth-first, classifies every entry, digests
//! the surviving ones with a configurable hash algorithm, and either prints
//! one shaXsum-style line per entry or folds all per-entry digests into a
//! single aggregate ("squashed") digest for the whole tree.

pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod hash;
pub mod logging;
pub mod report;
pub mod squash;
pub mod stat;
pub mod walk;

pub use classify::EntryType;
pub use config::SumConfig;
pub use error::Error;
pub use report::PathContext;
pub use squash::{SquashAccumulator, SquashPolicy};
pub use stat::StatSummary;
