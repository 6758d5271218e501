//! Error types for the tree digest utility.

use crate::classify::EntryType;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unsupported hash algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("Invalid verify digest: {0}")]
    InvalidVerifyDigest(String),

    #[error("{}: unsupported input type ({kind})", .path.display())]
    UnsupportedInput { path: PathBuf, kind: EntryType },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
