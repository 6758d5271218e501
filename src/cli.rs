//! CLI definitions and invocation glue.

use crate::config::SumConfig;
use crate::error::Error;
use crate::squash::SquashPolicy;
use crate::walk;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// treesum - recursive message digests for directory trees
#[derive(Parser)]
#[command(name = "treesum")]
#[command(version)]
#[command(about = "Compute message digests across a filesystem subtree")]
pub struct Cli {
    /// Input paths (files, directories, devices or symlinks)
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Hash algorithm to use
    #[arg(long, default_value = "sha256")]
    pub hash_algo: String,

    /// Message digest to verify, in hex
    #[arg(long)]
    pub hash_verify: Option<String>,

    /// Do not print file paths
    #[arg(long)]
    pub hash_only: bool,

    /// Ignore entries starting with .
    #[arg(long)]
    pub ignore_dot: bool,

    /// Ignore directories starting with .
    #[arg(long)]
    pub ignore_dot_dir: bool,

    /// Ignore files starting with .
    #[arg(long)]
    pub ignore_dot_file: bool,

    /// Ignore symbolic links
    #[arg(long)]
    pub ignore_symlink: bool,

    /// Do not resolve symbolic links
    #[arg(long)]
    pub lstat: bool,

    /// Print paths as absolute
    #[arg(long)]
    pub abs: bool,

    /// Swap digest and path columns
    #[arg(long)]
    pub swap: bool,

    /// Print one squashed digest for the whole tree instead of per entry
    #[arg(long)]
    pub squash: bool,

    /// Squash combination policy
    #[arg(long, value_enum, default_value = "set")]
    pub squash_policy: SquashPolicy,

    /// Visit entries in sorted order for deterministic output
    #[arg(long)]
    pub sorted: bool,

    /// Enable verbose reporting
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Lower flags into a validated traversal configuration.
    pub fn to_config(&self) -> Result<SumConfig, Error> {
        let mut config = SumConfig::new()
            .with_algorithm(&self.hash_algo)
            .with_verify(self.hash_verify.clone())
            .with_follow_symlinks(!self.lstat)
            .with_squash(self.squash.then_some(self.squash_policy))
            .with_sorted(self.sorted);
        config.hash_only = self.hash_only;
        config.ignore_dot = self.ignore_dot;
        config.ignore_dot_dir = self.ignore_dot_dir;
        config.ignore_dot_file = self.ignore_dot_file;
        config.ignore_symlink = self.ignore_symlink;
        config.absolute = self.abs;
        config.swap = self.swap;
        config.verbose = self.verbose;
        config.validate()?;
        Ok(config)
    }
}

/// Process every input in order, aborting on the first failure.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<(), Error> {
    let config = cli.to_config()?;
    info!(algorithm = %config.algorithm, inputs = cli.paths.len(), "starting");

    for (i, path) in cli.paths.iter().enumerate() {
        walk::process_input(path, &config, out)?;
        // Blank separator between verbose multi-input reports.
        if config.verbose && i != cli.paths.len() - 1 {
            writeln!(out)?;
        }
    }
    Ok(())
}
