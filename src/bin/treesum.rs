//! treesum CLI binary.

use anyhow::Context;
use clap::Parser;
use std::io;
use std::process;
use tracing::error;
use treesum::cli::{self, Cli};
use treesum::logging::{init_logging, LoggingConfig};

fn main() {
    let cli = Cli::parse();

    let logging_config = LoggingConfig::from_flags(cli.verbose, cli.debug);
    if let Err(e) = init_logging(&logging_config) {
        eprintln!("{}", e);
        process::exit(1);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = cli::run(&cli, &mut out).context("treesum failed") {
        error!("{:#}", e);
        eprintln!("{:#}", e);
        process::exit(1);
    }
}
