pub mod handlers;

use std::io::BufRead;
use std::path::PathBuf;

use crate::presentation::cli::Cli;
use ads_core::error::Result;
use ads_core::repo_factory::{Backend, open_repo};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_stdin_paths() -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let p = line.trim();
        if !p.is_empty() {
            out.push(PathBuf::from(p));
        }
    }
    Ok(out)
}

/// Returns the number of hosts that failed.
pub fn run() -> Result<usize> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut hosts = cli.files.clone();
    if cli.stdin {
        hosts.extend(read_stdin_paths()?);
    }

    let repo = open_repo(Backend::Ntfs)?;
    let op = cli.operation();
    debug!(hosts = hosts.len(), ?op, "dispatching");
    let failed = handlers::handle_batch(
        repo.as_ref(),
        &hosts,
        &op,
        cli.json,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr(),
    )?;
    Ok(failed)
}
