use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::add::add_stream;
use crate::domain::{AddOutcome, ExtractOutcome, RemoveOutcome, StreamRecord};
use crate::enumerate::list_streams;
use crate::error::{AdsError, Result};
use crate::extract::{ExtractOptions, extract_streams};
use crate::remove::remove_streams;
use crate::repo::StreamRepo;

/// The single operation requested for an invocation.
#[derive(Clone, Debug, Default)]
pub enum Operation {
    #[default]
    List,
    Extract(ExtractOptions),
    Add {
        source: PathBuf,
    },
    RemoveAll,
    RemoveStream(String),
}

#[derive(Debug)]
pub enum OperationReport {
    Listed,
    Extracted(Vec<ExtractOutcome>),
    Added(AddOutcome),
    Removed(Vec<RemoveOutcome>),
}

#[derive(Debug)]
pub struct HostReport {
    pub host: PathBuf,
    /// Listing taken before the operation ran.
    pub streams: Vec<StreamRecord>,
    pub report: OperationReport,
}

#[derive(Debug)]
pub enum Dispatch {
    SkippedDirectory(PathBuf),
    Processed(HostReport),
}

/// Validate `host`, list its streams, then run `op` against it.
pub fn dispatch(repo: &dyn StreamRepo, host: &Path, op: &Operation) -> Result<Dispatch> {
    let md = std::fs::metadata(host).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => AdsError::NotFound {
            path: host.to_path_buf(),
        },
        _ => e.into(),
    })?;
    if md.is_dir() {
        debug!(path = %host.display(), "skipping directory");
        return Ok(Dispatch::SkippedDirectory(host.to_path_buf()));
    }

    let streams = list_streams(repo, host)?;
    let report = match op {
        Operation::List => OperationReport::Listed,
        Operation::Extract(opts) => OperationReport::Extracted(extract_streams(repo, host, opts)?),
        Operation::Add { source } => OperationReport::Added(add_stream(repo, host, source)?),
        Operation::RemoveAll => OperationReport::Removed(remove_streams(repo, host, None)?),
        Operation::RemoveStream(name) => {
            OperationReport::Removed(remove_streams(repo, host, Some(name))?)
        }
    };
    Ok(Dispatch::Processed(HostReport {
        host: host.to_path_buf(),
        streams,
        report,
    }))
}

/// Run `op` on every host in order; one host failing never stops the rest.
pub fn dispatch_batch<P: AsRef<Path>>(
    repo: &dyn StreamRepo,
    hosts: &[P],
    op: &Operation,
) -> Vec<(PathBuf, Result<Dispatch>)> {
    let results: Vec<_> = hosts
        .iter()
        .map(|h| {
            let h = h.as_ref();
            (h.to_path_buf(), dispatch(repo, h, op))
        })
        .collect();
    info!(
        hosts = results.len(),
        failed = results.iter().filter(|(_, r)| r.is_err()).count(),
        "batch finished"
    );
    results
}
