use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::domain::{ExtractOutcome, StreamRecord};
use crate::enumerate::named_streams;
use crate::error::{AdsError, Result};
use crate::repo::StreamRepo;

pub const DEFAULT_OUTPUT_DIR: &str = "ADSOutput";

#[derive(Clone, Debug)]
pub struct ExtractOptions {
    /// Directory receiving `<host>_<stream>` files; created when missing.
    pub output_dir: PathBuf,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

/// Strip every `:` so the stream name is usable as a file name.
pub fn sanitize_stream_name(name: &str) -> String {
    name.chars().filter(|&c| c != ':').collect()
}

/// `<host base name>_<sanitized stream name>`.
pub fn target_file_name(host: &Path, stream: &str) -> Result<String> {
    let clean = sanitize_stream_name(stream);
    if clean.is_empty() || clean.contains(['/', '\\']) || clean == "." || clean == ".." {
        return Err(AdsError::InvalidStreamName {
            stream: stream.to_string(),
        });
    }
    let base = host
        .file_name()
        .ok_or_else(|| AdsError::NotFound {
            path: host.to_path_buf(),
        })?
        .to_string_lossy();
    Ok(format!("{base}_{clean}"))
}

/// Copy every named stream of `host` into `opts.output_dir`.
///
/// Existing targets are skipped. A failure on one stream is recorded and the
/// remaining streams are still extracted; only a failure to create the output
/// directory aborts the batch.
pub fn extract_streams(
    repo: &dyn StreamRepo,
    host: &Path,
    opts: &ExtractOptions,
) -> Result<Vec<ExtractOutcome>> {
    let streams = named_streams(repo, host)?;

    if !opts.output_dir.is_dir() {
        fs::create_dir_all(&opts.output_dir).map_err(|source| AdsError::DirectoryCreate {
            path: opts.output_dir.clone(),
            source,
        })?;
        debug!(dir = %opts.output_dir.display(), "created output directory");
    }

    let mut used = HashSet::new();
    let mut out = Vec::with_capacity(streams.len());
    for rec in &streams {
        let outcome = extract_one(repo, host, rec, &opts.output_dir, &mut used);
        if let ExtractOutcome::Failed { stream, error } = &outcome {
            warn!(host = %host.display(), stream = %stream, %error, "stream extraction failed");
        }
        out.push(outcome);
    }
    info!(
        host = %host.display(),
        streams = streams.len(),
        failed = out.iter().filter(|o| o.is_failure()).count(),
        "extraction finished"
    );
    Ok(out)
}

fn extract_one(
    repo: &dyn StreamRepo,
    host: &Path,
    rec: &StreamRecord,
    dir: &Path,
    used: &mut HashSet<PathBuf>,
) -> ExtractOutcome {
    let failed = |error| ExtractOutcome::Failed {
        stream: rec.name.clone(),
        error,
    };

    let target = match target_file_name(host, &rec.name) {
        Ok(n) => dir.join(n),
        Err(e) => return failed(e),
    };
    if !used.insert(target.clone()) {
        return failed(AdsError::NameCollision {
            stream: rec.name.clone(),
            target,
        });
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(&target) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            debug!(target = %target.display(), "already extracted");
            return ExtractOutcome::AlreadyExtracted {
                stream: rec.name.clone(),
                path: target,
            };
        }
        Err(e) => return failed(AdsError::stream(&rec.host_file, &rec.name, e)),
    };

    let copied = repo
        .open_stream(host, &rec.name)
        .and_then(|mut r| {
            io::copy(&mut r, &mut file)
                .map_err(|e| AdsError::stream(&rec.host_file, &rec.name, e))
        });
    drop(file);

    match copied {
        Ok(bytes) => ExtractOutcome::Extracted {
            host: host_label(host),
            stream: rec.name.clone(),
            path: target,
            bytes,
        },
        Err(e) => {
            // leave nothing behind so a re-run retries this stream
            if let Err(cleanup) = fs::remove_file(&target) {
                debug!(target = %target.display(), %cleanup, "could not remove partial file");
            }
            used.remove(&target);
            failed(e)
        }
    }
}

fn host_label(host: &Path) -> String {
    host.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| host.display().to_string())
}
