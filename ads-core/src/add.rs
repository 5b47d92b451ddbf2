use std::fs::File;
use std::io;
use std::path::Path;

use tracing::{debug, info};

use crate::domain::AddOutcome;
use crate::enumerate::list_streams;
use crate::error::{AdsError, Result};
use crate::repo::StreamRepo;

/// Embed `source` into `host` as a stream named after the source's base name.
///
/// An existing stream of that name is left untouched. Write failures are
/// fatal and nothing already written is cleaned up.
pub fn add_stream(repo: &dyn StreamRepo, host: &Path, source: &Path) -> Result<AddOutcome> {
    let md = std::fs::metadata(source).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => AdsError::NotFound {
            path: source.to_path_buf(),
        },
        _ => e.into(),
    })?;
    if !md.is_file() {
        return Err(AdsError::NotFound {
            path: source.to_path_buf(),
        });
    }
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| AdsError::NotFound {
            path: source.to_path_buf(),
        })?;

    let existing = list_streams(repo, host)?;
    if existing.iter().any(|r| !r.is_primary && r.name == name) {
        debug!(host = %host.display(), stream = %name, "stream already present");
        return Ok(AddOutcome::AlreadyExists { stream: name });
    }

    let host_file = host.display().to_string();
    let mut w = match repo.create_stream(host, &name) {
        Ok(w) => w,
        Err(AdsError::Stream { source: cause, .. }) if cause.kind() == io::ErrorKind::AlreadyExists => {
            return Ok(AddOutcome::AlreadyExists { stream: name });
        }
        Err(e) => return Err(e),
    };

    let mut src = File::open(source).map_err(|e| AdsError::stream(&host_file, &name, e))?;
    let bytes = io::copy(&mut src, &mut w)
        .and_then(|n| w.flush().map(|_| n))
        .map_err(|e| AdsError::stream(&host_file, &name, e))?;

    info!(host = %host_file, stream = %name, bytes, "added stream");
    Ok(AddOutcome::Added {
        stream: name,
        bytes,
    })
}
