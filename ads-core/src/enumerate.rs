use std::path::Path;

use tracing::debug;

use crate::domain::StreamRecord;
use crate::error::{AdsError, Result};
use crate::repo::StreamRepo;

/// Check that `host` currently resolves to a regular file.
pub fn ensure_file(host: &Path) -> Result<()> {
    match std::fs::metadata(host) {
        Ok(md) if md.is_file() => Ok(()),
        Ok(_) => Err(AdsError::NotAFile {
            path: host.to_path_buf(),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AdsError::NotFound {
            path: host.to_path_buf(),
        }),
        Err(e) => Err(e.into()),
    }
}

/// Every stream attached to `host`, the primary stream included.
pub fn list_streams(repo: &dyn StreamRepo, host: &Path) -> Result<Vec<StreamRecord>> {
    ensure_file(host)?;
    let records = repo.list_streams(host)?;
    debug!(host = %host.display(), streams = records.len(), "enumerated streams");
    Ok(records)
}

/// Enumerated streams minus the primary one.
pub fn named_streams(repo: &dyn StreamRepo, host: &Path) -> Result<Vec<StreamRecord>> {
    Ok(list_streams(repo, host)?
        .into_iter()
        .filter(|r| !r.is_primary)
        .collect())
}
