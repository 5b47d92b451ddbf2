use std::path::Path;

use tracing::{info, warn};

use crate::domain::RemoveOutcome;
use crate::enumerate::named_streams;
use crate::error::Result;
use crate::repo::StreamRepo;

/// Delete the named streams of `host`: all of them, or only the one called
/// `filter`. The primary stream is never touched.
pub fn remove_streams(
    repo: &dyn StreamRepo,
    host: &Path,
    filter: Option<&str>,
) -> Result<Vec<RemoveOutcome>> {
    let targets: Vec<_> = named_streams(repo, host)?
        .into_iter()
        .filter(|r| filter.is_none_or(|f| r.name == f))
        .collect();

    if let Some(f) = filter
        && targets.is_empty()
    {
        info!(host = %host.display(), stream = f, "no such stream");
        return Ok(vec![RemoveOutcome::NotExists {
            stream: f.to_string(),
        }]);
    }

    let mut out = Vec::with_capacity(targets.len());
    for rec in targets {
        match repo.delete_stream(host, &rec.name) {
            Ok(()) => {
                info!(host = %host.display(), stream = %rec.name, "removed stream");
                out.push(RemoveOutcome::Removed { stream: rec.name });
            }
            Err(error) => {
                warn!(host = %host.display(), stream = %rec.name, %error, "stream removal failed");
                out.push(RemoveOutcome::Failed {
                    stream: rec.name,
                    error,
                });
            }
        }
    }
    Ok(out)
}
