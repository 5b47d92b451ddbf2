// ads_core/src/domain.rs
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::AdsError;

/// Name under which the primary (unnamed) data stream is reported.
pub const PRIMARY_STREAM_NAME: &str = ":$DATA";

/// One stream attached to a host file, as seen by a single enumeration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StreamRecord {
    pub host_file: String,
    pub name: String,
    pub length: u64,
    pub is_primary: bool,
}

impl StreamRecord {
    pub fn primary(host_file: impl Into<String>, length: u64) -> Self {
        Self {
            host_file: host_file.into(),
            name: PRIMARY_STREAM_NAME.to_string(),
            length,
            is_primary: true,
        }
    }

    pub fn named(host_file: impl Into<String>, name: impl Into<String>, length: u64) -> Self {
        Self {
            host_file: host_file.into(),
            name: name.into(),
            length,
            is_primary: false,
        }
    }
}

#[derive(Debug)]
pub enum ExtractOutcome {
    Extracted {
        host: String,
        stream: String,
        path: PathBuf,
        bytes: u64,
    },
    AlreadyExtracted {
        stream: String,
        path: PathBuf,
    },
    Failed {
        stream: String,
        error: AdsError,
    },
}

impl ExtractOutcome {
    pub fn stream(&self) -> &str {
        match self {
            ExtractOutcome::Extracted { stream, .. }
            | ExtractOutcome::AlreadyExtracted { stream, .. }
            | ExtractOutcome::Failed { stream, .. } => stream,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ExtractOutcome::Failed { .. })
    }
}

impl fmt::Display for ExtractOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractOutcome::Extracted {
                host, stream, path, ..
            } => write!(f, "Extracting {host}:{stream} to {}...", path.display()),
            ExtractOutcome::AlreadyExtracted { stream, path } => write!(
                f,
                "{} was already extracted, skipping {stream}.",
                path.display()
            ),
            ExtractOutcome::Failed { stream, error } => {
                write!(f, "Failed to extract {stream}: {error}")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    Added { stream: String, bytes: u64 },
    AlreadyExists { stream: String },
}

impl fmt::Display for AddOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddOutcome::Added { stream, bytes } => {
                write!(f, "Added data stream {stream} ({bytes} bytes).")
            }
            AddOutcome::AlreadyExists { .. } => f.write_str("The stream already exists."),
        }
    }
}

#[derive(Debug)]
pub enum RemoveOutcome {
    Removed { stream: String },
    NotExists { stream: String },
    Failed { stream: String, error: AdsError },
}

impl RemoveOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, RemoveOutcome::Failed { .. })
    }
}

impl fmt::Display for RemoveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoveOutcome::Removed { stream } => write!(f, "Removing data stream {stream}..."),
            RemoveOutcome::NotExists { stream } => {
                write!(f, "The data stream {stream} does not exist.")
            }
            RemoveOutcome::Failed { stream, error } => {
                write!(f, "Failed to remove data stream {stream}: {error}")
            }
        }
    }
}
