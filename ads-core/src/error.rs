use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdsError {
    #[error("not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("not a regular file: {}", path.display())]
    NotAFile { path: PathBuf },

    #[error("cannot create output directory {}: {source}", path.display())]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("stream {host}:{stream}: {source}")]
    Stream {
        host: String,
        stream: String,
        #[source]
        source: std::io::Error,
    },

    #[error("stream {stream} maps to {} which another stream already used", target.display())]
    NameCollision { stream: String, target: PathBuf },

    #[error("invalid stream name: {stream}")]
    InvalidStreamName { stream: String },

    #[error("unsupported: {0}")]
    Unsupported(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AdsError {
    pub fn stream(host: &str, stream: &str, source: std::io::Error) -> Self {
        AdsError::Stream {
            host: host.to_string(),
            stream: stream.to_string(),
            source,
        }
    }

    /// True for errors that mean "the thing is gone", whatever layer reported it.
    pub fn is_not_found(&self) -> bool {
        match self {
            AdsError::NotFound { .. } => true,
            AdsError::Stream { source, .. } | AdsError::Io(source) => {
                source.kind() == std::io::ErrorKind::NotFound
            }
            _ => false,
        }
    }
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, AdsError>;
