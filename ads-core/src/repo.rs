// ads_core/src/repo.rs
use crate::domain::StreamRecord;
use crate::error::Result;
use std::io::{Read, Write};
use std::path::Path;

/// Storage seam for stream primitives. Stream names are the bare names
/// reported in [`StreamRecord::name`].
pub trait StreamRepo: Send + Sync {
    /// Every stream on `host`, primary included.
    fn list_streams(&self, host: &Path) -> Result<Vec<StreamRecord>>;

    fn open_stream(&self, host: &Path, name: &str) -> Result<Box<dyn Read + Send + '_>>;

    /// Create a new, empty named stream. Fails with an `AlreadyExists` I/O
    /// error when the stream is already present; never truncates.
    fn create_stream(&self, host: &Path, name: &str) -> Result<Box<dyn Write + Send + '_>>;

    fn delete_stream(&self, host: &Path, name: &str) -> Result<()>;
}
