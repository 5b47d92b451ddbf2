#![deny(unsafe_code)]

pub mod error;

pub mod domain;
pub mod repo;
pub mod repo_factory;
pub mod repo_mem;
pub mod repo_ntfs;

pub mod add;
pub mod dispatch;
pub mod enumerate;
pub mod extract;
pub mod remove;

// Re-exports: stable API surface
pub use add::add_stream;
pub use dispatch::{Dispatch, HostReport, Operation, OperationReport, dispatch, dispatch_batch};
pub use domain::{AddOutcome, ExtractOutcome, PRIMARY_STREAM_NAME, RemoveOutcome, StreamRecord};
pub use enumerate::list_streams;
pub use extract::{DEFAULT_OUTPUT_DIR, ExtractOptions, extract_streams};
pub use remove::remove_streams;
