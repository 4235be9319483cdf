//! Populating a [crate::nodeservice::MemoryNodeService] with content from
//! elsewhere.
//!
//! Specific implementations, such as ingesting from the filesystem, live in
//! child modules.

mod error;
pub use error::IngestionError;

pub mod fs;

pub use fs::ingest_path;
