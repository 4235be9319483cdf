use std::path::PathBuf;

use crate::{ComponentError, DirectoryError};

/// Represents all error types emitted while ingesting content.
#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    #[error("unable to walk {}: {1}", .0.display())]
    Walk(PathBuf, #[source] walkdir::Error),

    #[error("unable to read {}: {1}", .0.display())]
    UnableToRead(PathBuf, #[source] std::io::Error),

    #[error("unsupported file type at {}", .0.display())]
    UnsupportedFileType(PathBuf),

    #[error("invalid name at {}: {1}", .0.display())]
    InvalidName(PathBuf, #[source] ComponentError),

    #[error("unable to populate directory {}: {1}", .0.display())]
    Directory(PathBuf, #[source] DirectoryError),

    #[error("unable to store {}: {1}", .0.display())]
    Write(PathBuf, #[source] crate::Error),

    #[error("nothing to ingest at {}", .0.display())]
    MissingRoot(PathBuf),
}
