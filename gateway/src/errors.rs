use thiserror::Error;

/// Everything that can go wrong turning a request path into a node.
///
/// [crate::response::from_error] is the only place these are mapped to
/// status codes.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    /// The request path is malformed.
    #[error("invalid path {path:?}: {reason}")]
    InvalidPath { path: String, reason: &'static str },

    /// There's no node at the requested path.
    #[error("no node at {0}")]
    NotFound(String),

    /// The backend failed to answer, or its answer was inconsistent.
    #[error("backend error: {0}")]
    Backend(#[from] cidgate_castore::Error),
}
