use thiserror::Error;

/// Errors related to communication with the store.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    /// The request can't be served by this kind of store, like an unsupported
    /// address.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("internal storage error: {0}")]
    StorageError(String),
}
