//! Error types

mod api;

pub use api::*;

/// Top-level error returned by [`CatalogClient`](crate::CatalogClient) operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request failed or its response could not be used.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The request was cancelled before it completed.
    #[error("Request cancelled")]
    Cancelled,
}

impl Error {
    /// Returns `true` if this error is a cancellation rather than a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
