//! Session error types.

use thiserror::Error;

/// Errors that can occur during session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No shopper is signed in; the caller must redirect to the
    /// sign-in flow and must not proceed to order composition.
    #[error("not authenticated")]
    Unauthenticated,

    /// The auth backend rejected the credentials or token.
    #[error("authentication rejected: {0}")]
    Rejected(String),

    /// The auth backend could not be reached.
    #[error("auth backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The auth backend is unavailable (simulated or reported outage).
    #[error("auth backend unavailable: {0}")]
    Unavailable(String),

    /// The auth backend returned a response we could not parse.
    #[error("malformed auth response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// Persisting or reading session state failed.
    #[error("session storage error: {0}")]
    Storage(#[from] storage::StorageError),
}
