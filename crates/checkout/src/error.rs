//! Checkout error types.

use thiserror::Error;

/// Errors surfaced to the caller of the submission coordinator.
///
/// Network-level failures are deliberately absent: the coordinator
/// absorbs them and falls back to local hand-off construction.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A submission is already in flight for this session. The first
    /// attempt continues; this one is a no-op.
    #[error("a submission is already in progress")]
    AlreadyInProgress,
}

/// Reasons a table reservation could not be handed off.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReservationError {
    /// One or more required form fields are empty.
    #[error("missing required fields: {}", fields.join(", "))]
    MissingFields {
        /// Names of the empty required fields.
        fields: Vec<&'static str>,
    },
}

/// Failures of the remote order persistence call.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend could not be reached or timed out.
    #[error("order backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("order backend returned status {0}")]
    Status(u16),

    /// The backend acknowledged but rejected the order.
    #[error("order rejected: {0}")]
    Rejected(String),

    /// The response body could not be interpreted.
    #[error("malformed backend response: {0}")]
    MalformedResponse(String),
}

/// Failures of the hand-off link relay call.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The relay could not be reached or timed out.
    #[error("hand-off relay unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The relay answered with a non-success status.
    #[error("hand-off relay returned status {0}")]
    Status(u16),

    /// The relay acknowledged but produced no link.
    #[error("hand-off link refused: {0}")]
    Refused(String),

    /// The response body could not be interpreted.
    #[error("malformed relay response: {0}")]
    MalformedResponse(String),
}
