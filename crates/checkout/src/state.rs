//! Submission state machine.

use serde::{Deserialize, Serialize};

/// The state of the coordinator during one submission attempt.
///
/// State transitions:
/// ```text
/// Idle ──► Submitting ──┬──► Succeeded ──────┐
///   ▲                   └──► FailedFallback ─┤
///   └────────────────────────────────────────┘
/// ```
///
/// Both outcomes return the coordinator to `Idle` in a guaranteed
/// final step, so a past attempt can never block a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SubmissionState {
    /// No submission in flight; a new attempt may start.
    #[default]
    Idle,

    /// A submission is in flight; further attempts are rejected.
    Submitting,

    /// Hand-off payload produced and archived (remote or local path).
    Succeeded,

    /// Remote persistence failed; the local fallback completed.
    FailedFallback,
}

impl SubmissionState {
    /// Returns true if a new submission may start from this state.
    pub fn can_begin(&self) -> bool {
        matches!(self, SubmissionState::Idle)
    }

    /// Returns true if a submission is currently in flight.
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }

    /// Returns true if this is a terminal outcome of an attempt.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SubmissionState::Succeeded | SubmissionState::FailedFallback
        )
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "Idle",
            SubmissionState::Submitting => "Submitting",
            SubmissionState::Succeeded => "Succeeded",
            SubmissionState::FailedFallback => "FailedFallback",
        }
    }
}

impl std::fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
