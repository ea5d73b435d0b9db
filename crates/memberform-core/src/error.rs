use crate::types::{FormId, PhaseKind};
use thiserror::Error;

/// Errors from structural operations on the field list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// Add attempted while the live set is already at the cap.
    #[error("member number cap reached: at most {cap} fields")]
    CapExceeded { cap: usize },

    /// The index does not name a live field.
    #[error("no live field at index {index}")]
    FieldNotFound { index: usize },

    /// Submit gate failed: the listed live fields are blank. When field 1
    /// is blank the list is exactly `[1]` and no other field was checked.
    #[error("required fields are empty: {indices:?}")]
    EmptyRequiredField { indices: Vec<usize> },
}

/// Errors from the submission flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// A submission for this form is already awaiting its outcome.
    #[error("a submission is already in flight")]
    SubmissionInProgress,

    /// The form already submitted successfully; the page is navigating away.
    #[error("form already redirected to {url}")]
    AlreadyRedirected { url: String },

    /// Phase change outside the allowed matrix.
    #[error("illegal phase transition: {from:?} -> {to:?}")]
    IllegalTransition { from: PhaseKind, to: PhaseKind },
}

/// Top-level error for registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("form not found: {0}")]
    FormNotFound(FormId),

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Submit(#[from] SubmitError),
}

impl FormError {
    /// Whether the condition is meant for the person filling the form
    /// (cap notice, blank-field message) rather than for the caller.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            FormError::Roster(RosterError::CapExceeded { .. })
                | FormError::Roster(RosterError::EmptyRequiredField { .. })
        )
    }

    /// All form errors leave state intact; the caller may correct and retry
    /// except after a redirect, which is terminal.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, FormError::Submit(SubmitError::AlreadyRedirected { .. }))
    }
}
