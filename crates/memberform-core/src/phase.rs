//! Submission phase machine for a form.
//!
//! `Idle -> InFlight -> Redirected | Failed`, with `Failed -> InFlight`
//! for the retry affordance. `Redirected` is terminal: the page is
//! already navigating to the server-supplied URL.

use crate::error::SubmitError;
use crate::types::PhaseKind;
use serde::{Deserialize, Serialize};

/// A form's submission phase with its payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmitPhase {
    Idle,
    InFlight,
    Failed {
        status: u16,
        /// Inline error markup extracted from the failure response, if
        /// the response carried one.
        error_fragment: Option<String>,
    },
    Redirected {
        url: String,
    },
}

impl SubmitPhase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            SubmitPhase::Idle => PhaseKind::Idle,
            SubmitPhase::InFlight => PhaseKind::InFlight,
            SubmitPhase::Failed { .. } => PhaseKind::Failed,
            SubmitPhase::Redirected { .. } => PhaseKind::Redirected,
        }
    }
}

/// Validates a phase transition.
///
/// Illegal transitions return an error so callers can surface them; the
/// `strict-debug` feature upgrades them to a panic for debugging.
pub fn validate_transition(from: PhaseKind, to: PhaseKind) -> Result<(), SubmitError> {
    if allowed(from, to) {
        Ok(())
    } else {
        #[cfg(feature = "strict-debug")]
        panic!("Illegal phase transition attempted: {:?} -> {:?}", from, to);

        Err(SubmitError::IllegalTransition { from, to })
    }
}

pub fn allowed_transitions(from: PhaseKind) -> Vec<PhaseKind> {
    use PhaseKind::*;
    match from {
        Idle => vec![InFlight],
        InFlight => vec![Failed, Redirected],
        Failed => vec![InFlight],
        Redirected => vec![],
    }
}

fn allowed(from: PhaseKind, to: PhaseKind) -> bool {
    allowed_transitions(from).into_iter().any(|k| k == to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_and_settle_are_allowed() {
        assert!(validate_transition(PhaseKind::Idle, PhaseKind::InFlight).is_ok());
        assert!(validate_transition(PhaseKind::InFlight, PhaseKind::Redirected).is_ok());
        assert!(validate_transition(PhaseKind::InFlight, PhaseKind::Failed).is_ok());
        assert!(validate_transition(PhaseKind::Failed, PhaseKind::InFlight).is_ok());
    }

    #[test]
    fn redirected_is_terminal() {
        assert!(allowed_transitions(PhaseKind::Redirected).is_empty());
        let err = validate_transition(PhaseKind::Redirected, PhaseKind::InFlight).unwrap_err();
        assert_eq!(
            err,
            SubmitError::IllegalTransition {
                from: PhaseKind::Redirected,
                to: PhaseKind::InFlight
            }
        );
    }

    #[test]
    fn no_settling_without_dispatch() {
        assert!(validate_transition(PhaseKind::Idle, PhaseKind::Redirected).is_err());
        assert!(validate_transition(PhaseKind::Idle, PhaseKind::Failed).is_err());
        assert!(validate_transition(PhaseKind::Failed, PhaseKind::Redirected).is_err());
    }

    #[test]
    fn phase_kinds_match_payload_variants() {
        assert_eq!(SubmitPhase::Idle.kind(), PhaseKind::Idle);
        assert_eq!(SubmitPhase::InFlight.kind(), PhaseKind::InFlight);
        assert_eq!(
            SubmitPhase::Failed {
                status: 500,
                error_fragment: None
            }
            .kind(),
            PhaseKind::Failed
        );
        assert_eq!(
            SubmitPhase::Redirected {
                url: "/done".into()
            }
            .kind(),
            PhaseKind::Redirected
        );
    }
}
