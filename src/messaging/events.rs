//! Event types for the intake wizard.
//!
//! Events represent things that have happened (past tense). They are the
//! output callbacks the view layer renders, broadcast to all subscribers.

use crate::error::VerificationError;
use crate::triage::TriageResult;
use crate::verification::DeliveryMethod;
use crate::wizard::WizardStep;

/// Wizard output events
#[derive(Debug, Clone)]
pub enum Event {
    /// The wizard moved to a new step
    StepChanged { step: WizardStep },

    /// A field's error display should change; None clears it
    FieldError {
        field_id: String,
        message: Option<String>,
    },

    /// The view should focus/scroll to this field
    FocusField { field_id: String },

    /// A verification code was issued over the given channel
    CodeIssued { method: DeliveryMethod },

    /// The entered verification code was rejected
    VerificationFailed { error: VerificationError },

    /// The triage assessment is available for display
    AssessmentReady { result: TriageResult },

    /// The triage assessment could not be produced
    AssessmentFailed { reason: String },
}

impl Event {
    /// Get a human-readable description of the event
    pub fn description(&self) -> String {
        match self {
            Event::StepChanged { step } => {
                format!("Step {} of {}: {}", step.number(), WizardStep::total_steps(), step.title())
            }
            Event::FieldError {
                field_id,
                message: Some(message),
            } => {
                format!("{field_id}: {message}")
            }
            Event::FieldError { field_id, message: None } => {
                format!("{field_id}: ok")
            }
            Event::FocusField { field_id } => {
                format!("Focus: {field_id}")
            }
            Event::CodeIssued { method } => {
                format!("Verification code sent via {method}")
            }
            Event::VerificationFailed { error } => error.to_string(),
            Event::AssessmentReady { result } => {
                format!("Assessment ready: {}", result.emergency_level)
            }
            Event::AssessmentFailed { reason } => {
                format!("Assessment failed: {reason}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_description() {
        let event = Event::StepChanged {
            step: WizardStep::Verification,
        };
        assert_eq!(event.description(), "Step 2 of 4: Identity Verification");

        let event = Event::CodeIssued {
            method: DeliveryMethod::Email,
        };
        assert_eq!(event.description(), "Verification code sent via email");

        let event = Event::FieldError {
            field_id: "email".to_string(),
            message: None,
        };
        assert_eq!(event.description(), "email: ok");
    }
}
