//! Command types for the intake wizard.
//!
//! Commands are the input events the view layer sends to request actions
//! (imperative). They are routed by the dispatcher.

use crate::patient::FieldValue;
use crate::verification::DeliveryMethod;
use crate::wizard::WizardStep;

/// View-layer input events
#[derive(Debug, Clone)]
pub enum Command {
    /// Request a forward transition out of `from`
    RequestAdvance { from: WizardStep },

    /// Request back-navigation out of `from`
    RequestBack { from: WizardStep },

    /// A field's raw value changed
    FieldChanged { field_id: String, value: FieldValue },

    /// A field lost focus; validate it in isolation
    FieldBlurred { field_id: String },

    /// Discard everything and return to the first step
    RequestReset,

    /// Re-issue the verification code over the chosen channel
    RequestResend { method: DeliveryMethod },
}

impl Command {
    /// Get a human-readable description of the command
    pub fn description(&self) -> String {
        match self {
            Command::RequestAdvance { from } => {
                format!("Advance from: {}", from.title())
            }
            Command::RequestBack { from } => {
                format!("Back from: {}", from.title())
            }
            Command::FieldChanged { field_id, .. } => {
                format!("Field changed: {field_id}")
            }
            Command::FieldBlurred { field_id } => {
                format!("Field blurred: {field_id}")
            }
            Command::RequestReset => "Reset wizard".to_string(),
            Command::RequestResend { method } => {
                format!("Resend code via {method}")
            }
        }
    }
}
