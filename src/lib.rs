//! Guided patient intake wizard.
//!
//! A four-step flow that collects patient-reported information, verifies the
//! submitter's contact channel with a one-time code, optionally captures
//! location consent, and produces a triage assessment.
//!
//! The core is the step state machine ([`wizard::WizardFlow`]) and the pure
//! field-validation engine ([`validation::ValidationEngine`]) that gates it.
//! View layers talk to the wizard exclusively through the messaging types:
//! [`messaging::Command`] in, [`messaging::Event`] out.

pub mod config;
pub mod error;
pub mod facilities;
pub mod messaging;
pub mod patient;
pub mod triage;
pub mod validation;
pub mod verification;
pub mod wizard;

pub use config::WizardConfig;
pub use error::{AppResult, AssessmentError, VerificationError};
pub use messaging::{Command, Dispatcher, Event, EventBus};
pub use patient::{FieldValue, PatientDraft, PatientRecord};
pub use triage::{Assess, EmergencyLevel, RuleBasedAssessor, TriageResult};
pub use verification::DeliveryMethod;
pub use wizard::{NavigationResult, WizardFlow, WizardStep};
