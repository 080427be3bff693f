//! Intake wizard module
//!
//! The guided four-step flow that collects a patient submission.
//!
//! ## Architecture
//!
//! ```text
//! WizardFlow
//!   ├── WizardState (current step, draft, committed record, assessment)
//!   ├── WizardStep (enum of all steps)
//!   ├── ValidationEngine (guard for leaving the patient-info step)
//!   └── VerificationCodeManager (guard for leaving the verification step)
//! ```
//!
//! ## Steps
//!
//! 1. **PatientInfo** - demographics, contact details, symptoms, consent
//! 2. **Verification** - one-time code confirming the contact channel
//! 3. **Location** - optional location consent
//! 4. **Results** - triage assessment for the committed record
//!
//! Forward transitions run the departing step's guard; back-navigation
//! bypasses guards; an explicit reset returns to step 1 from anywhere,
//! discarding all input and re-issuing the verification session.

pub mod flow;
pub mod state;
pub mod steps;

// Re-export commonly used types
pub use flow::{BlockedReason, NavigationResult, WizardFlow};
pub use state::WizardState;
pub use steps::WizardStep;
