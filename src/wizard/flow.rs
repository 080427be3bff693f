//! Wizard flow control.
//!
//! Runs the guard for the departing step on every forward transition and
//! only then advances. Back-navigation bypasses guards; reset returns to the
//! first step from anywhere and re-issues the verification session.

use std::time::Duration;

use super::state::WizardState;
use super::steps::WizardStep;
use crate::config::WizardConfig;
use crate::error::VerificationError;
use crate::patient::{fields, FieldValue, PatientRecord};
use crate::triage::{Assess, RuleBasedAssessor, TriageResult};
use crate::validation::{FieldKind, FieldSpec, StepValidation, ValidationEngine, ValidationVerdict};
use crate::verification::{DeliveryMethod, SessionPhase, VerificationCodeManager};

/// Fields checked by the patient-info guard, in display order. The consent
/// checkbox is declared last so scroll-to-error lands on it only when every
/// named field passes.
pub const PATIENT_INFO_SPECS: &[FieldSpec] = &[
    FieldSpec {
        field_id: fields::NAME,
        kind: FieldKind::Name,
        required: true,
    },
    FieldSpec {
        field_id: fields::AGE,
        kind: FieldKind::Age,
        required: true,
    },
    FieldSpec {
        field_id: fields::EMAIL,
        kind: FieldKind::Email,
        required: true,
    },
    FieldSpec {
        field_id: fields::PHONE,
        kind: FieldKind::Phone,
        required: true,
    },
    FieldSpec {
        field_id: fields::SYMPTOMS,
        kind: FieldKind::FreeText,
        required: true,
    },
    FieldSpec {
        field_id: fields::CONSENT,
        kind: FieldKind::Boolean,
        required: true,
    },
];

/// The location step has no required fields, only the optional consent.
pub const LOCATION_SPECS: &[FieldSpec] = &[FieldSpec {
    field_id: fields::LOCATION_CONSENT,
    kind: FieldKind::Boolean,
    required: false,
}];

const GENERIC_ASSESSMENT_ERROR: &str = "We could not process your assessment, please try again";

/// Why a forward transition was refused.
#[derive(Debug, Clone)]
pub enum BlockedReason {
    /// The step's field validation failed. Carries every verdict so the view
    /// can surface all errors at once, plus the field to focus.
    Validation {
        verdicts: Vec<ValidationVerdict>,
        focus: Option<String>,
    },

    /// The entered one-time code was rejected.
    Verification(VerificationError),

    /// The triage collaborator failed; the wizard stays put for a retry.
    Assessment(String),

    /// No transition exists in the requested direction.
    AtBoundary,
}

/// Navigation result
#[derive(Debug, Clone)]
pub enum NavigationResult {
    /// Navigation succeeded, now on new step
    Success(WizardStep),

    /// Navigation refused, state unchanged
    Blocked(BlockedReason),
}

impl NavigationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, NavigationResult::Success(_))
    }
}

/// Top-level wizard controller.
///
/// Owns the state, the validation engine, the verification-code manager and
/// the assessment collaborator. Every mutation of [`WizardState`] funnels
/// through here.
pub struct WizardFlow {
    state: WizardState,
    engine: ValidationEngine,
    codes: VerificationCodeManager,
    assessor: Box<dyn Assess>,
}

impl WizardFlow {
    pub fn new(config: &WizardConfig, assessor: Box<dyn Assess>) -> Self {
        Self {
            state: WizardState::new(),
            engine: ValidationEngine::new(),
            codes: VerificationCodeManager::new(
                config.code_length,
                Duration::from_secs(config.code_ttl_secs),
            ),
            assessor,
        }
    }

    /// Default configuration with the built-in rule-based assessor.
    pub fn with_defaults() -> Self {
        Self::new(&WizardConfig::default(), Box::new(RuleBasedAssessor::new()))
    }

    pub fn current_step(&self) -> WizardStep {
        self.state.current_step()
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn record(&self) -> Option<&PatientRecord> {
        self.state.record()
    }

    pub fn assessment(&self) -> Option<&TriageResult> {
        self.state.assessment()
    }

    pub fn session_phase(&self) -> SessionPhase {
        self.codes.phase()
    }

    /// The live code, for demo/display adapters. A production delivery
    /// channel would send this out instead of exposing it.
    pub fn issued_code(&self) -> Option<&str> {
        self.codes.session().map(|s| s.code())
    }

    /// Channel the live session was issued over, if any.
    pub fn session_method(&self) -> Option<DeliveryMethod> {
        self.codes.session().map(|s| s.method())
    }

    /// Store a field value reported by the view. Returns false for an
    /// unknown field id.
    pub fn field_changed(&mut self, field_id: &str, value: FieldValue) -> bool {
        self.state.draft_mut().set(field_id, value)
    }

    /// Validate a single field on blur. None for ids no spec covers.
    pub fn blur_field(&self, field_id: &str) -> Option<ValidationVerdict> {
        PATIENT_INFO_SPECS
            .iter()
            .chain(LOCATION_SPECS)
            .find(|spec| spec.field_id == field_id)
            .map(|spec| self.engine.validate_field(spec, self.state.draft()))
    }

    /// Request a forward transition out of the current step.
    pub fn advance(&mut self) -> NavigationResult {
        let from = self.state.current_step();
        let result = match from {
            WizardStep::PatientInfo => self.leave_patient_info(),
            WizardStep::Verification => self.leave_verification(),
            WizardStep::Location => self.leave_location(),
            WizardStep::Results => NavigationResult::Blocked(BlockedReason::AtBoundary),
        };

        if let NavigationResult::Success(to) = &result {
            tracing::info!(from = %from, to = %to, "wizard advanced");
        }
        result
    }

    /// Request back-navigation. Bypasses guards and changes no data.
    pub fn back(&mut self) -> NavigationResult {
        match self.state.current_step().previous() {
            Some(prev) => {
                self.state.set_current_step(prev);
                tracing::info!(to = %prev, "wizard went back");
                NavigationResult::Success(prev)
            }
            None => NavigationResult::Blocked(BlockedReason::AtBoundary),
        }
    }

    /// Discard all input, return to the first step and issue a fresh
    /// verification session.
    pub fn reset(&mut self) -> WizardStep {
        self.state.reset();
        self.codes.generate(DeliveryMethod::Email);
        tracing::info!("wizard reset");
        WizardStep::PatientInfo
    }

    /// Re-issue the verification code over the chosen channel.
    pub fn resend(&mut self, method: DeliveryMethod) {
        self.codes.resend(method);
    }

    /// Guard for leaving step 1: full field validation, then commit.
    fn leave_patient_info(&mut self) -> NavigationResult {
        let validation = self
            .engine
            .validate_step(PATIENT_INFO_SPECS, self.state.draft());

        if !validation.ok {
            return Self::blocked_by(validation);
        }

        let Some(record) = PatientRecord::from_draft(self.state.draft()) else {
            // The guard passed, so the draft must assemble; refuse rather
            // than advance with a missing record if it somehow does not.
            return Self::blocked_by(validation);
        };

        self.state.set_record(record);

        // Keep the channel chosen on a previous visit to this step
        let method = self
            .codes
            .session()
            .map(|s| s.method())
            .unwrap_or(DeliveryMethod::Email);
        self.codes.generate(method);

        self.state.set_current_step(WizardStep::Verification);
        NavigationResult::Success(WizardStep::Verification)
    }

    /// Guard for leaving step 2: the entered code must verify.
    fn leave_verification(&mut self) -> NavigationResult {
        let entered = self.state.draft().code.clone();
        match self.codes.verify(&entered) {
            Ok(()) => {
                self.state.set_current_step(WizardStep::Location);
                NavigationResult::Success(WizardStep::Location)
            }
            Err(err) => {
                tracing::warn!(%err, "verification rejected");
                NavigationResult::Blocked(BlockedReason::Verification(err))
            }
        }
    }

    /// Leaving step 3: record the optional location consent, then the
    /// assessment must succeed before the results step is entered.
    fn leave_location(&mut self) -> NavigationResult {
        let Some(record) = self.state.record() else {
            tracing::error!("location step reached without a committed record");
            return NavigationResult::Blocked(BlockedReason::Assessment(
                GENERIC_ASSESSMENT_ERROR.to_string(),
            ));
        };

        let mut record = record.clone();
        record.location_consent = self.state.draft().location_consent;

        match self.assessor.assess(&record) {
            Ok(result) => {
                if let Some(stored) = self.state.record_mut() {
                    stored.location_consent = record.location_consent;
                }
                self.state.set_assessment(result);
                self.state.set_current_step(WizardStep::Results);
                NavigationResult::Success(WizardStep::Results)
            }
            Err(err) => {
                // Stay on the location step; the record is untouched
                tracing::warn!(%err, "triage assessment failed");
                NavigationResult::Blocked(BlockedReason::Assessment(
                    GENERIC_ASSESSMENT_ERROR.to_string(),
                ))
            }
        }
    }

    fn blocked_by(validation: StepValidation) -> NavigationResult {
        NavigationResult::Blocked(BlockedReason::Validation {
            focus: validation.first_invalid.clone(),
            verdicts: validation.verdicts,
        })
    }
}
