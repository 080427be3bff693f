//! Step-level validation.
//!
//! Orchestrates [`FieldValidator`] across an ordered set of field specs and
//! aggregates the verdicts into one pass/fail decision. Every field is
//! checked (no short-circuit) so the view can surface all errors at once.

use super::field::{FieldKind, FieldValidator, ValidationVerdict};
use crate::patient::{FieldValue, PatientDraft};

/// Static description of one field the engine must check.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub field_id: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

/// Aggregated result of validating one wizard step.
#[derive(Debug, Clone)]
pub struct StepValidation {
    /// True iff every verdict passed, including the consent field.
    pub ok: bool,

    /// One verdict per spec, in declared order.
    pub verdicts: Vec<ValidationVerdict>,

    /// First failing field in declared order, for scroll-to-error focus.
    /// When every named field passes but the consent checkbox fails, this
    /// is the consent field.
    pub first_invalid: Option<String>,
}

impl StepValidation {
    /// Verdicts that failed, in declared order.
    pub fn failures(&self) -> impl Iterator<Item = &ValidationVerdict> {
        self.verdicts.iter().filter(|v| !v.valid)
    }
}

/// Runs field validation over a step's declared specs.
pub struct ValidationEngine {
    validator: FieldValidator,
}

impl ValidationEngine {
    pub fn new() -> Self {
        Self {
            validator: FieldValidator::new(),
        }
    }

    /// Validate every spec against the draft, in declared order.
    ///
    /// A field the draft does not know is treated as empty text, which fails
    /// the required check rather than panicking.
    pub fn validate_step(&self, specs: &[FieldSpec], draft: &PatientDraft) -> StepValidation {
        let verdicts: Vec<ValidationVerdict> = specs
            .iter()
            .map(|spec| self.validate_field(spec, draft))
            .collect();

        let first_invalid = verdicts
            .iter()
            .find(|v| !v.valid)
            .map(|v| v.field_id.clone());

        StepValidation {
            ok: first_invalid.is_none(),
            verdicts,
            first_invalid,
        }
    }

    /// Validate a single field, e.g. on blur.
    pub fn validate_field(&self, spec: &FieldSpec, draft: &PatientDraft) -> ValidationVerdict {
        let value = draft
            .get(spec.field_id)
            .unwrap_or_else(|| FieldValue::Text(String::new()));

        self.validator
            .validate(spec.field_id, spec.kind, &value, spec.required)
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::fields;

    const SPECS: &[FieldSpec] = &[
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

    fn valid_draft() -> PatientDraft {
        PatientDraft {
            name: "Jane Doe".into(),
            age: "34".into(),
            email: "jane@example.com".into(),
            phone: "+1 555 123 4567".into(),
            symptoms: "fever".into(),
            consent: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_all_valid_inputs_pass() {
        let engine = ValidationEngine::new();
        let result = engine.validate_step(SPECS, &valid_draft());

        assert!(result.ok);
        assert_eq!(result.failures().count(), 0);
        assert!(result.first_invalid.is_none());
        assert_eq!(result.verdicts.len(), SPECS.len());
    }

    #[test]
    fn test_empty_draft_fails_every_required_field() {
        let engine = ValidationEngine::new();
        let result = engine.validate_step(SPECS, &PatientDraft::default());

        assert!(!result.ok);
        assert_eq!(result.failures().count(), SPECS.len());
        for verdict in result.failures() {
            assert!(verdict.message.is_some());
        }
    }

    #[test]
    fn test_first_invalid_follows_declared_order() {
        let engine = ValidationEngine::new();
        let mut draft = valid_draft();
        draft.email = "not-an-email".into();
        draft.phone = "0123".into();

        let result = engine.validate_step(SPECS, &draft);
        assert!(!result.ok);
        assert_eq!(result.first_invalid.as_deref(), Some(fields::EMAIL));
    }

    #[test]
    fn test_consent_alone_blocks_the_step() {
        let engine = ValidationEngine::new();
        let mut draft = valid_draft();
        draft.consent = false;

        let result = engine.validate_step(SPECS, &draft);
        assert!(!result.ok);
        assert_eq!(result.failures().count(), 1);
        assert_eq!(result.first_invalid.as_deref(), Some(fields::CONSENT));
    }

    #[test]
    fn test_all_fields_checked_without_short_circuit() {
        let engine = ValidationEngine::new();
        let mut draft = valid_draft();
        draft.name = "".into();
        draft.age = "999".into();
        draft.consent = false;

        let result = engine.validate_step(SPECS, &draft);
        let failing: Vec<&str> = result.failures().map(|v| v.field_id.as_str()).collect();
        assert_eq!(failing, vec![fields::NAME, fields::AGE, fields::CONSENT]);
    }

    #[test]
    fn test_unknown_field_treated_as_empty() {
        let engine = ValidationEngine::new();
        let spec = FieldSpec {
            field_id: "middle_name",
            kind: FieldKind::Name,
            required: true,
        };

        let verdict = engine.validate_field(&spec, &PatientDraft::default());
        assert!(!verdict.valid);
    }
}
