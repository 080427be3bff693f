//! Patient data collected by the intake wizard.
//!
//! `PatientDraft` holds the raw, unvalidated values the view reports through
//! field-change events. `PatientRecord` is the committed snapshot, assembled
//! only once the patient-info guard has passed.

use serde::{Deserialize, Serialize};

/// Field identifiers used by the intake form.
pub mod fields {
    pub const NAME: &str = "name";
    pub const AGE: &str = "age";
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";
    pub const SYMPTOMS: &str = "symptoms";
    pub const CONSENT: &str = "consent";
    pub const CODE: &str = "code";
    pub const LOCATION_CONSENT: &str = "location_consent";
}

/// A raw value as reported by the view layer.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Checked(bool),
}

impl FieldValue {
    /// Text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Checked(_) => None,
        }
    }

    /// Checkbox state; a text value counts as unchecked.
    pub fn is_checked(&self) -> bool {
        matches!(self, FieldValue::Checked(true))
    }
}

/// Raw field values accumulated while the submitter fills in the form.
#[derive(Debug, Clone, Default)]
pub struct PatientDraft {
    pub name: String,
    pub age: String,
    pub email: String,
    pub phone: String,
    pub symptoms: String,
    pub consent: bool,
    pub code: String,
    pub location_consent: bool,
}

impl PatientDraft {
    /// Store a value reported by the view. Returns false for an unknown
    /// field id or a value of the wrong shape for that field.
    pub fn set(&mut self, field_id: &str, value: FieldValue) -> bool {
        match (field_id, value) {
            (fields::NAME, FieldValue::Text(v)) => self.name = v,
            (fields::AGE, FieldValue::Text(v)) => self.age = v,
            (fields::EMAIL, FieldValue::Text(v)) => self.email = v,
            (fields::PHONE, FieldValue::Text(v)) => self.phone = v,
            (fields::SYMPTOMS, FieldValue::Text(v)) => self.symptoms = v,
            (fields::CODE, FieldValue::Text(v)) => self.code = v,
            (fields::CONSENT, FieldValue::Checked(v)) => self.consent = v,
            (fields::LOCATION_CONSENT, FieldValue::Checked(v)) => self.location_consent = v,
            _ => return false,
        }
        true
    }

    /// Current value for a field id, if known.
    pub fn get(&self, field_id: &str) -> Option<FieldValue> {
        match field_id {
            fields::NAME => Some(FieldValue::Text(self.name.clone())),
            fields::AGE => Some(FieldValue::Text(self.age.clone())),
            fields::EMAIL => Some(FieldValue::Text(self.email.clone())),
            fields::PHONE => Some(FieldValue::Text(self.phone.clone())),
            fields::SYMPTOMS => Some(FieldValue::Text(self.symptoms.clone())),
            fields::CODE => Some(FieldValue::Text(self.code.clone())),
            fields::CONSENT => Some(FieldValue::Checked(self.consent)),
            fields::LOCATION_CONSENT => Some(FieldValue::Checked(self.location_consent)),
            _ => None,
        }
    }

    /// Discard all collected input.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Committed patient submission.
///
/// Assembled from the draft when the patient-info guard passes; immutable
/// afterwards except for the location consent recorded on the location step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub name: String,
    pub age: u8,
    pub email: String,
    pub phone: String,
    pub symptoms: String,
    pub location_consent: bool,
}

impl PatientRecord {
    /// Build a record from a draft whose guard has already passed.
    ///
    /// Returns None when the age does not parse into the valid range, which
    /// a passing guard rules out.
    pub(crate) fn from_draft(draft: &PatientDraft) -> Option<Self> {
        let age: u8 = draft.age.trim().parse().ok()?;
        if !(1..=120).contains(&age) {
            return None;
        }

        Some(Self {
            name: draft.name.trim().to_string(),
            age,
            email: draft.email.trim().to_string(),
            phone: draft.phone.trim().to_string(),
            symptoms: draft.symptoms.trim().to_string(),
            location_consent: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_draft() -> PatientDraft {
        let mut draft = PatientDraft::default();
        draft.set(fields::NAME, FieldValue::Text("Jane Doe".into()));
        draft.set(fields::AGE, FieldValue::Text("34".into()));
        draft.set(fields::EMAIL, FieldValue::Text("jane@example.com".into()));
        draft.set(fields::PHONE, FieldValue::Text("+1 555 123 4567".into()));
        draft.set(fields::SYMPTOMS, FieldValue::Text("fever".into()));
        draft.set(fields::CONSENT, FieldValue::Checked(true));
        draft
    }

    #[test]
    fn test_set_and_get_roundtrip() {
        let draft = filled_draft();
        assert_eq!(
            draft.get(fields::NAME),
            Some(FieldValue::Text("Jane Doe".into()))
        );
        assert_eq!(draft.get(fields::CONSENT), Some(FieldValue::Checked(true)));
    }

    #[test]
    fn test_set_rejects_unknown_field() {
        let mut draft = PatientDraft::default();
        assert!(!draft.set("nickname", FieldValue::Text("jd".into())));
    }

    #[test]
    fn test_set_rejects_wrong_shape() {
        let mut draft = PatientDraft::default();
        assert!(!draft.set(fields::CONSENT, FieldValue::Text("yes".into())));
        assert!(!draft.set(fields::NAME, FieldValue::Checked(true)));
    }

    #[test]
    fn test_record_from_valid_draft() {
        let record = PatientRecord::from_draft(&filled_draft()).unwrap();
        assert_eq!(record.name, "Jane Doe");
        assert_eq!(record.age, 34);
        assert!(!record.location_consent);
    }

    #[test]
    fn test_record_rejects_unparseable_age() {
        let mut draft = filled_draft();
        draft.age = "forty".into();
        assert!(PatientRecord::from_draft(&draft).is_none());

        draft.age = "121".into();
        assert!(PatientRecord::from_draft(&draft).is_none());
    }

    #[test]
    fn test_clear_discards_input() {
        let mut draft = filled_draft();
        draft.clear();
        assert!(draft.name.is_empty());
        assert!(!draft.consent);
    }

    #[test]
    fn test_record_serialization() {
        let record = PatientRecord::from_draft(&filled_draft()).unwrap();
        let json = serde_json::to_string(&record).unwrap();
        let back: PatientRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
