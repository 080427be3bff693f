//! Per-field validation.
//!
//! Stateless, deterministic checks over plain values. Presentation of the
//! resulting messages (highlighting, focus) is the caller's responsibility.

use regex::Regex;

use crate::patient::FieldValue;

/// Semantic kind of an intake form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Name,
    Age,
    Email,
    Phone,
    FreeText,
    Boolean,
}

/// Verdict for a single field check.
///
/// Produced per check cycle, never persisted. `message` is None for a valid
/// field so the view can clear a previously shown error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationVerdict {
    pub field_id: String,
    pub valid: bool,
    pub message: Option<String>,
}

impl ValidationVerdict {
    fn pass(field_id: &str) -> Self {
        Self {
            field_id: field_id.to_string(),
            valid: true,
            message: None,
        }
    }

    fn fail(field_id: &str, message: &str) -> Self {
        Self {
            field_id: field_id.to_string(),
            valid: false,
            message: Some(message.to_string()),
        }
    }
}

const MSG_REQUIRED: &str = "This field is required";
const MSG_NAME_TOO_SHORT: &str = "Name must be at least 2 characters";
const MSG_AGE_OUT_OF_RANGE: &str = "Age must be between 1 and 120";
const MSG_EMAIL_MALFORMED: &str = "Enter a valid email address";
const MSG_PHONE_MALFORMED: &str = "Enter a valid phone number";
const MSG_CONSENT_REQUIRED: &str = "Consent is required to continue";

const MIN_NAME_LENGTH: usize = 2;
const MIN_AGE: u32 = 1;
const MAX_AGE: u32 = 120;
const MAX_PHONE_DIGITS: usize = 16;

/// Validates a single raw value against its field kind.
///
/// Holds the compiled email pattern; construct once and reuse.
#[derive(Debug)]
pub struct FieldValidator {
    email_pattern: Regex,
}

impl FieldValidator {
    pub fn new() -> Self {
        Self {
            // local@domain.tld: non-whitespace/non-@ runs around "@" and "."
            email_pattern: Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
                .expect("email pattern is a valid regex"),
        }
    }

    /// Check one raw value. `required == false` lets an empty value pass.
    pub fn validate(
        &self,
        field_id: &str,
        kind: FieldKind,
        value: &FieldValue,
        required: bool,
    ) -> ValidationVerdict {
        match kind {
            FieldKind::Boolean => {
                if value.is_checked() || !required {
                    ValidationVerdict::pass(field_id)
                } else {
                    ValidationVerdict::fail(field_id, MSG_CONSENT_REQUIRED)
                }
            }
            _ => {
                let raw = value.as_text().unwrap_or_default();
                let trimmed = raw.trim();

                if trimmed.is_empty() {
                    return if required {
                        ValidationVerdict::fail(field_id, MSG_REQUIRED)
                    } else {
                        ValidationVerdict::pass(field_id)
                    };
                }

                match kind {
                    FieldKind::Name => self.check_name(field_id, trimmed),
                    FieldKind::Age => self.check_age(field_id, trimmed),
                    FieldKind::Email => self.check_email(field_id, trimmed),
                    FieldKind::Phone => self.check_phone(field_id, trimmed),
                    FieldKind::FreeText => ValidationVerdict::pass(field_id),
                    FieldKind::Boolean => unreachable!("handled above"),
                }
            }
        }
    }

    fn check_name(&self, field_id: &str, trimmed: &str) -> ValidationVerdict {
        if trimmed.chars().count() < MIN_NAME_LENGTH {
            ValidationVerdict::fail(field_id, MSG_NAME_TOO_SHORT)
        } else {
            ValidationVerdict::pass(field_id)
        }
    }

    fn check_age(&self, field_id: &str, trimmed: &str) -> ValidationVerdict {
        // Non-numeric input counts as out of range, not as a parse error
        match trimmed.parse::<u32>() {
            Ok(age) if (MIN_AGE..=MAX_AGE).contains(&age) => ValidationVerdict::pass(field_id),
            _ => ValidationVerdict::fail(field_id, MSG_AGE_OUT_OF_RANGE),
        }
    }

    fn check_email(&self, field_id: &str, trimmed: &str) -> ValidationVerdict {
        if self.email_pattern.is_match(trimmed) {
            ValidationVerdict::pass(field_id)
        } else {
            ValidationVerdict::fail(field_id, MSG_EMAIL_MALFORMED)
        }
    }

    fn check_phone(&self, field_id: &str, trimmed: &str) -> ValidationVerdict {
        // Optional leading "+" is allowed; everything else non-digit is noise
        let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();

        let ok = !digits.is_empty()
            && digits.len() <= MAX_PHONE_DIGITS
            && !digits.starts_with('0');

        if ok {
            ValidationVerdict::pass(field_id)
        } else {
            ValidationVerdict::fail(field_id, MSG_PHONE_MALFORMED)
        }
    }
}

impl Default for FieldValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(v: &str) -> FieldValue {
        FieldValue::Text(v.to_string())
    }

    fn verdict(kind: FieldKind, raw: &str) -> ValidationVerdict {
        FieldValidator::new().validate("f", kind, &text(raw), true)
    }

    #[test]
    fn test_name_rules() {
        assert!(!verdict(FieldKind::Name, "").valid);
        assert_eq!(
            verdict(FieldKind::Name, "   ").message.as_deref(),
            Some(MSG_REQUIRED)
        );
        assert_eq!(
            verdict(FieldKind::Name, "J").message.as_deref(),
            Some(MSG_NAME_TOO_SHORT)
        );
        assert!(verdict(FieldKind::Name, "Jo").valid);
        assert!(verdict(FieldKind::Name, "  Jane Doe  ").valid);
    }

    #[test]
    fn test_age_boundaries() {
        assert!(verdict(FieldKind::Age, "1").valid);
        assert!(verdict(FieldKind::Age, "120").valid);
        assert!(!verdict(FieldKind::Age, "0").valid);
        assert!(!verdict(FieldKind::Age, "121").valid);
    }

    #[test]
    fn test_age_non_numeric_is_out_of_range() {
        let v = verdict(FieldKind::Age, "abc");
        assert!(!v.valid);
        assert_eq!(v.message.as_deref(), Some(MSG_AGE_OUT_OF_RANGE));

        assert!(!verdict(FieldKind::Age, "-3").valid);
        assert!(!verdict(FieldKind::Age, "12.5").valid);
    }

    #[test]
    fn test_email_shapes() {
        assert!(verdict(FieldKind::Email, "a@b.c").valid);
        assert!(verdict(FieldKind::Email, "jane.doe@clinic.example.org").valid);
        assert!(!verdict(FieldKind::Email, "a@b").valid);
        assert!(!verdict(FieldKind::Email, "a.com").valid);
        assert!(!verdict(FieldKind::Email, "a b@c.d").valid);
        assert!(!verdict(FieldKind::Email, "@b.c").valid);
    }

    #[test]
    fn test_phone_shapes() {
        assert!(verdict(FieldKind::Phone, "+1234567890").valid);
        assert!(verdict(FieldKind::Phone, "(555) 123-4567").valid);
        assert!(!verdict(FieldKind::Phone, "0123456789").valid);
        assert!(!verdict(FieldKind::Phone, "12345678901234567").valid);
        assert!(!verdict(FieldKind::Phone, "+-").valid);
    }

    #[test]
    fn test_free_text_only_requires_presence() {
        assert!(!verdict(FieldKind::FreeText, "").valid);
        assert!(verdict(FieldKind::FreeText, "sharp pain in chest").valid);
    }

    #[test]
    fn test_boolean_consent() {
        let validator = FieldValidator::new();
        let unchecked = validator.validate("consent", FieldKind::Boolean, &FieldValue::Checked(false), true);
        assert!(!unchecked.valid);
        assert_eq!(unchecked.message.as_deref(), Some(MSG_CONSENT_REQUIRED));

        let checked = validator.validate("consent", FieldKind::Boolean, &FieldValue::Checked(true), true);
        assert!(checked.valid);
    }

    #[test]
    fn test_optional_field_passes_when_empty() {
        let validator = FieldValidator::new();
        let v = validator.validate("notes", FieldKind::FreeText, &text(""), false);
        assert!(v.valid);

        let v = validator.validate("opt_in", FieldKind::Boolean, &FieldValue::Checked(false), false);
        assert!(v.valid);
    }
}
