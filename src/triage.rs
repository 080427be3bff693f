//! Triage assessment collaborator.
//!
//! The wizard consumes scoring through the [`Assess`] trait so the concrete
//! engine stays replaceable. [`RuleBasedAssessor`] is the built-in
//! keyword-rule implementation used when no ML-backed scorer is wired in.

use serde::{Deserialize, Serialize};

use crate::error::AssessmentError;
use crate::patient::PatientRecord;

/// Severity classification of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EmergencyLevel {
    Low,
    Medium,
    High,
}

impl EmergencyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmergencyLevel::Low => "LOW",
            EmergencyLevel::Medium => "MEDIUM",
            EmergencyLevel::High => "HIGH",
        }
    }

    /// Urgency banner text for the results step.
    pub fn urgency_text(&self) -> &'static str {
        match self {
            EmergencyLevel::High => "URGENT - SEEK IMMEDIATE CARE",
            EmergencyLevel::Medium => "SEEK CARE TODAY",
            EmergencyLevel::Low => "SCHEDULE APPOINTMENT",
        }
    }

    /// Suggested appointment window for the results step.
    pub fn appointment_window(&self) -> &'static str {
        match self {
            EmergencyLevel::High => "Immediate - Emergency Room",
            EmergencyLevel::Medium => "Today - Urgent Care",
            EmergencyLevel::Low => "Within 2-3 days",
        }
    }
}

impl std::fmt::Display for EmergencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classification produced from a committed patient record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageResult {
    pub emergency_level: EmergencyLevel,
    pub confidence: f32,
    pub recommended_specialty: String,
    pub appointment_window: String,
    pub urgency_text: String,
}

/// External scoring collaborator consumed by the wizard.
pub trait Assess {
    fn assess(&self, record: &PatientRecord) -> Result<TriageResult, AssessmentError>;
}

/// Closures double as assessors, which keeps test doubles cheap.
impl<F> Assess for F
where
    F: Fn(&PatientRecord) -> Result<TriageResult, AssessmentError>,
{
    fn assess(&self, record: &PatientRecord) -> Result<TriageResult, AssessmentError> {
        self(record)
    }
}

const HIGH_SYMPTOMS: &[&str] = &[
    "chest pain",
    "difficulty breathing",
    "severe bleeding",
    "head injury",
    "allergic reaction",
    "stroke",
];

const MEDIUM_SYMPTOMS: &[&str] = &["fever", "abdominal pain", "fracture"];

const SPECIALTY_MAP: &[(&str, &str)] = &[
    ("chest pain", "Cardiologist"),
    ("difficulty breathing", "Pulmonologist"),
    ("head injury", "Neurologist"),
    ("abdominal pain", "Gastroenterologist"),
    ("fracture", "Orthopedist"),
    ("allergic reaction", "Allergist"),
    ("burn", "Dermatologist"),
    ("rash", "Dermatologist"),
];

const DEFAULT_SPECIALTY: &str = "General Practitioner";

/// Confidence reported by the keyword rules; the rules do not model
/// certainty, so this stays a flat prior.
const RULE_CONFIDENCE: f32 = 0.5;

/// Keyword-rule triage scorer.
///
/// Matches known symptom phrases as substrings of the lowercased free-text
/// symptoms field; an unrecognized description classifies as Low.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleBasedAssessor;

impl RuleBasedAssessor {
    pub fn new() -> Self {
        Self
    }

    fn level_for(symptoms: &str) -> EmergencyLevel {
        if HIGH_SYMPTOMS.iter().any(|s| symptoms.contains(s)) {
            EmergencyLevel::High
        } else if MEDIUM_SYMPTOMS.iter().any(|s| symptoms.contains(s)) {
            EmergencyLevel::Medium
        } else {
            EmergencyLevel::Low
        }
    }

    fn specialty_for(symptoms: &str) -> &'static str {
        SPECIALTY_MAP
            .iter()
            .find(|(keyword, _)| symptoms.contains(keyword))
            .map(|(_, specialty)| *specialty)
            .unwrap_or(DEFAULT_SPECIALTY)
    }
}

impl Assess for RuleBasedAssessor {
    fn assess(&self, record: &PatientRecord) -> Result<TriageResult, AssessmentError> {
        let symptoms = record.symptoms.to_lowercase();
        let level = Self::level_for(&symptoms);

        tracing::info!(
            patient = %record.name,
            level = %level,
            "triage assessment complete"
        );

        Ok(TriageResult {
            emergency_level: level,
            confidence: RULE_CONFIDENCE,
            recommended_specialty: Self::specialty_for(&symptoms).to_string(),
            appointment_window: level.appointment_window().to_string(),
            urgency_text: level.urgency_text().to_string(),
        })
    }
}
