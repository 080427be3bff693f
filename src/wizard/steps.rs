//! Wizard step definitions.
//!
//! The four stages of the intake flow, in order.

/// Intake wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    /// Patient information form - demographics, contact, symptoms, consent
    PatientInfo,

    /// Identity verification - one-time code sent to the contact channel
    Verification,

    /// Location consent - optional, enables nearby facility suggestions
    Location,

    /// Results - triage assessment for the committed record
    Results,
}

impl WizardStep {
    /// Get step title
    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::PatientInfo => "Patient Information",
            WizardStep::Verification => "Identity Verification",
            WizardStep::Location => "Location",
            WizardStep::Results => "Assessment Results",
        }
    }

    /// Get step description
    pub fn description(&self) -> &'static str {
        match self {
            WizardStep::PatientInfo => "Tell us about yourself and your symptoms",
            WizardStep::Verification => "Enter the code we sent to confirm it's you",
            WizardStep::Location => "Optionally share your location to find nearby care",
            WizardStep::Results => "Your triage assessment and recommended next steps",
        }
    }

    /// Get step number (1-indexed)
    pub fn number(&self) -> usize {
        match self {
            WizardStep::PatientInfo => 1,
            WizardStep::Verification => 2,
            WizardStep::Location => 3,
            WizardStep::Results => 4,
        }
    }

    /// Get step by 1-indexed number
    pub fn from_number(number: usize) -> Option<WizardStep> {
        match number {
            1 => Some(WizardStep::PatientInfo),
            2 => Some(WizardStep::Verification),
            3 => Some(WizardStep::Location),
            4 => Some(WizardStep::Results),
            _ => None,
        }
    }

    /// Get total number of steps
    pub fn total_steps() -> usize {
        4
    }

    /// Check if this is the first step
    pub fn is_first(&self) -> bool {
        matches!(self, WizardStep::PatientInfo)
    }

    /// Check if this is the last step
    pub fn is_last(&self) -> bool {
        matches!(self, WizardStep::Results)
    }

    /// Get next step
    pub fn next(&self) -> Option<WizardStep> {
        match self {
            WizardStep::PatientInfo => Some(WizardStep::Verification),
            WizardStep::Verification => Some(WizardStep::Location),
            WizardStep::Location => Some(WizardStep::Results),
            WizardStep::Results => None,
        }
    }

    /// Get previous step reachable by back-navigation.
    ///
    /// Results has no back target: the only way out is an explicit reset.
    pub fn previous(&self) -> Option<WizardStep> {
        match self {
            WizardStep::PatientInfo => None,
            WizardStep::Verification => Some(WizardStep::PatientInfo),
            WizardStep::Location => Some(WizardStep::Verification),
            WizardStep::Results => None,
        }
    }

    /// Get all steps in order
    pub fn all_steps() -> Vec<WizardStep> {
        vec![
            WizardStep::PatientInfo,
            WizardStep::Verification,
            WizardStep::Location,
            WizardStep::Results,
        ]
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        WizardStep::PatientInfo
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}
