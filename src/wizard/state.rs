//! Wizard state.
//!
//! The single source of truth for the intake flow: current step, raw draft
//! values, the committed patient record, and the stored assessment. Mutated
//! only by the flow controller in response to transition requests.

use super::steps::WizardStep;
use crate::patient::{PatientDraft, PatientRecord};
use crate::triage::TriageResult;

#[derive(Debug, Clone, Default)]
pub struct WizardState {
    /// Current step
    current_step: WizardStep,

    /// Raw field values being edited
    draft: PatientDraft,

    /// Committed submission, set when the patient-info guard passes
    record: Option<PatientRecord>,

    /// Stored assessment, set when entering the results step
    assessment: Option<TriageResult>,
}

impl WizardState {
    /// Create a fresh state on the first step
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current step
    pub fn current_step(&self) -> WizardStep {
        self.current_step
    }

    /// Set current step. Callers are responsible for running the departing
    /// step's guard first; this is why it stays crate-private.
    pub(crate) fn set_current_step(&mut self, step: WizardStep) {
        self.current_step = step;
    }

    pub fn draft(&self) -> &PatientDraft {
        &self.draft
    }

    pub(crate) fn draft_mut(&mut self) -> &mut PatientDraft {
        &mut self.draft
    }

    pub fn record(&self) -> Option<&PatientRecord> {
        self.record.as_ref()
    }

    pub(crate) fn set_record(&mut self, record: PatientRecord) {
        self.record = Some(record);
    }

    pub(crate) fn record_mut(&mut self) -> Option<&mut PatientRecord> {
        self.record.as_mut()
    }

    pub fn assessment(&self) -> Option<&TriageResult> {
        self.assessment.as_ref()
    }

    pub(crate) fn set_assessment(&mut self, result: TriageResult) {
        self.assessment = Some(result);
    }

    /// Completion progress (0.0-1.0) for a progress bar
    pub fn progress(&self) -> f32 {
        (self.current_step.number() - 1) as f32 / (WizardStep::total_steps() - 1) as f32
    }

    /// Return to the first step, discarding all prior input
    pub fn reset(&mut self) {
        self.current_step = WizardStep::PatientInfo;
        self.draft.clear();
        self.record = None;
        self.assessment = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::{fields, FieldValue};

    #[test]
    fn test_new_state() {
        let state = WizardState::new();
        assert_eq!(state.current_step(), WizardStep::PatientInfo);
        assert!(state.record().is_none());
        assert!(state.assessment().is_none());
        assert_eq!(state.progress(), 0.0);
    }

    #[test]
    fn test_progress_tracks_step() {
        let mut state = WizardState::new();
        state.set_current_step(WizardStep::Verification);
        assert!(state.progress() > 0.0 && state.progress() < 1.0);

        state.set_current_step(WizardStep::Results);
        assert_eq!(state.progress(), 1.0);
    }

    #[test]
    fn test_reset_discards_everything() {
        let mut state = WizardState::new();
        state
            .draft_mut()
            .set(fields::NAME, FieldValue::Text("Jane Doe".into()));
        state.set_current_step(WizardStep::Location);

        state.reset();
        assert_eq!(state.current_step(), WizardStep::PatientInfo);
        assert!(state.draft().name.is_empty());
        assert!(state.record().is_none());
        assert!(state.assessment().is_none());
    }
}
