//! Command dispatcher.
//!
//! Routes view-layer commands into the wizard flow and publishes the
//! resulting events. Processing is synchronous and strictly one command at a
//! time; the wizard has no background work and no shared mutable state
//! beyond the flow owned here.

use super::bus::EventBus;
use super::commands::Command;
use super::events::Event;
use crate::patient::FieldValue;
use crate::verification::DeliveryMethod;
use crate::wizard::{BlockedReason, NavigationResult, WizardFlow, WizardStep};

pub struct Dispatcher {
    flow: WizardFlow,
    bus: EventBus,
}

impl Dispatcher {
    pub fn new(flow: WizardFlow, bus: EventBus) -> Self {
        Self { flow, bus }
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn flow(&self) -> &WizardFlow {
        &self.flow
    }

    /// Process one command and publish whatever it produced.
    pub fn dispatch(&mut self, command: Command) {
        tracing::debug!("dispatching: {}", command.description());

        match command {
            Command::RequestAdvance { from } => {
                if self.is_stale(from) {
                    return;
                }
                let result = self.flow.advance();
                self.publish_navigation(result);
            }
            Command::RequestBack { from } => {
                if self.is_stale(from) {
                    return;
                }
                let result = self.flow.back();
                self.publish_navigation(result);
            }
            Command::FieldChanged { field_id, value } => {
                self.field_changed(field_id, value);
            }
            Command::FieldBlurred { field_id } => {
                if let Some(verdict) = self.flow.blur_field(&field_id) {
                    self.bus.publish(Event::FieldError {
                        field_id: verdict.field_id,
                        message: verdict.message,
                    });
                }
            }
            Command::RequestReset => {
                let step = self.flow.reset();
                self.bus.publish(Event::StepChanged { step });
                self.publish_code_issued();
            }
            Command::RequestResend { method } => {
                self.flow.resend(method);
                self.bus.publish(Event::CodeIssued { method });
            }
        }
    }

    /// The UI raced the machine: it reported a step it is no longer on.
    fn is_stale(&self, from: WizardStep) -> bool {
        let current = self.flow.current_step();
        if from != current {
            tracing::warn!(
                requested = %from,
                current = %current,
                "ignoring stale navigation request"
            );
            return true;
        }
        false
    }

    fn field_changed(&mut self, field_id: String, value: FieldValue) {
        if !self.flow.field_changed(&field_id, value) {
            tracing::warn!(field_id, "ignoring change for unknown field");
            return;
        }
        // Editing a field clears its displayed error until the next check
        self.bus.publish(Event::FieldError {
            field_id,
            message: None,
        });
    }

    fn publish_navigation(&mut self, result: NavigationResult) {
        match result {
            NavigationResult::Success(step) => {
                self.bus.publish(Event::StepChanged { step });
                match step {
                    WizardStep::Verification => self.publish_code_issued(),
                    WizardStep::Results => {
                        if let Some(result) = self.flow.assessment() {
                            self.bus.publish(Event::AssessmentReady {
                                result: result.clone(),
                            });
                        }
                    }
                    _ => {}
                }
            }
            NavigationResult::Blocked(reason) => self.publish_blocked(reason),
        }
    }

    fn publish_blocked(&self, reason: BlockedReason) {
        match reason {
            BlockedReason::Validation { verdicts, focus } => {
                // Every verdict goes out so the view can show all errors at
                // once and clear the ones that recovered
                for verdict in verdicts {
                    self.bus.publish(Event::FieldError {
                        field_id: verdict.field_id,
                        message: verdict.message,
                    });
                }
                if let Some(field_id) = focus {
                    self.bus.publish(Event::FocusField { field_id });
                }
            }
            BlockedReason::Verification(error) => {
                self.bus.publish(Event::VerificationFailed { error });
            }
            BlockedReason::Assessment(reason) => {
                self.bus.publish(Event::AssessmentFailed { reason });
            }
            BlockedReason::AtBoundary => {
                tracing::warn!("navigation request at wizard boundary ignored");
            }
        }
    }

    fn publish_code_issued(&self) {
        let method = self
            .flow
            .session_method()
            .unwrap_or(DeliveryMethod::Email);
        self.bus.publish(Event::CodeIssued { method });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::fields;
    use crossbeam_channel::Receiver;

    fn setup() -> (Dispatcher, Receiver<Event>) {
        let bus = EventBus::new();
        let (rx, _id) = bus.subscribe();
        (Dispatcher::new(WizardFlow::with_defaults(), bus), rx)
    }

    fn drain(rx: &Receiver<Event>) -> Vec<Event> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    fn text_change(field_id: &str, value: &str) -> Command {
        Command::FieldChanged {
            field_id: field_id.to_string(),
            value: FieldValue::Text(value.to_string()),
        }
    }

    #[test]
    fn test_field_change_clears_error() {
        let (mut dispatcher, rx) = setup();
        dispatcher.dispatch(text_change(fields::NAME, "Jane"));

        let events = drain(&rx);
        assert!(matches!(
            &events[0],
            Event::FieldError { field_id, message: None } if field_id == fields::NAME
        ));
    }

    #[test]
    fn test_unknown_field_publishes_nothing() {
        let (mut dispatcher, rx) = setup();
        dispatcher.dispatch(text_change("nickname", "jd"));
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn test_blocked_advance_reports_all_errors_and_focus() {
        let (mut dispatcher, rx) = setup();
        dispatcher.dispatch(Command::RequestAdvance {
            from: WizardStep::PatientInfo,
        });

        let events = drain(&rx);
        let errors = events
            .iter()
            .filter(|e| matches!(e, Event::FieldError { message: Some(_), .. }))
            .count();
        assert_eq!(errors, 6);
        assert!(matches!(
            events.last(),
            Some(Event::FocusField { field_id }) if field_id == fields::NAME
        ));
    }

    #[test]
    fn test_stale_advance_is_ignored() {
        let (mut dispatcher, rx) = setup();
        dispatcher.dispatch(Command::RequestAdvance {
            from: WizardStep::Location,
        });

        assert!(drain(&rx).is_empty());
        assert_eq!(dispatcher.flow().current_step(), WizardStep::PatientInfo);
    }

    #[test]
    fn test_blur_publishes_verdict() {
        let (mut dispatcher, rx) = setup();
        dispatcher.dispatch(text_change(fields::EMAIL, "not-an-email"));
        drain(&rx);

        dispatcher.dispatch(Command::FieldBlurred {
            field_id: fields::EMAIL.to_string(),
        });

        let events = drain(&rx);
        assert!(matches!(
            &events[0],
            Event::FieldError { field_id, message: Some(_) } if field_id == fields::EMAIL
        ));
    }

    #[test]
    fn test_reset_announces_step_and_code() {
        let (mut dispatcher, rx) = setup();
        dispatcher.dispatch(Command::RequestReset);

        let events = drain(&rx);
        assert!(matches!(
            events[0],
            Event::StepChanged { step: WizardStep::PatientInfo }
        ));
        assert!(matches!(events[1], Event::CodeIssued { .. }));
    }
}
