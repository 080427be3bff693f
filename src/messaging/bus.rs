//! Event bus for pub/sub messaging.
//!
//! Lets view adapters subscribe to wizard events without coupling the flow
//! to any concrete rendering. Cloned handles share the subscriber list.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::RwLock;

use super::events::Event;

/// Subscriber ID for tracking subscriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(usize);

struct Subscriber {
    id: SubscriberId,
    sender: Sender<Event>,
}

/// Event bus for broadcasting events to subscribers
pub struct EventBus {
    subscribers: Arc<RwLock<Vec<Subscriber>>>,
    next_id: Arc<AtomicUsize>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Subscribe to events, returns a receiver and subscription ID
    pub fn subscribe(&self) -> (Receiver<Event>, SubscriberId) {
        let (tx, rx) = unbounded();
        let id = SubscriberId(self.next_id.fetch_add(1, Ordering::Relaxed));

        self.subscribers.write().push(Subscriber { id, sender: tx });

        (rx, id)
    }

    /// Unsubscribe from events
    pub fn unsubscribe(&self, id: SubscriberId) {
        self.subscribers.write().retain(|s| s.id != id);
    }

    /// Publish an event to all subscribers
    pub fn publish(&self, event: Event) {
        let subscribers = self.subscribers.read();

        for subscriber in subscribers.iter() {
            // A failed send means the subscriber dropped its receiver
            let _ = subscriber.sender.try_send(event.clone());
        }
    }

    /// Get number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            subscribers: Arc::clone(&self.subscribers),
            next_id: Arc::clone(&self.next_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::WizardStep;

    fn step_event() -> Event {
        Event::StepChanged {
            step: WizardStep::PatientInfo,
        }
    }

    #[test]
    fn test_subscribe_and_publish() {
        let bus = EventBus::new();
        let (rx, _id) = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);

        bus.publish(step_event());

        match rx.try_recv().unwrap() {
            Event::StepChanged { step } => assert_eq!(step, WizardStep::PatientInfo),
            other => panic!("wrong event: {other:?}"),
        }
    }

    #[test]
    fn test_unsubscribe() {
        let bus = EventBus::new();
        let (_rx, id) = bus.subscribe();
        bus.unsubscribe(id);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_multiple_subscribers_all_receive() {
        let bus = EventBus::new();
        let (rx1, _) = bus.subscribe();
        let (rx2, _) = bus.subscribe();

        bus.publish(step_event());

        assert!(rx1.try_recv().is_ok());
        assert!(rx2.try_recv().is_ok());
    }

    #[test]
    fn test_cloned_bus_shares_subscribers() {
        let bus1 = EventBus::new();
        let bus2 = bus1.clone();

        let (rx, _) = bus1.subscribe();
        bus2.publish(step_event());

        assert!(rx.try_recv().is_ok());
    }
}
