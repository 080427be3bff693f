//! Messaging layer
//!
//! The wizard's external interface: `Command`s are the input events a view
//! layer sends, `Event`s are the output callbacks it renders, the `EventBus`
//! carries events to any number of subscribers, and the `Dispatcher` routes
//! commands into the flow one at a time.

pub mod bus;
pub mod commands;
pub mod dispatcher;
pub mod events;

// Re-export commonly used types
pub use bus::{EventBus, SubscriberId};
pub use commands::Command;
pub use dispatcher::Dispatcher;
pub use events::Event;
