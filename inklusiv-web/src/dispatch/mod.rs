//! Dispatch module - turns gestures into page actions
//!
//! Re-exports only. All logic in submodules.

mod action;
mod feedback;
mod page;

#[cfg(test)]
pub(crate) mod fakes;

pub use action::{Dispatcher, GestureAction, GESTURE_HELP};
pub use feedback::{Notification, Notifier, Severity, DEFAULT_NOTIFICATION_MS};
pub use page::PageActions;
