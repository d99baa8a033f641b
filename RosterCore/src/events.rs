//! Change notifications
//!
//! The reconciler publishes through an [`EventSink`] and never waits on or
//! inspects what subscribers do with an event.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::Sender;
use std::sync::{Mutex, PoisonError};

use serde::Serialize;

use crate::model::ContactId;

/// Event published when a contact's effective nickname changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ContactEvent {
    NicknameChanged(ContactId),
}

impl ContactEvent {
    #[must_use]
    pub fn contact_id(self) -> ContactId {
        match self {
            Self::NicknameChanged(id) => id,
        }
    }
}

impl fmt::Display for ContactEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NicknameChanged(id) => write!(f, "nickname changed: {id}"),
        }
    }
}

/// Single-method publish capability.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ContactEvent);
}

impl<F> EventSink for F
where
    F: Fn(ContactEvent) + Send + Sync,
{
    fn emit(&self, event: ContactEvent) {
        self(event);
    }
}

impl EventSink for Sender<ContactEvent> {
    fn emit(&self, event: ContactEvent) {
        if self.send(event).is_err() {
            tracing::debug!("No receiver for {}", event);
        }
    }
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: ContactEvent) {}
}

/// Sink that records events in emission order.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<ContactEvent>>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<ContactEvent> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Remove and return the recorded events.
    pub fn take(&self) -> Vec<ContactEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for EventLog {
    fn emit(&self, event: ContactEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

/// Fire-and-forget delivery; a panicking subscriber is logged and contained.
pub(crate) fn deliver(sink: &dyn EventSink, event: ContactEvent) {
    if panic::catch_unwind(AssertUnwindSafe(|| sink.emit(event))).is_err() {
        tracing::warn!("Subscriber panicked while handling {}", event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_event_log_records_in_order() {
        let log = EventLog::new();
        log.emit(ContactEvent::NicknameChanged(ContactId(2)));
        log.emit(ContactEvent::NicknameChanged(ContactId(1)));
        assert_eq!(
            log.take(),
            vec![
                ContactEvent::NicknameChanged(ContactId(2)),
                ContactEvent::NicknameChanged(ContactId(1)),
            ]
        );
        assert!(log.is_empty());
    }

    #[test]
    fn test_closed_channel_is_ignored() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        deliver(&tx, ContactEvent::NicknameChanged(ContactId(1)));
    }

    #[test]
    fn test_panicking_subscriber_is_contained() {
        let sink = |event: ContactEvent| {
            assert!(event.contact_id() != ContactId(1), "subscriber failure");
        };
        deliver(&sink, ContactEvent::NicknameChanged(ContactId(1)));
    }
}
