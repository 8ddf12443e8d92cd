//! Notification bus for generation lifecycle events.
//!
//! Observers register on a [`NotificationBus`] owned by one dispatcher and
//! receive every published [`Event`] synchronously, in subscription order.
//! A failing observer is logged and skipped; the remaining observers still
//! receive the event.

use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tracing::warn;

use seti_model::TableType;

/// Lifecycle stage an event reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    /// A batch started processing.
    Start,
    /// A row was rejected; processing continues.
    Error,
    /// The report file was written.
    Success,
    /// The batch failed as a whole.
    Critical,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "START",
            Self::Error => "ERROR",
            Self::Success => "SUCCESS",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured context attached to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventPayload {
    /// Table of the batch being processed.
    Table { table: TableType },
    /// A rejected row, 1-based.
    Row {
        table: TableType,
        index: usize,
        field: Option<&'static str>,
    },
    /// Path of the written report file.
    File { table: TableType, path: PathBuf, records: usize },
    /// Batch with no valid rows.
    Rejected { table: TableType, rejected: usize },
}

/// Immutable `(kind, message, payload)` notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub kind: EventKind,
    pub message: String,
    pub payload: Option<EventPayload>,
}

impl Event {
    pub fn new(kind: EventKind, message: impl Into<String>, payload: Option<EventPayload>) -> Self {
        Self {
            kind,
            message: message.into(),
            payload,
        }
    }
}

/// Receiver of lifecycle events.
///
/// Closures `Fn(&Event) -> anyhow::Result<()>` are observers.
pub trait Observer {
    fn update(&self, event: &Event) -> anyhow::Result<()>;
}

impl<F> Observer for F
where
    F: Fn(&Event) -> anyhow::Result<()>,
{
    fn update(&self, event: &Event) -> anyhow::Result<()> {
        self(event)
    }
}

/// Handle returned by [`NotificationBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ordered list of observers.
#[derive(Default)]
pub struct NotificationBus {
    observers: Vec<(SubscriptionId, Box<dyn Observer>)>,
    next_id: u64,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer at the end of the delivery order.
    pub fn subscribe(&mut self, observer: impl Observer + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    /// Deliver an event to every observer and return how many accepted it.
    pub fn publish(
        &self,
        kind: EventKind,
        message: impl Into<String>,
        payload: Option<EventPayload>,
    ) -> usize {
        let event = Event::new(kind, message, payload);
        self.deliver(&event)
    }

    pub fn deliver(&self, event: &Event) -> usize {
        let mut delivered = 0;
        for (id, observer) in &self.observers {
            match observer.update(event) {
                Ok(()) => delivered += 1,
                Err(err) => warn!(
                    subscription = %id,
                    kind = %event.kind,
                    error = %err,
                    "observer failed; continuing delivery"
                ),
            }
        }
        delivered
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl fmt::Debug for NotificationBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationBus")
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// In-memory recorder. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<Event>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events.
    pub fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn kinds(&self) -> Vec<EventKind> {
        self.events().iter().map(|event| event.kind).collect()
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.events().iter().filter(|event| event.kind == kind).count()
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Observer for EventLog {
    fn update(&self, event: &Event) -> anyhow::Result<()> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
        Ok(())
    }
}
