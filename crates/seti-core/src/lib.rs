//! SETI-IPRESS batch generation.
//!
//! Turns untyped rows into validated records and writes them as a report
//! file:
//!
//! - [`catalog`]: table identifier to schema lookup.
//! - [`mapping`]: per-table row coercion and validation.
//! - [`events`]: synchronous notification bus for lifecycle events.
//! - [`dispatcher`]: batch orchestration with partial-failure tolerance.

pub mod catalog;
pub mod dispatcher;
pub mod error;
pub mod events;
pub mod mapping;

pub use catalog::{Schema, SchemaCatalog, default_catalog};
pub use dispatcher::{BatchDispatcher, BatchReport, BatchWriter, RowRejection};
pub use error::{CoercionError, GenerateError, MappingCause, MappingError, Result};
pub use events::{
    Event, EventKind, EventLog, EventPayload, NotificationBus, Observer, SubscriptionId,
};
pub use mapping::{RowMapper, RowReader};
