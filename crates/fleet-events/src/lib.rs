//! `fleet-events` — the engine's append-only record of state transitions.
//!
//! # Crate layout
//!
//! | Module    | Contents                                   |
//! |-----------|--------------------------------------------|
//! | [`event`] | `Event`, `EventKind`                       |
//! | [`log`]   | `EventLog`: append, recency/time queries  |
//! | [`error`] | `EventError`, `EventResult<T>`             |
//!
//! Events are serialized as
//! `{"time": "2025-01-01T12:00:00.123456Z", "type": "robot_moving", "detail": {…}}`.

pub mod error;
pub mod event;
pub mod log;


pub use error::{EventError, EventResult};
pub use event::{Event, EventKind};
pub use log::{EventLog, parse_timestamp};
