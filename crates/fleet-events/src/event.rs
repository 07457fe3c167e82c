//! Event record and kind tags.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// What happened.  Serialized as a snake_case tag.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    OrderCreated,
    OrderAssigned,
    RobotMoving,
    RobotArrived,
    OrderCompleted,
    OrderFailed,
    TickProcessed,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::OrderCreated   => "order_created",
            EventKind::OrderAssigned  => "order_assigned",
            EventKind::RobotMoving    => "robot_moving",
            EventKind::RobotArrived   => "robot_arrived",
            EventKind::OrderCompleted => "order_completed",
            EventKind::OrderFailed    => "order_failed",
            EventKind::TickProcessed  => "tick_processed",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One immutable log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub time: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub detail: Map<String, Value>,
}

impl Event {
    /// ISO-8601 timestamp with microsecond precision and a `Z` suffix.
    pub fn timestamp(&self) -> String {
        self.time.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    /// Convenience accessor for string-valued detail fields.
    pub fn detail_str(&self, key: &str) -> Option<&str> {
        self.detail.get(key).and_then(Value::as_str)
    }
}

/// Normalise a free-form detail value into an object.
///
/// `null` becomes an empty object; any other non-object is stored under
/// `"value"`.
pub(crate) fn into_detail(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            let mut map = Map::new();
            map.insert("value".to_owned(), other);
            map
        }
    }
}
