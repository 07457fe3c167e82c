//! The `EventLog`, append-only and ordered by time.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::event::into_detail;
use crate::{Event, EventError, EventKind, EventResult};

/// Time-ordered event storage.
///
/// Timestamps never decrease: if the wall clock steps backwards, the new
/// event reuses the previous event's timestamp.  This keeps the newest-first
/// scan in [`query_since`](Self::query_since) valid.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event stamped with the current UTC time.
    pub fn append(&mut self, kind: EventKind, detail: Value) -> &Event {
        self.append_at(Utc::now(), kind, detail)
    }

    /// Record an event with an explicit timestamp (clamped to the last one).
    pub fn append_at(&mut self, time: DateTime<Utc>, kind: EventKind, detail: Value) -> &Event {
        let time = match self.events.last() {
            Some(last) if last.time > time => last.time,
            _ => time,
        };
        let idx = self.events.len();
        self.events.push(Event { time, kind, detail: into_detail(detail) });
        &self.events[idx]
    }

    /// Query with a textual `since` filter.
    ///
    /// Returns events strictly newer than `since` (all events when `None`),
    /// newest first, at most `limit` of them.
    pub fn query(&self, since: Option<&str>, limit: Option<usize>) -> EventResult<Vec<&Event>> {
        let since = since.map(parse_timestamp).transpose()?;
        Ok(self.query_since(since, limit))
    }

    /// Typed form of [`query`](Self::query).
    pub fn query_since(&self, since: Option<DateTime<Utc>>, limit: Option<usize>) -> Vec<&Event> {
        self.events
            .iter()
            .rev()
            .take_while(|e| since.is_none_or(|s| e.time > s))
            .take(limit.unwrap_or(usize::MAX))
            .collect()
    }

    /// All events, oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Event> + '_ {
        self.events.iter()
    }

    pub fn last(&self) -> Option<&Event> {
        self.events.last()
    }

    /// Number of events of `kind`.
    pub fn count(&self, kind: EventKind) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Parse an ISO-8601 timestamp.
///
/// Accepts RFC 3339 (`2025-01-01T12:00:00Z`, `…+02:00`), a date-time without
/// offset (read as UTC), or a bare date (UTC midnight).
pub fn parse_timestamp(s: &str) -> EventResult<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Ok(t.with_timezone(&Utc));
    }
    if let Ok(t) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(t.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|t| t.and_utc())
        .ok_or_else(|| EventError::InvalidTimestamp(s.to_owned()))
}
