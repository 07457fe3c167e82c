use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("invalid timestamp {0:?}: expected ISO-8601, e.g. 2025-01-01T12:00:00Z")]
    InvalidTimestamp(String),
}

pub type EventResult<T> = Result<T, EventError>;
