//! Closed status enums for robots and orders.
//!
//! The wire spelling is the upper-case tag (`"IDLE"`, `"IN_PROGRESS"`, …),
//! shared by `Display`, `FromStr` and the optional serde derives.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Whether a robot is free for assignment.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum RobotStatus {
    #[default]
    Idle,
    Executing,
}

impl RobotStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RobotStatus::Idle      => "IDLE",
            RobotStatus::Executing => "EXECUTING",
        }
    }
}

impl fmt::Display for RobotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for RobotStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "IDLE"      => Ok(RobotStatus::Idle),
            "EXECUTING" => Ok(RobotStatus::Executing),
            other => Err(CoreError::Parse(format!(
                "invalid robot status {other:?}: expected \"IDLE\" or \"EXECUTING\""
            ))),
        }
    }
}

/// Lifecycle of a transport order.
///
/// ```text
/// NEW ──assign──▶ IN_PROGRESS ──route complete──▶ DONE
///  │                  ▲
///  └─timeout─▶ FAILED ┘ (still retried by the tick engine)
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum OrderStatus {
    #[default]
    New,
    InProgress,
    Done,
    Failed,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::New        => "NEW",
            OrderStatus::InProgress => "IN_PROGRESS",
            OrderStatus::Done       => "DONE",
            OrderStatus::Failed     => "FAILED",
        }
    }

    /// `true` for orders the dispatcher may still assign (NEW or FAILED).
    #[inline]
    pub fn is_assignable(self) -> bool {
        matches!(self, OrderStatus::New | OrderStatus::Failed)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "NEW"         => Ok(OrderStatus::New),
            "IN_PROGRESS" => Ok(OrderStatus::InProgress),
            "DONE"        => Ok(OrderStatus::Done),
            "FAILED"      => Ok(OrderStatus::Failed),
            other => Err(CoreError::Parse(format!("invalid order status {other:?}"))),
        }
    }
}
