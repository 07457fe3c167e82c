//! `fleet-core` — foundational types for the `agv_fleet` dispatch engine.
//!
//! Every other `fleet-*` crate depends on this one.  It has no `fleet-*`
//! dependencies and only `thiserror` (plus optional `serde`) from outside.
//!
//! # What lives here
//!
//! | Module     | Contents                                                 |
//! |------------|----------------------------------------------------------|
//! | [`ids`]    | `NodeIx`, `EdgeIx` (dense indices); `NodeId`, `RobotName`, `OrderName` |
//! | [`status`] | `RobotStatus`, `OrderStatus`                             |
//! | [`time`]   | `Tick`, `TickClock`                                      |
//! | [`error`]  | `CoreError`, `CoreResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod status;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{EdgeIx, NodeId, NodeIx, OrderName, RobotName};
pub use status::{OrderStatus, RobotStatus};
pub use time::{Tick, TickClock};
