//! `fleet-dispatch` — fleet state and order assignment.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`model`]      | `Robot`, `Order`, `Route`                                  |
//! | [`store`]      | `FleetStore`: robots, orders and active routes            |
//! | [`dispatcher`] | `Dispatcher<R>`: nearest idle robot, full route reservation |
//! | [`error`]      | `DispatchError`, `DispatchResult<T>`                       |
//!
//! # Assignment model
//!
//! 1. Only `IDLE` robots are candidates.  Each is routed to the order's
//!    source through a pluggable [`Router`][fleet_graph::Router].
//! 2. The cheapest pickup wins; equal costs go to the lexicographically
//!    smallest robot name.
//! 3. The winner's full path (robot → source → target) is reserved as a
//!    [`Route`] and the robot stays bound to it until the tick engine walks
//!    it to the end.

pub mod dispatcher;
pub mod error;
pub mod model;
pub mod store;


pub use dispatcher::{Assignment, Dispatcher};
pub use error::{DispatchError, DispatchResult};
pub use model::{Order, Robot, Route};
pub use store::FleetStore;
