//! `fleet-sim` — the tick engine and `Fleet` facade for the agv_fleet engine.
//!
//! # Tick loop
//!
//! ```text
//! advance():
//!   ① Routes   — every active route consumes one unit of edge weight;
//!                robots reaching a node advance their cursor, robots
//!                reaching the target go IDLE and the order DONE.
//!   ② Dispatch — NEW and FAILED orders, in creation order, are offered to
//!                the nearest idle robot.
//!   ③ Expiry   — NEW orders older than `order_timeout_ticks` turn FAILED.
//!   ④ Log      — `tick_processed`, then the clock advances.
//! ```
//!
//! A route that fails to step (its robot or order has vanished) is logged
//! and discarded; the other routes still advance.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fleet_graph::DijkstraRouter;
//! use fleet_sim::{NoopObserver, Scenario};
//!
//! let mut fleet = Scenario::warehouse().build(DijkstraRouter)?;
//! fleet.create_order("O-1002", "A", "F")?;
//! fleet.run_ticks(10, &mut NoopObserver);
//! for p in fleet.robot_positions() {
//!     println!("{} {}→{} {:.2}", p.robot, p.from, p.to, p.progress);
//! }
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod fleet;
pub mod observer;
pub mod position;
pub mod scenario;

#[cfg(test)]
mod tests;

pub use builder::FleetBuilder;
pub use config::FleetConfig;
pub use error::{SimError, SimResult};
pub use fleet::{FALLBACK_EDGE_WEIGHT, Fleet};
pub use observer::{NoopObserver, TickObserver, TickSummary};
pub use position::RobotPosition;
pub use scenario::{GraphSpec, OrderSpec, RobotSpec, Scenario};
