//! `fleet-graph` — the static node graph and shortest-path routing.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`graph`]  | `Graph` (CSR, undirected), `GraphBuilder`, `Edge`         |
//! | [`router`] | `Router` trait, `Path`, `DijkstraRouter`, `shortest_path` |
//! | [`error`]  | `GraphError`, `GraphResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Edge` and `Path`.      |

pub mod error;
pub mod graph;
pub mod router;


pub use error::{GraphError, GraphResult};
pub use graph::{Edge, Graph, GraphBuilder};
pub use router::{DijkstraRouter, Path, Router, shortest_path};
