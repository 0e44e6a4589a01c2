//! Ferry Search: breadth-first shortest-path search over implicit state graphs.
//!
//! This crate provides the search engine. It depends only on `ferry_kernel`;
//! it does NOT depend on `ferry_harness`, which holds concrete puzzles.
//!
//! # Crate dependency graph
//!
//! ```text
//! ferry_kernel  ←  ferry_search  ←  ferry_harness
//! (state, hash)    (frontier, BFS)   (puzzles, runner, render)
//! ```
//!
//! # Key types
//!
//! - [`find_shortest_path`] -- closure-based entry point returning move labels
//! - [`search::search`] -- world-based entry point returning a full audit trail
//! - [`SearchWorldV1`] -- trait for move generation plus legality
//! - [`SearchNodeV1`] -- immutable node with a back reference to its parent
//! - [`BreadthFirstFrontier`] -- FIFO frontier owning the visited set
//! - [`SearchGraphV1`] -- expansion-event audit log
//! - [`SearchPolicyV1`] -- optional expansion/depth budgets

#![forbid(unsafe_code)]

pub mod contract;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod node;
pub mod path;
pub mod policy;
pub mod search;

pub use contract::{CandidateMoveV1, GoalV1, SearchState, SearchWorldV1};
pub use error::{PathError, SearchError};
pub use frontier::BreadthFirstFrontier;
pub use graph::SearchGraphV1;
pub use node::SearchNodeV1;
pub use path::{find_shortest_path, shortest_path};
pub use policy::SearchPolicyV1;
