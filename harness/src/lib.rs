//! Ferry Harness: concrete puzzles and orchestration around the search engine.
//!
//! The harness turns puzzle descriptions into [`ferry_search::SearchWorldV1`]
//! implementations, runs them, and packages the outcome as a digest-bound
//! report plus human-readable lines.
//!
//! The harness does NOT implement search logic; it delegates to
//! `ferry_search`. Worlds provide move generation and legality only.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod contract;
pub mod render;
pub mod runner;
pub mod worlds;
