//! Ferry Kernel: the value types every search is built on.
//!
//! # API Surface
//!
//! - [`carrier::position::PositionStateV1`] -- immutable fixed-length position vector
//! - [`carrier::position::Bank`] -- the two sides of a binary transport domain
//! - [`proof::hash::canonical_hash`] -- domain-separated SHA-256 fingerprints
//! - [`proof::canon::canonical_json_bytes`] -- deterministic JSON bytes for digests
//!
//! # Module Dependency Direction
//!
//! `carrier` and `proof` import nothing from each other. Callers hand
//! `PositionStateV1::identity_bytes()` to `proof` when they need a fingerprint.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod carrier;
pub mod proof;
