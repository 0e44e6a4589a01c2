//! Proof module: canonical hashing and canonical JSON bytes.
//!
//! Works on raw bytes and `serde_json::Value`; no carrier types appear here.

pub mod canon;
pub mod hash;
pub mod hash_domain;
