//! Carrier module: the state value type and its binary domain.
//!
//! This is the foundational layer. No other kernel module is imported here.

pub mod position;
