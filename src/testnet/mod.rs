//! Shared fixtures for unit tests
//!
//! Deterministic seeds, keys and transfers so tests across modules agree
//! on the same bytes.

pub mod test_utils;

pub use test_utils::*;
