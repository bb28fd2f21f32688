//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Repositories keep their rows in memory so tests can inspect what a
//! service stored.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
