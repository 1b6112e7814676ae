//! Shared test utilities for benchplot integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Every helper writes into a fresh temp directory, so
//! harnesses can run in parallel without stepping on each other.

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
