//! Deterministic, pure logic for promotion.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! candidate lists and return deterministic outputs suitable for tests.

pub mod candidate;
pub mod grouping;
pub mod paths;
