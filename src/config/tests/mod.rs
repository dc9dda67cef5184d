//! Config module tests
//!
//! Contains test suites for:
//! - Build options defaults and deserialisation
//! - Loading widget configs from disk
//! - Atomic output writes

#[cfg(test)]
mod loader_tests;
