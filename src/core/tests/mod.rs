//! Core module tests
//!
//! Contains test suites for the build pipeline:
//! - Property dispatch, data and style binding
//! - Widget factory and composite forms
//! - Handler collection and materialization
//! - End-to-end builds through the facade

#[cfg(test)]
mod factory_tests;
#[cfg(test)]
mod handlers_tests;
