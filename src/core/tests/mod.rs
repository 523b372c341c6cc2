//! Core module tests
//!
//! Contains test suites for core functionality:
//! - Table builder tests (ordering, chaining, all-or-nothing)
//! - Override detection tests
//! - Mode file parser tests
//! - Validation tests

#[cfg(test)]
mod builder_tests;
#[cfg(test)]
mod validator_tests;
