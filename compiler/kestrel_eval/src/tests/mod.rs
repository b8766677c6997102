//! Cross-module evaluator tests.
//!
//! `support` holds the helpers shared with the per-module test files.

mod observer_tests;
pub(crate) mod support;
