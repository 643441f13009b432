//! Integration tests for async extensions.

mod retry;


#[cfg(feature = "tracing")]
mod tracing_tests;
