//! Structured errors, outcomes, safe-access adapters, retry and scoped resources.
//!
//! Failures are split in two tiers. *Expected* failures, the ones a caller
//! listed up front, come back as [`Outcome::Err`] carrying a
//! [`StructuredError`]. *Unexpected* failures keep their original type and
//! propagate through the outer `Result` (or as a panic), so they are never
//! silently turned into values.
//!
//! # Examples
//!
//! ## Safe Access With a Fallback
//!
//! ```
//! use outcome_rail::{access, expected, safe_call, with_default, ErrorKind};
//!
//! let list = [1, 2, 3];
//! let err = safe_call(|| access::index(&list, 10), expected::INDEXED).unwrap().unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::OutOfRange);
//! assert_eq!(err.context_value("length"), Some("3"));
//!
//! assert_eq!(with_default(|| access::parse_number::<i32>("abc"), expected::NUMERIC, 0).unwrap(), 0);
//! ```
//!
//! ## Classification
//!
//! ```
//! use outcome_rail::{classify, ErrorKind};
//!
//! let err = std::io::Error::from(std::io::ErrorKind::TimedOut);
//! let classified = classify(&err);
//! assert_eq!(classified.kind(), ErrorKind::Timeout);
//! assert!(classified.is_retryable());
//! ```
//!
//! ## Retry
//!
//! ```
//! use core::time::Duration;
//! use outcome_rail::{with_retry, ErrorKind, RetryPolicy, StructuredError};
//!
//! let policy = RetryPolicy::builder().base_delay(Duration::from_millis(1)).build().unwrap();
//! let outcome = with_retry(
//!     || Err::<(), _>(StructuredError::new(ErrorKind::Timeout, "no reply")),
//!     &policy,
//! );
//!
//! let err = outcome.unwrap_err();
//! assert_eq!(err.depth(), 3);
//! assert_eq!(err.context_value("attempt"), Some("3"));
//! ```

/// Raw fallible primitives and their error types
pub mod access;
/// Safe-call adapters separating expected from unexpected failures
pub mod adapter;
/// Cooperative cancellation
pub mod cancel;
/// Rule-based classification of raw failures
pub mod classify;
/// Error construction macros
pub mod macros;
/// Convenience re-exports for quick starts
pub mod prelude;
/// Bounded retry with exponential backoff
pub mod retry;
/// Scoped resources with guaranteed release
pub mod scope;
/// Extension traits
pub mod traits;
/// Error taxonomy, structured errors and outcomes
pub mod types;

mod log;

/// Async retry drivers (requires `async` feature)
#[cfg(feature = "async")]
pub mod async_ext;

/// Tracing integration (requires `tracing` feature)
#[cfg(feature = "tracing")]
pub mod tracing_ext;

pub use adapter::{
    divide_or, expected, get_or, lookup_or, parse_or, safe_call, safe_divide, safe_get,
    safe_lookup, safe_open, safe_parse, safe_remainder, with_default, Adapter,
};
pub use cancel::CancelToken;
pub use classify::{classify, Classifier, Rule};
pub use retry::{
    with_retry, PolicyError, Retry, RetryMachine, RetryPolicy, RetryPolicyBuilder, RetryReport,
    RetryState, DEFAULT_RETRYABLE_KINDS, RECOMMENDED_JITTER,
};
pub use scope::{with_scope, ScopeGuard};
pub use traits::ResultExt;
pub use types::{
    ContextEntry, ErrorFormatConfig, ErrorKind, KindSet, Outcome, StructuredError,
};
