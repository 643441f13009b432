//! Internal tracing hooks.
//!
//! Without the `tracing` feature every hook compiles to nothing.

use core::time::Duration;

#[cfg(feature = "tracing")]
use crate::types::ErrorKind;
use crate::types::{KindSet, StructuredError};

/// A failure outside the adapter's expected set is being handed back.
pub(crate) fn unexpected_failure(error: &StructuredError, expected: KindSet) {
    #[cfg(feature = "tracing")]
    tracing::debug!(
        kind = %error.kind(),
        expected = ?expected,
        reason = error.message(),
        "unexpected failure passed through"
    );
    #[cfg(not(feature = "tracing"))]
    let _ = (error, expected);
}

pub(crate) fn retry_scheduled(attempt: u32, delay: Duration, error: &StructuredError) {
    #[cfg(feature = "tracing")]
    tracing::debug!(
        attempt,
        delay_ms = delay.as_millis() as u64,
        kind = %error.kind(),
        "attempt failed, retrying"
    );
    #[cfg(not(feature = "tracing"))]
    let _ = (attempt, delay, error);
}

/// The retry loop gave up, either exhausted or cancelled.
pub(crate) fn retry_finished(attempts: u32, error: &StructuredError) {
    #[cfg(feature = "tracing")]
    {
        if error.kind() == ErrorKind::Cancelled {
            tracing::info!(attempts, "retry cancelled");
        } else {
            tracing::warn!(attempts, kind = %error.kind(), reason = error.message(), "retry gave up");
        }
    }
    #[cfg(not(feature = "tracing"))]
    let _ = (attempts, error);
}

/// A release failed where no caller could receive the error.
pub(crate) fn release_failed(error: &StructuredError, unwinding: bool) {
    #[cfg(feature = "tracing")]
    tracing::warn!(
        kind = %error.kind(),
        reason = error.message(),
        unwinding,
        "resource release failed"
    );
    #[cfg(not(feature = "tracing"))]
    let _ = (error, unwinding);
}
