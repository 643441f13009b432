//! Tokio-specific async extensions.
//!
//! # Feature Flag
//!
//! Requires the `async-tokio` feature:
//!
//! ```toml
//! [dependencies]
//! outcome-rail = { version = "0.1", features = ["async-tokio"] }
//! ```

use core::future::Future;
use core::time::Duration;
use std::error::Error;

use crate::access::TimeoutError;
use crate::classify::classify;
use crate::retry::{Retry, RetryPolicy, RetryReport};
use crate::types::Outcome;

/// Retries an async operation, waiting with `tokio::time::sleep`.
///
/// # Example
///
/// ```rust,ignore
/// use outcome_rail::{async_ext::with_retry_tokio, RetryPolicy};
///
/// #[tokio::main]
/// async fn main() {
///     let outcome = with_retry_tokio(|| fetch_data(), &RetryPolicy::default()).await;
/// }
/// ```
pub async fn with_retry_tokio<F, Fut, T, E>(operation: F, policy: &RetryPolicy) -> Outcome<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Error + 'static,
{
    Retry::new(policy).run_tokio(operation).await.outcome
}

impl Retry<'_> {
    /// [`run_async`](Retry::run_async) on Tokio's timer.
    pub async fn run_tokio<F, Fut, T, E>(&self, operation: F) -> RetryReport<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Error + 'static,
    {
        self.run_async(operation, tokio::time::sleep).await
    }
}

/// Runs `future` with a deadline.
///
/// Expiry yields a `Timeout` error carrying `timeout_ms`; a failure of the
/// future itself is classified as usual.
///
/// ```rust,ignore
/// use outcome_rail::async_ext::with_timeout;
/// use std::time::Duration;
///
/// match with_timeout(Duration::from_secs(5), fetch_data()).await {
///     Outcome::Ok(data) => println!("Got data: {:?}", data),
///     Outcome::Err(e) => println!("Error: {e:#}"),
/// }
/// ```
pub async fn with_timeout<T, E, Fut>(duration: Duration, future: Fut) -> Outcome<T>
where
    Fut: Future<Output = Result<T, E>>,
    E: Error + 'static,
{
    match tokio::time::timeout(duration, future).await {
        Ok(Ok(value)) => Outcome::Ok(value),
        Ok(Err(err)) => Outcome::Err(classify(&err)),
        Err(_elapsed) => Outcome::Err(classify(&TimeoutError(duration))),
    }
}
