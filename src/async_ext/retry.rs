//! Runtime-neutral async retry.
//!
//! The drivers here take a `sleep_fn` producing the wait future, so they run
//! on any executor. [`tokio_ext`](super::tokio_ext) plugs in Tokio's timer.

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use core::time::Duration;
use std::error::Error;

use pin_project_lite::pin_project;

use crate::cancel::WakerSlot;
use crate::log;
use crate::retry::{Retry, RetryMachine, RetryPolicy, RetryReport, RetryState};
use crate::types::Outcome;

/// Retries an async operation under `policy`, sleeping with `sleep_fn`.
///
/// # Example
///
/// ```rust,ignore
/// use outcome_rail::async_ext::retry_with_policy;
///
/// // With Tokio
/// let outcome = retry_with_policy(|| fetch_data(), &policy, tokio::time::sleep).await;
///
/// // With async-std
/// let outcome = retry_with_policy(|| fetch_data(), &policy, async_std::task::sleep).await;
/// ```
pub async fn retry_with_policy<F, Fut, T, E, S, SFut>(
    operation: F,
    policy: &RetryPolicy,
    sleep_fn: S,
) -> Outcome<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Error + 'static,
    S: Fn(Duration) -> SFut,
    SFut: Future<Output = ()>,
{
    Retry::new(policy).run_async(operation, sleep_fn).await.outcome
}

/// Like [`retry_with_policy`], also reporting attempts and time spent waiting.
pub async fn retry_with_metadata<F, Fut, T, E, S, SFut>(
    operation: F,
    policy: &RetryPolicy,
    sleep_fn: S,
) -> RetryReport<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Error + 'static,
    S: Fn(Duration) -> SFut,
    SFut: Future<Output = ()>,
{
    Retry::new(policy).run_async(operation, sleep_fn).await
}

impl Retry<'_> {
    /// Async counterpart of [`Retry::run_with_report`].
    ///
    /// A cancelled token interrupts the pending wait as soon as it fires.
    pub async fn run_async<F, Fut, T, E, S, SFut>(
        &self,
        mut operation: F,
        sleep_fn: S,
    ) -> RetryReport<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Error + 'static,
        S: Fn(Duration) -> SFut,
        SFut: Future<Output = ()>,
    {
        let mut machine = RetryMachine::new(self.policy);
        machine.start();

        loop {
            let err = match operation().await {
                Ok(value) => {
                    machine.succeed();
                    return RetryReport::from_machine(machine, Some(value));
                },
                Err(err) => self.classifier.classify(&err),
            };

            let RetryState::Waiting { attempt, delay } = machine.fail(err) else {
                return RetryReport::from_machine(machine, None);
            };
            if let Some(last) = machine.last_error() {
                log::retry_scheduled(attempt, delay, last);
            }

            let cancel = self.cancel.map(WakerSlot::new);
            let wait = SleepOrCancel { sleep: sleep_fn(delay), cancel };
            if wait.await == WaitResult::Cancelled {
                machine.cancel();
                return RetryReport::from_machine(machine, None);
            }
            machine.resume();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WaitResult {
    Elapsed,
    Cancelled,
}

pin_project! {
    /// A backoff wait that ends early when the token is cancelled.
    #[must_use = "futures do nothing unless polled"]
    struct SleepOrCancel<'a, S> {
        #[pin]
        sleep: S,
        cancel: Option<WakerSlot<'a>>,
    }
}

impl<S> Future for SleepOrCancel<'_, S>
where
    S: Future<Output = ()>,
{
    type Output = WaitResult;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        if let Some(slot) = this.cancel {
            if slot.poll_cancelled(cx).is_ready() {
                return Poll::Ready(WaitResult::Cancelled);
            }
        }
        this.sleep.poll(cx).map(|()| WaitResult::Elapsed)
    }
}
