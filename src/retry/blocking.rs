use core::time::Duration;
use std::error::Error;
use std::thread;

use super::{RetryMachine, RetryPolicy, RetryState};
use crate::cancel::CancelToken;
use crate::classify::Classifier;
use crate::log;
use crate::types::Outcome;

/// Result of a retry loop together with its bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryReport<T> {
    pub outcome: Outcome<T>,
    /// Attempts made, including the first one.
    pub attempts: u32,
    /// Time spent in completed backoff waits.
    pub total_wait: Duration,
}

impl<T> RetryReport<T> {
    pub(crate) fn from_machine(machine: RetryMachine<'_>, value: Option<T>) -> Self {
        let attempts = machine.state().attempts();
        let total_wait = machine.total_wait();
        let outcome = match value {
            Some(value) => Outcome::Ok(value),
            None => {
                let err = machine.into_error();
                log::retry_finished(attempts, &err);
                Outcome::Err(err)
            },
        };
        Self { outcome, attempts, total_wait }
    }
}

/// Retries `operation` on the current thread under `policy`.
///
/// Failures are classified with the shared classifier. The returned error,
/// when every attempt failed, links all attempts' errors newest first.
///
/// ```
/// use core::time::Duration;
/// use std::io;
/// use outcome_rail::{with_retry, ErrorKind, RetryPolicy};
///
/// let policy = RetryPolicy::builder().base_delay(Duration::from_millis(1)).build().unwrap();
/// let mut calls = 0;
/// let outcome = with_retry(
///     || {
///         calls += 1;
///         if calls < 3 { Err(io::Error::from(io::ErrorKind::TimedOut)) } else { Ok(calls) }
///     },
///     &policy,
/// );
/// assert_eq!(outcome.unwrap(), 3);
/// ```
pub fn with_retry<T, E, F>(operation: F, policy: &RetryPolicy) -> Outcome<T>
where
    F: FnMut() -> Result<T, E>,
    E: Error + 'static,
{
    Retry::new(policy).run(operation)
}

/// Configurable retry loop.
///
/// ```
/// use core::time::Duration;
/// use outcome_rail::{CancelToken, ErrorKind, Retry, RetryPolicy, StructuredError};
///
/// let policy = RetryPolicy::builder().base_delay(Duration::from_secs(60)).build().unwrap();
/// let token = CancelToken::new();
/// token.cancel();
///
/// let report = Retry::new(&policy).cancel_token(&token).run_with_report(|| {
///     Err::<(), _>(StructuredError::new(ErrorKind::Timeout, "slow"))
/// });
/// assert_eq!(report.attempts, 1);
/// assert_eq!(report.outcome.kind(), Some(ErrorKind::Cancelled));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Retry<'a> {
    pub(crate) policy: &'a RetryPolicy,
    pub(crate) classifier: &'a Classifier,
    pub(crate) cancel: Option<&'a CancelToken>,
}

impl<'a> Retry<'a> {
    pub fn new(policy: &'a RetryPolicy) -> Self {
        Self { policy, classifier: Classifier::global(), cancel: None }
    }

    /// Classifies failures with `classifier` instead of the shared one.
    #[inline]
    pub fn classifier(mut self, classifier: &'a Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Stops waiting, and retrying, once `token` is cancelled.
    #[inline]
    pub fn cancel_token(mut self, token: &'a CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn run<T, E, F>(&self, operation: F) -> Outcome<T>
    where
        F: FnMut() -> Result<T, E>,
        E: Error + 'static,
    {
        self.run_with_report(operation).outcome
    }

    pub fn run_with_report<T, E, F>(&self, mut operation: F) -> RetryReport<T>
    where
        F: FnMut() -> Result<T, E>,
        E: Error + 'static,
    {
        let mut machine = RetryMachine::new(self.policy);
        machine.start();

        loop {
            let err = match operation() {
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

            let cancelled = match self.cancel {
                Some(token) => token.wait_timeout(delay),
                None => {
                    thread::sleep(delay);
                    false
                },
            };
            if cancelled {
                machine.cancel();
                return RetryReport::from_machine(machine, None);
            }
            machine.resume();
        }
    }
}
