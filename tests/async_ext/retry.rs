//! Tests for the runtime-neutral async retry.

use core::time::Duration;
use std::io;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use outcome_rail::async_ext::{retry_with_metadata, retry_with_policy};
use outcome_rail::{CancelToken, ErrorKind, Retry, RetryPolicy};

// Mock sleep that doesn't actually sleep (for fast tests)
async fn mock_sleep(_: Duration) {}

fn policy() -> RetryPolicy {
    RetryPolicy::builder()
        .max_attempts(4)
        .base_delay(Duration::from_millis(100))
        .build()
        .unwrap()
}

#[tokio::test]
async fn retry_succeeds_immediately() {
    let counter = Arc::new(AtomicU32::new(0));
    let counter_clone = counter.clone();

    let outcome = retry_with_policy(
        move || {
            let c = counter_clone.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<_, io::Error>(42)
            }
        },
        &policy(),
        mock_sleep,
    )
    .await;

    assert_eq!(outcome.unwrap(), 42);
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn retry_succeeds_after_transient_failures() {
    let counter = Arc::new(AtomicU32::new(0));
    let counter_clone = counter.clone();

    let report = retry_with_metadata(
        move || {
            let c = counter_clone.clone();
            async move {
                if c.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(io::Error::from(io::ErrorKind::TimedOut))
                } else {
                    Ok(42)
                }
            }
        },
        &policy(),
        mock_sleep,
    )
    .await;

    assert_eq!(report.outcome.unwrap(), 42);
    assert_eq!(report.attempts, 3);
    assert_eq!(report.total_wait, Duration::from_millis(300));
}

#[tokio::test]
async fn sleeps_follow_the_backoff() {
    let sleeps = Arc::new(Mutex::new(Vec::new()));
    let recorded = sleeps.clone();

    let outcome = retry_with_policy(
        || async { Err::<(), _>(io::Error::from(io::ErrorKind::ConnectionReset)) },
        &policy(),
        move |delay| {
            recorded.lock().unwrap().push(delay);
            async {}
        },
    )
    .await;

    assert_eq!(outcome.unwrap_err().depth(), 4);
    assert_eq!(
        *sleeps.lock().unwrap(),
        [Duration::from_millis(100), Duration::from_millis(200), Duration::from_millis(400)]
    );
}

#[tokio::test]
async fn jittered_sleeps_stay_within_bounds() {
    let policy = RetryPolicy::builder()
        .max_attempts(8)
        .base_delay(Duration::from_millis(50))
        .max_delay(Duration::from_secs(60))
        .jitter(0.25)
        .build()
        .unwrap();
    let sleeps = Arc::new(Mutex::new(Vec::new()));
    let recorded = sleeps.clone();

    let report = retry_with_metadata(
        || async { Err::<(), _>(io::Error::from(io::ErrorKind::TimedOut)) },
        &policy,
        move |delay| {
            recorded.lock().unwrap().push(delay);
            async {}
        },
    )
    .await;

    let sleeps = sleeps.lock().unwrap();
    assert_eq!(sleeps.len(), 7);
    for (i, delay) in sleeps.iter().enumerate() {
        let nominal = policy.delay_for(i as u32 + 1).as_nanos() as f64;
        let actual = delay.as_nanos() as f64;
        assert!(actual >= nominal * 0.75 - 1.0, "attempt {}: {delay:?} below range", i + 1);
        assert!(actual <= nominal * 1.25 + 1.0, "attempt {}: {delay:?} above range", i + 1);
    }
    assert_eq!(report.total_wait, sleeps.iter().sum::<Duration>());
}

#[tokio::test]
async fn permanent_error_is_not_retried() {
    let counter = Arc::new(AtomicU32::new(0));
    let counter_clone = counter.clone();

    let outcome = retry_with_policy(
        move || {
            let c = counter_clone.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(io::Error::from(io::ErrorKind::NotFound))
            }
        },
        &policy(),
        mock_sleep,
    )
    .await;

    assert_eq!(outcome.kind(), Some(ErrorKind::NotFound));
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn cancelled_token_stops_the_wait() {
    let token = CancelToken::new();
    token.cancel();

    let report = Retry::new(&policy())
        .cancel_token(&token)
        .run_async(
            || async { Err::<(), _>(io::Error::from(io::ErrorKind::TimedOut)) },
            |_| std::future::pending::<()>(),
        )
        .await;

    assert_eq!(report.attempts, 1);
    assert_eq!(report.outcome.kind(), Some(ErrorKind::Cancelled));
}
