use core::time::Duration;
use std::io;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use outcome_rail::async_ext::{with_retry_tokio, with_timeout};
use outcome_rail::{CancelToken, Retry, RetryPolicy, RECOMMENDED_JITTER};

#[tokio::main]
async fn main() {
    let policy = RetryPolicy::builder()
        .max_attempts(5)
        .base_delay(Duration::from_millis(50))
        .max_delay(Duration::from_secs(2))
        .jitter(RECOMMENDED_JITTER)
        .build()
        .expect("valid policy");

    // 1. Flaky call that recovers
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();
    let outcome = with_retry_tokio(
        move || {
            let c = counter.clone();
            async move {
                if c.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(io::Error::new(io::ErrorKind::ConnectionReset, "peer reset"))
                } else {
                    Ok("pong")
                }
            }
        },
        &policy,
    )
    .await;
    println!("1. {outcome:?} after {} calls", calls.load(Ordering::SeqCst));

    // 2. Deadline
    let outcome = with_timeout(Duration::from_millis(20), async {
        tokio::time::sleep(Duration::from_secs(1)).await;
        Ok::<_, io::Error>(())
    })
    .await;
    println!("2. {outcome:?}");

    // 3. Shutdown while backing off
    let token = CancelToken::new();
    let shutdown = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(120)).await;
        shutdown.cancel();
    });

    let report = Retry::new(&policy)
        .cancel_token(&token)
        .run_tokio(|| async { Err::<(), _>(io::Error::from(io::ErrorKind::TimedOut)) })
        .await;
    if let outcome_rail::Outcome::Err(err) = &report.outcome {
        println!("3. gave up after {} attempts:\n{err:#}", report.attempts);
    }
}
