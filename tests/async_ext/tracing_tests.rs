//! Tests for tracing integration.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use outcome_rail::tracing_ext::{emit, FutureSpanExt, OutcomeSpanExt};
use outcome_rail::{ErrorKind, Outcome, StructuredError};
use tracing::{info_span, Level, Span};
use tracing_subscriber::FmtSubscriber;

/// Collects formatted events in memory.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn subscriber(captured: &Captured) -> impl tracing::Subscriber + Send + Sync {
    let writer = captured.clone();
    FmtSubscriber::builder()
        .with_max_level(Level::TRACE)
        .with_writer(move || writer.clone())
        .finish()
}

fn timeout() -> StructuredError {
    StructuredError::new(ErrorKind::Timeout, "upstream timed out")
}

#[test]
fn emit_records_kind_and_depth() {
    let captured = Captured::default();
    let err = timeout().wrap(ErrorKind::ResourceUnavailable, "pool drained");

    tracing::subscriber::with_default(subscriber(&captured), || emit(&err));

    let text = captured.text();
    assert!(text.contains("ERROR"));
    assert!(text.contains("pool drained"));
    assert!(text.contains("kind=resource_unavailable"));
    assert!(text.contains("depth=2"));
    assert!(text.contains("retryable=true"));
}

#[test]
fn outcome_takes_the_entered_span_name() {
    let captured = Captured::default();
    let outcome = tracing::subscriber::with_default(subscriber(&captured), || {
        let span = info_span!("load_config");
        let _entered = span.enter();
        Outcome::<()>::Err(timeout()).with_current_span()
    });

    assert_eq!(outcome.unwrap_err().context_value("span"), Some("load_config"));
}

#[test]
fn with_span_none_reports_unknown() {
    let outcome = Outcome::<()>::Err(timeout()).with_span(&Span::none());
    assert_eq!(outcome.unwrap_err().context_value("span"), Some("unknown"));
}

#[tokio::test]
async fn future_span_ext_success() {
    let outcome = async { Outcome::Ok(42) }.with_span_context().await;
    assert_eq!(outcome.unwrap(), 42);
}

#[tokio::test]
async fn future_span_ext_error() {
    let captured = Captured::default();
    let _default = tracing::subscriber::set_default(subscriber(&captured));

    let outcome = async { Outcome::<i32>::Err(timeout()) }
        .with_span(info_span!("fetch_user", user_id = 7))
        .await;

    let err = outcome.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert_eq!(err.context_value("span"), Some("fetch_user"));
}

#[tokio::test]
async fn span_context_future_waits_for_inner() {
    use core::future::Future;
    use core::pin::Pin;
    use core::task::{Context, Poll};

    /// Pending on the first poll, ready on the second.
    struct SecondPoll(bool);

    impl Future for SecondPoll {
        type Output = Outcome<()>;

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
            if self.0 {
                Poll::Ready(Outcome::Err(StructuredError::new(ErrorKind::NotFound, "gone")))
            } else {
                self.0 = true;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }

    let outcome = SecondPoll(false).with_span(Span::none()).await;
    assert_eq!(outcome.unwrap_err().context_value("span"), Some("unknown"));
}
