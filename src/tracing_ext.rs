//! Tracing integration.
//!
//! Attaches the active span's name to failures as a `span` context entry and
//! records structured errors as events.
//!
//! # Feature Flag
//!
//! Requires the `tracing` feature:
//!
//! ```toml
//! [dependencies]
//! outcome-rail = { version = "0.1", features = ["tracing"] }
//! ```

use tracing::Span;

use crate::types::{Outcome, StructuredError};

/// Extension for [`Outcome`] adding span context to failures.
pub trait OutcomeSpanExt<T> {
    /// Adds the current span's name to an `Err` outcome.
    fn with_current_span(self) -> Outcome<T>;

    /// Adds a specific span's name to an `Err` outcome.
    fn with_span(self, span: &Span) -> Outcome<T>;
}

impl<T> OutcomeSpanExt<T> for Outcome<T> {
    fn with_current_span(self) -> Outcome<T> {
        self.with_span(&Span::current())
    }

    fn with_span(self, span: &Span) -> Outcome<T> {
        self.map_err(|err| err.with_context("span", span_name(span)))
    }
}

/// Records `error` as a tracing event at `ERROR` level.
pub fn emit(error: &StructuredError) {
    tracing::error!(
        kind = %error.kind(),
        retryable = error.is_retryable(),
        depth = error.depth(),
        chain = %error.error_chain(),
        "{}",
        error.message()
    );
}

fn span_name(span: &Span) -> &'static str {
    span.metadata().map(|m| m.name()).unwrap_or("unknown")
}

#[cfg(feature = "async")]
pub use future::{FutureSpanExt, SpanContextFuture};

#[cfg(feature = "async")]
mod future {
    use core::future::Future;
    use core::pin::Pin;
    use core::task::{Context, Poll};

    use pin_project_lite::pin_project;
    use tracing::Span;

    use super::OutcomeSpanExt;
    use crate::types::Outcome;

    /// Extension for futures resolving to an [`Outcome`].
    ///
    /// ```rust,ignore
    /// use outcome_rail::tracing_ext::FutureSpanExt;
    /// use tracing::info_span;
    ///
    /// let outcome = with_timeout(Duration::from_secs(1), fetch())
    ///     .with_span(info_span!("fetch_user", user_id = id))
    ///     .await;
    /// ```
    pub trait FutureSpanExt<T>: Future<Output = Outcome<T>> + Sized {
        /// Captures the current span, tagging failures with its name.
        fn with_span_context(self) -> SpanContextFuture<Self> {
            SpanContextFuture { inner: self, span: Span::current() }
        }

        fn with_span(self, span: Span) -> SpanContextFuture<Self> {
            SpanContextFuture { inner: self, span }
        }
    }

    impl<F, T> FutureSpanExt<T> for F where F: Future<Output = Outcome<T>> {}

    pin_project! {
        /// Future wrapper that adds span context on failure.
        #[must_use = "futures do nothing unless polled"]
        pub struct SpanContextFuture<F> {
            #[pin]
            inner: F,
            span: Span,
        }
    }

    impl<F, T> Future for SpanContextFuture<F>
    where
        F: Future<Output = Outcome<T>>,
    {
        type Output = Outcome<T>;

        fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
            let this = self.project();
            match this.inner.poll(cx) {
                Poll::Ready(outcome) => Poll::Ready(outcome.with_span(this.span)),
                Poll::Pending => Poll::Pending,
            }
        }
    }
}
