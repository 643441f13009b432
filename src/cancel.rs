//! Cooperative cancellation for retry waits.

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll, Waker};
use core::time::Duration;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

/// A cloneable cancellation flag.
///
/// Cancelling is one-way. Blocked threads in [`wait_timeout`](Self::wait_timeout)
/// and tasks awaiting [`cancelled`](Self::cancelled) are woken immediately.
///
/// ```
/// use core::time::Duration;
/// use outcome_rail::CancelToken;
///
/// let token = CancelToken::new();
/// let remote = token.clone();
/// let waiter = std::thread::spawn(move || remote.wait_timeout(Duration::from_secs(30)));
///
/// token.cancel();
/// assert!(waiter.join().unwrap());
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    shared: Arc<Shared>,
}

#[derive(Debug, Default)]
struct Shared {
    state: Mutex<State>,
    signal: Condvar,
}

#[derive(Debug, Default)]
struct State {
    cancelled: bool,
    next_key: u64,
    wakers: Vec<(u64, Waker)>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the token. Calling it again has no effect.
    pub fn cancel(&self) {
        let wakers = {
            let mut state = self.lock();
            if state.cancelled {
                return;
            }
            state.cancelled = true;
            std::mem::take(&mut state.wakers)
        };
        self.shared.signal.notify_all();
        for (_, waker) in wakers {
            waker.wake();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.lock().cancelled
    }

    /// Blocks for up to `timeout`. Returns `true` if the token was cancelled.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let state = self.lock();
        let (state, _) = self
            .shared
            .signal
            .wait_timeout_while(state, timeout, |state| !state.cancelled)
            .unwrap_or_else(PoisonError::into_inner);
        state.cancelled
    }

    /// Future that completes once the token is cancelled.
    pub fn cancelled(&self) -> Cancelled<'_> {
        Cancelled { slot: WakerSlot::new(self) }
    }

    fn poll_slot(&self, key: &mut Option<u64>, cx: &mut Context<'_>) -> Poll<()> {
        let mut state = self.lock();
        if state.cancelled {
            return Poll::Ready(());
        }
        match key.and_then(|slot| state.wakers.iter().position(|(k, _)| *k == slot)) {
            Some(pos) => {
                let waker = &mut state.wakers[pos].1;
                if !waker.will_wake(cx.waker()) {
                    *waker = cx.waker().clone();
                }
            },
            None => {
                let new_key = state.next_key;
                state.next_key += 1;
                state.wakers.push((new_key, cx.waker().clone()));
                *key = Some(new_key);
            },
        }
        Poll::Pending
    }

    fn deregister(&self, key: u64) {
        let mut state = self.lock();
        if let Some(pos) = state.wakers.iter().position(|(k, _)| *k == key) {
            state.wakers.swap_remove(pos);
        }
    }

    #[cfg(test)]
    pub(crate) fn registered_wakers(&self) -> usize {
        self.lock().wakers.len()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.shared.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// One future's waker registration on a token, removed on drop.
#[derive(Debug)]
pub(crate) struct WakerSlot<'a> {
    token: &'a CancelToken,
    key: Option<u64>,
}

impl<'a> WakerSlot<'a> {
    pub(crate) fn new(token: &'a CancelToken) -> Self {
        Self { token, key: None }
    }

    pub(crate) fn poll_cancelled(&mut self, cx: &mut Context<'_>) -> Poll<()> {
        self.token.poll_slot(&mut self.key, cx)
    }
}

impl Drop for WakerSlot<'_> {
    fn drop(&mut self) {
        if let Some(key) = self.key.take() {
            self.token.deregister(key);
        }
    }
}

/// Future returned by [`CancelToken::cancelled`].
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct Cancelled<'a> {
    slot: WakerSlot<'a>,
}

impl Future for Cancelled<'_> {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        self.slot.poll_cancelled(cx)
    }
}
