use core::time::Duration;

use super::RetryPolicy;
use crate::types::{ErrorKind, StructuredError};

/// Where a retry loop currently stands.
///
/// ```text
/// Pending -> Attempting(1) -> Succeeded
///                          -> Waiting(1) -> Attempting(2) -> ...
///                          -> FailedTerminal
/// Waiting(n) --cancel--> FailedTerminal
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryState {
    Pending,
    Attempting { attempt: u32 },
    Waiting { attempt: u32, delay: Duration },
    Succeeded { attempts: u32 },
    FailedTerminal { attempts: u32 },
}

impl RetryState {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded { .. } | Self::FailedTerminal { .. })
    }

    /// Attempts started so far.
    pub fn attempts(&self) -> u32 {
        match *self {
            Self::Pending => 0,
            Self::Attempting { attempt } | Self::Waiting { attempt, .. } => attempt,
            Self::Succeeded { attempts } | Self::FailedTerminal { attempts } => attempts,
        }
    }
}

/// Per-call retry state, driven by one of the retry loops.
///
/// Every failure is recorded with an `attempt` context entry and linked into
/// a single chain: the newest failure at the head, the first one as the root
/// cause. An attempt error's own causes are folded into a `cause_chain` entry,
/// so the chain holds exactly one link per attempt. Transitions that do not
/// apply to the current state are ignored.
///
/// ```
/// use outcome_rail::{ErrorKind, RetryMachine, RetryPolicy, RetryState, StructuredError};
///
/// let policy = RetryPolicy::default();
/// let mut machine = RetryMachine::new(&policy);
///
/// assert_eq!(machine.start(), RetryState::Attempting { attempt: 1 });
/// let state = machine.fail(StructuredError::new(ErrorKind::Timeout, "slow"));
/// assert!(matches!(state, RetryState::Waiting { attempt: 1, .. }));
/// assert_eq!(machine.resume(), RetryState::Attempting { attempt: 2 });
/// assert_eq!(machine.succeed(), RetryState::Succeeded { attempts: 2 });
/// ```
#[derive(Debug)]
pub struct RetryMachine<'p> {
    policy: &'p RetryPolicy,
    state: RetryState,
    chain: Option<StructuredError>,
    total_wait: Duration,
}

impl<'p> RetryMachine<'p> {
    pub fn new(policy: &'p RetryPolicy) -> Self {
        Self { policy, state: RetryState::Pending, chain: None, total_wait: Duration::ZERO }
    }

    #[inline]
    pub fn state(&self) -> RetryState {
        self.state
    }

    #[inline]
    pub fn policy(&self) -> &'p RetryPolicy {
        self.policy
    }

    /// Sum of the waits that ran to completion.
    #[inline]
    pub fn total_wait(&self) -> Duration {
        self.total_wait
    }

    /// The failure chain recorded so far.
    #[inline]
    pub fn last_error(&self) -> Option<&StructuredError> {
        self.chain.as_ref()
    }

    /// `Pending -> Attempting(1)`.
    pub fn start(&mut self) -> RetryState {
        if self.state == RetryState::Pending {
            self.state = RetryState::Attempting { attempt: 1 };
        }
        self.state
    }

    /// `Attempting(n) -> Succeeded(n)`.
    pub fn succeed(&mut self) -> RetryState {
        if let RetryState::Attempting { attempt } = self.state {
            self.state = RetryState::Succeeded { attempts: attempt };
        }
        self.state
    }

    /// Records a failed attempt and decides between waiting and giving up.
    pub fn fail(&mut self, error: StructuredError) -> RetryState {
        let RetryState::Attempting { attempt } = self.state else {
            return self.state;
        };

        let retry = self.policy.should_retry(attempt, &error);
        let (mut error, own_cause) = error.detach_cause();
        error = error.with_context("attempt", attempt);
        if let Some(cause) = own_cause {
            error = error.with_context("cause_chain", cause.error_chain());
        }
        self.chain = Some(match self.chain.take() {
            Some(previous) => error.with_cause(previous),
            None => error,
        });

        self.state = if retry {
            RetryState::Waiting { attempt, delay: self.policy.next_delay(attempt) }
        } else {
            RetryState::FailedTerminal { attempts: attempt }
        };
        self.state
    }

    /// `Waiting(n) -> Attempting(n + 1)`, counting the finished wait.
    pub fn resume(&mut self) -> RetryState {
        if let RetryState::Waiting { attempt, delay } = self.state {
            self.total_wait += delay;
            self.state = RetryState::Attempting { attempt: attempt + 1 };
        }
        self.state
    }

    /// `Waiting(n) -> FailedTerminal(n)`, heading the chain with a `Cancelled` error.
    pub fn cancel(&mut self) -> RetryState {
        if let RetryState::Waiting { attempt, .. } = self.state {
            let mut cancelled = StructuredError::new(
                ErrorKind::Cancelled,
                format!("retry cancelled after {attempt} attempt(s)"),
            )
            .with_context("attempts", attempt);
            if let Some(chain) = self.chain.take() {
                cancelled = cancelled.with_cause(chain);
            }
            self.chain = Some(cancelled);
            self.state = RetryState::FailedTerminal { attempts: attempt };
        }
        self.state
    }

    /// Consumes the machine, yielding the recorded failure chain.
    pub fn into_error(self) -> StructuredError {
        self.chain.unwrap_or_else(|| {
            StructuredError::new(ErrorKind::Unknown, "retry finished without a recorded failure")
        })
    }
}
