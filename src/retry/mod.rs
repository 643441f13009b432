//! Bounded retry with exponential backoff.
//!
//! [`RetryPolicy`] is an immutable configuration value, validated on
//! construction and freely shared between concurrent retry loops.
//! [`RetryMachine`] holds the per-call attempt state; [`with_retry`] and
//! [`Retry`] drive it on the current thread, and the `async` feature adds
//! cooperative drivers in [`async_ext`](crate::async_ext).
//!
//! # Examples
//!
//! ```
//! use core::time::Duration;
//! use outcome_rail::{ErrorKind, RetryPolicy};
//!
//! let policy = RetryPolicy::builder()
//!     .max_attempts(5)
//!     .base_delay(Duration::from_millis(100))
//!     .max_delay(Duration::from_secs(1))
//!     .multiplier(2.0)
//!     .retry_on(ErrorKind::Timeout)
//!     .build()
//!     .unwrap();
//!
//! // Delays: 100ms, 200ms, 400ms, 800ms (capped at 1s)
//! assert_eq!(policy.delay_for(1), Duration::from_millis(100));
//! assert_eq!(policy.delay_for(4), Duration::from_millis(800));
//! assert_eq!(policy.delay_for(5), Duration::from_secs(1));
//! ```

use core::fmt;
use core::time::Duration;
use std::time::{SystemTime, UNIX_EPOCH};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::{ErrorKind, KindSet, StructuredError};

mod blocking;
mod machine;

pub use blocking::{with_retry, Retry, RetryReport};
pub use machine::{RetryMachine, RetryState};

/// Jitter ratio suggested for loops that run concurrently against one resource.
pub const RECOMMENDED_JITTER: f64 = 0.10;

/// Kinds retried by [`RetryPolicy::default`].
pub const DEFAULT_RETRYABLE_KINDS: KindSet =
    KindSet::of(&[ErrorKind::Timeout, ErrorKind::ResourceUnavailable]);

/// Immutable retry configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "RetryPolicyBuilder", into = "RetryPolicyBuilder")
)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    max_delay: Duration,
    multiplier: f64,
    retryable_kinds: KindSet,
    jitter: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
            retryable_kinds: DEFAULT_RETRYABLE_KINDS,
            jitter: 0.0,
        }
    }
}

impl RetryPolicy {
    /// Starts from the default policy.
    #[inline]
    pub fn builder() -> RetryPolicyBuilder {
        RetryPolicyBuilder::default()
    }

    /// Total attempts, including the first one.
    #[inline]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    #[inline]
    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    #[inline]
    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }

    #[inline]
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    #[inline]
    pub fn retryable_kinds(&self) -> KindSet {
        self.retryable_kinds
    }

    #[inline]
    pub fn jitter(&self) -> f64 {
        self.jitter
    }

    /// Whether a failure on attempt `attempt` (1-based) should be retried.
    ///
    /// All three must hold: attempts remain, the kind is retryable under this
    /// policy, and the error itself is flagged retryable.
    pub fn should_retry(&self, attempt: u32, error: &StructuredError) -> bool {
        attempt < self.max_attempts
            && self.retryable_kinds.contains(error.kind())
            && error.is_retryable()
    }

    /// Backoff after failed attempt `attempt` (1-based), without jitter:
    /// `min(base_delay * multiplier^(attempt - 1), max_delay)`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt.saturating_sub(1)).unwrap_or(i32::MAX);
        let scaled = self.base_delay.as_nanos() as f64 * self.multiplier.powi(exponent);
        self.clamp_nanos(scaled)
    }

    /// Backoff with jitter applied, using `seed` as the random source.
    ///
    /// The delay moves by up to `jitter` of itself in either direction and
    /// stays within `[0, max_delay]`.
    pub fn jittered_delay(&self, attempt: u32, seed: u64) -> Duration {
        let delay = self.delay_for(attempt);
        if self.jitter == 0.0 {
            return delay;
        }
        // Uniform-ish value in [-1.0, 1.0].
        let unit = (seed % 2001) as f64 / 1000.0 - 1.0;
        self.clamp_nanos(delay.as_nanos() as f64 * (1.0 + self.jitter * unit))
    }

    /// Backoff for the next wait, seeded from the clock when jitter is enabled.
    pub(crate) fn next_delay(&self, attempt: u32) -> Duration {
        if self.jitter == 0.0 {
            return self.delay_for(attempt);
        }
        self.jittered_delay(attempt, jitter_seed(attempt))
    }

    fn clamp_nanos(&self, nanos: f64) -> Duration {
        let max = self.max_delay.as_nanos() as f64;
        if nanos.is_nan() || nanos <= 0.0 {
            return Duration::ZERO;
        }
        if nanos >= max {
            return self.max_delay;
        }
        Duration::from_nanos(nanos.round() as u64)
    }
}

fn jitter_seed(attempt: u32) -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| u64::from(duration.subsec_nanos()));
    nanos ^ u64::from(attempt).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Builder for [`RetryPolicy`]; [`build`](Self::build) validates the values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RetryPolicyBuilder {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: f64,
    pub retryable_kinds: KindSet,
    pub jitter: f64,
}

impl Default for RetryPolicyBuilder {
    fn default() -> Self {
        RetryPolicy::default().into()
    }
}

impl RetryPolicyBuilder {
    #[inline]
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    #[inline]
    pub fn base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    #[inline]
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    #[inline]
    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Replaces the retryable kinds.
    #[inline]
    pub fn retryable_kinds(mut self, kinds: KindSet) -> Self {
        self.retryable_kinds = kinds;
        self
    }

    /// Restricts retrying to `kind` only.
    #[inline]
    pub fn retry_on(self, kind: ErrorKind) -> Self {
        self.retryable_kinds(KindSet::from(kind))
    }

    #[inline]
    pub fn jitter(mut self, ratio: f64) -> Self {
        self.jitter = ratio;
        self
    }

    pub fn build(self) -> Result<RetryPolicy, PolicyError> {
        if self.max_attempts == 0 {
            return Err(PolicyError::ZeroAttempts);
        }
        if !(self.multiplier > 1.0 && self.multiplier.is_finite()) {
            return Err(PolicyError::Multiplier(self.multiplier));
        }
        if !(0.0..=1.0).contains(&self.jitter) {
            return Err(PolicyError::Jitter(self.jitter));
        }
        if self.max_delay < self.base_delay {
            return Err(PolicyError::DelayBounds { base: self.base_delay, max: self.max_delay });
        }
        Ok(RetryPolicy {
            max_attempts: self.max_attempts,
            base_delay: self.base_delay,
            max_delay: self.max_delay,
            multiplier: self.multiplier,
            retryable_kinds: self.retryable_kinds,
            jitter: self.jitter,
        })
    }
}

impl From<RetryPolicy> for RetryPolicyBuilder {
    fn from(policy: RetryPolicy) -> Self {
        Self {
            max_attempts: policy.max_attempts,
            base_delay: policy.base_delay,
            max_delay: policy.max_delay,
            multiplier: policy.multiplier,
            retryable_kinds: policy.retryable_kinds,
            jitter: policy.jitter,
        }
    }
}

impl TryFrom<RetryPolicyBuilder> for RetryPolicy {
    type Error = PolicyError;

    fn try_from(builder: RetryPolicyBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

/// Rejected retry configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum PolicyError {
    ZeroAttempts,
    Multiplier(f64),
    Jitter(f64),
    DelayBounds { base: Duration, max: Duration },
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroAttempts => f.write_str("max_attempts must be at least 1"),
            Self::Multiplier(m) => write!(f, "multiplier must be finite and greater than 1.0, got {m}"),
            Self::Jitter(j) => write!(f, "jitter must be within 0.0..=1.0, got {j}"),
            Self::DelayBounds { base, max } => {
                write!(f, "max_delay ({max:?}) must not be shorter than base_delay ({base:?})")
            },
        }
    }
}

impl std::error::Error for PolicyError {}
