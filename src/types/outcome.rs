//! The success-or-structured-failure value returned by every adapter.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::{ErrorKind, StructuredError};

/// Either a success value or a [`StructuredError`].
///
/// `Outcome` is used for *expected* failure paths. Combinators are pure:
/// [`map`](Outcome::map) and [`and_then`](Outcome::and_then) touch only `Ok`,
/// [`map_err`](Outcome::map_err) only `Err`, and
/// [`unwrap_or`](Outcome::unwrap_or) never panics.
///
/// Reading the value of an `Err` outcome is a programming error:
/// [`unwrap`](Outcome::unwrap) panics with the kind and message instead of
/// handing back something null-like.
///
/// # Examples
///
/// ```
/// use outcome_rail::{ErrorKind, Outcome, StructuredError};
///
/// fn halve(n: i64) -> Outcome<i64> {
///     if n % 2 == 0 {
///         Outcome::Ok(n / 2)
///     } else {
///         Outcome::Err(StructuredError::new(ErrorKind::InvalidFormat, "odd"))
///     }
/// }
///
/// assert_eq!(Outcome::Ok(8).and_then(halve).and_then(halve).unwrap_or(0), 2);
/// assert_eq!(Outcome::Ok(6).and_then(halve).and_then(halve).unwrap_or(0), 0);
/// ```
#[must_use]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Ok(T),
    Err(StructuredError),
}

impl<T> Outcome<T> {
    #[must_use]
    #[inline]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    #[must_use]
    #[inline]
    pub fn is_err(&self) -> bool {
        !self.is_ok()
    }

    /// Kind of the contained error, if any.
    #[inline]
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Ok(_) => None,
            Self::Err(err) => Some(err.kind()),
        }
    }

    #[inline]
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Err(_) => None,
        }
    }

    #[inline]
    pub fn err(self) -> Option<StructuredError> {
        match self {
            Self::Ok(_) => None,
            Self::Err(err) => Some(err),
        }
    }

    #[inline]
    pub fn error(&self) -> Option<&StructuredError> {
        match self {
            Self::Ok(_) => None,
            Self::Err(err) => Some(err),
        }
    }

    /// Transforms the success value; errors pass through unchanged.
    #[inline]
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Ok(value) => Outcome::Ok(f(value)),
            Self::Err(err) => Outcome::Err(err),
        }
    }

    /// Transforms the error; success values pass through unchanged.
    #[inline]
    pub fn map_err<F>(self, f: F) -> Outcome<T>
    where
        F: FnOnce(StructuredError) -> StructuredError,
    {
        match self {
            Self::Ok(value) => Self::Ok(value),
            Self::Err(err) => Self::Err(f(err)),
        }
    }

    /// Chains a further fallible step, short-circuiting on `Err`.
    #[inline]
    pub fn and_then<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        match self {
            Self::Ok(value) => f(value),
            Self::Err(err) => Outcome::Err(err),
        }
    }

    /// Runs a recovery step on `Err`.
    #[inline]
    pub fn or_else<F>(self, f: F) -> Outcome<T>
    where
        F: FnOnce(StructuredError) -> Outcome<T>,
    {
        match self {
            Self::Ok(value) => Self::Ok(value),
            Self::Err(err) => f(err),
        }
    }

    /// Returns the value, or `default` on `Err`.
    #[inline]
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Self::Ok(value) => value,
            Self::Err(_) => default,
        }
    }

    #[inline]
    pub fn unwrap_or_else<F>(self, f: F) -> T
    where
        F: FnOnce(StructuredError) -> T,
    {
        match self {
            Self::Ok(value) => value,
            Self::Err(err) => f(err),
        }
    }

    #[inline]
    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        self.unwrap_or_else(|_| T::default())
    }

    /// Returns the value.
    ///
    /// # Panics
    ///
    /// Panics if the outcome is `Err`, naming the error kind and message.
    #[track_caller]
    pub fn unwrap(self) -> T {
        match self {
            Self::Ok(value) => value,
            Self::Err(err) => unwrap_failed("called `Outcome::unwrap()` on an `Err` outcome", &err),
        }
    }

    /// Returns the value.
    ///
    /// # Panics
    ///
    /// Panics with `msg` and the error if the outcome is `Err`.
    #[track_caller]
    pub fn expect(self, msg: &str) -> T {
        match self {
            Self::Ok(value) => value,
            Self::Err(err) => unwrap_failed(msg, &err),
        }
    }

    /// Returns the error.
    ///
    /// # Panics
    ///
    /// Panics if the outcome is `Ok`.
    #[track_caller]
    pub fn unwrap_err(self) -> StructuredError {
        match self {
            Self::Ok(_) => panic!("called `Outcome::unwrap_err()` on an `Ok` outcome"),
            Self::Err(err) => err,
        }
    }

    #[inline]
    pub fn into_result(self) -> Result<T, StructuredError> {
        self.into()
    }
}

#[cold]
#[track_caller]
fn unwrap_failed(msg: &str, err: &StructuredError) -> ! {
    panic!("{msg}: {err:#}")
}

impl<T> From<Result<T, StructuredError>> for Outcome<T> {
    #[inline]
    fn from(result: Result<T, StructuredError>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(err) => Self::Err(err),
        }
    }
}

impl<T> From<Outcome<T>> for Result<T, StructuredError> {
    #[inline]
    fn from(outcome: Outcome<T>) -> Self {
        match outcome {
            Outcome::Ok(value) => Ok(value),
            Outcome::Err(err) => Err(err),
        }
    }
}

/// Collects successes; the first `Err` ends the collection.
impl<T, V> FromIterator<Outcome<T>> for Outcome<V>
where
    V: FromIterator<T>,
{
    fn from_iter<I: IntoIterator<Item = Outcome<T>>>(iter: I) -> Self {
        iter.into_iter().map(Outcome::into_result).collect::<Result<V, _>>().into()
    }
}
