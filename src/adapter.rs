//! Safe-access adapters.
//!
//! An adapter runs an operation once. A failure whose classified kind is in
//! the adapter's expected set is recovered into [`Outcome::Err`]; any other
//! failure is handed back unchanged in the outer `Err`, so `?` surfaces it
//! instead of it being swallowed.
//!
//! # Examples
//!
//! ```
//! use outcome_rail::{access, expected, safe_call, with_default, ErrorKind};
//!
//! let list = [1, 2, 3];
//! let outcome = safe_call(|| access::index(&list, 10), expected::INDEXED).unwrap();
//! let err = outcome.unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::OutOfRange);
//! assert_eq!(err.context_value("index"), Some("10"));
//!
//! let n = with_default(|| access::parse_number::<i32>("abc"), expected::NUMERIC, 0).unwrap();
//! assert_eq!(n, 0);
//! ```

use core::fmt::Display;
use std::error::Error;
use std::fs::File;
use std::path::Path;

use crate::access::{self, CheckedArith, Lookup};
use crate::classify::Classifier;
use crate::types::{ErrorKind, KindSet, Outcome, StructuredError};

/// Expected-kind presets for the common operation classes.
pub mod expected {
    use crate::types::{ErrorKind, KindSet};

    /// Indexed sequence access.
    pub const INDEXED: KindSet = KindSet::of(&[ErrorKind::OutOfRange]);
    /// Keyed mapping access.
    pub const KEYED: KindSet = KindSet::of(&[ErrorKind::NotFound]);
    /// Numeric string parsing.
    pub const NUMERIC: KindSet = KindSet::of(&[ErrorKind::InvalidFormat]);
    /// Opening or reading a file.
    pub const FILE_OPEN: KindSet = KindSet::of(&[
        ErrorKind::NotFound,
        ErrorKind::PermissionDenied,
        ErrorKind::ResourceUnavailable,
    ]);
    /// Division and remainder.
    pub const ARITHMETIC: KindSet = KindSet::of(&[ErrorKind::ArithmeticDomain]);
    /// Dynamic type checks.
    pub const TYPED: KindSet = KindSet::of(&[ErrorKind::TypeMismatch]);
}

/// Adapter with an expected-kind set and a classifier.
///
/// ```
/// use outcome_rail::{access, Adapter};
///
/// let scores = std::collections::HashMap::from([("ada", 3)]);
/// let keyed = Adapter::keyed();
///
/// assert_eq!(keyed.call_or(|| access::key(&scores, "bob").copied(), 0).unwrap(), 0);
/// assert_eq!(keyed.call_or(|| access::key(&scores, "ada").copied(), 0).unwrap(), 3);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Adapter<'c> {
    expected: KindSet,
    classifier: &'c Classifier,
}

impl Adapter<'static> {
    /// Adapter recovering the given kinds, using the shared classifier.
    pub fn expecting(expected: KindSet) -> Self {
        Self { expected, classifier: Classifier::global() }
    }

    pub fn indexed() -> Self {
        Self::expecting(expected::INDEXED)
    }

    pub fn keyed() -> Self {
        Self::expecting(expected::KEYED)
    }

    pub fn numeric() -> Self {
        Self::expecting(expected::NUMERIC)
    }

    pub fn file_open() -> Self {
        Self::expecting(expected::FILE_OPEN)
    }

    pub fn arithmetic() -> Self {
        Self::expecting(expected::ARITHMETIC)
    }
}

impl<'c> Adapter<'c> {
    /// Switches to a custom classifier.
    pub fn with_classifier<'n>(self, classifier: &'n Classifier) -> Adapter<'n> {
        Adapter { expected: self.expected, classifier }
    }

    /// Adds `kind` to the expected set.
    pub fn also_expect(mut self, kind: ErrorKind) -> Self {
        self.expected = self.expected.with(kind);
        self
    }

    #[inline]
    pub fn expected(&self) -> KindSet {
        self.expected
    }

    /// Runs `operation` once and recovers expected failures.
    pub fn call<T, E, F>(&self, operation: F) -> Result<Outcome<T>, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: Error + 'static,
    {
        match operation() {
            Ok(value) => Ok(Outcome::Ok(value)),
            Err(err) => {
                let classified = self.classifier.classify(&err);
                if self.expected.contains(classified.kind()) {
                    Ok(Outcome::Err(classified))
                } else {
                    crate::log::unexpected_failure(&classified, self.expected);
                    Err(err)
                }
            },
        }
    }

    /// Like [`call`](Self::call), falling back to `default` on an expected failure.
    pub fn call_or<T, E, F>(&self, operation: F, default: T) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: Error + 'static,
    {
        self.call(operation).map(|outcome| outcome.unwrap_or(default))
    }

    /// Like [`call`](Self::call), computing the fallback from the recovered error.
    pub fn call_or_else<T, E, F, D>(&self, operation: F, fallback: D) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: Error + 'static,
        D: FnOnce(&StructuredError) -> T,
    {
        self.call(operation).map(|outcome| outcome.unwrap_or_else(|err| fallback(&err)))
    }

    /// Like [`call`](Self::call), falling back to `T::default()`.
    pub fn call_or_default<T, E, F>(&self, operation: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: Error + 'static,
        T: Default,
    {
        self.call(operation).map(Outcome::unwrap_or_default)
    }
}

/// Runs `operation` once, recovering failures whose kind is in `expected`.
///
/// Failures of any other kind are returned unchanged as the outer `Err`.
#[inline]
pub fn safe_call<T, E, F>(operation: F, expected: KindSet) -> Result<Outcome<T>, E>
where
    F: FnOnce() -> Result<T, E>,
    E: Error + 'static,
{
    Adapter::expecting(expected).call(operation)
}

/// [`safe_call`] followed by [`Outcome::unwrap_or`].
#[inline]
pub fn with_default<T, E, F>(operation: F, expected: KindSet, default: T) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E>,
    E: Error + 'static,
{
    Adapter::expecting(expected).call_or(operation, default)
}

// The primitives below only fail with their preset kinds, so the outer
// `Result` is collapsed.

fn recovered<T, E>(result: Result<T, E>) -> Outcome<T>
where
    E: Error + 'static,
{
    result.map_err(|err| Classifier::global().classify(&err)).into()
}

/// Element at `index`, or an `OutOfRange` error.
pub fn safe_get<T>(items: &[T], index: usize) -> Outcome<&T> {
    recovered(access::index(items, index))
}

/// Value under `key`, or a `NotFound` error.
pub fn safe_lookup<'a, M, Q>(map: &'a M, key: &Q) -> Outcome<&'a M::Value>
where
    M: Lookup<Q> + ?Sized,
    Q: Display + ?Sized,
{
    recovered(access::key(map, key))
}

/// Parsed number, or an `InvalidFormat` error.
pub fn safe_parse<T>(input: &str) -> Outcome<T>
where
    T: core::str::FromStr,
    T::Err: Error + Send + Sync + 'static,
{
    recovered(access::parse_number(input))
}

/// Quotient, or an `ArithmeticDomain` / `OutOfRange` error.
pub fn safe_divide<T: CheckedArith>(dividend: T, divisor: T) -> Outcome<T> {
    recovered(access::divide(dividend, divisor))
}

/// Remainder, or an `ArithmeticDomain` / `OutOfRange` error.
pub fn safe_remainder<T: CheckedArith>(dividend: T, divisor: T) -> Outcome<T> {
    recovered(access::remainder(dividend, divisor))
}

/// Opened file, or the classified I/O failure.
pub fn safe_open(path: impl AsRef<Path>) -> Outcome<File> {
    recovered(access::open(path))
}

pub fn get_or<T: Clone>(items: &[T], index: usize, default: T) -> T {
    safe_get(items, index).map(T::clone).unwrap_or(default)
}

pub fn lookup_or<M, Q>(map: &M, key: &Q, default: M::Value) -> M::Value
where
    M: Lookup<Q> + ?Sized,
    M::Value: Clone,
    Q: Display + ?Sized,
{
    safe_lookup(map, key).map(Clone::clone).unwrap_or(default)
}

pub fn parse_or<T>(input: &str, default: T) -> T
where
    T: core::str::FromStr,
    T::Err: Error + Send + Sync + 'static,
{
    safe_parse(input).unwrap_or(default)
}

pub fn divide_or<T: CheckedArith>(dividend: T, divisor: T, default: T) -> T {
    safe_divide(dividend, divisor).unwrap_or(default)
}
