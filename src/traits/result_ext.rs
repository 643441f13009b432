//! Extension trait for turning plain `Result`s into [`Outcome`]s.
//!
//! # Examples
//!
//! ```
//! use outcome_rail::traits::ResultExt;
//! use outcome_rail::ErrorKind;
//!
//! let outcome = std::fs::read_to_string("definitely-missing.toml").ctx("file", "definitely-missing.toml");
//!
//! assert_eq!(outcome.kind(), Some(ErrorKind::NotFound));
//! assert_eq!(outcome.unwrap_err().context_value("file"), Some("definitely-missing.toml"));
//! ```

use std::error::Error;

use crate::adapter::Adapter;
use crate::classify::Classifier;
use crate::types::{KindSet, Outcome};

/// Classification shortcuts on `Result`.
///
/// ## Lazy Context
///
/// [`ctx_with`](ResultExt::ctx_with) only builds the value when the result
/// is an error:
///
/// ```
/// use outcome_rail::traits::ResultExt;
///
/// let user_id = 42;
/// let outcome = "x1".parse::<u8>().ctx_with("user_id", || user_id.to_string());
/// assert_eq!(outcome.unwrap_err().context_value("user_id"), Some("42"));
/// ```
pub trait ResultExt<T, E> {
    /// Classifies any failure with the shared classifier.
    fn into_outcome(self) -> Outcome<T>;

    /// Classifies any failure with `classifier`.
    fn into_outcome_with(self, classifier: &Classifier) -> Outcome<T>;

    /// Recovers failures whose kind is in `expected`; others stay in the outer `Err`.
    fn expect_kinds(self, expected: KindSet) -> Result<Outcome<T>, E>;

    /// Classifies and adds a context entry on failure.
    fn ctx(self, key: &str, value: impl ToString) -> Outcome<T>;

    /// Like [`ctx`](ResultExt::ctx), computing the value only on failure.
    fn ctx_with<F, V>(self, key: &str, value: F) -> Outcome<T>
    where
        F: FnOnce() -> V,
        V: ToString;
}

impl<T, E> ResultExt<T, E> for Result<T, E>
where
    E: Error + 'static,
{
    #[inline]
    fn into_outcome(self) -> Outcome<T> {
        self.into_outcome_with(Classifier::global())
    }

    fn into_outcome_with(self, classifier: &Classifier) -> Outcome<T> {
        match self {
            Ok(value) => Outcome::Ok(value),
            Err(err) => Outcome::Err(classifier.classify(&err)),
        }
    }

    #[inline]
    fn expect_kinds(self, expected: KindSet) -> Result<Outcome<T>, E> {
        Adapter::expecting(expected).call(|| self)
    }

    fn ctx(self, key: &str, value: impl ToString) -> Outcome<T> {
        self.into_outcome().map_err(|err| err.with_context(key, value))
    }

    fn ctx_with<F, V>(self, key: &str, value: F) -> Outcome<T>
    where
        F: FnOnce() -> V,
        V: ToString,
    {
        self.into_outcome().map_err(|err| err.with_context(key, value()))
    }
}
