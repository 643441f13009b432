//! Structured, inspectable failure records.
//!
//! A [`StructuredError`] carries:
//! - an [`ErrorKind`] tag from the closed taxonomy
//! - the human-readable message of the failure it was built from
//! - ordered key/value context with unique keys
//! - an optional owned cause, forming a chain
//! - a retryable flag, defaulted from the kind
//!
//! Values are assembled with consuming builder methods and are not modified
//! afterwards; propagating code wraps instead of editing.

use core::fmt;
use smallvec::SmallVec;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::error_formatter::ErrorFormatBuilder;
use crate::types::ErrorKind;

/// A single context entry.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContextEntry {
    pub key: String,
    pub value: String,
}

/// Inline storage for context entries; most errors carry at most a few.
pub type ContextEntries = SmallVec<[ContextEntry; 4]>;

/// Typed failure record: kind, message, context, cause and retry hint.
///
/// # Examples
///
/// ```
/// use outcome_rail::{ErrorKind, StructuredError};
///
/// let low = StructuredError::new(ErrorKind::NotFound, "config.toml missing")
///     .with_context("path", "config.toml");
/// let high = low.wrap(ErrorKind::Unknown, "failed to start");
///
/// assert_eq!(high.depth(), 2);
/// assert_eq!(high.root_cause().kind(), ErrorKind::NotFound);
/// assert_eq!(high.cause().unwrap().context_value("path"), Some("config.toml"));
/// ```
#[must_use]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredError {
    kind: ErrorKind,
    message: String,
    context: ContextEntries,
    cause: Option<Box<StructuredError>>,
    retryable: bool,
}

impl StructuredError {
    /// Creates an error with no context and no cause.
    ///
    /// `retryable` is taken from [`ErrorKind::is_retryable_by_default`].
    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: ContextEntries::new(),
            cause: None,
            retryable: kind.is_retryable_by_default(),
        }
    }

    /// Adds a context entry. An existing key keeps its position and takes the new value.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        let key = key.into();
        let value = value.to_string();
        match self.context.iter_mut().find(|entry| entry.key == key) {
            Some(entry) => entry.value = value,
            None => self.context.push(ContextEntry { key, value }),
        }
        self
    }

    /// Adds several context entries in order.
    pub fn with_contexts<I, K, V>(self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        entries.into_iter().fold(self, |err, (key, value)| err.with_context(key, value))
    }

    /// Overrides the retry hint, for callers with better domain knowledge.
    #[inline]
    pub fn set_retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }

    /// Sets the direct cause, replacing any previous one.
    #[inline]
    pub fn with_cause(mut self, cause: StructuredError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Wraps this error in a new one; `self` becomes the new error's cause.
    #[inline]
    pub fn wrap(self, kind: ErrorKind, message: impl Into<String>) -> StructuredError {
        StructuredError::new(kind, message).with_cause(self)
    }

    /// Splits off the direct cause, leaving this error as a single link.
    pub fn detach_cause(mut self) -> (Self, Option<StructuredError>) {
        let cause = self.cause.take().map(|cause| *cause);
        (self, cause)
    }

    /// Attaches `tail` after the deepest cause of this chain.
    pub fn append_cause(mut self, tail: StructuredError) -> Self {
        self.cause = Some(Box::new(match self.cause.take() {
            Some(cause) => cause.append_cause(tail),
            None => tail,
        }));
        self
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn is_retryable(&self) -> bool {
        self.retryable
    }

    /// Context entries in insertion order.
    #[inline]
    pub fn context(&self) -> &[ContextEntry] {
        &self.context
    }

    /// Looks up a context value by key.
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context.iter().find(|entry| entry.key == key).map(|entry| entry.value.as_str())
    }

    #[inline]
    pub fn cause(&self) -> Option<&StructuredError> {
        self.cause.as_deref()
    }

    /// Iterates this error followed by each of its causes.
    #[inline]
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    /// Number of errors in the chain, counting `self`.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.chain().count()
    }

    /// The deepest cause, or `self` when there is none.
    pub fn root_cause(&self) -> &StructuredError {
        let mut current = self;
        while let Some(cause) = current.cause() {
            current = cause;
        }
        current
    }

    /// Returns a builder for customizing how the chain is rendered.
    #[inline]
    pub fn fmt(&self) -> ErrorFormatBuilder<'_> {
        ErrorFormatBuilder::new(self)
    }

    /// Renders the whole chain on one line.
    #[must_use]
    pub fn error_chain(&self) -> String {
        self.fmt().to_string()
    }
}

/// Iterator returned by [`StructuredError::chain`].
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<&'a StructuredError>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a StructuredError;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.cause();
        Some(current)
    }
}

impl fmt::Display for StructuredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return fmt::Display::fmt(&self.fmt().cascaded(), f);
        }
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for StructuredError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause.as_deref().map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}
