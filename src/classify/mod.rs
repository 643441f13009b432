//! Classification of raw failures into [`StructuredError`]s.
//!
//! A [`Classifier`] is a priority-ordered table of rules. For each link of a
//! failure's `source()` chain, outermost first, the rules are tried in order
//! and the first match wins. A failure no rule recognises becomes
//! [`ErrorKind::Unknown`] with its original message.
//!
//! # Examples
//!
//! ```
//! use outcome_rail::{classify, ErrorKind};
//!
//! let err = "abc".parse::<i32>().unwrap_err();
//! let classified = classify(&err);
//!
//! assert_eq!(classified.kind(), ErrorKind::InvalidFormat);
//! assert!(!classified.is_retryable());
//! ```
//!
//! Custom error types join the table with a typed rule:
//!
//! ```
//! use outcome_rail::{Classifier, ErrorKind, StructuredError};
//!
//! #[derive(Debug)]
//! struct RateLimited;
//!
//! impl std::fmt::Display for RateLimited {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         f.write_str("rate limited")
//!     }
//! }
//!
//! impl std::error::Error for RateLimited {}
//!
//! let classifier = Classifier::default().with_rule(|err: &RateLimited| {
//!     StructuredError::new(ErrorKind::ResourceUnavailable, err.to_string())
//! });
//!
//! assert_eq!(classifier.classify(&RateLimited).kind(), ErrorKind::ResourceUnavailable);
//! ```

use core::any::type_name;
use core::fmt;
use std::error::Error;
use std::sync::OnceLock;

use crate::types::{ErrorKind, StructuredError};

mod rules;

pub use rules::kind_of_io;

type RuleFn = dyn Fn(&(dyn Error + 'static)) -> Option<StructuredError> + Send + Sync;

/// One entry of the classification table.
pub struct Rule {
    name: &'static str,
    apply: Box<RuleFn>,
}

impl Rule {
    /// A rule that matches when the failure downcasts to `E`.
    pub fn typed<E, F>(f: F) -> Self
    where
        E: Error + 'static,
        F: Fn(&E) -> StructuredError + Send + Sync + 'static,
    {
        Self {
            name: type_name::<E>(),
            apply: Box::new(move |err: &(dyn Error + 'static)| err.downcast_ref::<E>().map(&f)),
        }
    }

    /// A rule driven by an arbitrary predicate over the failure.
    pub fn predicate<F>(name: &'static str, f: F) -> Self
    where
        F: Fn(&(dyn Error + 'static)) -> Option<StructuredError> + Send + Sync + 'static,
    {
        Self { name, apply: Box::new(f) }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Rule").field(&self.name).finish()
    }
}

/// Priority-ordered classification table.
#[derive(Debug)]
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Default for Classifier {
    /// The built-in rules for this crate's access errors and common std errors.
    fn default() -> Self {
        Self { rules: rules::builtin() }
    }
}

impl Classifier {
    /// A classifier with no rules; everything becomes [`ErrorKind::Unknown`].
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// The shared classifier holding the built-in rules.
    pub fn global() -> &'static Classifier {
        static GLOBAL: OnceLock<Classifier> = OnceLock::new();
        GLOBAL.get_or_init(Classifier::default)
    }

    /// Appends a typed rule after the existing ones.
    pub fn with_rule<E, F>(mut self, f: F) -> Self
    where
        E: Error + 'static,
        F: Fn(&E) -> StructuredError + Send + Sync + 'static,
    {
        self.rules.push(Rule::typed(f));
        self
    }

    /// Inserts a typed rule ahead of every existing one.
    pub fn with_priority_rule<E, F>(mut self, f: F) -> Self
    where
        E: Error + 'static,
        F: Fn(&E) -> StructuredError + Send + Sync + 'static,
    {
        self.rules.insert(0, Rule::typed(f));
        self
    }

    /// Appends a prepared rule.
    pub fn push_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Names of the rules, in priority order.
    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(Rule::name)
    }

    /// Classifies a failure. Total and deterministic.
    pub fn classify(&self, error: &(dyn Error + 'static)) -> StructuredError {
        let mut link = Some(error);
        let mut depth = 0usize;

        while let Some(current) = link {
            if let Some(found) = self.rules.iter().find_map(|rule| (rule.apply)(current)) {
                return if depth == 0 { found } else { reframe(found, error) };
            }
            link = current.source();
            depth += 1;
        }

        StructuredError::new(ErrorKind::Unknown, error.to_string())
    }

    /// Classifies a failure and overrides its retry hint.
    pub fn classify_with_retryable(
        &self,
        error: &(dyn Error + 'static),
        retryable: bool,
    ) -> StructuredError {
        self.classify(error).set_retryable(retryable)
    }
}

/// Re-labels a match found below the outermost link with the outer message.
fn reframe(found: StructuredError, outer: &(dyn Error + 'static)) -> StructuredError {
    let mut err = StructuredError::new(found.kind(), outer.to_string())
        .with_contexts(found.context().iter().map(|entry| (entry.key.clone(), &entry.value)))
        .with_context("source", found.message())
        .set_retryable(found.is_retryable());
    if let Some(cause) = found.cause() {
        err = err.with_cause(cause.clone());
    }
    err
}

/// Classifies with the shared default classifier.
#[inline]
pub fn classify(error: &(dyn Error + 'static)) -> StructuredError {
    Classifier::global().classify(error)
}
