//! Scoped resources with guaranteed release.
//!
//! [`ScopeGuard`] owns a resource together with its release action and runs
//! that action exactly once: on an explicit [`release`](ScopeGuard::release),
//! or on drop, which covers early returns and panics unwinding through the
//! scope. [`with_scope`] builds the acquire / use / release flow on top.
//!
//! ```
//! use std::cell::Cell;
//! use outcome_rail::{with_scope, ErrorKind, StructuredError};
//!
//! let released = Cell::new(0);
//! let outcome = with_scope(
//!     || Ok::<_, StructuredError>(vec![1, 2, 3]),
//!     |items| Err::<usize, _>(StructuredError::new(ErrorKind::InvalidFormat, "bad row")),
//!     |_items| {
//!         released.set(released.get() + 1);
//!         Ok::<_, StructuredError>(())
//!     },
//! );
//!
//! assert_eq!(outcome.kind(), Some(ErrorKind::InvalidFormat));
//! assert_eq!(released.get(), 1);
//! ```

use core::fmt;
use core::marker::PhantomData;
use std::error::Error;

use crate::classify::classify;
use crate::log;
use crate::types::{Outcome, StructuredError};

/// A resource paired with the action that releases it.
pub struct ScopeGuard<R, E, F>
where
    F: FnOnce(R) -> Result<(), E>,
    E: Error + 'static,
{
    armed: Option<(R, F)>,
    _release_error: PhantomData<fn() -> E>,
}

impl<R, E, F> ScopeGuard<R, E, F>
where
    F: FnOnce(R) -> Result<(), E>,
    E: Error + 'static,
{
    pub fn new(resource: R, release: F) -> Self {
        Self { armed: Some((resource, release)), _release_error: PhantomData }
    }

    /// The guarded resource.
    ///
    /// # Panics
    ///
    /// Panics if the resource was already released.
    #[track_caller]
    pub fn get(&self) -> &R {
        match &self.armed {
            Some((resource, _)) => resource,
            None => panic!("scoped resource used after release"),
        }
    }

    /// The guarded resource, mutably.
    ///
    /// # Panics
    ///
    /// Panics if the resource was already released.
    #[track_caller]
    pub fn get_mut(&mut self) -> &mut R {
        match &mut self.armed {
            Some((resource, _)) => resource,
            None => panic!("scoped resource used after release"),
        }
    }

    #[inline]
    pub fn is_released(&self) -> bool {
        self.armed.is_none()
    }

    /// Runs the release action now. Later calls, and the drop, do nothing.
    pub fn release(&mut self) -> Result<(), StructuredError> {
        match self.armed.take() {
            Some((resource, release)) => release(resource).map_err(|err| classify(&err)),
            None => Ok(()),
        }
    }
}

impl<R, E, F> Drop for ScopeGuard<R, E, F>
where
    F: FnOnce(R) -> Result<(), E>,
    E: Error + 'static,
{
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            log::release_failed(&err, std::thread::panicking());
        }
    }
}

impl<R, E, F> fmt::Debug for ScopeGuard<R, E, F>
where
    R: fmt::Debug,
    F: FnOnce(R) -> Result<(), E>,
    E: Error + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeGuard")
            .field("resource", &self.armed.as_ref().map(|(resource, _)| resource))
            .finish()
    }
}

/// Acquires a resource, uses it, and releases it exactly once.
///
/// - acquire fails: its classified error, with `phase=acquire`; nothing to release.
/// - body fails: its classified error. A release failure on top of it is
///   recorded as `release_error` / `release_kind` context.
/// - only release fails: its classified error, with `phase=release`.
/// - body panics: the resource is released while unwinding, then the panic
///   continues.
pub fn with_scope<R, T, A, EA, U, EU, F, ER>(acquire: A, use_body: U, release: F) -> Outcome<T>
where
    A: FnOnce() -> Result<R, EA>,
    EA: Error + 'static,
    U: FnOnce(&mut R) -> Result<T, EU>,
    EU: Error + 'static,
    F: FnOnce(R) -> Result<(), ER>,
    ER: Error + 'static,
{
    let resource = match acquire() {
        Ok(resource) => resource,
        Err(err) => return Outcome::Err(classify(&err).with_context("phase", "acquire")),
    };

    let mut guard = ScopeGuard::new(resource, release);
    let body = use_body(guard.get_mut());
    let released = guard.release();

    match (body, released) {
        (Ok(value), Ok(())) => Outcome::Ok(value),
        (Ok(_), Err(release_err)) => Outcome::Err(release_err.with_context("phase", "release")),
        (Err(err), Ok(())) => Outcome::Err(classify(&err)),
        (Err(err), Err(release_err)) => Outcome::Err(
            classify(&err)
                .with_context("release_error", release_err.message())
                .with_context("release_kind", release_err.kind()),
        ),
    }
}
