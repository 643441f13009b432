//! Shorthand for building [`StructuredError`](crate::StructuredError)s.
//!
//! # Examples
//!
//! ```
//! use outcome_rail::{structured, ErrorKind};
//!
//! let user = "ada";
//! let err = structured!(NotFound, "no account for {}", user; user = user, shard = 3);
//!
//! assert_eq!(err.kind(), ErrorKind::NotFound);
//! assert_eq!(err.message(), "no account for ada");
//! assert_eq!(err.context_value("shard"), Some("3"));
//! ```

/// Builds a [`StructuredError`](crate::StructuredError) from a kind name, a
/// format string and optional `key = value` context after a `;`.
///
/// # Syntax
///
/// - `structured!(Kind, "message")`
/// - `structured!(Kind, "format {}", args...)`
/// - `structured!(Kind, "format {}", args...; key = value, ...)`
///
/// # Examples
///
/// ```
/// use outcome_rail::{structured, ErrorKind};
///
/// let err = structured!(Timeout, "no reply after {}ms", 250; timeout_ms = 250);
/// assert!(err.is_retryable());
/// assert_eq!(err.context_value("timeout_ms"), Some("250"));
/// ```
#[macro_export]
macro_rules! structured {
    ($kind:ident, $fmt:literal $(, $arg:expr)* $(; $($key:ident = $value:expr),+ $(,)?)?) => {{
        let err = $crate::StructuredError::new($crate::ErrorKind::$kind, format!($fmt $(, $arg)*));
        $($(let err = err.with_context(stringify!($key), $value);)+)?
        err
    }};
}

/// Returns early with an `Err` outcome built by [`structured!`] unless the
/// condition holds.
///
/// ```
/// use outcome_rail::{ensure, ErrorKind, Outcome};
///
/// fn checked_age(age: i32) -> Outcome<i32> {
///     ensure!(age >= 0, OutOfRange, "age {} is negative", age; age = age);
///     Outcome::Ok(age)
/// }
///
/// assert_eq!(checked_age(-1).kind(), Some(ErrorKind::OutOfRange));
/// assert_eq!(checked_age(30), Outcome::Ok(30));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($rest:tt)+) => {
        if !$cond {
            return $crate::Outcome::Err($crate::structured!($($rest)+));
        }
    };
}
