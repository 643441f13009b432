//! Error taxonomy, structured errors and outcomes.
//!
//! # Examples
//!
//! ```
//! use outcome_rail::{ErrorKind, Outcome, StructuredError};
//!
//! let outcome: Outcome<u32> = Outcome::Err(
//!     StructuredError::new(ErrorKind::OutOfRange, "index 10 out of range for length 3")
//!         .with_context("index", 10)
//!         .with_context("length", 3),
//! );
//!
//! assert_eq!(outcome.kind(), Some(ErrorKind::OutOfRange));
//! assert_eq!(outcome.unwrap_or(0), 0);
//! ```

pub mod error_formatter;
pub mod error_kind;
pub mod outcome;
pub mod structured_error;

pub use error_formatter::{ErrorFormatBuilder, ErrorFormatConfig};
pub use error_kind::{ErrorKind, KindSet, UnknownKindTag};
pub use outcome::Outcome;
pub use structured_error::{Chain, ContextEntries, ContextEntry, StructuredError};
