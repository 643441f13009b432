//! Convenience re-exports for common usage patterns.
//!
//! ```
//! use outcome_rail::prelude::*;
//! ```
//!
//! # What's Included
//!
//! - **Macros**: [`structured!`], [`ensure!`]
//! - **Types**: [`ErrorKind`], [`KindSet`], [`StructuredError`], [`Outcome`], [`RetryPolicy`]
//! - **Functions**: [`safe_call`], [`with_default`], [`with_retry`], [`with_scope`], [`classify`]
//! - **Traits**: [`ResultExt`]
//!
//! # Examples
//!
//! ## 30-Second Quick Start
//!
//! ```
//! use outcome_rail::prelude::*;
//!
//! fn load_config() -> Outcome<String> {
//!     std::fs::read_to_string("missing-config.toml").ctx("file", "missing-config.toml")
//! }
//!
//! assert_eq!(load_config().kind(), Some(ErrorKind::NotFound));
//! ```

// Macros
pub use crate::{ensure, structured};

// Core types
pub use crate::adapter::expected;
pub use crate::types::{ErrorKind, KindSet, Outcome, StructuredError};
pub use crate::{CancelToken, RetryPolicy};

// Functions
pub use crate::{classify, safe_call, with_default, with_retry, with_scope};

// Traits
pub use crate::traits::ResultExt;
