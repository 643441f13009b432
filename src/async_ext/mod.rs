//! Async retry drivers.
//!
//! # Feature Flag
//!
//! Requires the `async` feature; the Tokio helpers additionally need
//! `async-tokio`:
//!
//! ```toml
//! [dependencies]
//! outcome-rail = { version = "0.1", features = ["async-tokio"] }
//! ```

mod retry;
#[cfg(feature = "async-tokio")]
mod tokio_ext;

pub use retry::{retry_with_metadata, retry_with_policy};
#[cfg(feature = "async-tokio")]
pub use tokio_ext::{with_retry_tokio, with_timeout};
