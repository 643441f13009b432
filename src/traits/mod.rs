//! Extension traits.
//!
//! - [`ResultExt`]: classification and context shortcuts on `Result`

pub mod result_ext;

pub use result_ext::ResultExt;
