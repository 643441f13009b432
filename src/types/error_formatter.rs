//! Cause-chain formatting utilities.
//!
//! The core only defines the shape of a [`StructuredError`]; this module
//! offers a few renderings for logs and terminals.
//!
//! ```
//! use outcome_rail::{ErrorKind, StructuredError};
//!
//! let err = StructuredError::new(ErrorKind::NotFound, "no such file")
//!     .with_context("path", "a.txt")
//!     .wrap(ErrorKind::Unknown, "loading settings");
//!
//! assert_eq!(
//!     err.error_chain(),
//!     "[unknown] loading settings -> [not_found] no such file {path=a.txt}"
//! );
//! ```

use core::fmt::{self, Display, Write};

use crate::types::StructuredError;

/// Configuration-based chain formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorFormatConfig {
    pub separator: String,
    pub item_prefix: Option<String>,
    pub root_prefix: Option<String>,
    pub indent: String,
    pub show_kind: bool,
    pub show_context: bool,
    pub cascade: bool,
}

impl Default for ErrorFormatConfig {
    fn default() -> Self {
        Self {
            separator: " -> ".into(),
            item_prefix: None,
            root_prefix: None,
            indent: "  ".into(),
            show_kind: true,
            show_context: true,
            cascade: false,
        }
    }
}

impl ErrorFormatConfig {
    /// Tree-like multiline output.
    #[inline]
    pub fn pretty() -> Self {
        Self {
            separator: "\n".into(),
            item_prefix: Some("├─ ".into()),
            root_prefix: Some("└─ ".into()),
            ..Default::default()
        }
    }

    /// One error per line, each cause indented one level deeper.
    #[inline]
    pub fn cascaded() -> Self {
        Self { separator: "\n".into(), cascade: true, ..Default::default() }
    }

    /// Messages only.
    #[inline]
    pub fn compact() -> Self {
        Self { separator: " | ".into(), show_kind: false, show_context: false, ..Default::default() }
    }

    fn write_item(&self, out: &mut String, err: &StructuredError) -> fmt::Result {
        if self.show_kind {
            write!(out, "[{}] ", err.kind())?;
        }
        out.push_str(err.message());
        if self.show_context && !err.context().is_empty() {
            out.push_str(" {");
            for (i, entry) in err.context().iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write!(out, "{}={}", entry.key, entry.value)?;
            }
            out.push('}');
        }
        Ok(())
    }

    /// Renders `error` and its causes, outermost first.
    pub fn format_chain(&self, error: &StructuredError) -> String {
        let mut out = String::with_capacity(64);
        let depth = error.depth();
        for (i, err) in error.chain().enumerate() {
            if i > 0 {
                out.push_str(&self.separator);
                if self.cascade {
                    for _ in 0..i {
                        out.push_str(&self.indent);
                    }
                    out.push_str("caused by: ");
                }
            }
            let prefix = if i + 1 == depth && i > 0 {
                self.root_prefix.as_ref().or(self.item_prefix.as_ref())
            } else {
                self.item_prefix.as_ref()
            };
            if let Some(prefix) = prefix {
                out.push_str(prefix);
            }
            // Writing into a String cannot fail.
            let _ = self.write_item(&mut out, err);
        }
        out
    }
}

/// Builder for customizing error display output.
pub struct ErrorFormatBuilder<'a> {
    pub(crate) error: &'a StructuredError,
    pub(crate) config: ErrorFormatConfig,
}

impl<'a> ErrorFormatBuilder<'a> {
    pub fn new(error: &'a StructuredError) -> Self {
        Self { error, config: ErrorFormatConfig::default() }
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.config.separator = separator.into();
        self
    }

    pub fn show_kind(mut self, show: bool) -> Self {
        self.config.show_kind = show;
        self
    }

    pub fn show_context(mut self, show: bool) -> Self {
        self.config.show_context = show;
        self
    }

    pub fn pretty(mut self) -> Self {
        self.config = ErrorFormatConfig::pretty();
        self
    }

    pub fn compact(mut self) -> Self {
        self.config = ErrorFormatConfig::compact();
        self
    }

    pub fn cascaded(mut self) -> Self {
        self.config = ErrorFormatConfig::cascaded();
        self
    }

    pub fn with_config(mut self, config: ErrorFormatConfig) -> Self {
        self.config = config;
        self
    }
}

impl Display for ErrorFormatBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.config.format_chain(self.error))
    }
}
