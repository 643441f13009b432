//! Failure types produced by the raw access primitives.
//!
//! Each type exposes the structured fields the classifier copies into
//! context, so nothing has to be parsed back out of a message.

use core::fmt;
use core::time::Duration;
use std::error::Error;
use std::io;
use std::path::PathBuf;

/// Indexed, keyed or typed access went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    IndexOutOfRange { index: usize, length: usize },
    MissingKey { key: String },
    /// `found` is `None` when the value was only known as `dyn Any`.
    TypeMismatch { expected: &'static str, found: Option<&'static str> },
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, length } => {
                write!(f, "index {index} out of range for length {length}")
            },
            Self::MissingKey { key } => write!(f, "key '{key}' not found"),
            Self::TypeMismatch { expected, found: Some(found) } => {
                write!(f, "value of type {found} is not of type {expected}")
            },
            Self::TypeMismatch { expected, found: None } => {
                write!(f, "value is not of type {expected}")
            },
        }
    }
}

impl Error for AccessError {}

/// A string could not be parsed into the requested type.
#[derive(Debug)]
pub struct ParseError {
    pub input: String,
    pub target_type: &'static str,
    source: Box<dyn Error + Send + Sync>,
}

impl ParseError {
    pub fn new<E>(input: impl Into<String>, target_type: &'static str, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self { input: input.into(), target_type, source: Box::new(source) }
    }

    /// Description of why parsing failed, taken from the underlying error.
    pub fn reason(&self) -> String {
        self.source.to_string()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {} literal '{}': {}", self.target_type, self.input, self.source)
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&*self.source)
    }
}

/// The arithmetic operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    Divide,
    Remainder,
}

impl ArithmeticOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Divide => "divide",
            Self::Remainder => "remainder",
        }
    }
}

/// Division or remainder without a defined result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArithmeticError {
    ByZero { op: ArithmeticOp, dividend: String },
    Overflow { op: ArithmeticOp, dividend: String, divisor: String },
}

impl ArithmeticError {
    pub fn by_zero(op: ArithmeticOp, dividend: impl fmt::Display) -> Self {
        Self::ByZero { op, dividend: dividend.to_string() }
    }

    pub fn overflow(op: ArithmeticOp, dividend: impl fmt::Display, divisor: impl fmt::Display) -> Self {
        Self::Overflow { op, dividend: dividend.to_string(), divisor: divisor.to_string() }
    }

    pub fn op(&self) -> ArithmeticOp {
        match self {
            Self::ByZero { op, .. } | Self::Overflow { op, .. } => *op,
        }
    }
}

impl fmt::Display for ArithmeticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByZero { op: ArithmeticOp::Divide, dividend } => {
                write!(f, "division by zero ({dividend} / 0)")
            },
            Self::ByZero { op: ArithmeticOp::Remainder, dividend } => {
                write!(f, "modulo by zero ({dividend} % 0)")
            },
            Self::Overflow { op, dividend, divisor } => {
                write!(f, "{} overflow ({dividend}, {divisor})", op.as_str())
            },
        }
    }
}

impl Error for ArithmeticError {}

/// A filesystem operation on a known path failed.
#[derive(Debug)]
pub struct PathError {
    pub operation: &'static str,
    pub path: PathBuf,
    source: io::Error,
}

impl PathError {
    pub fn new(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self { operation, path: path.into(), source }
    }

    pub fn io_error(&self) -> &io::Error {
        &self.source
    }
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to {} '{}': {}", self.operation, self.path.display(), self.source)
    }
}

impl Error for PathError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Error type representing a timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutError(pub Duration);

impl fmt::Display for TimeoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "operation timed out after {:?}", self.0)
    }
}

impl Error for TimeoutError {}
