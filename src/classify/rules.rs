//! Built-in classification rules, in priority order.

use std::io;
use std::num::{ParseFloatError, ParseIntError, TryFromIntError};
use std::str::{ParseBoolError, Utf8Error};
use std::string::FromUtf8Error;

use super::Rule;
use crate::access::{AccessError, ArithmeticError, ParseError, PathError, TimeoutError};
use crate::types::{ErrorKind, StructuredError};

pub(super) fn builtin() -> Vec<Rule> {
    #[allow(unused_mut)]
    let mut rules = vec![
        Rule::typed(|err: &StructuredError| err.clone()),
        Rule::typed(access_error),
        Rule::typed(parse_error),
        Rule::typed(arithmetic_error),
        Rule::typed(path_error),
        Rule::typed(timeout_error),
        Rule::typed(io_error),
        Rule::typed(|err: &ParseIntError| {
            invalid_format(err).with_context("reason", format!("{:?}", err.kind()))
        }),
        Rule::typed(|err: &ParseFloatError| invalid_format(err)),
        Rule::typed(|err: &ParseBoolError| invalid_format(err)),
        Rule::typed(|err: &std::char::ParseCharError| invalid_format(err)),
        Rule::typed(|err: &TryFromIntError| StructuredError::new(ErrorKind::OutOfRange, err.to_string())),
        Rule::typed(|err: &Utf8Error| {
            invalid_format(err).with_context("valid_up_to", err.valid_up_to())
        }),
        Rule::typed(|err: &FromUtf8Error| {
            invalid_format(err).with_context("valid_up_to", err.utf8_error().valid_up_to())
        }),
    ];

    #[cfg(feature = "async-tokio")]
    rules.push(Rule::typed(|err: &tokio::time::error::Elapsed| {
        StructuredError::new(ErrorKind::Timeout, err.to_string())
    }));

    rules
}

fn invalid_format(err: &dyn std::error::Error) -> StructuredError {
    StructuredError::new(ErrorKind::InvalidFormat, err.to_string())
}

fn access_error(err: &AccessError) -> StructuredError {
    match err {
        AccessError::IndexOutOfRange { index, length } => {
            StructuredError::new(ErrorKind::OutOfRange, err.to_string())
                .with_context("index", index)
                .with_context("length", length)
        },
        AccessError::MissingKey { key } => {
            StructuredError::new(ErrorKind::NotFound, err.to_string()).with_context("key", key)
        },
        AccessError::TypeMismatch { expected, found } => {
            let err = StructuredError::new(ErrorKind::TypeMismatch, err.to_string())
                .with_context("expected_type", expected);
            match found {
                Some(found) => err.with_context("found_type", found),
                None => err,
            }
        },
    }
}

fn parse_error(err: &ParseError) -> StructuredError {
    StructuredError::new(ErrorKind::InvalidFormat, err.to_string())
        .with_context("input", &err.input)
        .with_context("target_type", err.target_type)
        .with_context("reason", err.reason())
}

fn arithmetic_error(err: &ArithmeticError) -> StructuredError {
    let base = StructuredError::new(
        match err {
            ArithmeticError::ByZero { .. } => ErrorKind::ArithmeticDomain,
            ArithmeticError::Overflow { .. } => ErrorKind::OutOfRange,
        },
        err.to_string(),
    )
    .with_context("operation", err.op().as_str());

    match err {
        ArithmeticError::ByZero { dividend, .. } => {
            base.with_context("dividend", dividend).with_context("divisor", 0)
        },
        ArithmeticError::Overflow { dividend, divisor, .. } => {
            base.with_context("dividend", dividend).with_context("divisor", divisor)
        },
    }
}

fn path_error(err: &PathError) -> StructuredError {
    let io_err = err.io_error();
    StructuredError::new(kind_of_io(io_err.kind()), err.to_string())
        .with_context("path", err.path.display())
        .with_context("operation", err.operation)
        .with_context("io_kind", format!("{:?}", io_err.kind()))
}

fn timeout_error(err: &TimeoutError) -> StructuredError {
    StructuredError::new(ErrorKind::Timeout, err.to_string())
        .with_context("timeout_ms", err.0.as_millis())
}

fn io_error(err: &io::Error) -> StructuredError {
    StructuredError::new(kind_of_io(err.kind()), err.to_string())
        .with_context("io_kind", format!("{:?}", err.kind()))
}

/// Maps an I/O error kind onto the taxonomy.
pub fn kind_of_io(kind: io::ErrorKind) -> ErrorKind {
    use io::ErrorKind as Io;

    match kind {
        Io::NotFound => ErrorKind::NotFound,
        Io::PermissionDenied => ErrorKind::PermissionDenied,
        Io::TimedOut => ErrorKind::Timeout,
        Io::WouldBlock
        | Io::Interrupted
        | Io::ConnectionRefused
        | Io::ConnectionReset
        | Io::ConnectionAborted
        | Io::NotConnected
        | Io::AddrInUse
        | Io::AddrNotAvailable
        | Io::BrokenPipe => ErrorKind::ResourceUnavailable,
        Io::InvalidData | Io::InvalidInput | Io::UnexpectedEof => ErrorKind::InvalidFormat,
        _ => ErrorKind::Unknown,
    }
}
