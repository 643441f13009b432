//! The closed error taxonomy and kind sets.
//!
//! [`ErrorKind`] is the tag every classified failure carries. [`KindSet`] is a
//! small `Copy` bitset used wherever a group of kinds has to be named: the
//! expected kinds of an adapter or the retryable kinds of a retry policy.
//!
//! # Examples
//!
//! ```
//! use outcome_rail::{ErrorKind, KindSet};
//!
//! let expected = KindSet::of(&[ErrorKind::NotFound, ErrorKind::PermissionDenied]);
//! assert!(expected.contains(ErrorKind::NotFound));
//! assert!(!expected.contains(ErrorKind::Timeout));
//! assert!(ErrorKind::Timeout.is_retryable_by_default());
//! ```

use core::fmt;
use core::str::FromStr;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Category of a classified failure.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorKind {
    /// A key, file or other named item does not exist.
    NotFound,
    /// An index or numeric value falls outside the accepted range.
    OutOfRange,
    /// A value had a different type than the one requested.
    TypeMismatch,
    /// Input could not be parsed or decoded.
    InvalidFormat,
    /// The caller is not allowed to perform the operation.
    PermissionDenied,
    /// A resource is busy, disconnected or temporarily unreachable.
    ResourceUnavailable,
    /// A deadline elapsed.
    Timeout,
    /// The operation was cancelled by the caller.
    Cancelled,
    /// Division or remainder by zero.
    ArithmeticDomain,
    /// No classification rule matched.
    Unknown,
}

impl ErrorKind {
    /// Every kind, in declaration order.
    pub const ALL: [ErrorKind; 10] = [
        ErrorKind::NotFound,
        ErrorKind::OutOfRange,
        ErrorKind::TypeMismatch,
        ErrorKind::InvalidFormat,
        ErrorKind::PermissionDenied,
        ErrorKind::ResourceUnavailable,
        ErrorKind::Timeout,
        ErrorKind::Cancelled,
        ErrorKind::ArithmeticDomain,
        ErrorKind::Unknown,
    ];

    /// Stable snake_case tag, suitable for logs and metrics labels.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::OutOfRange => "out_of_range",
            Self::TypeMismatch => "type_mismatch",
            Self::InvalidFormat => "invalid_format",
            Self::PermissionDenied => "permission_denied",
            Self::ResourceUnavailable => "resource_unavailable",
            Self::Timeout => "timeout",
            Self::Cancelled => "cancelled",
            Self::ArithmeticDomain => "arithmetic_domain",
            Self::Unknown => "unknown",
        }
    }

    /// Whether failures of this kind are worth retrying when nothing better is known.
    ///
    /// Only [`ErrorKind::Timeout`] and [`ErrorKind::ResourceUnavailable`] are
    /// transient by default.
    #[inline]
    pub const fn is_retryable_by_default(self) -> bool {
        matches!(self, Self::Timeout | Self::ResourceUnavailable)
    }

    #[inline]
    const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by [`ErrorKind::from_str`] for an unrecognised tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKindTag(pub String);

impl fmt::Display for UnknownKindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown error kind tag '{}'", self.0)
    }
}

impl std::error::Error for UnknownKindTag {}

impl FromStr for ErrorKind {
    type Err = UnknownKindTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKindTag(s.to_string()))
    }
}

/// A set of [`ErrorKind`]s.
///
/// All constructors are `const`, so presets can live in constants.
#[must_use]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "Vec<ErrorKind>", from = "Vec<ErrorKind>"))]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KindSet {
    bits: u16,
}

impl KindSet {
    /// The empty set.
    #[inline]
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// The set containing every kind.
    #[inline]
    pub const fn all() -> Self {
        Self::of(&ErrorKind::ALL)
    }

    /// Builds a set from a slice of kinds.
    #[inline]
    pub const fn of(kinds: &[ErrorKind]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < kinds.len() {
            bits |= kinds[i].bit();
            i += 1;
        }
        Self { bits }
    }

    /// Returns a copy of the set with `kind` added.
    #[inline]
    pub const fn with(self, kind: ErrorKind) -> Self {
        Self { bits: self.bits | kind.bit() }
    }

    /// Returns a copy of the set with `kind` removed.
    #[inline]
    pub const fn without(self, kind: ErrorKind) -> Self {
        Self { bits: self.bits & !kind.bit() }
    }

    /// Returns the union of both sets.
    #[inline]
    pub const fn union(self, other: KindSet) -> Self {
        Self { bits: self.bits | other.bits }
    }

    #[must_use]
    #[inline]
    pub const fn contains(self, kind: ErrorKind) -> bool {
        self.bits & kind.bit() != 0
    }

    #[must_use]
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    #[must_use]
    #[inline]
    pub const fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Iterates the members in declaration order.
    pub fn iter(self) -> impl Iterator<Item = ErrorKind> {
        ErrorKind::ALL.into_iter().filter(move |kind| self.contains(*kind))
    }
}

impl fmt::Debug for KindSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<ErrorKind> for KindSet {
    fn from_iter<I: IntoIterator<Item = ErrorKind>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), KindSet::with)
    }
}

impl From<ErrorKind> for KindSet {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self::empty().with(kind)
    }
}

impl From<Vec<ErrorKind>> for KindSet {
    fn from(kinds: Vec<ErrorKind>) -> Self {
        kinds.into_iter().collect()
    }
}

impl From<KindSet> for Vec<ErrorKind> {
    fn from(set: KindSet) -> Self {
        set.iter().collect()
    }
}
