//! Raw fallible primitives for the operations the adapters wrap.
//!
//! These return plain `Result`s with descriptive error types; pass them
//! through [`safe_call`](crate::safe_call) or an [`Adapter`](crate::Adapter)
//! to get an [`Outcome`](crate::Outcome).
//!
//! ```
//! use outcome_rail::access::{self, AccessError};
//!
//! let items = [1, 2, 3];
//! assert_eq!(access::index(&items, 1), Ok(&2));
//! assert_eq!(
//!     access::index(&items, 10),
//!     Err(AccessError::IndexOutOfRange { index: 10, length: 3 })
//! );
//! ```

use core::any::{type_name, Any};
use core::fmt::Display;
use core::hash::{BuildHasher, Hash};
use core::str::FromStr;
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::error::Error;
use std::fs::File;
use std::path::Path;

mod errors;

pub use errors::{AccessError, ArithmeticError, ArithmeticOp, ParseError, PathError, TimeoutError};

/// Element at `index`.
#[inline]
pub fn index<T>(items: &[T], index: usize) -> Result<&T, AccessError> {
    items.get(index).ok_or(AccessError::IndexOutOfRange { index, length: items.len() })
}

/// Keyed containers that [`key`] can look into.
pub trait Lookup<Q: ?Sized> {
    type Value;

    fn lookup(&self, key: &Q) -> Option<&Self::Value>;
}

impl<K, V, Q, S> Lookup<Q> for HashMap<K, V, S>
where
    K: Borrow<Q> + Hash + Eq,
    Q: Hash + Eq + ?Sized,
    S: BuildHasher,
{
    type Value = V;

    #[inline]
    fn lookup(&self, key: &Q) -> Option<&V> {
        self.get(key)
    }
}

impl<K, V, Q> Lookup<Q> for BTreeMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
{
    type Value = V;

    #[inline]
    fn lookup(&self, key: &Q) -> Option<&V> {
        self.get(key)
    }
}

/// Value stored under `key`.
pub fn key<'a, M, Q>(map: &'a M, key: &Q) -> Result<&'a M::Value, AccessError>
where
    M: Lookup<Q> + ?Sized,
    Q: Display + ?Sized,
{
    map.lookup(key).ok_or_else(|| AccessError::MissingKey { key: key.to_string() })
}

/// Downcasts a dynamically typed value.
pub fn downcast<T: Any>(value: &dyn Any) -> Result<&T, AccessError> {
    value
        .downcast_ref::<T>()
        .ok_or(AccessError::TypeMismatch { expected: type_name::<T>(), found: None })
}

/// Like [`downcast`], for a value whose concrete type is known here; a
/// mismatch names both types.
pub fn downcast_value<T: Any, U: Any>(value: &U) -> Result<&T, AccessError> {
    (value as &dyn Any).downcast_ref::<T>().ok_or(AccessError::TypeMismatch {
        expected: type_name::<T>(),
        found: Some(type_name::<U>()),
    })
}

/// Parses `input` after trimming surrounding whitespace.
pub fn parse_number<T>(input: &str) -> Result<T, ParseError>
where
    T: FromStr,
    T::Err: Error + Send + Sync + 'static,
{
    input.trim().parse::<T>().map_err(|err| ParseError::new(input, type_name::<T>(), err))
}

/// Division and remainder that report a zero divisor instead of panicking.
pub trait CheckedArith: Copy + Display {
    fn checked_divide(self, divisor: Self) -> Result<Self, ArithmeticError>;

    fn checked_remainder(self, divisor: Self) -> Result<Self, ArithmeticError>;
}

macro_rules! impl_checked_int {
    ($($t:ty),*) => {
        $(
            impl CheckedArith for $t {
                #[inline]
                fn checked_divide(self, divisor: Self) -> Result<Self, ArithmeticError> {
                    if divisor == 0 {
                        return Err(ArithmeticError::by_zero(ArithmeticOp::Divide, self));
                    }
                    self.checked_div(divisor)
                        .ok_or_else(|| ArithmeticError::overflow(ArithmeticOp::Divide, self, divisor))
                }

                #[inline]
                fn checked_remainder(self, divisor: Self) -> Result<Self, ArithmeticError> {
                    if divisor == 0 {
                        return Err(ArithmeticError::by_zero(ArithmeticOp::Remainder, self));
                    }
                    self.checked_rem(divisor)
                        .ok_or_else(|| ArithmeticError::overflow(ArithmeticOp::Remainder, self, divisor))
                }
            }
        )*
    };
}

impl_checked_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_checked_float {
    ($($t:ty),*) => {
        $(
            impl CheckedArith for $t {
                #[inline]
                fn checked_divide(self, divisor: Self) -> Result<Self, ArithmeticError> {
                    if divisor == 0.0 {
                        return Err(ArithmeticError::by_zero(ArithmeticOp::Divide, self));
                    }
                    Ok(self / divisor)
                }

                #[inline]
                fn checked_remainder(self, divisor: Self) -> Result<Self, ArithmeticError> {
                    if divisor == 0.0 {
                        return Err(ArithmeticError::by_zero(ArithmeticOp::Remainder, self));
                    }
                    Ok(self % divisor)
                }
            }
        )*
    };
}

impl_checked_float!(f32, f64);

#[inline]
pub fn divide<T: CheckedArith>(dividend: T, divisor: T) -> Result<T, ArithmeticError> {
    dividend.checked_divide(divisor)
}

#[inline]
pub fn remainder<T: CheckedArith>(dividend: T, divisor: T) -> Result<T, ArithmeticError> {
    dividend.checked_remainder(divisor)
}

/// Opens a file for reading.
pub fn open(path: impl AsRef<Path>) -> Result<File, PathError> {
    let path = path.as_ref();
    File::open(path).map_err(|err| PathError::new("open", path, err))
}

/// Reads a whole file into a string.
pub fn read_to_string(path: impl AsRef<Path>) -> Result<String, PathError> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|err| PathError::new("read", path, err))
}
