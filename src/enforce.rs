//! Precondition enforcement.
//!
//! An enforcement checks a value against a [`Predicate`] and yields a
//! `Result`: `Ok` with the value when the predicate holds, otherwise an
//! [`Error`] located at the enforcement site. The failure message defaults to
//! `Enforcement failed: <expression> - <predicate description>` and can be
//! replaced by a message built from renderable values, which is only built on
//! failure.
//!
//! The macros are the usual entry points:
//!
//! | Macro                              | Predicate      | Yields on success |
//! |------------------------------------|----------------|-------------------|
//! | `enforce!(value)`                  | [`Truth`]      | `value`           |
//! | `enforce_eq!(a, b)` / `enforce_ne!`| [`EqualTo`] / [`NotEqualTo`] | `()` |
//! | `enforce_lt!` `enforce_gt!` `enforce_le!` `enforce_ge!` | ordering | `()` |
//! | `enforce_in_range!(v, lo, hi)`     | [`InRange`] (inclusive) | `()`     |
//! | `enforce_not_null!(ptr)`           | [`Truth`]      | `ptr`             |
//! | `enforce_valid_index!(i, len)`     | [`IndexIn`]    | `i`               |
//!
//! Each accepts trailing message arguments, and `enforce!` also accepts a
//! leading `kind = ErrorKind::...;` to choose the error kind.
//!
//! ## Examples
//!
//! ```rust
//! use failsafe::{enforce, enforce_eq, enforce_in_range, hex};
//!
//! fn scale(factor: i32) -> failsafe::Result<i32> {
//!     enforce_in_range!(factor, 1, 10)?;
//!     let doubled = factor * 2;
//!     enforce!(doubled < 16, "Value", hex(doubled), "exceeds limit")?;
//!     Ok(doubled)
//! }
//!
//! assert_eq!(scale(3).unwrap(), 6);
//! assert_eq!(
//!     scale(0).unwrap_err().message(),
//!     "Enforcement failed: factor in [1, 10] - Value must be in range"
//! );
//! assert_eq!(scale(9).unwrap_err().message(), "Value 0x12 exceeds limit");
//!
//! let x = 5;
//! let err = enforce_eq!(x, 6, "x should be 6 but is", x).unwrap_err();
//! assert_eq!(err.message(), "x should be 6 but is 5");
//! ```

use crate::error::{Error, ErrorKind, Location, Result};
use std::ptr::NonNull;

/// A check applied to an enforced value.
pub trait Predicate<T: ?Sized> {
    fn check(&self, value: &T) -> bool;

    /// Explanation used in the default failure message.
    fn description(&self) -> &'static str;
}

/// Values with a notion of truth: `true`, `Some`, `Ok`, non-null pointers.
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

impl<T> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.is_some()
    }
}

impl<T, E> Truthy for std::result::Result<T, E> {
    fn is_truthy(&self) -> bool {
        self.is_ok()
    }
}

impl<T: ?Sized> Truthy for *const T {
    fn is_truthy(&self) -> bool {
        !self.is_null()
    }
}

impl<T: ?Sized> Truthy for *mut T {
    fn is_truthy(&self) -> bool {
        !self.is_null()
    }
}

impl<T: ?Sized> Truthy for NonNull<T> {
    fn is_truthy(&self) -> bool {
        true
    }
}

impl<T: Truthy + ?Sized> Truthy for &T {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

/// The value itself must be truthy.
#[derive(Clone, Copy, Debug, Default)]
pub struct Truth;

impl<T: Truthy + ?Sized> Predicate<T> for Truth {
    fn check(&self, value: &T) -> bool {
        value.is_truthy()
    }

    fn description(&self) -> &'static str {
        "Expression must be true"
    }
}

macro_rules! comparison_predicates {
    ($($(#[$meta:meta])* $name:ident: $bound:ident, |$value:ident, $other:ident| $check:expr, $description:literal;)+) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug)]
            pub struct $name<U>(pub U);

            impl<T: $bound<U> + ?Sized, U> Predicate<T> for $name<U> {
                fn check(&self, $value: &T) -> bool {
                    let $other = &self.0;
                    $check
                }

                fn description(&self) -> &'static str {
                    $description
                }
            }
        )+
    };
}

comparison_predicates! {
    /// The value must equal the wrapped one.
    EqualTo: PartialEq, |value, expected| value == expected, "Values must be equal";
    NotEqualTo: PartialEq, |value, expected| value != expected, "Values must not be equal";
    /// The value must be strictly below the bound.
    LessThan: PartialOrd, |value, bound| value < bound, "Value must be less than bound";
    GreaterThan: PartialOrd, |value, bound| value > bound, "Value must be greater than bound";
    LessEqual: PartialOrd, |value, bound| value <= bound, "Value must not exceed bound";
    GreaterEqual: PartialOrd, |value, bound| value >= bound, "Value must not be below bound";
}

/// The value must lie in `[lower, upper]`, both ends inclusive.
#[derive(Clone, Copy, Debug)]
pub struct InRange<U> {
    pub lower: U,
    pub upper: U,
}

impl<T: PartialOrd<U> + ?Sized, U> Predicate<T> for InRange<U> {
    fn check(&self, value: &T) -> bool {
        value >= &self.lower && value <= &self.upper
    }

    fn description(&self) -> &'static str {
        "Value must be in range"
    }
}

/// The value must be a valid index into a container of `size` elements.
///
/// Negative and oversized indices are rejected rather than wrapped.
#[derive(Clone, Copy, Debug)]
pub struct IndexIn {
    pub size: usize,
}

impl<T: Copy + TryInto<usize>> Predicate<T> for IndexIn {
    fn check(&self, value: &T) -> bool {
        (*value).try_into().map_or(false, |index| index < self.size)
    }

    fn description(&self) -> &'static str {
        "Index must be within bounds"
    }
}

/// The outcome of checking a value, not yet turned into a `Result`.
///
/// # Examples
///
/// ```rust
/// use failsafe::enforce::{Enforcement, GreaterThan};
/// use failsafe::ErrorKind;
///
/// let check = Enforcement::new(3, &GreaterThan(5), "count > 5").with_kind(ErrorKind::Length);
/// assert!(!check.passed());
/// assert_eq!(*check.value(), 3);
///
/// let err = check.into_result().unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::Length);
/// assert_eq!(err.message(), "Enforcement failed: count > 5 - Value must be greater than bound");
/// ```
#[derive(Debug)]
#[must_use = "an enforcement does nothing until turned into a Result"]
pub struct Enforcement<T> {
    value: T,
    passed: bool,
    expression: &'static str,
    description: &'static str,
    kind: ErrorKind,
    location: Location,
}

impl<T> Enforcement<T> {
    /// Checks `value` with `predicate`, recording the caller's location.
    #[track_caller]
    pub fn new<P>(value: T, predicate: &P, expression: &'static str) -> Self
    where
        P: Predicate<T> + ?Sized,
    {
        Enforcement {
            passed: predicate.check(&value),
            value,
            expression,
            description: predicate.description(),
            kind: ErrorKind::default(),
            location: Location::caller(),
        }
    }

    pub fn with_kind(mut self, kind: ErrorKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.passed
    }

    #[must_use]
    pub fn value(&self) -> &T {
        &self.value
    }

    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Fails with the default `Enforcement failed: ...` message.
    pub fn into_result(self) -> Result<T> {
        if self.passed {
            return Ok(self.value);
        }
        let message = crate::message!("Enforcement failed:", self.expression, "-", self.description);
        Err(self.error(message))
    }

    /// Fails with the message produced by `message`, which runs only on failure.
    pub fn or_message<F>(self, message: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        if self.passed {
            return Ok(self.value);
        }
        let message = message();
        Err(self.error(message))
    }

    fn error(&self, message: String) -> Error {
        Error::new(self.kind, message).with_location(self.location)
    }
}

/// Checks that a value is truthy and yields it.
///
/// `enforce!(value)` fails with the default message; `enforce!(value, args...)`
/// fails with `args` joined by [`message!`](crate::message). A leading
/// `kind = ErrorKind::...;` selects the error kind. The checked value is moved
/// into the result.
///
/// # Examples
///
/// ```rust
/// use failsafe::{enforce, ErrorKind};
///
/// let ready = Some(8080);
/// assert_eq!(enforce!(ready).unwrap(), Some(8080));
///
/// let err = enforce!(kind = ErrorKind::InvalidArgument; 1 > 2, "bad ordering").unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::InvalidArgument);
/// assert_eq!(err.message(), "bad ordering");
/// ```
#[macro_export]
macro_rules! enforce {
    (kind = $kind:expr; $value:expr $(, $arg:expr)* $(,)?) => {
        $crate::__enforce_with!(
            $kind,
            $value,
            &$crate::enforce::Truth,
            stringify!($value),
            [$($arg),*]
        )
    };
    ($value:expr $(, $arg:expr)* $(,)?) => {
        $crate::enforce!(kind = $crate::ErrorKind::Runtime; $value $(, $arg)*)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __enforce_with {
    ($kind:expr, $value:expr, $predicate:expr, $expression:expr, []) => {
        $crate::enforce::Enforcement::new($value, $predicate, $expression)
            .with_kind($kind)
            .into_result()
    };
    ($kind:expr, $value:expr, $predicate:expr, $expression:expr, [$($arg:expr),+]) => {
        $crate::enforce::Enforcement::new($value, $predicate, $expression)
            .with_kind($kind)
            .or_message(|| $crate::message!($($arg),+))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __enforce_compare {
    ($predicate:ident, $op:literal, $value:expr, $other:expr $(, $arg:expr)*) => {
        match (&$value, &$other) {
            (value, other) => $crate::__enforce_with!(
                $crate::ErrorKind::Runtime,
                value,
                &$crate::enforce::$predicate(other),
                concat!(stringify!($value), " ", $op, " ", stringify!($other)),
                [$($arg),*]
            )
            .map(|_| ()),
        }
    };
}

/// Checks `value == expected`.
///
/// # Examples
///
/// ```rust
/// use failsafe::enforce_eq;
///
/// let name = String::from("alice");
/// assert!(enforce_eq!(name, "alice").is_ok());
/// let err = enforce_eq!(name.len(), 6).unwrap_err();
/// assert_eq!(err.message(), "Enforcement failed: name.len() == 6 - Values must be equal");
/// ```
#[macro_export]
macro_rules! enforce_eq {
    ($value:expr, $expected:expr $(, $arg:expr)* $(,)?) => {
        $crate::__enforce_compare!(EqualTo, "==", $value, $expected $(, $arg)*)
    };
}

/// Checks `value != expected`.
#[macro_export]
macro_rules! enforce_ne {
    ($value:expr, $expected:expr $(, $arg:expr)* $(,)?) => {
        $crate::__enforce_compare!(NotEqualTo, "!=", $value, $expected $(, $arg)*)
    };
}

/// Checks `value < bound`.
#[macro_export]
macro_rules! enforce_lt {
    ($value:expr, $bound:expr $(, $arg:expr)* $(,)?) => {
        $crate::__enforce_compare!(LessThan, "<", $value, $bound $(, $arg)*)
    };
}

/// Checks `value > bound`.
#[macro_export]
macro_rules! enforce_gt {
    ($value:expr, $bound:expr $(, $arg:expr)* $(,)?) => {
        $crate::__enforce_compare!(GreaterThan, ">", $value, $bound $(, $arg)*)
    };
}

/// Checks `value <= bound`.
#[macro_export]
macro_rules! enforce_le {
    ($value:expr, $bound:expr $(, $arg:expr)* $(,)?) => {
        $crate::__enforce_compare!(LessEqual, "<=", $value, $bound $(, $arg)*)
    };
}

/// Checks `value >= bound`.
#[macro_export]
macro_rules! enforce_ge {
    ($value:expr, $bound:expr $(, $arg:expr)* $(,)?) => {
        $crate::__enforce_compare!(GreaterEqual, ">=", $value, $bound $(, $arg)*)
    };
}

/// Checks `lower <= value <= upper`.
#[macro_export]
macro_rules! enforce_in_range {
    ($value:expr, $lower:expr, $upper:expr $(, $arg:expr)* $(,)?) => {
        match (&$value, &$lower, &$upper) {
            (value, lower, upper) => $crate::__enforce_with!(
                $crate::ErrorKind::Runtime,
                value,
                &$crate::enforce::InRange { lower, upper },
                concat!(
                    stringify!($value), " in [", stringify!($lower), ", ", stringify!($upper), "]"
                ),
                [$($arg),*]
            )
            .map(|_| ()),
        }
    };
}

/// Checks that a pointer-like value is non-null and yields it.
///
/// # Examples
///
/// ```rust
/// use failsafe::enforce_not_null;
///
/// let value = 42;
/// let ptr: *const i32 = &value;
/// assert_eq!(enforce_not_null!(ptr).unwrap(), ptr);
///
/// let missing: Option<&str> = None;
/// assert_eq!(enforce_not_null!(missing).unwrap_err().message(), "Null pointer: missing");
/// ```
#[macro_export]
macro_rules! enforce_not_null {
    ($ptr:expr $(,)?) => {
        $crate::__enforce_with!(
            $crate::ErrorKind::Runtime,
            $ptr,
            &$crate::enforce::Truth,
            stringify!($ptr),
            [concat!("Null pointer: ", stringify!($ptr))]
        )
    };
}

/// Checks that `index` addresses one of `size` elements and yields the index.
///
/// Fails with [`ErrorKind::OutOfRange`](crate::ErrorKind::OutOfRange).
///
/// # Examples
///
/// ```rust
/// use failsafe::{enforce_valid_index, ErrorKind};
///
/// let items = vec![1, 2, 3];
/// assert_eq!(enforce_valid_index!(2, items.len()).unwrap(), 2);
///
/// let err = enforce_valid_index!(-1, items.len()).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::OutOfRange);
/// assert_eq!(err.message(), "Index out of bounds: -1 not in [0, 3)");
/// ```
#[macro_export]
macro_rules! enforce_valid_index {
    ($index:expr, $size:expr $(,)?) => {
        match ($index, $size) {
            (index, size) => $crate::__enforce_with!(
                $crate::ErrorKind::OutOfRange,
                index,
                &$crate::enforce::IndexIn { size },
                concat!(stringify!($index), " < ", stringify!($size)),
                [
                    "Index out of bounds:",
                    index,
                    format_args!("not in [0, {})", size)
                ]
            ),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{hex, message};
    use std::cell::Cell;

    #[test]
    fn test_truthy() {
        assert!(true.is_truthy());
        assert!(!false.is_truthy());
        assert!(Some(0).is_truthy());
        assert!(!None::<u8>.is_truthy());
        assert!(Ok::<_, ()>(1).is_truthy());
        assert!(!std::ptr::null::<u8>().is_truthy());
        assert!(!std::ptr::null_mut::<u8>().is_truthy());
        assert!((&true).is_truthy());
    }

    #[test]
    fn test_basic_enforce() {
        assert!(enforce!(true).unwrap());
        let err = enforce!(false).unwrap_err();
        assert_eq!(err.message(), "Enforcement failed: false - Expression must be true");
        assert_eq!(err.kind(), ErrorKind::Runtime);
        assert_eq!(err.location().unwrap().line(), line!() - 3);
    }

    #[test]
    fn test_custom_message() {
        let err = enforce!(false, "Custom error message").unwrap_err();
        assert_eq!(err.message(), "Custom error message");

        let err = enforce!(1 + 1 == 3, "Error:", 42, "is the answer").unwrap_err();
        assert_eq!(err.message(), "Error: 42 is the answer");

        let value = 255;
        let err = enforce!(value < 100, "Value", hex(value), "exceeds limit").unwrap_err();
        assert_eq!(err.message(), "Value 0xff exceeds limit");

        let data = vec![1, 2, 3];
        let err = enforce!(data.is_empty(), "Vector is not empty:", data).unwrap_err();
        assert_eq!(err.message(), "Vector is not empty: [1, 2, 3]");
    }

    #[test]
    fn test_message_built_only_on_failure() {
        let built = Cell::new(0);
        let count = || {
            built.set(built.get() + 1);
            "expensive"
        };
        assert!(enforce!(true, count()).is_ok());
        assert_eq!(built.get(), 0);
        assert!(enforce!(false, count()).is_err());
        assert_eq!(built.get(), 1);
    }

    #[test]
    fn test_returns_value() {
        let value = 42;
        let ptr: *const i32 = &value;
        assert_eq!(enforce!(ptr).unwrap(), ptr);
        assert_eq!(enforce!(Some("x")).unwrap(), Some("x"));
        let null: *const i32 = std::ptr::null();
        assert!(enforce!(null, "Null pointer detected").is_err());
    }

    #[test]
    fn test_kind_override() {
        let err = enforce!(kind = ErrorKind::Domain; false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Domain);
        let err = enforce!(kind = ErrorKind::Length; false, "too long").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Length);
        assert_eq!(err.message(), "too long");
    }

    #[test]
    fn test_comparisons() {
        let x = 5;
        assert!(enforce_eq!(x, 5).is_ok());
        let err = enforce_eq!(x, 6).unwrap_err();
        assert_eq!(err.message(), "Enforcement failed: x == 6 - Values must be equal");
        let err = enforce_eq!(x, 6, "x should be 6 but is", x).unwrap_err();
        assert_eq!(err.message(), "x should be 6 but is 5");

        assert!(enforce_ne!(x, 6).is_ok());
        assert!(enforce_ne!(x, 5).is_err());
        assert!(enforce_lt!(x, 10).is_ok());
        assert!(enforce_lt!(x, 5).is_err());
        assert_eq!(
            enforce_lt!(x, 3, "x must be less than 3").unwrap_err().message(),
            "x must be less than 3"
        );
        assert!(enforce_gt!(x, 3).is_ok());
        assert!(enforce_gt!(x, 5).is_err());
        assert!(enforce_le!(x, 5).is_ok());
        assert!(enforce_le!(x, 4).is_err());
        assert!(enforce_ge!(x, 5).is_ok());
        assert!(enforce_ge!(x, 6).is_err());
    }

    #[test]
    fn test_comparisons_borrow() {
        let name = String::from("alice");
        assert!(enforce_eq!(name, "alice").is_ok());
        assert!(enforce_ne!(name, "bob", "name was", name).is_ok());
        assert_eq!(name, "alice");
    }

    #[test]
    fn test_in_range() {
        let x = 5;
        assert!(enforce_in_range!(x, 0, 10).is_ok());
        assert!(enforce_in_range!(x, 5, 5).is_ok());
        assert!(enforce_in_range!(x, 6, 10).is_err());
        let err = enforce_in_range!(x, 0, 4).unwrap_err();
        assert_eq!(err.message(), "Enforcement failed: x in [0, 4] - Value must be in range");
        assert!(enforce_in_range!(0.5, 0.0, 1.0).is_ok());
    }

    #[test]
    fn test_not_null() {
        let value = 7u8;
        let ptr: *const u8 = &value;
        assert!(enforce_not_null!(ptr).is_ok());
        let null_ptr: *const u8 = std::ptr::null();
        let err = enforce_not_null!(null_ptr).unwrap_err();
        assert_eq!(err.message(), "Null pointer: null_ptr");
    }

    #[test]
    fn test_valid_index() {
        let items = vec![1, 2, 3];
        for i in 0..items.len() {
            assert_eq!(enforce_valid_index!(i, items.len()).unwrap(), i);
        }
        let err = enforce_valid_index!(items.len(), items.len()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert_eq!(err.message(), "Index out of bounds: 3 not in [0, 3)");
        assert!(enforce_valid_index!(-1i64, items.len()).is_err());
        assert!(enforce_valid_index!(100, items.len()).is_err());
    }

    #[test]
    fn test_question_mark_propagation() {
        fn positive(value: i32) -> Result<i32> {
            enforce_gt!(value, 0, "value must be positive:", value)?;
            Ok(value)
        }

        fn is_positive(value: i32) -> bool {
            value > 0
        }

        assert_eq!(positive(3).unwrap(), 3);
        assert_eq!(positive(-2).unwrap_err().message(), "value must be positive: -2");
        assert!(enforce!(is_positive(5)).is_ok());
        assert!(enforce!(is_positive(-5)).is_err());
    }

    #[test]
    fn test_error_renders_in_messages() {
        let err = enforce!(false, "broken").unwrap_err();
        let line = err.location().unwrap().line();
        assert_eq!(
            message!("caught:", err),
            format!("caught: [enforce.rs:{}] broken", line)
        );
    }
}
