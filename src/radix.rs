//! Radix formatters: integers in base 16, 8 or 2, and addresses in base 16.
//!
//! Signed values are reinterpreted as the unsigned bit pattern of their own
//! width before digits are generated, so `-1i8` is `ff` and never
//! `ffffffff`.
//!
//! | Call                          | Output        |
//! |-------------------------------|---------------|
//! | `hex(255)`                    | `0xff`        |
//! | `hex(255).width(4)`           | `0x00ff`      |
//! | `hex(255).uppercase(true)`    | `0xFF`        |
//! | `hex(0)`                      | `0`           |
//! | `hex(0).width(4)`             | `0x0000`      |
//! | `oct(8)`                      | `010`         |
//! | `oct(8).width(4)`             | `0010`        |
//! | `bin(5)`                      | `0b101`       |
//! | `bin(5).width(8).group_size(4)` | `0b0000 0101` |
//!
//! ## Examples
//!
//! ```rust
//! use failsafe::{bin, hex, message, oct};
//!
//! let msg = message!(
//!     "Error", hex(0x1234).width(4).uppercase(true),
//!     "with flags:", bin(0b1010_1010_u8).group_size(4),
//!     "octal:", oct(0o755),
//! );
//! assert_eq!(msg, "Error 0x1234 with flags: 0b1010 1010 octal: 0755");
//! ```

use crate::options::{Base, RadixOptions};
use crate::Render;
use std::ptr::NonNull;

/// The raw material a [`Radix`] descriptor renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RadixInput {
    /// The unsigned bit pattern of an integer.
    Integer(u128),
    /// A pointer address; `None` for null.
    Address(Option<usize>),
}

/// Values that can be shown in hexadecimal: integers and pointers.
pub trait RadixSource {
    fn radix_input(&self) -> RadixInput;
}

/// Integer types, which can be shown in every base.
pub trait Integral: RadixSource {}

macro_rules! integral_impls {
    ($($ty:ty => $unsigned:ty),+ $(,)?) => {
        $(
            impl RadixSource for $ty {
                #[inline]
                fn radix_input(&self) -> RadixInput {
                    RadixInput::Integer(*self as $unsigned as u128)
                }
            }

            impl Integral for $ty {}
        )+
    };
}

integral_impls!(
    i8 => u8,
    i16 => u16,
    i32 => u32,
    i64 => u64,
    i128 => u128,
    isize => usize,
    u8 => u8,
    u16 => u16,
    u32 => u32,
    u64 => u64,
    u128 => u128,
    usize => usize,
);

impl<T: RadixSource + ?Sized> RadixSource for &T {
    fn radix_input(&self) -> RadixInput {
        (**self).radix_input()
    }
}

impl<T: Integral + ?Sized> Integral for &T {}

impl<T: ?Sized> RadixSource for *const T {
    fn radix_input(&self) -> RadixInput {
        RadixInput::Address((!self.is_null()).then(|| self.cast::<()>() as usize))
    }
}

impl<T: ?Sized> RadixSource for *mut T {
    fn radix_input(&self) -> RadixInput {
        self.cast_const().radix_input()
    }
}

impl<T: ?Sized> RadixSource for NonNull<T> {
    fn radix_input(&self) -> RadixInput {
        RadixInput::Address(Some(self.as_ptr().cast::<()>() as usize))
    }
}

/// A value paired with radix options.
#[derive(Clone, Debug)]
pub struct Radix<T> {
    value: T,
    options: RadixOptions,
}

/// Hexadecimal rendering of an integer or a pointer.
///
/// # Examples
///
/// ```rust
/// use failsafe::{hex, message};
///
/// assert_eq!(message!(hex(0xdead_beef_u32)), "0xdeadbeef");
/// assert_eq!(message!(hex(-1i8).width(2)), "0xff");
/// assert_eq!(message!(hex(15).width(4).show_base(false)), "000f");
/// assert_eq!(message!(hex(std::ptr::null::<u8>())), "nullptr");
/// ```
#[must_use]
pub fn hex<T: RadixSource>(value: T) -> Radix<T> {
    Radix {
        value,
        options: RadixOptions::new(Base::Hex),
    }
}

/// Octal rendering; a nonzero value with the base shown gets a leading `0`.
///
/// # Examples
///
/// ```rust
/// use failsafe::{message, oct};
///
/// assert_eq!(message!(oct(511)), "0777");
/// assert_eq!(message!(oct(0)), "0");
/// assert_eq!(message!(oct(64).show_base(false)), "100");
/// assert_eq!(message!(oct(1).width(3)), "001");
/// ```
#[must_use]
pub fn oct<T: Integral>(value: T) -> Radix<T> {
    radix(value, Base::Octal)
}

/// Binary rendering, ungrouped unless a group size is set.
///
/// # Examples
///
/// ```rust
/// use failsafe::{bin, message};
///
/// assert_eq!(message!(bin(0)), "0b0");
/// assert_eq!(message!(bin(255)), "0b11111111");
/// assert_eq!(message!(bin(0b1010_1111).group_size(4)), "0b1010 1111");
/// assert_eq!(message!(bin(1).width(16)), "0b0000000000000001");
/// ```
#[must_use]
pub fn bin<T: Integral>(value: T) -> Radix<T> {
    radix(value, Base::Binary).group_size(0)
}

/// Rendering in `base` with default options (binary digits grouped by 4).
///
/// # Examples
///
/// ```rust
/// use failsafe::{message, radix, Base};
///
/// assert_eq!(message!(radix(255, Base::Hex)), "0xff");
/// assert_eq!(message!(radix(8, Base::Octal)), "010");
/// assert_eq!(message!(radix(0xa5_u8, Base::Binary)), "0b1010 0101");
/// ```
#[must_use]
pub fn radix<T: Integral>(value: T, base: Base) -> Radix<T> {
    radix_with(value, RadixOptions::new(base))
}

/// Rendering with explicit options.
#[must_use]
pub fn radix_with<T: Integral>(value: T, options: RadixOptions) -> Radix<T> {
    Radix { value, options }
}

impl<T> Radix<T> {
    /// Minimum digit count; shorter digit strings are zero-padded.
    #[must_use]
    pub fn width(mut self, width: usize) -> Self {
        self.options.width = width;
        self
    }

    #[must_use]
    pub fn show_base(mut self, show_base: bool) -> Self {
        self.options.show_base = show_base;
        self
    }

    /// Uppercase hex digits; the prefix stays `0x`.
    #[must_use]
    pub fn uppercase(mut self, uppercase: bool) -> Self {
        self.options.uppercase = uppercase;
        self
    }

    /// Binary digits per space-separated group, counted from the least
    /// significant digit. Zero disables grouping.
    #[must_use]
    pub fn group_size(mut self, group_size: usize) -> Self {
        self.options.group_size = group_size;
        self
    }

    #[must_use]
    pub fn options(&self) -> &RadixOptions {
        &self.options
    }

    #[must_use]
    pub fn value(&self) -> &T {
        &self.value
    }
}

impl<T: RadixSource> Render for Radix<T> {
    fn render_to(&self, out: &mut String) {
        match self.value.radix_input() {
            RadixInput::Address(None) => out.push_str("nullptr"),
            RadixInput::Address(Some(address)) => write_hex(out, address as u128, &self.options),
            RadixInput::Integer(bits) => match self.options.base {
                Base::Hex => write_hex(out, bits, &self.options),
                Base::Octal => write_octal(out, bits, &self.options),
                Base::Binary => write_binary(out, bits, &self.options),
            },
        }
    }
}

// Widths beyond the digit count of a `u128` are clamped to it.
fn effective_width(options: &RadixOptions) -> usize {
    let bits = options.base.bits_per_digit();
    let max_digits = ((u128::BITS + bits - 1) / bits) as usize;
    options.width.min(max_digits)
}

fn write_padded(out: &mut String, digits: &str, width: usize) {
    for _ in digits.len()..width {
        out.push('0');
    }
    out.push_str(digits);
}

fn write_hex(out: &mut String, bits: u128, options: &RadixOptions) {
    // A bare zero drops its prefix.
    if options.show_base && (bits != 0 || options.width > 0) {
        out.push_str(Base::Hex.prefix());
    }
    let digits = if options.uppercase {
        format!("{:X}", bits)
    } else {
        format!("{:x}", bits)
    };
    write_padded(out, &digits, effective_width(options));
}

// The leading zero of the octal prefix takes one of the width slots.
fn write_octal(out: &mut String, bits: u128, options: &RadixOptions) {
    let digits = format!("{:o}", bits);
    let width = effective_width(options);
    if options.show_base && bits != 0 {
        out.push_str(Base::Octal.prefix());
        write_padded(out, &digits, width.saturating_sub(1));
    } else {
        write_padded(out, &digits, width);
    }
}

// Exactly `width` low bits when a width is set, otherwise the significant bits.
fn write_binary(out: &mut String, bits: u128, options: &RadixOptions) {
    if options.show_base {
        out.push_str(Base::Binary.prefix());
    }
    let width = effective_width(options);
    let count = if width > 0 {
        width
    } else {
        (u128::BITS - bits.leading_zeros()).max(1) as usize
    };
    let group = options.group_size;
    for position in (0..count).rev() {
        let set = (bits >> position) & 1 == 1;
        out.push(if set { '1' } else { '0' });
        if group > 0 && position > 0 && position % group == 0 {
            out.push(' ');
        }
    }
}
