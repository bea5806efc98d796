//! The value dispatcher.
//!
//! This module provides the [`Render`] trait, the single rendering capability
//! shared by every value, container, and modifier descriptor in the crate.
//!
//! ## Shape classes
//!
//! Every type that implements [`Render`] belongs to exactly one shape class,
//! chosen by which impl it receives:
//!
//! | Shape                 | Types                                              | Output            |
//! |-----------------------|----------------------------------------------------|-------------------|
//! | boolean               | `bool`                                             | `true` / `false`  |
//! | pointer-like          | `*const T`, `*mut T`, `NonNull<T>`                 | `nullptr` / `0x…` |
//! | duration              | [`Span`](crate::Span), `Duration`, `TimeDelta`     | `100ms`           |
//! | instant               | `SystemTime`, `DateTime<Tz>`, [`SteadyTime`](crate::SteadyTime) | `1970-01-01T00:00:00.000Z` |
//! | optional              | `Option<T>`                                        | value / `nullopt` |
//! | sum type              | `Result<T, E>`, [`Monostate`], [`render_sum_type!`](crate::render_sum_type) | value / `monostate` |
//! | string-like           | `str`, `String`, `char`, `Path`, `OsStr`, [`Wide`], [`Wide32`] | verbatim UTF-8 |
//! | map / set / sequence  | see [`collection`](crate::collection)              | `{k: v}` `{e}` `[e]` |
//! | pair / tuple          | `(A, B)`, `(A, B, C, ..)`, `()`                    | `(a, b)`          |
//! | fallback              | numbers, addresses, [`Displayed`], [`render_via_display!`](crate::render_via_display) | `Display` output |
//!
//! References and owning handles (`&T`, `Box<T>`, `Rc<T>`, `Arc<T>`, `Cow<B>`)
//! render the value they hold. A type with no impl is rejected at compile time.
//!
//! ## Examples
//!
//! ```rust
//! use failsafe::{render, Render};
//! use std::collections::BTreeMap;
//!
//! assert_eq!(render(&true), "true");
//! assert_eq!(render(&Some(42)), "42");
//! assert_eq!(render(&None::<i32>), "nullopt");
//! assert_eq!(render(&(1, "one")), "(1, one)");
//!
//! let mut map = BTreeMap::new();
//! map.insert("a", 1);
//! map.insert("b", 2);
//! assert_eq!(map.render(), "{a: 1, b: 2}");
//! ```

use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};
use std::ptr::NonNull;
use std::rc::Rc;
use std::sync::Arc;

/// Produces the human-readable text of a value.
///
/// Implementors append their rendering to a caller-supplied buffer and must
/// not insert separators around themselves; joining is the job of the
/// [`MessageBuilder`](crate::MessageBuilder).
///
/// # Examples
///
/// ```rust
/// use failsafe::Render;
///
/// struct Celsius(f64);
///
/// impl Render for Celsius {
///     fn render_to(&self, out: &mut String) {
///         self.0.render_to(out);
///         out.push_str("°C");
///     }
/// }
///
/// assert_eq!(Celsius(21.5).render(), "21.5°C");
/// assert_eq!(vec![Celsius(1.0)].render(), "[1°C]");
/// ```
pub trait Render {
    /// Appends the rendering of `self` to `out`.
    fn render_to(&self, out: &mut String);

    /// Renders `self` into a fresh string.
    fn render(&self) -> String {
        let mut out = String::new();
        self.render_to(&mut out);
        out
    }
}

/// Appends `items` to `out` between `open` and `close`, separated by `", "`.
pub(crate) fn write_joined<I>(out: &mut String, open: &str, close: &str, items: I)
where
    I: IntoIterator,
    I::Item: Render,
{
    out.push_str(open);
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        item.render_to(out);
    }
    out.push_str(close);
}

impl<T: Render + ?Sized> Render for &T {
    #[inline]
    fn render_to(&self, out: &mut String) {
        (**self).render_to(out);
    }
}

impl<T: Render + ?Sized> Render for &mut T {
    #[inline]
    fn render_to(&self, out: &mut String) {
        (**self).render_to(out);
    }
}

impl<T: Render + ?Sized> Render for Box<T> {
    #[inline]
    fn render_to(&self, out: &mut String) {
        (**self).render_to(out);
    }
}

impl<T: Render + ?Sized> Render for Rc<T> {
    #[inline]
    fn render_to(&self, out: &mut String) {
        (**self).render_to(out);
    }
}

impl<T: Render + ?Sized> Render for Arc<T> {
    #[inline]
    fn render_to(&self, out: &mut String) {
        (**self).render_to(out);
    }
}

impl<B> Render for Cow<'_, B>
where
    B: Render + ToOwned + ?Sized,
{
    #[inline]
    fn render_to(&self, out: &mut String) {
        (**self).render_to(out);
    }
}

impl Render for bool {
    fn render_to(&self, out: &mut String) {
        out.push_str(if *self { "true" } else { "false" });
    }
}

fn write_address(out: &mut String, address: *const ()) {
    if address.is_null() {
        out.push_str("nullptr");
    } else {
        let _ = write!(out, "{:p}", address);
    }
}

impl<T: ?Sized> Render for *const T {
    fn render_to(&self, out: &mut String) {
        write_address(out, self.cast::<()>());
    }
}

impl<T: ?Sized> Render for *mut T {
    fn render_to(&self, out: &mut String) {
        write_address(out, self.cast::<()>().cast_const());
    }
}

impl<T: ?Sized> Render for NonNull<T> {
    fn render_to(&self, out: &mut String) {
        write_address(out, self.as_ptr().cast::<()>().cast_const());
    }
}

impl<T: Render> Render for Option<T> {
    fn render_to(&self, out: &mut String) {
        match self {
            Some(value) => value.render_to(out),
            None => out.push_str("nullopt"),
        }
    }
}

/// The designated empty alternative of a sum type; renders as `monostate`.
///
/// # Examples
///
/// ```rust
/// use failsafe::{render, Monostate};
///
/// let slot: Result<i32, Monostate> = Err(Monostate);
/// assert_eq!(render(&slot), "monostate");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Monostate;

impl Render for Monostate {
    fn render_to(&self, out: &mut String) {
        out.push_str("monostate");
    }
}

// The active alternative is rendered; the tag is not.
impl<T: Render, E: Render> Render for Result<T, E> {
    fn render_to(&self, out: &mut String) {
        match self {
            Ok(value) => value.render_to(out),
            Err(error) => error.render_to(out),
        }
    }
}

impl Render for str {
    #[inline]
    fn render_to(&self, out: &mut String) {
        out.push_str(self);
    }
}

impl Render for String {
    #[inline]
    fn render_to(&self, out: &mut String) {
        out.push_str(self);
    }
}

impl Render for char {
    #[inline]
    fn render_to(&self, out: &mut String) {
        out.push(*self);
    }
}

impl Render for OsStr {
    fn render_to(&self, out: &mut String) {
        out.push_str(&self.to_string_lossy());
    }
}

impl Render for OsString {
    fn render_to(&self, out: &mut String) {
        self.as_os_str().render_to(out);
    }
}

impl Render for Path {
    fn render_to(&self, out: &mut String) {
        self.as_os_str().render_to(out);
    }
}

impl Render for PathBuf {
    fn render_to(&self, out: &mut String) {
        self.as_os_str().render_to(out);
    }
}

/// A wide string of UTF-16 code units, transcoded to UTF-8 when rendered.
///
/// Unpaired surrogates become U+FFFD.
///
/// # Examples
///
/// ```rust
/// use failsafe::{message, wide};
///
/// let units: Vec<u16> = "héllo".encode_utf16().collect();
/// assert_eq!(message!("wide:", wide(&units)), "wide: héllo");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Wide<'a>(&'a [u16]);

/// Wraps UTF-16 code units as a string-like value.
#[must_use]
pub fn wide(units: &[u16]) -> Wide<'_> {
    Wide(units)
}

impl Render for Wide<'_> {
    fn render_to(&self, out: &mut String) {
        out.extend(
            char::decode_utf16(self.0.iter().copied())
                .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER)),
        );
    }
}

/// A wide string of UTF-32 code points, transcoded to UTF-8 when rendered.
#[derive(Clone, Copy, Debug)]
pub struct Wide32<'a>(&'a [u32]);

/// Wraps UTF-32 code points as a string-like value.
#[must_use]
pub fn wide32(units: &[u32]) -> Wide32<'_> {
    Wide32(units)
}

impl Render for Wide32<'_> {
    fn render_to(&self, out: &mut String) {
        out.extend(
            self.0
                .iter()
                .map(|&unit| char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER)),
        );
    }
}

impl Render for () {
    fn render_to(&self, out: &mut String) {
        out.push_str("()");
    }
}

macro_rules! tuple_impls {
    ($( ( $($name:ident . $idx:tt),+ ) )+) => {
        $(
            impl<$($name: Render),+> Render for ($($name,)+) {
                fn render_to(&self, out: &mut String) {
                    let parts: &[&dyn Render] = &[$(&self.$idx),+];
                    write_joined(out, "(", ")", parts);
                }
            }
        )+
    };
}

tuple_impls! {
    (A.0)
    (A.0, B.1)
    (A.0, B.1, C.2)
    (A.0, B.1, C.2, D.3)
    (A.0, B.1, C.2, D.3, E.4)
    (A.0, B.1, C.2, D.3, E.4, F.5)
    (A.0, B.1, C.2, D.3, E.4, F.5, G.6)
    (A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7)
    (A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8)
    (A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8, J.9)
    (A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8, J.9, K.10)
    (A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8, J.9, K.10, L.11)
}

/// Renders any [`Display`](fmt::Display) value through its own textual representation.
///
/// # Examples
///
/// ```rust
/// use failsafe::{display, message};
/// use std::fmt;
///
/// struct Version(u32, u32);
///
/// impl fmt::Display for Version {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "v{}.{}", self.0, self.1)
///     }
/// }
///
/// assert_eq!(message!("running", display(Version(1, 4))), "running v1.4");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Displayed<T>(pub T);

/// Wraps a [`Display`](fmt::Display) value so it can be rendered.
#[must_use]
pub fn display<T: fmt::Display>(value: T) -> Displayed<T> {
    Displayed(value)
}

impl<T: fmt::Display> Render for Displayed<T> {
    fn render_to(&self, out: &mut String) {
        let _ = write!(out, "{}", self.0);
    }
}

impl Render for fmt::Arguments<'_> {
    fn render_to(&self, out: &mut String) {
        let _ = out.write_fmt(*self);
    }
}

crate::render_via_display!(
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    std::num::NonZeroU8,
    std::num::NonZeroU16,
    std::num::NonZeroU32,
    std::num::NonZeroU64,
    std::num::NonZeroUsize,
    std::net::IpAddr,
    std::net::Ipv4Addr,
    std::net::Ipv6Addr,
    std::net::SocketAddr,
    num_bigint::BigInt,
    num_bigint::BigUint,
);
