//! Case formatters.
//!
//! A [`Case`] descriptor renders its value normally, then converts ASCII
//! letters of the finished text. Non-ASCII characters pass through unchanged.

use crate::options::CaseDirection;
use crate::Render;

/// A value whose rendering is case-converted.
#[derive(Clone, Copy, Debug)]
pub struct Case<T> {
    value: T,
    direction: CaseDirection,
}

/// Uppercases the rendering of `value`.
///
/// # Examples
///
/// ```rust
/// use failsafe::{message, upper};
///
/// assert_eq!(message!(upper("hello world")), "HELLO WORLD");
/// assert_eq!(message!(upper(vec!["a", "b"])), "[A, B]");
/// assert_eq!(message!(upper("café")), "CAFé");
/// ```
#[must_use]
pub fn upper<T: Render>(value: T) -> Case<T> {
    Case {
        value,
        direction: CaseDirection::Upper,
    }
}

/// Lowercases the rendering of `value`.
///
/// # Examples
///
/// ```rust
/// use failsafe::{hex, lower, message, upper};
///
/// assert_eq!(message!(lower("HELLO World")), "hello world");
/// assert_eq!(message!(upper(lower("MiXeD"))), "MIXED");
/// assert_eq!(message!(lower(hex(255).uppercase(true))), "0xff");
/// ```
#[must_use]
pub fn lower<T: Render>(value: T) -> Case<T> {
    Case {
        value,
        direction: CaseDirection::Lower,
    }
}

impl<T> Case<T> {
    #[must_use]
    pub fn direction(&self) -> CaseDirection {
        self.direction
    }
}

impl<T: Render> Render for Case<T> {
    fn render_to(&self, out: &mut String) {
        let start = out.len();
        self.value.render_to(out);
        let rendered = &mut out[start..];
        match self.direction {
            CaseDirection::Upper => rendered.make_ascii_uppercase(),
            CaseDirection::Lower => rendered.make_ascii_lowercase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{hex, message, truncated};

    #[test]
    fn test_upper_and_lower() {
        assert_eq!(upper("hello").render(), "HELLO");
        assert_eq!(lower("WORLD").render(), "world");
        assert_eq!(upper(String::from("MiXeD 123")).render(), "MIXED 123");
        assert_eq!(upper("").render(), "");
    }

    #[test]
    fn test_non_ascii_passes_through() {
        assert_eq!(upper("straße").render(), "STRAßE");
        assert_eq!(lower("ÀBC").render(), "Àbc");
    }

    #[test]
    fn test_applies_to_rendered_text() {
        assert_eq!(upper(true).render(), "TRUE");
        assert_eq!(upper(None::<i32>).render(), "NULLOPT");
        assert_eq!(upper(hex(0xabc)).render(), "0XABC");
        let data = vec!["x", "y", "z"];
        assert_eq!(upper(truncated(&data, 2)).render(), "[X, Y, ...]");
    }

    #[test]
    fn test_only_own_text_is_converted() {
        let mut out = String::from("Prefix ");
        upper("tail").render_to(&mut out);
        assert_eq!(out, "Prefix TAIL");
        assert_eq!(message!("Error", upper("failed")), "Error FAILED");
    }

    #[test]
    fn test_idempotent_outer_transform() {
        for text in ["abc", "ABC", "aBc 1-2"] {
            assert_eq!(upper(lower(text)).render(), upper(text).render());
            assert_eq!(lower(upper(text)).render(), lower(text).render());
        }
        assert_eq!(upper("x").direction(), CaseDirection::Upper);
    }
}
