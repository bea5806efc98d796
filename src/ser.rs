//! Rendering through `serde`.
//!
//! [`serialized`] wraps any `T: Serialize` so that it renders with the same
//! shape rules as the dispatcher, without requiring a [`Render`] impl. The
//! bridge drives a [`RenderSerializer`] that writes straight into the output
//! buffer.
//!
//! | serde data model                         | Rendering            |
//! |------------------------------------------|----------------------|
//! | bool, integers, floats, char, str        | as the dispatcher    |
//! | bytes, seq                               | `[e1, e2]`           |
//! | `None` / `Some(x)`                       | `nullopt` / `x`      |
//! | unit                                     | `()`                 |
//! | unit struct, unit variant                | its name             |
//! | newtype struct, newtype variant          | the inner value      |
//! | tuple, tuple struct, tuple variant       | `(c1, c2)`           |
//! | map, struct, struct variant              | `{k1: v1, k2: v2}`   |
//!
//! Variant tags are not printed. A `Serialize` impl that reports an error
//! does not fail the render: the text produced so far is kept and
//! `<error: ...>` is appended.
//!
//! ## Examples
//!
//! ```rust
//! use failsafe::{message, serialized};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     tags: Vec<&'static str>,
//!     manager: Option<u32>,
//! }
//!
//! let user = User {
//!     id: 123,
//!     name: "Alice".to_string(),
//!     tags: vec!["admin", "ops"],
//!     manager: None,
//! };
//!
//! assert_eq!(
//!     message!("loaded", serialized(&user)),
//!     "loaded {id: 123, name: Alice, tags: [admin, ops], manager: nullopt}"
//! );
//! ```

use crate::{Error, Render, Result};
use serde::{ser, Serialize};

/// A `serde` serializer that appends the rendering of a value to a buffer.
///
/// # Examples
///
/// ```rust
/// use failsafe::RenderSerializer;
/// use serde::Serialize;
///
/// let mut out = String::from("point: ");
/// (1, 2).serialize(RenderSerializer::new(&mut out)).unwrap();
/// assert_eq!(out, "point: (1, 2)");
/// ```
pub struct RenderSerializer<'a> {
    out: &'a mut String,
}

impl<'a> RenderSerializer<'a> {
    pub fn new(out: &'a mut String) -> Self {
        RenderSerializer { out }
    }

    fn write<T: Render + ?Sized>(self, value: &T) -> Result<()> {
        value.render_to(self.out);
        Ok(())
    }

    fn open(self, open: &str, close: &'static str) -> Compound<'a> {
        self.out.push_str(open);
        Compound {
            out: self.out,
            first: true,
            close,
        }
    }
}

impl<'a> ser::Serializer for RenderSerializer<'a> {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Compound<'a>;
    type SerializeTuple = Compound<'a>;
    type SerializeTupleStruct = Compound<'a>;
    type SerializeTupleVariant = Compound<'a>;
    type SerializeMap = Compound<'a>;
    type SerializeStruct = Compound<'a>;
    type SerializeStructVariant = Compound<'a>;

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.write(&v)
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.write(&v)
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        self.write(&v)
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        self.write(&v)
    }

    fn serialize_i64(self, v: i64) -> Result<()> {
        self.write(&v)
    }

    fn serialize_i128(self, v: i128) -> Result<()> {
        self.write(&v)
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.write(&v)
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.write(&v)
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.write(&v)
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        self.write(&v)
    }

    fn serialize_u128(self, v: u128) -> Result<()> {
        self.write(&v)
    }

    fn serialize_f32(self, v: f32) -> Result<()> {
        self.write(&v)
    }

    fn serialize_f64(self, v: f64) -> Result<()> {
        self.write(&v)
    }

    fn serialize_char(self, v: char) -> Result<()> {
        self.write(&v)
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        self.write(v)
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<()> {
        self.write(v)
    }

    fn serialize_none(self) -> Result<()> {
        self.write("nullopt")
    }

    fn serialize_some<T>(self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        self.write(&())
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<()> {
        self.write(name)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<()> {
        self.write(variant)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        value: &T,
    ) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Compound<'a>> {
        Ok(self.open("[", "]"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Compound<'a>> {
        Ok(self.open("(", ")"))
    }

    fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<Compound<'a>> {
        Ok(self.open("(", ")"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Compound<'a>> {
        Ok(self.open("(", ")"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Compound<'a>> {
        Ok(self.open("{", "}"))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Compound<'a>> {
        Ok(self.open("{", "}"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Compound<'a>> {
        Ok(self.open("{", "}"))
    }
}

/// State for a sequence, tuple, map or struct being rendered.
pub struct Compound<'a> {
    out: &'a mut String,
    first: bool,
    close: &'static str,
}

impl Compound<'_> {
    fn element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        if !self.first {
            self.out.push_str(", ");
        }
        self.first = false;
        value.serialize(RenderSerializer::new(self.out))
    }

    fn field<T: ?Sized + Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        self.element(key)?;
        self.out.push_str(": ");
        value.serialize(RenderSerializer::new(self.out))
    }

    fn finish(self) -> Result<()> {
        self.out.push_str(self.close);
        Ok(())
    }
}

impl ser::SerializeSeq for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl ser::SerializeTuple for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl ser::SerializeTupleVariant for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl ser::SerializeMap for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(key)
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.out.push_str(": ");
        value.serialize(RenderSerializer::new(self.out))
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl ser::SerializeStruct for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.field(key, value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl ser::SerializeStructVariant for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.field(key, value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

/// A borrowed `Serialize` value that renders through [`RenderSerializer`].
#[derive(Debug)]
pub struct Serialized<'a, T: ?Sized> {
    value: &'a T,
}

/// Wraps a `Serialize` value so it can be passed wherever a [`Render`] is expected.
///
/// # Examples
///
/// ```rust
/// use failsafe::{render, serialized};
/// use serde_json::json;
///
/// let config = json!({"retries": 3, "hosts": ["a", "b"]});
/// assert_eq!(render(&serialized(&config)), "{hosts: [a, b], retries: 3}");
/// ```
#[must_use]
pub fn serialized<T: ?Sized + Serialize>(value: &T) -> Serialized<'_, T> {
    Serialized { value }
}

impl<T: ?Sized + Serialize> Render for Serialized<'_, T> {
    fn render_to(&self, out: &mut String) {
        if let Err(err) = self.value.serialize(RenderSerializer::new(out)) {
            out.push_str("<error: ");
            out.push_str(err.message());
            out.push('>');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::{Error as _, SerializeSeq};
    use serde::Serializer as _;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize)]
    struct Meters(f64);

    #[derive(Serialize)]
    struct Pair(i32, &'static str);

    #[derive(Serialize)]
    struct Marker;

    #[derive(Serialize)]
    enum Shape {
        Empty,
        Circle(f64),
        Line(Point, Point),
        Rect { width: u32, height: u32 },
    }

    struct Faulty;

    impl Serialize for Faulty {
        fn serialize<S: ser::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
            let mut seq = serializer.serialize_seq(None)?;
            seq.serialize_element(&1)?;
            Err(S::Error::custom("boom"))
        }
    }

    #[test]
    fn test_primitives() {
        assert_eq!(serialized(&true).render(), "true");
        assert_eq!(serialized(&-42i64).render(), "-42");
        assert_eq!(serialized(&u128::MAX).render(), u128::MAX.to_string());
        assert_eq!(serialized(&2.5f32).render(), "2.5");
        assert_eq!(serialized(&'q').render(), "q");
        assert_eq!(serialized("text").render(), "text");
        assert_eq!(serialized(&()).render(), "()");
    }

    #[test]
    fn test_options() {
        assert_eq!(serialized(&Some(5)).render(), "5");
        assert_eq!(serialized(&None::<i32>).render(), "nullopt");
    }

    #[test]
    fn test_structs() {
        assert_eq!(serialized(&Point { x: 1, y: 2 }).render(), "{x: 1, y: 2}");
        assert_eq!(serialized(&Meters(3.5)).render(), "3.5");
        assert_eq!(serialized(&Pair(1, "one")).render(), "(1, one)");
        assert_eq!(serialized(&Marker).render(), "Marker");
    }

    #[test]
    fn test_enums_hide_tags() {
        assert_eq!(serialized(&Shape::Empty).render(), "Empty");
        assert_eq!(serialized(&Shape::Circle(1.5)).render(), "1.5");
        let line = Shape::Line(Point { x: 0, y: 0 }, Point { x: 1, y: 1 });
        assert_eq!(serialized(&line).render(), "({x: 0, y: 0}, {x: 1, y: 1})");
        let rect = Shape::Rect { width: 2, height: 3 };
        assert_eq!(serialized(&rect).render(), "{width: 2, height: 3}");
    }

    #[test]
    fn test_collections() {
        assert_eq!(serialized(&vec![1, 2, 3]).render(), "[1, 2, 3]");
        assert_eq!(serialized(&Vec::<u8>::new()).render(), "[]");
        assert_eq!(serialized(&(1, "a", 2.5)).render(), "(1, a, 2.5)");

        let map = BTreeMap::from([("evens", vec![2, 4]), ("odds", vec![1, 3])]);
        assert_eq!(serialized(&map).render(), "{evens: [2, 4], odds: [1, 3]}");
    }

    #[test]
    fn test_bytes() {
        let mut out = String::new();
        RenderSerializer::new(&mut out)
            .serialize_bytes(&[0, 255])
            .unwrap();
        assert_eq!(out, "[0, 255]");
    }

    #[test]
    fn test_error_keeps_partial_output() {
        assert_eq!(serialized(&Faulty).render(), "[1<error: boom>");
        assert_eq!(
            crate::message!("value:", serialized(&Faulty), "end"),
            "value: [1<error: boom> end"
        );
    }
}
