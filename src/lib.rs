//! # json_record
//!
//! A Serde-compatible JSON codec with an insertion-ordered value model, plus
//! the file operations used by the `json_writer` and `open_json_file` tools.
//!
//! ## Key Features
//!
//! - **Ordered**: object members keep the order in which they were inserted
//! - **Readable output**: indented layout with non-ASCII text kept as-is when asked
//! - **Serde Compatible**: works with any `#[derive(Serialize, Deserialize)]` type
//! - **Precise errors**: parse failures name the line, column and char offset
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use json_record::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User { id: 123, name: "Alice".to_string(), active: true };
//!
//! let json = to_string(&user).unwrap();
//! assert_eq!(json, r#"{"id": 123, "name": "Alice", "active": true}"#);
//!
//! let user_back: User = from_str(&json).unwrap();
//! assert_eq!(user, user_back);
//! ```
//!
//! ### Readable Output
//!
//! ```rust
//! use json_record::{record, to_string_with_options, JsonOptions};
//!
//! let value = record!({ "str": "문자열 값", "list": [1, 2] });
//! let options = JsonOptions::pretty().with_ensure_ascii(false);
//!
//! assert_eq!(
//!     to_string_with_options(&value, options).unwrap(),
//!     "{\n  \"str\": \"문자열 값\",\n  \"list\": [\n    1,\n    2\n  ]\n}"
//! );
//! ```
//!
//! ### Files
//!
//! The [`files`] module writes the fixed message record and reads a JSON file
//! back, reporting parse failures instead of failing.

pub mod de;
pub mod error;
pub mod files;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod value;

pub use de::Deserializer;
pub use error::{Category, Error, Result};
pub use map::Map;
pub use options::JsonOptions;
pub use ser::{Serializer, ValueSerializer};
pub use value::{Number, Value};

use serde::{Deserialize, Serialize};
use std::io;

/// Serialize any `T: Serialize` to a single-line JSON string.
///
/// Uses `", "` and `": "` separators and escapes non-ASCII characters.
///
/// # Examples
///
/// ```rust
/// use json_record::to_string;
///
/// assert_eq!(to_string(&vec!["é", "x"]).unwrap(), r#"["\u00e9", "x"]"#);
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented as JSON, such as a map
/// with non-scalar keys.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, JsonOptions::default())
}

/// Serialize any `T: Serialize` to an indented JSON string, two spaces per level.
///
/// # Examples
///
/// ```rust
/// use json_record::to_string_pretty;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let json = to_string_pretty(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(json, "{\n  \"x\": 1,\n  \"y\": 2\n}");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented as JSON.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, JsonOptions::pretty())
}

/// Serialize any `T: Serialize` to a JSON string with custom options.
///
/// # Examples
///
/// ```rust
/// use json_record::{to_string_with_options, JsonOptions};
/// use std::collections::BTreeMap;
///
/// let mut map = BTreeMap::new();
/// map.insert("k", f64::NAN);
///
/// let err = to_string_with_options(&map, JsonOptions::new().with_allow_nan(false));
/// assert!(err.is_err());
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented under `options`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: JsonOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let mut serializer = Serializer::new(options);
    value.serialize(&mut serializer)?;
    Ok(serializer.into_inner())
}

/// Serialize any `T: Serialize` to UTF-8 encoded JSON bytes with custom options.
///
/// # Errors
///
/// Returns an error if the value cannot be represented under `options`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec_with_options<T>(value: &T, options: JsonOptions) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, options).map(String::into_bytes)
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use json_record::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value: Value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(value["y"], Value::from(2));
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented as JSON.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Serialize any `T: Serialize` as single-line JSON into a writer.
///
/// # Examples
///
/// ```rust
/// use json_record::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &[1, 2]).unwrap();
/// assert_eq!(buffer, b"[1, 2]");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, JsonOptions::default())
}

/// Serialize any `T: Serialize` as indented JSON into a writer.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_pretty<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, JsonOptions::pretty())
}

/// Serialize any `T: Serialize` into a writer with custom options.
///
/// Nothing is written if serialization fails.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: JsonOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let json = to_string_with_options(value, options)?;
    writer.write_all(json.as_bytes())?;
    Ok(())
}

/// Deserialize an instance of type `T` from a string of JSON text.
///
/// # Examples
///
/// ```rust
/// use json_record::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str(r#"{"x": 1, "y": 2}"#).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns a syntax error carrying line and column information if the input is
/// not valid JSON, or a data error if it does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<'a, T>(s: &'a str) -> Result<T>
where
    T: Deserialize<'a>,
{
    Deserializer::from_str(s).parse_document()
}

/// Deserialize an instance of type `T` from an I/O stream of JSON.
///
/// # Examples
///
/// ```rust
/// use json_record::{from_reader, Value};
/// use std::io::Cursor;
///
/// let value: Value = from_reader(Cursor::new(b"[1, 2]")).unwrap();
/// assert_eq!(value[1], Value::from(2));
/// ```
///
/// # Errors
///
/// Returns an I/O error if reading fails, otherwise the same errors as
/// [`from_slice`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: for<'de> Deserialize<'de>,
{
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    from_slice(&bytes)
}

/// Deserialize an instance of type `T` from bytes of JSON text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid JSON, or do
/// not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<'a, T>(v: &'a [u8]) -> Result<T>
where
    T: Deserialize<'a>,
{
    let s = std::str::from_utf8(v).map_err(Error::custom)?;
    from_str(s)
}

/// Interpret a [`Value`] as an instance of type `T`.
///
/// # Examples
///
/// ```rust
/// use json_record::{from_value, record};
///
/// let numbers: Vec<u8> = from_value(record!([1, 2, 3])).unwrap();
/// assert_eq!(numbers, [1, 2, 3]);
/// ```
///
/// # Errors
///
/// Returns a data error if the value does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    T::deserialize(de::ValueDeserializer::new(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::collections::BTreeMap;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
        nickname: Option<String>,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    enum Shape {
        Empty,
        Circle(f64),
        Rect { w: u32, h: u32 },
    }

    fn alice() -> User {
        User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
            nickname: None,
        }
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: 2 };
        let json = to_string(&point).unwrap();
        assert_eq!(json, r#"{"x": 1, "y": 2}"#);
        let point_back: Point = from_str(&json).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn test_serialize_deserialize_user() {
        let user = alice();
        let json = to_string(&user).unwrap();
        let user_back: User = from_str(&json).unwrap();
        assert_eq!(user, user_back);
    }

    #[test]
    fn test_pretty_printing() {
        let json = to_string_pretty(&alice()).unwrap();
        assert!(json.starts_with("{\n  \"id\": 123,\n"));
        assert!(json.contains("  \"tags\": [\n    \"admin\",\n    \"user\"\n  ],\n"));
        let user_back: User = from_str(&json).unwrap();
        assert_eq!(alice(), user_back);
    }

    #[test]
    fn test_to_value() {
        let value = to_value(&Point { x: 1, y: 2 }).unwrap();

        match value {
            Value::Object(obj) => {
                assert_eq!(obj.get("x"), Some(&Value::Number(Number::Integer(1))));
                assert_eq!(obj.get("y"), Some(&Value::Number(Number::Integer(2))));
            }
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn test_enums() {
        let shapes = vec![
            Shape::Empty,
            Shape::Circle(1.5),
            Shape::Rect { w: 2, h: 3 },
        ];
        let json = to_string(&shapes).unwrap();
        assert_eq!(
            json,
            r#"["Empty", {"Circle": 1.5}, {"Rect": {"w": 2, "h": 3}}]"#
        );
        let back: Vec<Shape> = from_str(&json).unwrap();
        assert_eq!(shapes, back);
    }

    #[test]
    fn test_option_fields() {
        let user: User = from_str(
            r#"{"id": 1, "name": "B", "active": false, "tags": [], "nickname": "bee"}"#,
        )
        .unwrap();
        assert_eq!(user.nickname.as_deref(), Some("bee"));
    }

    #[test]
    fn test_from_value_and_back() {
        let value = record!({ "x": 5, "y": 7 });
        let point: Point = from_value(value.clone()).unwrap();
        assert_eq!(point, Point { x: 5, y: 7 });
        assert_eq!(to_value(&point).unwrap(), value);
    }

    #[test]
    fn test_integer_map_keys() {
        let mut map = BTreeMap::new();
        map.insert(2, "two");
        map.insert(1, "one");
        assert_eq!(to_string(&map).unwrap(), r#"{"1": "one", "2": "two"}"#);
    }

    #[test]
    fn test_trailing_data_rejected_for_typed_input() {
        let err = from_str::<Point>(r#"{"x": 1, "y": 2} x"#).unwrap_err();
        assert!(err.is_syntax());
        assert!(err.to_string().starts_with("Extra data"));
    }

    #[test]
    fn test_type_mismatch_is_data_error() {
        let err = from_str::<Point>(r#"{"x": "one", "y": 2}"#).unwrap_err();
        assert_eq!(err.classify(), Category::Data);
    }

    #[test]
    fn test_invalid_utf8_is_data_error() {
        assert!(from_slice::<Value>(b"[\xff]").unwrap_err().is_data());

        let err = from_reader::<_, Value>(&b"[\"\xe9\"]"[..]).unwrap_err();
        assert_eq!(err.classify(), Category::Data);
        assert!(err.to_string().starts_with("invalid utf-8 sequence"));
    }

    #[test]
    fn test_to_writer_and_from_reader() {
        let mut buffer = Vec::new();
        to_writer_pretty(&mut buffer, &alice()).unwrap();
        let back: User = from_reader(buffer.as_slice()).unwrap();
        assert_eq!(back, alice());
        assert_eq!(
            to_vec_with_options(&alice(), JsonOptions::pretty()).unwrap(),
            buffer
        );
    }
}
