//! JSON deserialization.
//!
//! This module provides the [`Deserializer`] that parses JSON text into Rust
//! values implementing `Deserialize`.
//!
//! ## Overview
//!
//! - **Single pass**: the text is parsed into a [`Value`] tree, which then drives the visitor
//! - **Positions**: syntax errors carry line, column and char offset
//! - **Literals**: `NaN`, `Infinity` and `-Infinity` are accepted alongside standard JSON
//! - **Depth limit**: nesting deeper than 128 containers is rejected
//!
//! ## Usage
//!
//! ```rust
//! use json_record::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Data { x: i32, y: Option<String> }
//!
//! let data: Data = from_str(r#"{"x": 1, "y": null}"#).unwrap();
//! assert_eq!(data, Data { x: 1, y: None });
//! ```
//!
//! ## Error Reporting
//!
//! ```rust
//! use json_record::{from_str, Value};
//!
//! let err = from_str::<Value>("[1, 2,]").unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "Illegal trailing comma before end of array: line 1 column 6 (char 5)"
//! );
//! ```

use crate::{Error, Map, Number, Result, Value};
use serde::de::IntoDeserializer;
use serde::{de, forward_to_deserialize_any, Deserialize};

const RECURSION_LIMIT: usize = 128;

/// The JSON deserializer.
///
/// Created via [`Deserializer::from_str`]. Call [`Deserializer::end`] after
/// deserializing to reject trailing data.
pub struct Deserializer<'de> {
    input: &'de str,
    position: usize,
    line: usize,
    column: usize,
    offset: usize,
    depth: usize,
}

/// Saved cursor, used to report errors at the start of a token.
#[derive(Clone, Copy)]
struct Mark {
    line: usize,
    column: usize,
    offset: usize,
}

impl<'de> Deserializer<'de> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'de str) -> Self {
        Deserializer {
            input,
            position: 0,
            line: 1,
            column: 1,
            offset: 0,
            depth: 0,
        }
    }

    /// Checks that only whitespace remains after the value.
    ///
    /// # Errors
    ///
    /// Returns an `Extra data` syntax error otherwise.
    pub fn end(&mut self) -> Result<()> {
        self.skip_whitespace();
        if self.at_end() {
            Ok(())
        } else {
            Err(self.error("Extra data"))
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        self.offset += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn mark(&self) -> Mark {
        Mark {
            line: self.line,
            column: self.column,
            offset: self.offset,
        }
    }

    fn error(&self, msg: &str) -> Error {
        self.error_at(self.mark(), msg)
    }

    fn error_at(&self, mark: Mark, msg: &str) -> Error {
        Error::syntax(msg, mark.line, mark.column, mark.offset)
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\n' | '\r') = self.peek_char() {
            self.next_char();
        }
    }

    /// Consumes `literal` if the input continues with it.
    fn eat_literal(&mut self, literal: &str) -> bool {
        if self.input[self.position..].starts_with(literal) {
            for _ in literal.chars() {
                self.next_char();
            }
            true
        } else {
            false
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > RECURSION_LIMIT {
            return Err(self.error("Recursion limit exceeded"));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_value(&mut self) -> Result<Value> {
        self.skip_whitespace();

        match self.peek_char() {
            Some('{') => self.parse_object(),
            Some('[') => self.parse_array(),
            Some('"') => Ok(Value::String(self.parse_string()?)),
            Some('-') if self.input[self.position..].starts_with("-Infinity") => {
                self.eat_literal("-Infinity");
                Ok(Value::Number(Number::NegativeInfinity))
            }
            Some(ch) if ch == '-' || ch.is_ascii_digit() => Ok(Value::Number(self.parse_number()?)),
            _ => {
                if self.eat_literal("null") {
                    Ok(Value::Null)
                } else if self.eat_literal("true") {
                    Ok(Value::Bool(true))
                } else if self.eat_literal("false") {
                    Ok(Value::Bool(false))
                } else if self.eat_literal("NaN") {
                    Ok(Value::Number(Number::NaN))
                } else if self.eat_literal("Infinity") {
                    Ok(Value::Number(Number::Infinity))
                } else {
                    Err(self.error("Expecting value"))
                }
            }
        }
    }

    fn parse_object(&mut self) -> Result<Value> {
        self.enter()?;
        self.next_char(); // consume '{'
        let mut map = Map::new();

        self.skip_whitespace();
        if self.peek_char() == Some('}') {
            self.next_char();
            self.leave();
            return Ok(Value::Object(map));
        }

        loop {
            if self.peek_char() != Some('"') {
                return Err(self.error("Expecting property name enclosed in double quotes"));
            }
            let key = self.parse_string()?;

            self.skip_whitespace();
            if self.peek_char() != Some(':') {
                return Err(self.error("Expecting ':' delimiter"));
            }
            self.next_char();

            let value = self.parse_value()?;
            map.insert(key, value);

            self.skip_whitespace();
            match self.peek_char() {
                Some('}') => {
                    self.next_char();
                    break;
                }
                Some(',') => {
                    let comma = self.mark();
                    self.next_char();
                    self.skip_whitespace();
                    if self.peek_char() == Some('}') {
                        return Err(self.error_at(
                            comma,
                            "Illegal trailing comma before end of object",
                        ));
                    }
                }
                _ => return Err(self.error("Expecting ',' delimiter")),
            }
        }

        self.leave();
        Ok(Value::Object(map))
    }

    fn parse_array(&mut self) -> Result<Value> {
        self.enter()?;
        self.next_char(); // consume '['
        let mut elements = Vec::new();

        self.skip_whitespace();
        if self.peek_char() == Some(']') {
            self.next_char();
            self.leave();
            return Ok(Value::Array(elements));
        }

        loop {
            elements.push(self.parse_value()?);

            self.skip_whitespace();
            match self.peek_char() {
                Some(']') => {
                    self.next_char();
                    break;
                }
                Some(',') => {
                    let comma = self.mark();
                    self.next_char();
                    self.skip_whitespace();
                    if self.peek_char() == Some(']') {
                        return Err(
                            self.error_at(comma, "Illegal trailing comma before end of array")
                        );
                    }
                }
                _ => return Err(self.error("Expecting ',' delimiter")),
            }
        }

        self.leave();
        Ok(Value::Array(elements))
    }

    fn parse_string(&mut self) -> Result<String> {
        let start = self.mark();
        self.next_char(); // consume opening quote
        let mut result = String::new();

        loop {
            let here = self.mark();
            match self.next_char() {
                None => return Err(self.error_at(start, "Unterminated string starting at")),
                Some('"') => return Ok(result),
                Some('\\') => {
                    let escaped = match self.next_char() {
                        None => {
                            return Err(self.error_at(start, "Unterminated string starting at"))
                        }
                        Some('"') => '"',
                        Some('\\') => '\\',
                        Some('/') => '/',
                        Some('b') => '\u{0008}',
                        Some('f') => '\u{000C}',
                        Some('n') => '\n',
                        Some('r') => '\r',
                        Some('t') => '\t',
                        Some('u') => self.parse_unicode_escape(here)?,
                        Some(_) => return Err(self.error_at(here, "Invalid \\escape")),
                    };
                    result.push(escaped);
                }
                Some(ch) if (ch as u32) < 0x20 => {
                    return Err(self.error_at(here, "Invalid control character at"))
                }
                Some(ch) => result.push(ch),
            }
        }
    }

    /// Parses the hex part of a `\u` escape, combining surrogate pairs.
    /// `escape` marks the backslash.
    fn parse_unicode_escape(&mut self, escape: Mark) -> Result<char> {
        let first = self.parse_hex4(escape)?;

        let code_point = match first {
            0xD800..=0xDBFF => {
                let low_escape = self.mark();
                if !self.eat_literal("\\u") {
                    return Err(self.error_at(escape, "Unpaired surrogate in \\uXXXX escape"));
                }
                let second = self.parse_hex4(low_escape)?;
                if !(0xDC00..=0xDFFF).contains(&second) {
                    return Err(self.error_at(escape, "Unpaired surrogate in \\uXXXX escape"));
                }
                0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00)
            }
            0xDC00..=0xDFFF => {
                return Err(self.error_at(escape, "Unpaired surrogate in \\uXXXX escape"))
            }
            _ => first,
        };

        char::from_u32(code_point).ok_or_else(|| self.error_at(escape, "Invalid \\uXXXX escape"))
    }

    fn parse_hex4(&mut self, escape: Mark) -> Result<u32> {
        let digits = self.input[self.position..]
            .get(..4)
            .filter(|d| d.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| self.error_at(escape, "Invalid \\uXXXX escape"))?;
        let value = u32::from_str_radix(digits, 16)
            .map_err(|_| self.error_at(escape, "Invalid \\uXXXX escape"))?;
        for _ in 0..4 {
            self.next_char();
        }
        Ok(value)
    }

    /// Number grammar: `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`.
    ///
    /// A fraction or exponent that is not followed by digits ends the number
    /// before the `.` or `e`, leaving the rest to be reported as extra data.
    fn parse_number(&mut self) -> Result<Number> {
        let start = self.mark();
        let start_pos = self.position;

        self.eat_literal("-");
        match self.peek_char() {
            Some('0') => {
                self.next_char();
            }
            Some('1'..='9') => self.skip_digits(),
            _ => return Err(self.error_at(start, "Expecting value")),
        }

        let mut is_float = false;
        let bytes = self.input.as_bytes();

        if bytes.get(self.position) == Some(&b'.')
            && bytes.get(self.position + 1).is_some_and(u8::is_ascii_digit)
        {
            is_float = true;
            self.next_char();
            self.skip_digits();
        }

        if matches!(bytes.get(self.position), Some(b'e' | b'E')) {
            let sign = usize::from(matches!(bytes.get(self.position + 1), Some(b'+' | b'-')));
            if bytes
                .get(self.position + 1 + sign)
                .is_some_and(u8::is_ascii_digit)
            {
                is_float = true;
                for _ in 0..=sign {
                    self.next_char();
                }
                self.skip_digits();
            }
        }

        let text = &self.input[start_pos..self.position];

        if !is_float {
            if let Ok(i) = text.parse::<i64>() {
                return Ok(Number::Integer(i));
            }
            return text
                .parse::<u64>()
                .map(Number::Unsigned)
                .map_err(|_| self.error_at(start, "Integer out of range"));
        }

        text.parse::<f64>()
            .map(Number::from)
            .map_err(|_| self.error_at(start, "Invalid number"))
    }

    fn skip_digits(&mut self) {
        while let Some('0'..='9') = self.peek_char() {
            self.next_char();
        }
    }

    /// Fails if the input starts with a byte order mark.
    pub(crate) fn reject_bom(&self) -> Result<()> {
        if self.position == 0 && self.peek_char() == Some('\u{FEFF}') {
            return Err(self.error("Unexpected UTF-8 BOM (decode using utf-8-sig)"));
        }
        Ok(())
    }

    /// Deserializes one complete document: a single value surrounded by whitespace.
    pub(crate) fn parse_document<T: Deserialize<'de>>(&mut self) -> Result<T> {
        self.reject_bom()?;
        let value = T::deserialize(&mut *self)?;
        self.end()?;
        Ok(value)
    }
}

impl<'de> de::Deserializer<'de> for &mut Deserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let value = self.parse_value()?;
        ValueDeserializer::new(value).deserialize_any(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let value = self.parse_value()?;
        ValueDeserializer::new(value).deserialize_option(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let value = self.parse_value()?;
        ValueDeserializer::new(value).deserialize_enum(name, variants, visitor)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Value>,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(map: Map) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::new(Value::String(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: Option<Value>,
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(ValueDeserializer::new(Value::String(self.variant)))?;
        let visitor = VariantDeserializer { value: self.value };
        Ok((variant, visitor))
    }
}

struct VariantDeserializer {
    value: Option<Value>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Some(Value::Null) | None => Ok(()),
            _ => Err(Error::custom("Expected unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("Expected newtype variant")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Value::Array(arr)) => visitor.visit_seq(SeqDeserializer::new(arr)),
            _ => Err(Error::custom("Expected tuple variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Value::Object(obj)) => visitor.visit_map(MapDeserializer::new(obj)),
            _ => Err(Error::custom("Expected struct variant")),
        }
    }
}

/// Drives a visitor from an already decoded [`Value`].
pub(crate) struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    pub(crate) fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(Number::Integer(i)) => visitor.visit_i64(i),
            Value::Number(Number::Unsigned(u)) => visitor.visit_u64(u),
            Value::Number(n) => visitor.visit_f64(n.as_f64()),
            Value::String(s) => visitor.visit_string(s),
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            Value::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String(s) => visitor.visit_enum(s.into_deserializer()),
            Value::Object(obj) if obj.len() == 1 => {
                let mut entries = obj.into_iter();
                match entries.next() {
                    Some((variant, value)) => visitor.visit_enum(EnumDeserializer {
                        variant,
                        value: Some(value),
                    }),
                    None => Err(Error::custom("Expected enum variant")),
                }
            }
            Value::Object(_) => Err(Error::custom(
                "Expected an object with a single key naming the enum variant",
            )),
            other => Err(Error::custom(format!("Expected enum, found {}", other))),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}
