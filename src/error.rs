//! Error types for JSON serialization and deserialization.
//!
//! ## Error Categories
//!
//! - **I/O Errors**: file reading/writing failures, never recovered by the file layer
//! - **Syntax Errors**: malformed JSON text, reported with line, column and char offset
//! - **Data Errors**: values that cannot be encoded (non-finite floats when
//!   `allow_nan` is off, non-string map keys) or decoded into the requested type
//!
//! Use [`Error::classify`] to branch on the category without matching every variant.
//!
//! ## Examples
//!
//! ```rust
//! use json_record::{from_str, Category, Error, Value};
//!
//! let result: Result<Value, Error> = from_str("{invalid json");
//! let err = result.unwrap_err();
//! assert_eq!(err.classify(), Category::Syntax);
//! assert_eq!(
//!     err.to_string(),
//!     "Expecting property name enclosed in double quotes: line 1 column 2 (char 1)"
//! );
//! ```

use std::fmt;
use std::io;
use thiserror::Error;

/// Represents all possible errors that can occur during JSON serialization/deserialization.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON text.
    ///
    /// `line` and `column` are 1-based, `offset` is the 0-based char index into the input.
    #[error("{msg}: line {line} column {column} (char {offset})")]
    Syntax {
        msg: String,
        line: usize,
        column: usize,
        offset: usize,
    },

    /// A value that has no JSON representation under the active options
    #[error("{0}")]
    UnsupportedValue(String),

    /// Custom error, usually raised through serde
    #[error("{0}")]
    Custom(String),
}

/// Coarse classification of an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    /// Reading or writing the underlying stream failed.
    Io,
    /// The input was not syntactically valid JSON.
    Syntax,
    /// The input or value was well-formed but semantically unusable.
    Data,
}

impl Error {
    /// Creates a syntax error at the given position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use json_record::Error;
    ///
    /// let err = Error::syntax("Expecting value", 1, 1, 0);
    /// assert_eq!(err.to_string(), "Expecting value: line 1 column 1 (char 0)");
    /// ```
    pub fn syntax(msg: &str, line: usize, column: usize, offset: usize) -> Self {
        Error::Syntax {
            msg: msg.to_string(),
            line,
            column,
            offset,
        }
    }

    /// Creates an error for a value that cannot be encoded.
    pub fn unsupported_value(msg: &str) -> Self {
        Error::UnsupportedValue(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use json_record::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Returns the category this error belongs to.
    #[must_use]
    pub fn classify(&self) -> Category {
        match self {
            Error::Io(_) => Category::Io,
            Error::Syntax { .. } => Category::Syntax,
            Error::UnsupportedValue(_) | Error::Custom(_) => Category::Data,
        }
    }

    #[must_use]
    pub fn is_io(&self) -> bool {
        self.classify() == Category::Io
    }

    #[must_use]
    pub fn is_syntax(&self) -> bool {
        self.classify() == Category::Syntax
    }

    #[must_use]
    pub fn is_data(&self) -> bool {
        self.classify() == Category::Data
    }

    /// 1-based line of a syntax error, 0 for every other category.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Error::Syntax { line, .. } => *line,
            _ => 0,
        }
    }

    /// 1-based column of a syntax error, 0 for every other category.
    #[must_use]
    pub fn column(&self) -> usize {
        match self {
            Error::Syntax { column, .. } => *column,
            _ => 0,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
