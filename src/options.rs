//! Configuration options for JSON serialization.
//!
//! [`JsonOptions`] controls how a value is laid out as text: single-line or
//! indented, whether non-ASCII characters are escaped, whether object keys are
//! sorted, and whether non-finite floats may be written.
//!
//! ## Examples
//!
//! ```rust
//! use json_record::{record, to_string_with_options, JsonOptions};
//!
//! let value = record!({ "b": 1, "a": [true, null] });
//!
//! let options = JsonOptions::compact().with_sort_keys(true);
//! assert_eq!(
//!     to_string_with_options(&value, options).unwrap(),
//!     r#"{"a":[true,null],"b":1}"#
//! );
//! ```

/// Configuration options for JSON serialization.
///
/// # Examples
///
/// ```rust
/// use json_record::JsonOptions;
///
/// // Single line, `", "` and `": "` separators, ASCII-only output
/// let options = JsonOptions::new();
///
/// // Two-space indentation
/// let options = JsonOptions::pretty();
///
/// // Indented, with non-ASCII text kept as-is
/// let options = JsonOptions::pretty().with_ensure_ascii(false);
/// assert!(!options.ensure_ascii);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct JsonOptions {
    /// Spaces per nesting level. Only used when `pretty` is set.
    pub indent: usize,
    /// Put every array element and object member on its own line.
    pub pretty: bool,
    /// Escape every character outside printable ASCII as `\uXXXX`.
    pub ensure_ascii: bool,
    /// Emit object members sorted by key instead of in insertion order.
    pub sort_keys: bool,
    /// Write non-finite floats as `NaN`, `Infinity` and `-Infinity`.
    pub allow_nan: bool,
    pub item_separator: String,
    pub key_separator: String,
}

impl Default for JsonOptions {
    fn default() -> Self {
        JsonOptions {
            indent: 2,
            pretty: false,
            ensure_ascii: true,
            sort_keys: false,
            allow_nan: true,
            item_separator: ", ".to_string(),
            key_separator: ": ".to_string(),
        }
    }
}

impl JsonOptions {
    /// Creates default options.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use json_record::JsonOptions;
    ///
    /// let options = JsonOptions::new();
    /// assert!(!options.pretty);
    /// assert!(options.ensure_ascii);
    /// assert_eq!(options.item_separator, ", ");
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for indented output, two spaces per level.
    ///
    /// The item separator drops its trailing space since every item ends a line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use json_record::JsonOptions;
    ///
    /// let options = JsonOptions::pretty();
    /// assert!(options.pretty);
    /// assert_eq!(options.indent, 2);
    /// assert_eq!(options.item_separator, ",");
    /// ```
    #[must_use]
    pub fn pretty() -> Self {
        JsonOptions {
            pretty: true,
            item_separator: ",".to_string(),
            ..Default::default()
        }
    }

    /// Creates options for the most compact single-line output.
    #[must_use]
    pub fn compact() -> Self {
        JsonOptions {
            item_separator: ",".to_string(),
            key_separator: ":".to_string(),
            ..Default::default()
        }
    }

    /// Sets the indentation size and switches to indented output.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use json_record::JsonOptions;
    ///
    /// let options = JsonOptions::new().with_indent(4);
    /// assert!(options.pretty);
    /// assert_eq!(options.indent, 4);
    /// ```
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        if !self.pretty {
            self.item_separator = self.item_separator.trim_end().to_string();
        }
        self.indent = indent;
        self.pretty = true;
        self
    }

    #[must_use]
    pub fn with_ensure_ascii(mut self, ensure_ascii: bool) -> Self {
        self.ensure_ascii = ensure_ascii;
        self
    }

    #[must_use]
    pub fn with_sort_keys(mut self, sort_keys: bool) -> Self {
        self.sort_keys = sort_keys;
        self
    }

    #[must_use]
    pub fn with_allow_nan(mut self, allow_nan: bool) -> Self {
        self.allow_nan = allow_nan;
        self
    }

    /// Overrides the separators written between items and between a key and its value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use json_record::{record, to_string_with_options, JsonOptions};
    ///
    /// let options = JsonOptions::new().with_separators(";", "=");
    /// let text = to_string_with_options(&record!({ "a": 1, "b": 2 }), options).unwrap();
    /// assert_eq!(text, r#"{"a"=1;"b"=2}"#);
    /// ```
    #[must_use]
    pub fn with_separators(mut self, item: &str, key: &str) -> Self {
        self.item_separator = item.to_string();
        self.key_separator = key.to_string();
        self
    }
}
