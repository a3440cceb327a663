//! Writing the message record to disk and reading JSON files back.
//!
//! [`write_json_file`] fails on any I/O problem. The readers split failures in
//! two: a file that cannot be opened or read is an [`Error::Io`], while text
//! that is not valid JSON is reported as a single diagnostic line and yields
//! `Ok(None)`.
//!
//! ```rust
//! use json_record::files::{message, open_json_file_with_report, write_json_file};
//! use json_record::JsonOptions;
//!
//! let dir = std::env::temp_dir().join("json_record_files_doc");
//! std::fs::create_dir_all(&dir).unwrap();
//! let path = dir.join("message.json");
//!
//! let options = JsonOptions::pretty().with_ensure_ascii(false);
//! write_json_file(&path, &message(), &options).unwrap();
//!
//! let mut report = Vec::new();
//! let value = open_json_file_with_report(&path, &mut report).unwrap();
//! assert_eq!(value, Some(message()));
//! assert!(report.is_empty());
//! ```

use crate::{record, Error, JsonOptions, Result, Value};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// File written by the `json_writer` tool.
pub const WRITER_OUTPUT: &str = "message2.json";

/// File read by the `open_json_file` tool when no path is given.
pub const READER_INPUT: &str = "message1.json";

/// Builds the fixed message record, keys in the order they are written out.
#[must_use]
#[allow(clippy::approx_constant)]
pub fn message() -> Value {
    record!({
        "number": 12345,
        "pi": 3.14,
        "str": "문자열 값",
        "null_key": null,
        "object": {
            "str2": "문자열 값 2",
            "object2": {
                "number2": 12345
            }
        },
        "num_array": [1, 2, 3, 4, 5],
        "str_array": ["one", "two", "three", "four", "five"]
    })
}

/// Serializes `value` into the file at `path`, creating or truncating it.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be created, written or flushed,
/// and a data error if `value` cannot be represented under `options`. The
/// value is encoded before the file is touched.
pub fn write_json_file<P, T>(path: P, value: &T, options: &JsonOptions) -> Result<()>
where
    P: AsRef<Path>,
    T: ?Sized + Serialize,
{
    let path = path.as_ref();
    let json = crate::to_string_with_options(value, options.clone())?;

    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(json.as_bytes())?;
    writer.flush()?;

    tracing::info!("wrote {} bytes to {}", json.len(), path.display());
    Ok(())
}

/// Reads and parses the JSON file at `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, a data error if it is
/// not UTF-8, and a syntax error if its contents are not valid JSON.
pub fn read_json_file<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let value = crate::from_slice(&bytes)?;
    tracing::debug!("parsed {}", path.display());
    Ok(value)
}

/// Reads the JSON file at `path`, writing one line to `report` if it does not parse.
///
/// Returns `Ok(Some(value))` on success and `Ok(None)` after a parse failure
/// has been reported as `JSON data parsing failed. reason=<message>`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read or the report cannot be
/// written.
pub fn open_json_file_with_report<P, W>(path: P, report: &mut W) -> Result<Option<Value>>
where
    P: AsRef<Path>,
    W: Write,
{
    let path = path.as_ref();
    match read_json_file(path) {
        Ok(value) => Ok(Some(value)),
        Err(Error::Io(e)) => Err(Error::Io(e)),
        Err(e) => {
            tracing::debug!("recovered from parse failure in {}: {}", path.display(), e);
            writeln!(report, "JSON data parsing failed. reason={}", e)?;
            Ok(None)
        }
    }
}

/// Like [`open_json_file_with_report`], reporting parse failures on stdout.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read.
pub fn open_json_file<P: AsRef<Path>>(path: P) -> Result<Option<Value>> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    open_json_file_with_report(path, &mut handle)
}

/// Writes `value` and a newline to `out`, skipping falsy values such as
/// `null`, `0` or `{}`.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
pub fn write_if_truthy<W: Write>(out: &mut W, value: &Value) -> Result<()> {
    if value.is_truthy() {
        writeln!(out, "{}", value)?;
    }
    Ok(())
}
