use json_record::files::{
    message, open_json_file_with_report, read_json_file, write_json_file, WRITER_OUTPUT,
};
use json_record::{from_str, record, Error, JsonOptions, Value};
use std::fs;
use std::io::ErrorKind;

const MESSAGE_JSON: &str = r#"{
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
  "num_array": [
    1,
    2,
    3,
    4,
    5
  ],
  "str_array": [
    "one",
    "two",
    "three",
    "four",
    "five"
  ]
}"#;

fn writer_options() -> JsonOptions {
    JsonOptions::pretty().with_ensure_ascii(false)
}

#[test]
fn test_writer_output_is_byte_exact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(WRITER_OUTPUT);

    write_json_file(&path, &message(), &writer_options()).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), MESSAGE_JSON);
}

#[test]
fn test_writer_truncates_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(WRITER_OUTPUT);
    fs::write(&path, "x".repeat(4096)).unwrap();

    write_json_file(&path, &message(), &writer_options()).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), MESSAGE_JSON);
}

#[test]
fn test_written_message_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(WRITER_OUTPUT);

    write_json_file(&path, &message(), &writer_options()).unwrap();
    let mut report = Vec::new();
    let value = open_json_file_with_report(&path, &mut report).unwrap();

    assert_eq!(value, Some(message()));
    assert!(report.is_empty());
}

#[test]
fn test_non_ascii_is_written_literally() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("str.json");

    write_json_file(&path, &record!({ "str": "문자열 값" }), &writer_options()).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("문자열 값"));
    assert!(!text.contains("\\u"));
}

#[test]
fn test_key_order_survives_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("order.json");
    let value = record!({ "c": 1, "a": 2, "b": 3 });

    write_json_file(&path, &value, &writer_options()).unwrap();
    let back = read_json_file(&path).unwrap();

    let keys: Vec<_> = back.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, ["c", "a", "b"]);
}

#[test]
fn test_sort_keys_orders_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sorted.json");
    let value = record!({ "c": 1, "a": 2, "b": 3 });

    write_json_file(&path, &value, &writer_options().with_sort_keys(true)).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "{\n  \"a\": 2,\n  \"b\": 3,\n  \"c\": 1\n}"
    );
}

#[test]
fn test_three_level_nesting_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested.json");
    let value = record!({ "a": { "b": { "c": 12345 } } });

    write_json_file(&path, &value, &writer_options()).unwrap();
    let back = read_json_file(&path).unwrap();

    assert_eq!(back["a"]["b"]["c"], Value::from(12345));
    assert_eq!(back, value);
}

#[test]
fn test_malformed_file_yields_none_and_one_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("message1.json");
    fs::write(&path, "{invalid json").unwrap();
    let mut report = Vec::new();

    let value = open_json_file_with_report(&path, &mut report).unwrap();

    assert!(value.is_none());
    let report = String::from_utf8(report).unwrap();
    assert_eq!(report.lines().count(), 1);
    assert!(report.starts_with("JSON data parsing failed. reason=Expecting property name"));
}

#[test]
fn test_empty_file_is_a_parse_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.json");
    fs::write(&path, "").unwrap();
    let mut report = Vec::new();

    assert_eq!(open_json_file_with_report(&path, &mut report).unwrap(), None);
    assert_eq!(
        String::from_utf8(report).unwrap(),
        "JSON data parsing failed. reason=Expecting value: line 1 column 1 (char 0)\n"
    );
}

#[test]
fn test_missing_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let mut report = Vec::new();

    let err = open_json_file_with_report(dir.path().join("message1.json"), &mut report)
        .unwrap_err();

    match err {
        Error::Io(e) => assert_eq!(e.kind(), ErrorKind::NotFound),
        other => panic!("expected an I/O error, got {other:?}"),
    }
    assert!(report.is_empty());
}

#[test]
fn test_reader_accepts_foreign_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("compact.json");
    fs::write(&path, "\r\n\t{\"number\":12345,\"str\":\"\\ubb38\\uc790\\uc5f4 \\uac12\"}\n").unwrap();

    let value = read_json_file(&path).unwrap();

    assert_eq!(value, record!({ "number": 12345, "str": "문자열 값" }));
    assert_eq!(value.to_string(), r#"{"number": 12345, "str": "문자열 값"}"#);
}

#[test]
fn test_message_constant_parses_to_message() {
    assert_eq!(from_str::<Value>(MESSAGE_JSON).unwrap(), message());
}
