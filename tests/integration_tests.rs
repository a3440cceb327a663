use serde::{Deserialize, Serialize};
use json_record::{
    from_reader, from_slice, from_str, from_value, record, to_string, to_string_pretty,
    to_string_with_options, to_value, to_writer_with_options, Category, JsonOptions, Number,
    Value,
};
use std::collections::{BTreeMap, HashMap};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Order {
    order_id: u32,
    customer: User,
    items: Vec<Product>,
    total: f64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Wrapper(String);

fn order() -> Order {
    Order {
        order_id: 12345,
        customer: User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["vip".to_string()],
        },
        items: vec![
            Product {
                sku: "WIDGET-001".to_string(),
                price: 29.99,
                quantity: 2,
            },
            Product {
                sku: "GADGET-002".to_string(),
                price: 49.99,
                quantity: 1,
            },
        ],
        total: 109.97,
    }
}

#[test]
fn test_simple_struct() {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        active: true,
        tags: vec!["admin".to_string(), "developer".to_string()],
    };

    let json = to_string(&user).unwrap();
    assert_eq!(
        json,
        r#"{"id": 123, "name": "Alice", "active": true, "tags": ["admin", "developer"]}"#
    );

    let user_back: User = from_str(&json).unwrap();
    assert_eq!(user, user_back);
}

#[test]
fn test_nested_struct() {
    let json = to_string_pretty(&order()).unwrap();
    assert!(json.contains("\n  \"customer\": {\n    \"id\": 123,\n"));
    assert!(json.contains("\n      \"price\": 29.99,\n"));

    let order_back: Order = from_str(&json).unwrap();
    assert_eq!(order(), order_back);
}

#[test]
fn test_empty_containers() {
    let value = record!({ "list": [], "map": {} });
    assert_eq!(to_string(&value).unwrap(), r#"{"list": [], "map": {}}"#);
    assert_eq!(
        to_string_pretty(&value).unwrap(),
        "{\n  \"list\": [],\n  \"map\": {}\n}"
    );
    assert_eq!(to_string_pretty(&Vec::<u8>::new()).unwrap(), "[]");
}

#[test]
fn test_floats_keep_their_type() {
    let value = record!([1.0, 1e300, 0.1]);
    let json = to_string(&value).unwrap();
    assert_eq!(json, "[1.0, 1e+300, 0.1]");

    let back: Value = from_str(&json).unwrap();
    assert!(back[0].as_f64().is_some());
    assert!(matches!(back[0], Value::Number(Number::Float(_))));
    assert_eq!(back, value);
}

#[test]
fn test_non_finite_floats() {
    let values = vec![f64::INFINITY, f64::NEG_INFINITY];
    let json = to_string(&values).unwrap();
    assert_eq!(json, "[Infinity, -Infinity]");
    assert_eq!(from_str::<Vec<f64>>(&json).unwrap(), values);

    let nan: f64 = from_str("NaN").unwrap();
    assert!(nan.is_nan());

    let err = to_string_with_options(&values, JsonOptions::new().with_allow_nan(false))
        .unwrap_err();
    assert_eq!(err.classify(), Category::Data);
    assert!(err
        .to_string()
        .starts_with("Out of range float values are not JSON compliant"));
}

#[test]
fn test_large_integers() {
    let big = u64::MAX;
    let json = to_string(&big).unwrap();
    assert_eq!(json, "18446744073709551615");
    assert_eq!(from_str::<u64>(&json).unwrap(), big);
    assert_eq!(from_str::<i64>("-9223372036854775808").unwrap(), i64::MIN);
}

#[test]
fn test_ensure_ascii_default_and_off() {
    let text = "문자열 값 😀";
    assert_eq!(
        to_string(&text).unwrap(),
        r#""\ubb38\uc790\uc5f4 \uac12 \ud83d\ude00""#
    );
    let options = JsonOptions::new().with_ensure_ascii(false);
    assert_eq!(
        to_string_with_options(&text, options).unwrap(),
        "\"문자열 값 😀\""
    );
    assert_eq!(from_str::<String>(&to_string(&text).unwrap()).unwrap(), text);
}

#[test]
fn test_custom_indent_and_separators() {
    let value = record!({ "a": [1, 2] });

    assert_eq!(
        to_string_with_options(&value, JsonOptions::new().with_indent(4)).unwrap(),
        "{\n    \"a\": [\n        1,\n        2\n    ]\n}"
    );
    assert_eq!(
        to_string_with_options(&value, JsonOptions::compact()).unwrap(),
        r#"{"a":[1,2]}"#
    );
}

#[test]
fn test_maps() {
    let mut map = HashMap::new();
    map.insert("only".to_string(), vec![1, 2]);
    let json = to_string(&map).unwrap();
    assert_eq!(json, r#"{"only": [1, 2]}"#);
    assert_eq!(from_str::<HashMap<String, Vec<i32>>>(&json).unwrap(), map);

    let mut flags = BTreeMap::new();
    flags.insert(true, "yes");
    flags.insert(false, "no");
    assert_eq!(to_string(&flags).unwrap(), r#"{"false": "no", "true": "yes"}"#);
}

#[test]
fn test_newtype_and_unit() {
    let json = to_string(&Wrapper("w".to_string())).unwrap();
    assert_eq!(json, r#""w""#);
    assert_eq!(from_str::<Wrapper>(&json).unwrap(), Wrapper("w".to_string()));
    assert_eq!(to_string(&()).unwrap(), "null");
    from_str::<()>("null").unwrap();
}

#[test]
fn test_value_round_trip_through_typed() {
    let value = to_value(&order()).unwrap();
    assert_eq!(value["customer"]["name"], Value::from("Alice"));
    assert_eq!(value["items"][1]["quantity"], Value::from(1));
    assert!(value["missing"].is_null());

    let back: Order = from_value(value).unwrap();
    assert_eq!(back, order());
}

#[test]
fn test_writer_and_reader_helpers() {
    let mut buffer = Vec::new();
    to_writer_with_options(&mut buffer, &order(), JsonOptions::pretty()).unwrap();

    let from_bytes: Order = from_slice(&buffer).unwrap();
    let from_stream: Order = from_reader(buffer.as_slice()).unwrap();
    assert_eq!(from_bytes, order());
    assert_eq!(from_stream, order());
}

#[test]
fn test_display_is_unescaped() {
    let value = record!({ "str": "값", "n": null, "list": [true] });
    assert_eq!(value.to_string(), r#"{"str": "값", "n": null, "list": [true]}"#);
    assert_eq!(
        format!("{value:#}"),
        "{\n  \"str\": \"값\",\n  \"n\": null,\n  \"list\": [\n    true\n  ]\n}"
    );
}

#[test]
fn test_errors_carry_positions() {
    let err = from_str::<Value>("{\n  \"a\": [1, 2\n}").unwrap_err();
    assert!(err.is_syntax());
    assert_eq!(err.line(), 3);
    assert_eq!(err.column(), 1);
    assert_eq!(
        err.to_string(),
        "Expecting ',' delimiter: line 3 column 1 (char 15)"
    );
}

#[test]
fn test_missing_field_is_data_error() {
    let err = from_str::<User>(r#"{"id": 1}"#).unwrap_err();
    assert!(err.is_data());
    assert!(err.to_string().contains("missing field"));
}
