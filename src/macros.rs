/// Builds a [`Value`](crate::Value) from JSON-like syntax.
///
/// Object members keep the order in which they are written.
///
/// ```rust
/// use json_record::{record, Value};
///
/// let value = record!({
///     "number": 12345,
///     "null_key": null,
///     "nested": { "list": [1, 2, 3] }
/// });
///
/// assert_eq!(value["number"], Value::from(12345));
/// assert!(value["null_key"].is_null());
/// assert_eq!(value["nested"]["list"][2], Value::from(3));
/// ```
///
/// Any other expression is converted through [`to_value`](crate::to_value),
/// falling back to `null` when it cannot be represented.
#[macro_export]
macro_rules! record {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::record!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::Map::new();
        $(
            object.insert($key.to_string(), $crate::record!($value));
        )*
        $crate::Value::Object(object)
    }};

    ($other:expr) => {
        $crate::to_value(&$other).unwrap_or($crate::Value::Null)
    };
}
