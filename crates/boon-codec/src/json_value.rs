//! [`JsonValue`] — the abstract JSON data model shared by both schemes.

/// Largest integer magnitude exactly representable in an f64 (2^53 - 1).
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A value of the abstract JSON data model.
///
/// Integers and floats share the [`JsonValue::Number`] slot; the encoder
/// classifies a number as integer-representable only when it has no
/// fractional part, is not negative zero, and its magnitude does not
/// exceed the safe-integer bound.
///
/// Objects are ordered key/value pairs; insertion order is significant
/// and keys are expected to be unique. When decoded wire data repeats a
/// key, the later occurrence wins.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    /// JSON null.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value (integer or float).
    Number(f64),
    /// UTF-8 string.
    Str(String),
    /// Ordered sequence of values.
    Array(Vec<JsonValue>),
    /// Ordered key/value mapping.
    Object(Vec<(String, JsonValue)>),
}

impl JsonValue {
    /// Returns the value as an exactly-representable integer, if it is one.
    pub fn as_safe_integer(&self) -> Option<i64> {
        match self {
            JsonValue::Number(n) => safe_integer(*n),
            _ => None,
        }
    }
}

/// Classifies `n` as integer-representable per the narrowest-fit policy.
///
/// Negative zero is kept as a float so the sign survives a round-trip.
pub fn safe_integer(n: f64) -> Option<i64> {
    if n.fract() != 0.0 || n.abs() > MAX_SAFE_INTEGER {
        return None;
    }
    if n == 0.0 && n.is_sign_negative() {
        return None;
    }
    Some(n as i64)
}

impl From<serde_json::Value> for JsonValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => JsonValue::Null,
            serde_json::Value::Bool(b) => JsonValue::Bool(b),
            serde_json::Value::Number(n) => JsonValue::Number(n.as_f64().unwrap_or(0.0)),
            serde_json::Value::String(s) => JsonValue::Str(s),
            serde_json::Value::Array(arr) => {
                JsonValue::Array(arr.into_iter().map(JsonValue::from).collect())
            }
            serde_json::Value::Object(obj) => JsonValue::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, JsonValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<JsonValue> for serde_json::Value {
    fn from(v: JsonValue) -> Self {
        match v {
            JsonValue::Null => serde_json::Value::Null,
            JsonValue::Bool(b) => serde_json::Value::Bool(b),
            JsonValue::Number(n) => match safe_integer(n) {
                Some(i) => serde_json::json!(i),
                None => serde_json::json!(n),
            },
            JsonValue::Str(s) => serde_json::Value::String(s),
            JsonValue::Array(arr) => {
                serde_json::Value::Array(arr.into_iter().map(serde_json::Value::from).collect())
            }
            JsonValue::Object(obj) => serde_json::Value::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for JsonValue {
    fn from(b: bool) -> Self {
        JsonValue::Bool(b)
    }
}

impl From<f64> for JsonValue {
    fn from(n: f64) -> Self {
        JsonValue::Number(n)
    }
}

impl From<i64> for JsonValue {
    fn from(n: i64) -> Self {
        JsonValue::Number(n as f64)
    }
}

impl From<&str> for JsonValue {
    fn from(s: &str) -> Self {
        JsonValue::Str(s.to_string())
    }
}

impl From<String> for JsonValue {
    fn from(s: String) -> Self {
        JsonValue::Str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_safe_integer_classification() {
        assert_eq!(safe_integer(0.0), Some(0));
        assert_eq!(safe_integer(-1.0), Some(-1));
        assert_eq!(safe_integer(MAX_SAFE_INTEGER), Some(9_007_199_254_740_991));
        assert_eq!(
            safe_integer(-MAX_SAFE_INTEGER),
            Some(-9_007_199_254_740_991)
        );
        assert_eq!(safe_integer(0.5), None);
        assert_eq!(safe_integer(MAX_SAFE_INTEGER + 2.0), None);
        assert_eq!(safe_integer(f64::NAN), None);
        assert_eq!(safe_integer(f64::INFINITY), None);
    }

    #[test]
    fn test_negative_zero_is_not_an_integer() {
        assert_eq!(safe_integer(-0.0), None);
    }

    #[test]
    fn test_from_serde_json_preserves_order() {
        let v = json!({"zebra": 1, "apple": 2, "mango": 3});
        let value = JsonValue::from(v);
        match value {
            JsonValue::Object(pairs) => {
                let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
                assert_eq!(keys, ["zebra", "apple", "mango"]);
            }
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn test_serde_json_round_trip() {
        let v = json!({
            "id": 7,
            "name": "boon",
            "scores": [1.5, -2, null, true],
            "nested": {"empty": {}, "list": []}
        });
        let back = serde_json::Value::from(JsonValue::from(v.clone()));
        assert_eq!(back, v);
    }
}
