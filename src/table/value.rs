use std::fmt;

use indexmap::IndexMap;
use serde_json::Value;

/// A single field value inside an opcode record.
///
/// Record schemas are open-ended, so values stay a tagged union instead of a
/// fixed struct. Map and sequence values keep their document order.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Seq(Vec<FieldValue>),
    Map(IndexMap<String, FieldValue>),
}

impl FieldValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "boolean",
            FieldValue::Int(_) => "integer",
            FieldValue::Float(_) => "float",
            FieldValue::Str(_) => "string",
            FieldValue::Seq(_) => "array",
            FieldValue::Map(_) => "object",
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<&Value> for FieldValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(v) => FieldValue::Bool(*v),
            Value::Number(n) => match n.as_i64() {
                Some(v) => FieldValue::Int(v),
                // u64 values above i64::MAX and true floats both end up here
                None => FieldValue::Float(n.as_f64().unwrap_or_default()),
            },
            Value::String(v) => FieldValue::Str(v.clone()),
            Value::Array(values) => FieldValue::Seq(values.iter().map(FieldValue::from).collect()),
            Value::Object(fields) => FieldValue::Map(
                fields
                    .iter()
                    .map(|(name, value)| (name.clone(), FieldValue::from(value)))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "null"),
            FieldValue::Bool(v) => write!(f, "{}", v),
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Str(v) => write!(f, "\"{}\"", v.escape_default()),
            FieldValue::Seq(values) => {
                write!(f, "[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, "]")
            }
            FieldValue::Map(fields) => {
                write!(f, "{{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", name, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// Spelling used in diagnostics for a raw JSON value.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converts_scalars() {
        assert_eq!(FieldValue::from(&json!(null)), FieldValue::Null);
        assert_eq!(FieldValue::from(&json!(true)), FieldValue::Bool(true));
        assert_eq!(FieldValue::from(&json!(4)), FieldValue::Int(4));
        assert_eq!(FieldValue::from(&json!(1.5)), FieldValue::Float(1.5));
        assert_eq!(
            FieldValue::from(&json!("NOP")),
            FieldValue::Str("NOP".to_string())
        );
    }

    #[test]
    fn converts_nested_values_in_order() {
        let value = json!({"flags": {"Z": "-", "N": "-"}, "cycles": [4, 8]});
        let converted = FieldValue::from(&value);
        let FieldValue::Map(fields) = converted else {
            panic!("expected a map");
        };
        let names: Vec<&str> = fields.keys().map(String::as_str).collect();
        assert_eq!(names, ["flags", "cycles"]);
        assert_eq!(
            fields["cycles"],
            FieldValue::Seq(vec![FieldValue::Int(4), FieldValue::Int(8)])
        );
    }

    #[test]
    fn renders_like_a_record_literal() {
        let value = FieldValue::from(&json!({
            "mnemonic": "LD",
            "bytes": 1,
            "immediate": true,
            "cycles": [4],
        }));
        assert_eq!(
            value.to_string(),
            "{mnemonic: \"LD\", bytes: 1, immediate: true, cycles: [4]}"
        );
    }

    #[test]
    fn escapes_rendered_strings() {
        let value = FieldValue::Str("a\"b".to_string());
        assert_eq!(value.to_string(), "\"a\\\"b\"");
    }

    #[test]
    fn names_json_types() {
        assert_eq!(json_type_name(&json!([])), "array");
        assert_eq!(json_type_name(&json!({})), "object");
        assert_eq!(json_type_name(&json!(3)), "number");
    }
}
