use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;

/// Exact JSON kinds for field type checks. Booleans are never integers,
/// `Float` excludes integers and `Number` accepts both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    Null,
    Boolean,
    Integer,
    Float,
    Number,
    String,
    Array,
    Object,
}

impl JsonType {
    pub fn matches(&self, value: &JsonValue) -> bool {
        match self {
            JsonType::Null => value.is_null(),
            JsonType::Boolean => value.is_boolean(),
            JsonType::Integer => value.is_i64() || value.is_u64(),
            JsonType::Float => value.is_f64(),
            JsonType::Number => value.is_number(),
            JsonType::String => value.is_string(),
            JsonType::Array => value.is_array(),
            JsonType::Object => value.is_object(),
        }
    }

    /// Most specific kind of `value`
    pub fn of(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => JsonType::Null,
            JsonValue::Bool(_) => JsonType::Boolean,
            JsonValue::Number(n) if n.is_f64() => JsonType::Float,
            JsonValue::Number(_) => JsonType::Integer,
            JsonValue::String(_) => JsonType::String,
            JsonValue::Array(_) => JsonType::Array,
            JsonValue::Object(_) => JsonType::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JsonType::Null => "null",
            JsonType::Boolean => "boolean",
            JsonType::Integer => "integer",
            JsonType::Float => "float",
            JsonType::Number => "number",
            JsonType::String => "string",
            JsonType::Array => "array",
            JsonType::Object => "object",
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JsonType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "null" | "none" => Ok(JsonType::Null),
            "bool" | "boolean" => Ok(JsonType::Boolean),
            "int" | "integer" => Ok(JsonType::Integer),
            "float" => Ok(JsonType::Float),
            "number" => Ok(JsonType::Number),
            "str" | "string" => Ok(JsonType::String),
            "list" | "array" => Ok(JsonType::Array),
            "dict" | "object" => Ok(JsonType::Object),
            other => Err(format!("Unknown JSON type: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_exact_kind_matching() {
        assert!(JsonType::Integer.matches(&json!(1)));
        assert!(!JsonType::Integer.matches(&json!("1")));
        assert!(!JsonType::Integer.matches(&json!(true)));
        assert!(!JsonType::Integer.matches(&json!(1.5)));
        assert!(JsonType::Float.matches(&json!(1.5)));
        assert!(!JsonType::Float.matches(&json!(2)));
        assert!(JsonType::Number.matches(&json!(2)));
        assert!(JsonType::Number.matches(&json!(2.5)));
        assert!(!JsonType::Boolean.matches(&json!(0)));
        assert!(JsonType::Null.matches(&json!(null)));
    }

    #[test]
    fn test_kind_of_value() {
        assert_eq!(JsonType::of(&json!(-3)), JsonType::Integer);
        assert_eq!(JsonType::of(&json!(0.25)), JsonType::Float);
        assert_eq!(JsonType::of(&json!({"a": 1})), JsonType::Object);
        assert_eq!(JsonType::of(&json!([])), JsonType::Array);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("int".parse::<JsonType>(), Ok(JsonType::Integer));
        assert_eq!("Dict".parse::<JsonType>(), Ok(JsonType::Object));
        assert!("tuple".parse::<JsonType>().is_err());
    }
}
