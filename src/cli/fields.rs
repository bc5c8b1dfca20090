//! key=value field argument parsing

use serde_json::{Map, Value};

use crate::error::{PdsError, Result};

/// Parse key=value arguments into a JSON object.
///
/// Values starting with `{` or `[` are parsed as JSON; `true`/`false`/`null`
/// and numbers become their typed equivalents; everything else is a string.
///
/// # Examples
///
/// ```
/// use pdsctl::cli::parse_field_args;
///
/// let record = parse_field_args(&[
///     "text=hello".to_string(),
///     "count=5".to_string(),
///     "active=true".to_string(),
/// ])
/// .unwrap();
/// assert_eq!(record["text"], "hello");
/// assert_eq!(record["count"], 5);
/// assert_eq!(record["active"], true);
/// ```
pub fn parse_field_args(args: &[String]) -> Result<Map<String, Value>> {
    let mut record = Map::new();

    for arg in args {
        let (key, value) = arg.split_once('=').ok_or_else(|| {
            PdsError::InvalidArgument(format!("'{}' is not key=value format", arg))
        })?;

        record.insert(key.to_string(), parse_field_value(key, value)?);
    }

    Ok(record)
}

fn parse_field_value(key: &str, value: &str) -> Result<Value> {
    // JSON first for objects/arrays
    if value.starts_with('{') || value.starts_with('[') {
        return serde_json::from_str(value)
            .map_err(|e| PdsError::InvalidArgument(format!("invalid JSON for {}: {}", key, e)));
    }

    Ok(match value.to_lowercase().as_str() {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        _ => {
            if let Ok(n) = value.parse::<i64>() {
                Value::Number(n.into())
            } else if let Some(n) = value.parse::<f64>().ok().and_then(serde_json::Number::from_f64)
            {
                Value::Number(n)
            } else {
                Value::String(value.to_string())
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strings_and_primitives() {
        let record = parse_field_args(&[
            "name=test".to_string(),
            "count=5".to_string(),
            "ratio=0.5".to_string(),
            "active=true".to_string(),
            "gone=null".to_string(),
        ])
        .unwrap();

        assert_eq!(record["name"], "test");
        assert_eq!(record["count"], 5);
        assert_eq!(record["ratio"], 0.5);
        assert_eq!(record["active"], true);
        assert_eq!(record["gone"], Value::Null);
    }

    #[test]
    fn test_parse_json_object_value() {
        let record =
            parse_field_args(&["embed={\"$type\":\"blob\",\"size\":10}".to_string()]).unwrap();
        assert_eq!(record["embed"]["$type"], "blob");
        assert_eq!(record["embed"]["size"], 10);
    }

    #[test]
    fn test_parse_json_array_value() {
        let record = parse_field_args(&["langs=[\"en\",\"pt\"]".to_string()]).unwrap();
        assert_eq!(record["langs"][0], "en");
    }

    #[test]
    fn test_value_with_equals_sign_splits_once() {
        let record = parse_field_args(&["text=a=b".to_string()]).unwrap();
        assert_eq!(record["text"], "a=b");
    }

    #[test]
    fn test_missing_equals_is_invalid_argument() {
        let err = parse_field_args(&["noequals".to_string()]).unwrap_err();
        match err {
            PdsError::InvalidArgument(msg) => assert!(msg.contains("key=value")),
            _ => panic!("Expected PdsError::InvalidArgument"),
        }
    }

    #[test]
    fn test_bad_json_is_invalid_argument() {
        let err = parse_field_args(&["embed={broken".to_string()]).unwrap_err();
        match err {
            PdsError::InvalidArgument(msg) => assert!(msg.contains("embed")),
            _ => panic!("Expected PdsError::InvalidArgument"),
        }
    }

    #[test]
    fn test_negative_number() {
        let record = parse_field_args(&["offset=-3".to_string()]).unwrap();
        assert_eq!(record["offset"], -3);
    }
}
