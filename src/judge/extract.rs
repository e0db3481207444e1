//! Recover the JSON object a model embedded in free text.

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::ExtractionError;

lazy_static::lazy_static! {
    /// Greedy: first '{' through last '}', across lines.
    static ref OBJECT_SPAN: Regex = Regex::new(r"(?s)\{.*\}").unwrap();
}

/// Parse the first-brace-to-last-brace span of `text` as a JSON object.
/// Prose before and after the span is discarded.
pub fn extract_json_object(text: &str) -> Result<Map<String, Value>, ExtractionError> {
    let span = OBJECT_SPAN
        .find(text)
        .ok_or(ExtractionError::NoJsonObject)?;

    Ok(serde_json::from_str(span.as_str())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extracts_embedded_object() {
        let map = extract_json_object("blah {\"a\":1} trailing").unwrap();
        assert_eq!(Value::Object(map), json!({"a": 1}));
    }

    #[test]
    fn test_multiline_with_thinking_prose() {
        let text = "Let me think about the strip values.\n\nHere is my answer:\n{\n  \"health_percentage\": 62,\n  \"risk_analysis\": \"Nitrate {elevated}\"\n}\nHope this helps.";
        let map = extract_json_object(text).unwrap();
        assert_eq!(map["health_percentage"], 62);
        assert_eq!(map["risk_analysis"], "Nitrate {elevated}");
    }

    #[test]
    fn test_no_braces() {
        let err = extract_json_object("The water looks fine to me.").unwrap_err();
        assert!(matches!(err, ExtractionError::NoJsonObject));
    }

    #[test]
    fn test_invalid_json_span() {
        let err = extract_json_object("{not json} and {\"a\": 1}").unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidJson(_)));
    }

    #[test]
    fn test_unbalanced_braces() {
        assert!(extract_json_object("} backwards {").is_err());
        assert!(extract_json_object("{\"a\": 1").is_err());
    }
}
