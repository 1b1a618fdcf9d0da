//! Common utilities shared across tools.
//!
//! Response formatting helpers and the number rendering used by the
//! arithmetic tools.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use tracing::warn;

/// Numbers at or above this magnitude are rendered in exponent form.
const EXPONENT_UPPER: f64 = 1e21;

/// Non-zero numbers below this magnitude are rendered in exponent form.
const EXPONENT_LOWER: f64 = 1e-6;

/// Create a success result with text content.
pub fn success_result(content: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content.into())])
}

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create a success result holding `value` as pretty-printed JSON (2-space indent).
pub fn json_result<T: Serialize + ?Sized>(value: &T) -> CallToolResult {
    match serde_json::to_string_pretty(value) {
        Ok(json) => success_result(json),
        Err(e) => error_result(&format!("Failed to serialize result: {}", e)),
    }
}

/// Render a number the way MCP clients of this server expect it.
///
/// Integral values have no fractional part (`3`, not `3.0`), negative zero
/// is `0`, non-finite values are `NaN`, `Infinity` and `-Infinity`, and
/// very large or very small magnitudes use exponent form (`1e+21`, `1e-7`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude >= EXPONENT_UPPER || magnitude < EXPONENT_LOWER {
        let formatted = format!("{:e}", value);
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        };
    }

    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-7.0), "-7");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_number(1.0 / 3.0), "0.3333333333333333");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(-2.5e22), "-2.5e+22");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(123456789012.0), "123456789012");
    }

    #[test]
    fn test_json_result_is_pretty() {
        let result = json_result(&serde_json::json!({ "id": "cs101" }));
        assert_eq!(result.is_error, Some(false));
        match &result.content[0].raw {
            RawContent::Text(text) => assert_eq!(text.text, "{\n  \"id\": \"cs101\"\n}"),
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_error_result_flags_error() {
        let result = error_result("boom");
        assert_eq!(result.is_error, Some(true));
    }
}
