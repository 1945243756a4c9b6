//! Parse LLM completion output into a candidate document

use crate::error::EngineError;
use serde_json::Value;

/// Parse the raw completion text into a JSON value.
///
/// LLMs sometimes wrap JSON in markdown code blocks even when asked not
/// to; fences are stripped before decoding. A completion that still
/// fails to decode is a malformed document, reported with the decoder's
/// reason.
pub fn parse_completion(completion: &str) -> Result<Value, EngineError> {
    let json_str = strip_code_fences(completion);
    serde_json::from_str(json_str.trim())
        .map_err(|e| EngineError::MalformedDocument(e.to_string()))
}

/// Strip a surrounding ```json / ``` fence, if present
fn strip_code_fences(response: &str) -> String {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return String::new();
        }
        // Skip the opening fence line and the closing fence line.
        lines[1..lines.len().saturating_sub(1)].join("\n")
    } else {
        trimmed.to_string()
    }
}
