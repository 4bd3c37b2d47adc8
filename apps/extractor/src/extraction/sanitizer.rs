//! Response sanitizer: turns raw model text into the response body.
//!
//! Fence stripping only ever looks at the two ends of the text. A fence line in the middle of
//! the output is left alone and the result falls through to the soft-error path.

use serde::{Serialize, Serializer};
use serde_json::{json, Value};

const JSON_FENCE_OPEN: &str = "```json";
const FENCE: &str = "```";

/// Error marker returned alongside the raw text when the model output is not JSON.
pub const INVALID_JSON_ERROR: &str = "Invalid JSON format returned by model";

/// Outcome of sanitizing one model response.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// The model output parsed; relayed to the caller verbatim.
    Parsed(Value),
    /// Soft parse error. Still an HTTP 200; callers must inspect `error`.
    Unparsed { raw_text: String, error: String },
}

impl Serialize for Extraction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Extraction::Parsed(value) => value.serialize(serializer),
            Extraction::Unparsed { raw_text, error } => {
                json!({ "rawText": raw_text, "error": error }).serialize(serializer)
            }
        }
    }
}

/// Strips a leading ```` ```json ```` marker (or a bare ```` ``` ```` first line) and a
/// trailing ```` ``` ```` marker, trimming whitespace after each removal.
///
/// Repeats until nothing changes, so the result is a fixed point.
pub fn strip_json_fences(text: &str) -> &str {
    let mut current = text.trim();
    loop {
        let next = strip_trailing_fence(strip_leading_fence(current));
        if next == current {
            return current;
        }
        current = next;
    }
}

fn strip_leading_fence(text: &str) -> &str {
    if let Some(rest) = text.strip_prefix(JSON_FENCE_OPEN) {
        return rest.trim();
    }
    // A bare fence only counts when it is alone on the first line.
    let first_line_end = text.find('\n').unwrap_or(text.len());
    if text[..first_line_end].trim_end() == FENCE {
        return text[first_line_end..].trim();
    }
    text
}

fn strip_trailing_fence(text: &str) -> &str {
    text.strip_suffix(FENCE).map(str::trim).unwrap_or(text)
}

/// Strips fences from the (already trimmed) model text and attempts a JSON parse.
///
/// On failure the fallback carries `raw_text` as received, fences included.
pub fn sanitize(raw_text: &str) -> Extraction {
    let cleaned = strip_json_fences(raw_text);
    match serde_json::from_str::<Value>(cleaned) {
        Ok(value) => Extraction::Parsed(value),
        Err(e) => {
            tracing::warn!("Model output is not valid JSON: {e}");
            Extraction::Unparsed {
                raw_text: raw_text.to_string(),
                error: INVALID_JSON_ERROR.to_string(),
            }
        }
    }
}
