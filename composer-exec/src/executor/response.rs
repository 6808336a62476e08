use serde_json::Value as JsonValue;

/// Decode a response body as JSON, falling back to its raw text.
pub fn decode_body(body: &[u8]) -> JsonValue {
    match serde_json::from_slice::<JsonValue>(body) {
        Ok(v) => v,
        Err(_) => JsonValue::String(String::from_utf8_lossy(body).into_owned()),
    }
}

pub fn is_success(status: u16) -> bool {
    status < 400
}

/// Error text for a non-success response: the payload rendered as text, or
/// `HTTP <status>` when there is nothing to show.
pub fn error_text(status: u16, data: &JsonValue) -> String {
    let text = match data {
        JsonValue::String(s) => s.trim().to_string(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    };
    if text.is_empty() {
        format!("HTTP {status}")
    } else {
        text
    }
}
