use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

use crate::catalog::ResolvedOperation;
use crate::executor::http::HttpRequestParts;

/// Build the outgoing request for a resolved operation.
///
/// The URL is the base URL (trailing slashes trimmed) followed by the path
/// template as written; `{placeholders}` are not substituted. GET and DELETE
/// carry the parameters as the query string, every other method carries them
/// as a JSON object body.
pub fn build_request(
    op: &ResolvedOperation,
    params: &BTreeMap<String, JsonValue>,
) -> Result<HttpRequestParts, String> {
    if op.base_url.trim().is_empty() {
        return Err(format!(
            "no base URL available for operation '{}'",
            op.operation_id
        ));
    }
    let raw = format!("{}{}", op.base_url.trim_end_matches('/'), op.path);
    let mut url = url::Url::parse(&raw).map_err(|e| format!("invalid URL '{raw}': {e}"))?;

    let mut headers = BTreeMap::new();
    let mut body = Vec::new();
    if sends_query(&op.method) {
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in params {
                for rendered in query_values(value) {
                    pairs.append_pair(name, &rendered);
                }
            }
        }
    } else {
        body = serde_json::to_vec(params).map_err(|e| format!("failed to encode body: {e}"))?;
        headers.insert("Content-Type".to_string(), "application/json".to_string());
    }

    Ok(HttpRequestParts {
        method: op.method.clone(),
        url,
        headers,
        body,
    })
}

fn sends_query(method: &str) -> bool {
    method.eq_ignore_ascii_case("GET") || method.eq_ignore_ascii_case("DELETE")
}

/// Arrays repeat the key once per element; objects are sent as compact JSON.
fn query_values(value: &JsonValue) -> Vec<String> {
    match value {
        JsonValue::Array(items) => items.iter().map(scalar_text).collect(),
        other => vec![scalar_text(other)],
    }
}

fn scalar_text(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
