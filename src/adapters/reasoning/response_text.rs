//! Flattening of reasoning-service JSON responses into plain text.

use serde_json::Value;

/// Fields holding the answer, in order of preference.
const ANSWER_FIELDS: [&str; 4] = ["result", "output", "content", "text"];

/// Flattens a decoded response body into text.
///
/// Objects prefer the first non-empty answer field, then a `data` field, then
/// fall back to `key: value` lines. Arrays join their non-empty elements.
pub fn flatten_response(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Object(map) => {
            if let Some(answer) = ANSWER_FIELDS
                .iter()
                .filter_map(|key| map.get(*key))
                .find(|v| is_present(v))
            {
                return flatten_response(answer);
            }
            if let Some(data) = map.get("data") {
                return flatten_response(data);
            }
            map.iter()
                .filter(|(_, v)| is_present(v))
                .map(|(k, v)| format!("{}: {}", k, flatten_response(v)))
                .collect::<Vec<_>>()
                .join("\n")
        }
        Value::Array(items) => items
            .iter()
            .filter(|v| is_present(v))
            .map(flatten_response)
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
    }
}

/// Decodes a raw body and flattens it.
pub fn decode_body(body: &str) -> Result<String, serde_json::Error> {
    let value: Value = serde_json::from_str(body)?;
    Ok(flatten_response(&value))
}

/// Empty strings, arrays, objects, `false`, zero and null count as absent.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
