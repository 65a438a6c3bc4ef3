//! Text rendering of call outcomes for terminal output.

use serde_json::{Map, Value};

/// Formats a success payload for display.
///
/// Strings are shown verbatim. Objects lose their null and empty-string
/// entries and are pretty-printed; other values are pretty-printed as is.
pub fn format_entity_details(payload: &Value) -> String {
    match payload {
        Value::String(text) => text.clone(),
        Value::Object(entries) => {
            let kept: Map<String, Value> = entries
                .iter()
                .filter(|(_, value)| !is_blank(value))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();
            pretty(&Value::Object(kept))
        }
        other => pretty(other),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        _ => false,
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
