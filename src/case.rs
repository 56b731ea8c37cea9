//! Key case conversion between storage (snake_case columns) and the wire (camelCase).

use serde_json::{Map, Value};

/// "avatar_url" -> "avatarUrl", "created_at" -> "createdAt".
pub fn to_camel_case(s: &str) -> String {
    let mut parts = s.split('_').filter(|p| !p.is_empty());
    let mut out = parts.next().unwrap_or_default().to_string();
    for part in parts {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Rename the top-level keys of a stored row for API output. Non-objects pass through.
pub fn row_to_wire(row: Value) -> Value {
    match row {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (to_camel_case(&k), v))
                .collect::<Map<String, Value>>(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converts_column_names() {
        assert_eq!(to_camel_case("md_url"), "mdUrl");
        assert_eq!(to_camel_case("block_reason"), "blockReason");
        assert_eq!(to_camel_case("title"), "title");
    }

    #[test]
    fn row_keys_are_renamed_but_values_kept() {
        let row = json!({ "author_id": "a", "tags": ["x_y"] });
        assert_eq!(row_to_wire(row), json!({ "authorId": "a", "tags": ["x_y"] }));
    }
}
