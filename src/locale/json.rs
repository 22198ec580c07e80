//! JSON locale file decoding

use std::collections::BTreeMap;

use serde_json::Value;

/// Flatten a JSON locale document into a canonical → localized map.
///
/// Top-level string members are taken as-is. Nested objects are joined with
/// `separator`, so `{"Buttons": {"Edit": "Bearbeiten"}}` yields
/// `Buttons.Edit`. `null` marks an untranslated entry and is skipped, as are
/// arrays. Numbers and booleans are kept in their JSON spelling.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use wiki_translation::locale::flatten_table;
///
/// let json = json!({
///     "HomePage": "Startseite",
///     "Buttons": { "Edit": "Bearbeiten" }
/// });
///
/// let table = flatten_table(&json, ".");
/// assert_eq!(table.get("HomePage"), Some(&"Startseite".to_string()));
/// assert_eq!(table.get("Buttons.Edit"), Some(&"Bearbeiten".to_string()));
/// ```
#[must_use]
pub fn flatten_table(json: &Value, separator: &str) -> BTreeMap<String, String> {
    let mut result = BTreeMap::new();
    flatten_value(json, separator, None, &mut result);
    result
}

/// Recursive worker for [`flatten_table`].
fn flatten_value(
    json: &Value,
    separator: &str,
    prefix: Option<&str>,
    result: &mut BTreeMap<String, String>,
) {
    match json {
        Value::Object(map) => {
            for (key, value) in map {
                let full_key =
                    prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));
                flatten_value(value, separator, Some(&full_key), result);
            }
        }
        Value::String(s) => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), s.clone());
            }
        }
        Value::Null => {}
        Value::Array(_) => {
            tracing::debug!(key = ?prefix, "Skipping array value in locale table");
        }
        Value::Bool(_) | Value::Number(_) => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), json.to_string());
            }
        }
    }
}
