//! Deep merge for YAML settings documents.
//!
//! Used to fill omitted fields of a settings document from built-in defaults:
//! the document is merged field-by-field over the serialized defaults. Arrays
//! are replaced entirely, not concatenated.

use serde_json::Value;

/// Deep merge two JSON values, with `overlay` taking precedence over `base`.
///
/// - Objects are merged recursively: keys in overlay override keys in base
/// - Arrays, strings, numbers, booleans are replaced entirely
/// - If overlay is null, the base value is preserved (null means "not specified")
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = if let Some(base_value) = base_map.remove(&key) {
                    deep_merge(base_value, overlay_value)
                } else {
                    overlay_value
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (base, Value::Null) => base,
        (_, overlay) => overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn overlay_key_wins() {
        let base = json!({"editor": {"theme": "dark", "tab_size": 4}});
        let overlay = json!({"editor": {"theme": "sun"}});
        assert_eq!(
            deep_merge(base, overlay),
            json!({"editor": {"theme": "sun", "tab_size": 4}})
        );
    }

    #[test]
    fn sibling_sections_untouched() {
        let base = json!({"editor": {"theme": "dark"}, "git": {"auto_fetch": true}});
        let overlay = json!({"editor": {"font_size": 16}});
        assert_eq!(
            deep_merge(base, overlay),
            json!({
                "editor": {"theme": "dark", "font_size": 16},
                "git": {"auto_fetch": true}
            })
        );
    }

    #[test]
    fn arrays_replaced_not_concatenated() {
        let base = json!({"explorer": {"exclude_patterns": ["build/**", "target/**"]}});
        let overlay = json!({"explorer": {"exclude_patterns": ["dist/**"]}});
        assert_eq!(
            deep_merge(base, overlay),
            json!({"explorer": {"exclude_patterns": ["dist/**"]}})
        );
    }

    #[test]
    fn null_preserves_base() {
        let base = json!({"editor": {"theme": "dark"}});
        let overlay = json!({"editor": {"theme": null}});
        assert_eq!(deep_merge(base, overlay), json!({"editor": {"theme": "dark"}}));
    }

    #[test]
    fn scalar_replaced_by_object() {
        let base = json!({"languages": "none"});
        let overlay = json!({"languages": {"rust": {"tab_size": 4}}});
        assert_eq!(
            deep_merge(base, overlay),
            json!({"languages": {"rust": {"tab_size": 4}}})
        );
    }
}
