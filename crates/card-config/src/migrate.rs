//! One-shot migration of legacy configuration shapes
//!
//! Older card versions controlled the background through three independent
//! keys (`use_background_image`, `show_background_circle`,
//! `background_settings`). Migration reconstructs the single
//! `background_type` discriminator from them, strips the legacy keys, and
//! reports whether anything changed so the host can persist the new shape.

use serde_json::{Map, Value};
use tracing::debug;

/// Legacy keys stripped from every migrated configuration
const LEGACY_KEYS: &[&str] = &[
    "show_background_circle",
    "use_background_image",
    "background_settings",
];

/// Migrate a raw configuration object to the canonical shape.
///
/// Returns the canonical value and whether migration changed anything.
/// The flag also covers legacy keys that were present but did not affect
/// the derived type; their removal still needs to be persisted.
///
/// Never fails: non-object values pass through unchanged, and malformed
/// legacy fields are treated as unset. Idempotent: migrating a migrated
/// value reports `changed == false`.
pub fn migrate(raw: Value) -> (Value, bool) {
    let mut config = match raw {
        Value::Object(config) => config,
        other => return (other, false),
    };

    let raw_type = config
        .get("background_type")
        .and_then(Value::as_str)
        .map(str::to_string);

    // A present, non-empty background_type is kept verbatim; migration
    // derives one only when the discriminator is absent or empty.
    let background_type = match raw_type.as_deref() {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => {
            let derived = derive_background_type(&config);
            debug!(background_type = derived, "derived background type from legacy keys");
            derived.to_string()
        }
    };

    let had_legacy = LEGACY_KEYS.iter().any(|key| config.contains_key(*key));
    for key in LEGACY_KEYS {
        config.remove(*key);
    }

    let changed = had_legacy || raw_type.as_deref() != Some(background_type.as_str());
    config.insert(
        "background_type".to_string(),
        Value::String(background_type),
    );

    (Value::Object(config), changed)
}

/// The legacy decision tree, evaluated only when `background_type` is unset
fn derive_background_type(config: &Map<String, Value>) -> &'static str {
    if config.get("use_background_image").and_then(Value::as_bool) == Some(true) {
        if is_truthy(config.get("background_person_entity")) {
            "person"
        } else if is_truthy(config.get("background_image")) {
            "image"
        } else {
            "color"
        }
    } else if config.get("show_background_circle").and_then(Value::as_bool) == Some(false) {
        "none"
    } else {
        "color"
    }
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bg(value: &Value) -> &str {
        value["background_type"].as_str().unwrap()
    }

    #[test]
    fn test_legacy_mapping_table() {
        let cases = [
            (
                json!({"use_background_image": true, "background_person_entity": "person.bob"}),
                "person",
            ),
            (
                json!({"use_background_image": true, "background_image": "/local/a.png"}),
                "image",
            ),
            (json!({"use_background_image": true}), "color"),
            (json!({"show_background_circle": false}), "none"),
            (json!({}), "color"),
        ];

        for (raw, expected) in cases {
            let (canonical, _) = migrate(raw.clone());
            assert_eq!(bg(&canonical), expected, "raw: {raw}");
        }
    }

    #[test]
    fn test_person_wins_over_image() {
        let (canonical, changed) = migrate(json!({
            "use_background_image": true,
            "background_person_entity": "person.bob",
            "background_image": "/local/a.png",
        }));
        assert_eq!(bg(&canonical), "person");
        assert!(changed);
        // The image path is retained for round-tripping
        assert_eq!(canonical["background_image"], json!("/local/a.png"));
    }

    #[test]
    fn test_legacy_keys_never_survive() {
        let (canonical, _) = migrate(json!({
            "background_type": "image",
            "use_background_image": true,
            "show_background_circle": true,
            "background_settings": {"old": "stuff"},
        }));

        let obj = canonical.as_object().unwrap();
        for key in LEGACY_KEYS {
            assert!(!obj.contains_key(*key), "{key} survived migration");
        }
    }

    #[test]
    fn test_existing_type_kept_verbatim() {
        let (canonical, changed) = migrate(json!({
            "background_type": "none",
            "background_image": "/local/a.png",
        }));
        assert_eq!(bg(&canonical), "none");
        assert!(!changed);
    }

    #[test]
    fn test_empty_type_is_rederived() {
        let (canonical, changed) = migrate(json!({
            "background_type": "",
            "use_background_image": true,
            "background_image": "/local/a.png",
        }));
        assert_eq!(bg(&canonical), "image");
        assert!(changed);
    }

    #[test]
    fn test_legacy_presence_alone_counts_as_changed() {
        // Type already canonical, but a leftover legacy key still needs a save
        let (_, changed) = migrate(json!({
            "background_type": "color",
            "background_settings": {"circle": true},
        }));
        assert!(changed);

        let (_, changed) = migrate(json!({
            "background_type": "color",
            "show_background_circle": true,
        }));
        assert!(changed);
    }

    #[test]
    fn test_idempotent() {
        let raws = [
            json!({"use_background_image": true, "background_image": "/local/a.png"}),
            json!({"show_background_circle": false}),
            json!({}),
            json!({"background_type": "person", "background_person_entity": "person.a"}),
        ];

        for raw in raws {
            let (canonical, _) = migrate(raw);
            let (again, changed) = migrate(canonical.clone());
            assert!(!changed, "second migration changed {canonical}");
            assert_eq!(again, canonical);
        }
    }

    #[test]
    fn test_malformed_legacy_fields_fall_through() {
        // Wrong types are treated as unset and fall through to color
        let (canonical, _) = migrate(json!({
            "use_background_image": "yes",
            "show_background_circle": "nope",
        }));
        assert_eq!(bg(&canonical), "color");
    }

    #[test]
    fn test_non_object_passes_through() {
        let (value, changed) = migrate(json!("not a config"));
        assert_eq!(value, json!("not a config"));
        assert!(!changed);
    }
}
