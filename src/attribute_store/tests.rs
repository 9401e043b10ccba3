// ═══════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════
mod attribute_store_tests {
    use crate::attribute_store::AttributeStore;
    use crate::error::AttributeError;
    use crate::kind::{self, TypedValue};
    use crate::raw_value::RawValue;
    use crate::serialization::encode;
    use crate::types::*;
    use crate::{deserialization::decode, raw_map};

    const ATTRIBUTES: &[AttributeDef] = &[
        AttributeDef::new("title", AttributeKind::String),
        AttributeDef::new("age", AttributeKind::Integer),
        AttributeDef::new("average", AttributeKind::Float),
        AttributeDef::new("birthday", AttributeKind::Timestamp),
        AttributeDef::new("active", AttributeKind::Boolean),
    ];
    const SCHEMA: Schema = Schema::new("Profile", ATTRIBUTES);

    fn loaded() -> AttributeStore {
        let blob = encode(&raw_map!({
            "title" => "abc",
            "age" => 5i64,
            "average" => 5.1,
            "birthday" => "2020-01-01T00:00:00Z",
            "active" => true,
        }))
        .unwrap();
        AttributeStore::load(SCHEMA, Some(blob.as_slice())).unwrap()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Schema
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_schema_lookup() {
        assert_eq!(SCHEMA.len(), 5);
        assert!(!SCHEMA.is_empty());
        assert!(Schema::new("Blank", &[]).is_empty());
        assert_eq!(SCHEMA.kind_of("age"), Some(AttributeKind::Integer));
        assert_eq!(SCHEMA.kind_of("foo"), None);
        assert!(SCHEMA.validate().is_ok());
    }

    #[test]
    fn test_schema_rejects_duplicates() {
        const DUP: &[AttributeDef] = &[
            AttributeDef::new("a", AttributeKind::String),
            AttributeDef::new("a", AttributeKind::Integer),
        ];
        let err = Schema::new("Dup", DUP).validate().unwrap_err();
        assert!(matches!(err, AttributeError::InvalidSchema(_)));
    }

    #[test]
    fn test_schema_rejects_empty_names() {
        const EMPTY: &[AttributeDef] = &[AttributeDef::new("", AttributeKind::String)];
        assert!(Schema::new("Empty", EMPTY).validate().is_err());
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Fresh store
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_new_store_is_empty() {
        let store = AttributeStore::new(SCHEMA);
        assert!(store.raw_data().is_empty());
        assert!(!store.changed());
        assert_eq!(store.get::<kind::String>("title"), None);
        assert_eq!(store.before_type_cast("title"), "");
        assert_eq!(store.before_type_cast("age"), "");
        assert_eq!(store.before_type_cast("birthday"), "");
        assert_eq!(store.before_type_cast("active"), "0");
    }

    #[test]
    fn test_load_absent_blob() {
        let store = AttributeStore::load(SCHEMA, None).unwrap();
        assert!(store.raw_data().is_empty());
        let store = AttributeStore::load(SCHEMA, Some(&[] as &[u8])).unwrap();
        assert!(store.raw_data().is_empty());
    }

    #[test]
    fn test_load_corrupt_blob_fails() {
        let err = AttributeStore::load(SCHEMA, Some(&[0xffu8, 0x00, 0x13][..])).unwrap_err();
        assert!(matches!(
            err,
            AttributeError::Decode(_) | AttributeError::NotAMap
        ));
    }

    #[test]
    fn test_reload_keeps_state_on_error() {
        let mut store = loaded();
        store.set::<kind::String>("title", "def");
        assert!(store.reload(Some(&b"\x19"[..])).is_err());
        assert_eq!(store.get::<kind::String>("title").as_deref(), Some("def"));
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Reads and writes
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_typed_reads() {
        let store = loaded();
        assert_eq!(store.get::<kind::String>("title").as_deref(), Some("abc"));
        assert_eq!(store.get::<kind::Integer>("age"), Some(5));
        assert_eq!(store.get::<kind::Float>("average"), Some(5.1));
        assert_eq!(store.get::<kind::Boolean>("active"), Some(true));
        let birthday = store.get::<kind::Timestamp>("birthday").unwrap();
        assert_eq!(birthday.to_rfc3339(), "2020-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_set_returns_cast_value() {
        let mut store = AttributeStore::new(SCHEMA);
        assert_eq!(store.set::<kind::Integer>("age", "abc"), Some(0));
        assert_eq!(store.set::<kind::Integer>("age", "1.2"), Some(1));
        assert_eq!(store.raw("age"), Some(&RawValue::from(1i64)));
        assert_eq!(store.set::<kind::Float>("average", "1.2"), Some(1.2));
        assert_eq!(store.set::<kind::String>("title", "abc"), Some("abc".into()));
        assert_eq!(store.set::<kind::Integer>("age", ""), None);
    }

    #[test]
    fn test_clearing_removes_keys() {
        let mut store = loaded();
        store.set::<kind::String>("title", None::<&str>);
        store.set::<kind::Integer>("age", "");
        store.set::<kind::Timestamp>("birthday", "  ");
        store.set::<kind::Boolean>("active", ());
        assert!(!store.is_set("title"));
        assert!(!store.is_set("age"));
        assert!(!store.is_set("birthday"));
        assert!(!store.is_set("active"));
        assert!(store.is_set("average"));
    }

    #[test]
    fn test_boolean_false_is_kept() {
        let mut store = loaded();
        assert_eq!(store.set::<kind::Boolean>("active", 0), Some(false));
        assert_eq!(store.raw("active"), Some(&RawValue::Bool(false)));
        assert_eq!(store.set::<kind::Boolean>("active", "1"), Some(true));
        assert_eq!(store.set::<kind::Boolean>("active", false), Some(false));
        assert!(store.is_set("active"));
    }

    #[test]
    fn test_before_type_cast_is_verbatim() {
        let mut store = AttributeStore::new(SCHEMA);
        store.set::<kind::Integer>("age", "5.5");
        store.set::<kind::Boolean>("active", 1);
        assert_eq!(store.before_type_cast("age"), "5.5");
        assert_eq!(store.before_type_cast("active"), "1");
        store.set::<kind::Boolean>("active", ());
        assert_eq!(store.before_type_cast("active"), "0");
    }

    #[test]
    fn test_dynamic_write_and_read() {
        let mut store = AttributeStore::new(SCHEMA);
        assert_eq!(
            store.write("age", "7.9").unwrap(),
            Some(TypedValue::Integer(7))
        );
        assert_eq!(store.read("age").unwrap(), Some(TypedValue::Integer(7)));
        assert_eq!(
            store.write("active", "no").unwrap().map(|v| v.kind()),
            Some(AttributeKind::Boolean)
        );
        assert_eq!(store.read("title").unwrap(), None);
        assert!(matches!(
            store.write("nope", "x"),
            Err(AttributeError::UnknownAttribute(_))
        ));
        assert!(store.read("nope").is_err());
    }

    #[test]
    fn test_typed_access_requires_declared_kind() {
        let mut store = loaded();
        assert_eq!(store.set::<kind::String>("age", "x"), None);
        assert_eq!(store.raw("age"), Some(&RawValue::from(5i64)));
        assert_eq!(store.get::<kind::String>("age"), None);
        assert_eq!(store.before_type_cast("age"), "");
        assert!(!store.changed());

        let blob = encode(&raw_map!({ "foo" => "bar" })).unwrap();
        let mut store = AttributeStore::load(SCHEMA, Some(blob.as_slice())).unwrap();
        assert_eq!(store.set::<kind::String>("foo", "baz"), None);
        assert_eq!(store.raw("foo"), Some(&RawValue::from("bar")));
        assert_eq!(store.change::<kind::String>("foo"), None);
    }

    #[test]
    fn test_clear() {
        let mut store = loaded();
        store.clear("title");
        assert!(!store.is_set("title"));
        assert_eq!(store.before_type_cast("title"), "");
        assert_eq!(store.changed_keys(), vec!["title"]);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Change tracking
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_untouched_store_is_unchanged() {
        let store = loaded();
        assert!(!store.changed());
        assert!(store.changed_keys().is_empty());
        assert!(!store.attribute_changed("title"));
        assert_eq!(store.change::<kind::String>("title"), None);
    }

    #[test]
    fn test_changed_keys_are_sorted() {
        let mut store = loaded();
        store.set::<kind::String>("title", "def");
        store.set::<kind::Integer>("age", 6);
        assert!(store.changed());
        assert_eq!(store.changed_keys(), vec!["age", "title"]);
        assert_eq!(
            store.change::<kind::String>("title"),
            Some((Some("abc".to_string()), Some("def".to_string())))
        );
        assert_eq!(store.change::<kind::Integer>("age"), Some((Some(5), Some(6))));
    }

    #[test]
    fn test_setting_same_value_is_not_a_change() {
        let mut store = loaded();
        store.set::<kind::Integer>("age", "5");
        store.set::<kind::Boolean>("active", "1");
        assert!(!store.changed());
    }

    #[test]
    fn test_non_finite_floats_settle_after_flush() {
        let mut store = loaded();
        assert_eq!(store.set::<kind::Float>("average", f64::NAN), Some(0.0));
        store.flush().unwrap();
        assert!(!store.changed());
        assert!(store.changed_keys().is_empty());

        let blob = encode(&raw_map!({ "average" => f64::NAN })).unwrap();
        let store = AttributeStore::load(SCHEMA, Some(blob.as_slice())).unwrap();
        assert!(store.get::<kind::Float>("average").is_some_and(f64::is_nan));
        assert!(!store.changed());
    }

    #[test]
    fn test_changes_cover_adds_and_removes() {
        let mut store = loaded();
        store.set::<kind::String>("title", None::<String>);
        store.restore();
        assert!(!store.changed());

        let mut store = AttributeStore::new(SCHEMA);
        store.set::<kind::String>("title", "new");
        let changes: Vec<_> = store.changes().collect();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].1, None);
        assert_eq!(changes[0].2, Some(&RawValue::from("new")));
        assert_eq!(
            store.change::<kind::String>("title"),
            Some((None, Some("new".to_string())))
        );

        let mut store = loaded();
        store.set::<kind::Float>("average", "");
        let changes: Vec<_> = store.changes().collect();
        assert_eq!(changes.len(), 1);
        let (key, old, new) = changes[0];
        assert_eq!(key, "average");
        assert_eq!(old, Some(&RawValue::from(5.1)));
        assert_eq!(new, None);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Flush
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_flush_resets_baseline() {
        let mut store = loaded();
        store.set::<kind::Integer>("age", "5.5");
        store.set::<kind::Timestamp>("birthday", None::<&str>);
        let blob = store.flush().unwrap();
        assert!(!store.changed());
        assert_eq!(
            decode(Some(blob.as_slice())).unwrap(),
            raw_map!({
                "title" => "abc",
                "age" => 5i64,
                "average" => 5.1,
                "active" => true,
            })
        );
        // shadow survives a flush
        assert_eq!(store.before_type_cast("age"), "5.5");
    }

    #[test]
    fn test_unknown_keys_pass_through() {
        let blob = encode(&raw_map!({ "title" => "abc", "foo" => "bar" })).unwrap();
        let mut store = AttributeStore::load(SCHEMA, Some(blob.as_slice())).unwrap();
        assert_eq!(store.get::<kind::String>("title").as_deref(), Some("abc"));
        store.set::<kind::Integer>("age", 1);
        let blob = store.flush().unwrap();
        assert_eq!(
            decode(Some(blob.as_slice())).unwrap(),
            raw_map!({ "title" => "abc", "foo" => "bar", "age" => 1i64 })
        );
    }

    #[test]
    fn test_json_format_store() {
        let config = AttributeConfig {
            format: BlobFormat::Json,
            ..AttributeConfig::default()
        };
        let mut store = AttributeStore::with_config(SCHEMA, config);
        store.set::<kind::String>("title", "abc");
        store.set::<kind::Boolean>("active", "0");
        let blob = store.flush().unwrap();
        assert_eq!(blob, br#"{"active":false,"title":"abc"}"#);

        let reloaded = AttributeStore::load_with_config(SCHEMA, config, Some(blob.as_slice())).unwrap();
        assert_eq!(reloaded.get::<kind::Boolean>("active"), Some(false));
    }

    #[test]
    fn test_json_store_round_trips_overflowing_floats() {
        let config = AttributeConfig {
            format: BlobFormat::Json,
            ..AttributeConfig::default()
        };
        let mut store = AttributeStore::with_config(SCHEMA, config);
        assert_eq!(store.set::<kind::Float>("average", "1e400"), Some(0.0));
        let blob = store.flush().unwrap();
        let reloaded = AttributeStore::load_with_config(SCHEMA, config, Some(blob.as_slice())).unwrap();
        assert_eq!(reloaded.get::<kind::Float>("average"), Some(0.0));
        assert_eq!(reloaded.raw_data(), store.raw_data());
    }
}
