use serde::Deserialize;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

use jsonc_include::{
    from_file, from_file_with_options, from_str, from_str_with_options, Error, LoadOptions, Value,
};

fn write(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn test_comments_and_trailing_commas() {
    let value: Value = from_str(
        r#"{
            // a line comment
            "a": 1, /* and a block one */
            "b": ["x", "y", ],
        }"#,
    )
    .unwrap();
    assert_eq!(value, json!({"a": 1, "b": ["x", "y"]}));
}

#[test]
fn test_include_precedence() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "b.json", r#"{"x": 2, "y": 3}"#);
    let a = write(
        dir.path(),
        "a.json",
        r#"{"x": 1, "_include_json": "b.json"}"#,
    );

    // A's explicit value for a shared key wins; B's unique keys fill in.
    // The directive key stays unless removal is requested.
    let value: Value = from_file(&a).unwrap();
    assert_eq!(
        value,
        json!({"x": 1, "_include_json": "b.json", "y": 3})
    );
}

#[test]
fn test_later_include_wins_unresolved_collisions() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "b.json", r#"{"z": "from-b", "only_b": 1}"#);
    write(dir.path(), "c.json", r#"{"z": "from-c", "only_c": 2}"#);
    let a = write(
        dir.path(),
        "a.json",
        r#"{
            "kept": true,
            "_include_json1": "b.json",
            "_include_json2": "c.json"
        }"#,
    );

    let options = LoadOptions::new().with_remove_include_keys(true);
    let value: Value = from_file_with_options(&a, &options).unwrap();
    assert_eq!(
        value,
        json!({"kept": true, "z": "from-c", "only_b": 1, "only_c": 2})
    );
}

#[test]
fn test_nested_include_chain() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "c.json", r#"{"x": "c", "y": "c", "z": "c"}"#);
    write(
        dir.path(),
        "b.json",
        r#"{"x": "b", "y": "b", "_include_json": "c.json"}"#,
    );
    let a = write(
        dir.path(),
        "a.json",
        r#"{"x": "a", "_include_json": "b.json"}"#,
    );

    // Each file beats everything it includes: A > B > C.
    let options = LoadOptions::new().with_remove_include_keys(true);
    let value: Value = from_file_with_options(&a, &options).unwrap();
    assert_eq!(value, json!({"x": "a", "y": "b", "z": "c"}));
}

#[test]
fn test_includes_resolve_relative_to_including_file() {
    let dir = tempfile::tempdir().unwrap();
    // b.json lives in a subdirectory and names c.json relative to itself.
    write(dir.path(), "sub/c.json", r#"{"deep": true}"#);
    write(
        dir.path(),
        "sub/b.json",
        r#"{"_include_json": "c.json"}"#,
    );
    let a = write(
        dir.path(),
        "a.json",
        r#"{"_include_json": "sub/b.json"}"#,
    );

    let options = LoadOptions::new().with_remove_include_keys(true);
    let value: Value = from_file_with_options(&a, &options).unwrap();
    assert_eq!(value, json!({"deep": true}));
}

#[test]
fn test_includes_in_nested_containers() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "item.json", r#"{"kind": "widget"}"#);
    write(dir.path(), "inner.json", r#"{"level": 3}"#);
    let a = write(
        dir.path(),
        "a.json",
        r#"{
            "items": [{"_include_json": "item.json", "id": 1}, 7],
            "outer": {"middle": {"_include_json": "inner.json"}}
        }"#,
    );

    let options = LoadOptions::new().with_remove_include_keys(true);
    let value: Value = from_file_with_options(&a, &options).unwrap();
    assert_eq!(
        value,
        json!({
            "items": [{"id": 1, "kind": "widget"}, 7],
            "outer": {"middle": {"level": 3}}
        })
    );
}

#[test]
fn test_from_str_uses_base_dir() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "b.json", r#"{"y": 3}"#);

    let options = LoadOptions::new()
        .with_base_dir(dir.path())
        .with_remove_include_keys(true);
    let value: Value =
        from_str_with_options(r#"{"x": 1, "_include_json": "b.json"}"#, &options).unwrap();
    assert_eq!(value, json!({"x": 1, "y": 3}));
}

#[test]
fn test_commented_include_files() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "b.json",
        "{\n  \"y\": 3, // filled in\n}",
    );
    let a = write(
        dir.path(),
        "a.json",
        "{\n  /* base */ \"_include_json\": \"b.json\",\n}",
    );

    let options = LoadOptions::new().with_remove_include_keys(true);
    let value: Value = from_file_with_options(&a, &options).unwrap();
    assert_eq!(value, json!({"y": 3}));
}

#[test]
fn test_typed_config_end_to_end() {
    #[derive(Deserialize, Debug, PartialEq)]
    struct ServerConfig {
        host: String,
        port: u16,
    }

    #[derive(Deserialize, Debug, PartialEq)]
    struct AppConfig {
        name: String,
        workers: u32,
        server: ServerConfig,
    }

    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "defaults.json",
        r#"{"workers": 4, "server": {"host": "0.0.0.0", "port": 80}}"#,
    );
    let a = write(
        dir.path(),
        "app.json",
        r#"{
            "name": "demo", // service name
            "server": {"host": "localhost"},
            "_include_json": "defaults.json",
        }"#,
    );

    let options = LoadOptions::new().with_remove_include_keys(true);
    let config: AppConfig = from_file_with_options(&a, &options).unwrap();
    assert_eq!(
        config,
        AppConfig {
            name: "demo".to_string(),
            workers: 4,
            server: ServerConfig {
                host: "localhost".to_string(),
                port: 80,
            },
        }
    );
}

#[test]
fn test_keep_top_values_disabled() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "b.json", r#"{"x": 2}"#);
    let a = write(
        dir.path(),
        "a.json",
        r#"{"x": 1, "_include_json": "b.json"}"#,
    );

    let options = LoadOptions::new()
        .with_keep_top_values(false)
        .with_remove_include_keys(true);
    let value: Value = from_file_with_options(&a, &options).unwrap();
    assert_eq!(value, json!({"x": 2}));
}

#[test]
fn test_custom_include_key() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "b.json", r#"{"y": 3}"#);
    let a = write(
        dir.path(),
        "a.json",
        r#"{"$import": "b.json", "_include_json": "untouched"}"#,
    );

    let options = LoadOptions::new()
        .with_include_key("$import")
        .with_remove_include_keys(true);
    let value: Value = from_file_with_options(&a, &options).unwrap();
    // Only the configured marker is a directive; the default-looking key
    // is ordinary data here.
    assert_eq!(value, json!({"_include_json": "untouched", "y": 3}));
}

#[test]
fn test_remove_include_keys_noop_without_directives() {
    let options = LoadOptions::new().with_remove_include_keys(true);
    let value: Value =
        from_str_with_options(r#"{"a": 1, "b": {"c": 2}}"#, &options).unwrap();
    assert_eq!(value, json!({"a": 1, "b": {"c": 2}}));
}

#[test]
fn test_included_file_must_be_object() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "list.json", r#"[1, 2, 3]"#);
    let a = write(
        dir.path(),
        "a.json",
        r#"{"_include_json": "list.json"}"#,
    );

    let err = from_file::<Value>(&a).unwrap_err();
    assert!(matches!(err, Error::IncludedNotObject { .. }));
}

#[test]
fn test_included_scalar_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "num.json", "42");
    let a = write(dir.path(), "a.json", r#"{"_include_json": "num.json"}"#);

    let err = from_file::<Value>(&a).unwrap_err();
    assert!(matches!(err, Error::IncludedNotObject { .. }));
}

#[test]
fn test_top_level_array_root_is_fine() {
    // Only files reached through a directive must be object-rooted.
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "item.json", r#"{"kind": "widget"}"#);
    let a = write(
        dir.path(),
        "list.json",
        r#"[{"_include_json": "item.json"}]"#,
    );

    let options = LoadOptions::new().with_remove_include_keys(true);
    let value: Value = from_file_with_options(&a, &options).unwrap();
    assert_eq!(value, json!([{"kind": "widget"}]));
}

#[test]
fn test_missing_include_file() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(
        dir.path(),
        "a.json",
        r#"{"_include_json": "no_such_file.json"}"#,
    );

    let err = from_file::<Value>(&a).unwrap_err();
    match err {
        Error::Io { path, .. } => {
            assert!(path.ends_with("no_such_file.json"));
        }
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn test_syntax_error_in_included_file() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "bad.json", r#"{"y": }"#);
    let a = write(dir.path(), "a.json", r#"{"_include_json": "bad.json"}"#);

    let err = from_file::<Value>(&a).unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn test_merge_conflict_between_file_and_include() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "b.json", r#"{"x": [1, 2]}"#);
    let a = write(
        dir.path(),
        "a.json",
        r#"{"x": {"a": 1}, "_include_json": "b.json"}"#,
    );

    let err = from_file::<Value>(&a).unwrap_err();
    assert!(matches!(err, Error::MergeConflict { .. }));
}

#[test]
fn test_include_cycle_detected() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.json", r#"{"_include_json": "b.json"}"#);
    write(dir.path(), "b.json", r#"{"_include_json": "a.json"}"#);

    let err = from_file::<Value>(dir.path().join("a.json")).unwrap_err();
    match err {
        Error::CircularInclude { chain } => {
            assert!(chain.contains("a.json"));
            assert!(chain.contains("b.json"));
        }
        other => panic!("expected CircularInclude, got {other:?}"),
    }
}

#[test]
fn test_self_include_detected() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.json", r#"{"_include_json": "a.json"}"#);

    let err = from_file::<Value>(&a).unwrap_err();
    assert!(matches!(err, Error::CircularInclude { .. }));
}

#[test]
fn test_repeated_include_is_not_a_cycle() {
    // The same file pulled in at two sibling positions is re-read twice;
    // only re-entering a file still being loaded is a cycle.
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "shared.json", r#"{"s": 1}"#);
    let a = write(
        dir.path(),
        "a.json",
        r#"{
            "left": {"_include_json": "shared.json"},
            "right": {"_include_json": "shared.json"}
        }"#,
    );

    let options = LoadOptions::new().with_remove_include_keys(true);
    let value: Value = from_file_with_options(&a, &options).unwrap();
    assert_eq!(value, json!({"left": {"s": 1}, "right": {"s": 1}}));
}
