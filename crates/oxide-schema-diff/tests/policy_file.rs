mod common;

use std::io::Write;

use common::*;
use oxide_schema_diff::prelude::*;
use tempfile::NamedTempFile;

fn policy_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_policy_and_diff() {
    let file = policy_file(
        r#"{
            "table": {"remove": true},
            "column": {"append": true, "names": ["will_be_change"]},
            "index": {"diff": true}
        }"#,
    );
    let policy = IgnorePolicy::from_json_file(file.path()).unwrap();
    assert!(policy.table.options.engine);
    assert!(policy.index.options);

    let changes = diff(SOURCE_SQL, TARGET_SQL, &policy);
    assert!(!changes.iter().any(|c| matches!(c, ChangeStatement::DropTable(_))));
    assert_eq!(
        alter_specs(&changes, "t1"),
        vec![
            "DROP COLUMN `will_be_delete`",
            "DROP INDEX `will_be_delete_idx`",
            "ADD KEY `will_be_append_idx` (`will_be_append`)",
        ]
    );
}

#[test]
fn test_empty_policy_file_is_default() {
    let file = policy_file("{}");
    let policy = IgnorePolicy::from_json_file(file.path()).unwrap();
    assert_eq!(
        rendered(&diff(SOURCE_SQL, TARGET_SQL, &policy)),
        rendered(&diff(SOURCE_SQL, TARGET_SQL, &IgnorePolicy::default()))
    );
}

#[test]
fn test_policy_round_trips_through_json() {
    let mut policy = IgnorePolicy::none().ignore_column("updated_at");
    policy.set_flag("index.append").unwrap();
    let file = policy_file(&serde_json::to_string_pretty(&policy).unwrap());
    let loaded = IgnorePolicy::from_json_file(file.path()).unwrap();
    assert_eq!(loaded.table, policy.table);
    assert_eq!(loaded.column, policy.column);
    assert_eq!(loaded.index, policy.index);
}

#[test]
fn test_policy_file_errors() {
    let file = policy_file(r#"{"column": {"diff": "yes"}}"#);
    assert!(matches!(
        IgnorePolicy::from_json_file(file.path()),
        Err(DiffError::Policy(_))
    ));

    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        IgnorePolicy::from_json_file(dir.path().join("missing.json")),
        Err(DiffError::Io(_))
    ));
}
