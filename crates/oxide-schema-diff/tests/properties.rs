mod common;

use common::*;
use oxide_schema_diff::prelude::*;

fn policies() -> Vec<IgnorePolicy> {
    let mut everything = IgnorePolicy::none();
    for flag in IGNORE_FLAGS {
        everything.set_flag(flag).unwrap();
    }
    vec![
        IgnorePolicy::default(),
        IgnorePolicy::none(),
        everything,
        IgnorePolicy::default().ignore_column("normal"),
    ]
}

fn with_flag(flag: &str) -> IgnorePolicy {
    let mut policy = IgnorePolicy::default();
    policy.set_flag(flag).unwrap();
    policy
}

#[test]
fn test_idempotence() {
    for policy in policies() {
        for sql in [SOURCE_SQL, TARGET_SQL] {
            let changes = diff(sql, sql, &policy);
            assert!(changes.is_empty(), "{policy:?}: {changes:?}");
        }
    }
}

#[test]
fn test_existence_symmetry() {
    let changes = diff(SOURCE_SQL, TARGET_SQL, &IgnorePolicy::default());
    let drops: Vec<_> = changes
        .iter()
        .filter(|c| matches!(c, ChangeStatement::DropTable(_)))
        .map(|c| c.table_name().name.clone())
        .collect();
    let creates: Vec<_> = changes
        .iter()
        .filter(|c| matches!(c, ChangeStatement::CreateTable(_)))
        .map(|c| c.table_name().name.clone())
        .collect();
    assert_eq!(drops, vec!["only_source"]);
    assert_eq!(creates, vec!["only_target"]);

    let changes = diff(SOURCE_SQL, TARGET_SQL, &with_flag("table.remove"));
    assert!(!changes.iter().any(|c| matches!(c, ChangeStatement::DropTable(_))));
    assert_eq!(changes.len(), 3);

    let changes = diff(SOURCE_SQL, TARGET_SQL, &with_flag("table.append"));
    assert!(!changes.iter().any(|c| matches!(c, ChangeStatement::CreateTable(_))));
    assert_eq!(changes.len(), 3);

    let changes = diff(SOURCE_SQL, TARGET_SQL, &with_flag("table.diff"));
    assert_eq!(
        rendered(&changes)[0],
        "DROP TABLE `only_source`",
        "{changes:?}"
    );
    assert_eq!(changes.len(), 2);
}

#[test]
fn test_flag_suppresses_only_its_category() {
    let full = alter_specs(
        &diff(SOURCE_SQL, TARGET_SQL, &IgnorePolicy::default()),
        "t1",
    );
    let cases: [(&str, fn(&str) -> bool); 6] = [
        ("column.diff", |s| s.starts_with("MODIFY")),
        ("column.remove", |s| s.starts_with("DROP COLUMN")),
        ("column.append", |s| s.starts_with("ADD COLUMN")),
        ("index.remove", |s| s == "DROP INDEX `will_be_delete_idx`"),
        ("index.append", |s| s.contains("will_be_append_idx")),
        ("index.diff", |s| {
            s.contains("PRIMARY") || s.contains("will_be_change_idx") || s.contains("will_be_change2_idx")
        }),
    ];
    for (flag, suppressed) in cases {
        let expected: Vec<String> = full.iter().filter(|s| !suppressed(s.as_str())).cloned().collect();
        assert_ne!(expected, full, "{flag} suppresses nothing in the fixture");
        let changes = diff(SOURCE_SQL, TARGET_SQL, &with_flag(flag));
        assert_eq!(alter_specs(&changes, "t1"), expected, "{flag}");
    }
}

#[test]
fn test_column_comment_flag() {
    let source = "CREATE TABLE t (a INT COMMENT 'old', b INT)";
    let target = "CREATE TABLE t (a INT COMMENT 'new', b INT NULL)";
    let changes = diff(source, target, &IgnorePolicy::default());
    assert_eq!(
        alter_specs(&changes, "t"),
        vec!["MODIFY COLUMN `a` INT COMMENT 'new'"]
    );
    assert!(diff(source, target, &with_flag("column.comment")).is_empty());

    let changes = diff(source, target, &IgnorePolicy::none());
    assert_eq!(alter_specs(&changes, "t").len(), 2);
}

#[test]
fn test_option_reassertion_uses_full_target_list() {
    let changes = diff(SOURCE_SQL, TARGET_SQL, &IgnorePolicy::none());
    let specs = alter_specs(&changes, "t1");
    assert_eq!(
        specs.last().map(String::as_str),
        Some("ENGINE=InnoDB AUTO_INCREMENT=42 DEFAULT CHARSET=utf8mb4")
    );

    let source = "CREATE TABLE t (a INT) ENGINE=MyISAM COMMENT='x'";
    let target = "CREATE TABLE t (a INT) ENGINE=InnoDB ROW_FORMAT=DYNAMIC COMMENT='y'";
    let changes = diff(source, target, &IgnorePolicy::default());
    assert_eq!(
        alter_specs(&changes, "t"),
        vec!["ENGINE=InnoDB ROW_FORMAT=DYNAMIC COMMENT='y'"]
    );
}

#[test]
fn test_dropped_table_comment_converges() {
    let source = "CREATE TABLE t (a INT) COMMENT='x'";
    let target = "CREATE TABLE t (a INT)";
    for policy in [IgnorePolicy::default(), IgnorePolicy::none()] {
        let changes = diff(source, target, &policy);
        assert_eq!(rendered(&changes), vec!["ALTER TABLE `t` COMMENT=''"], "{policy:?}");

        let migrated = snapshot(&format!("{source};\n{}", to_sql_script(&changes)));
        let remaining = diff_snapshots(&migrated, &snapshot(target), &policy);
        assert!(remaining.is_empty(), "{policy:?}: {remaining:?}");
    }
}

#[test]
fn test_table_option_flags_suppress_only_options() {
    let cases = [
        ("table.option.engine", "ENGINE=InnoDB", "ENGINE=MyISAM"),
        (
            "table.option.charset",
            "CHARACTER SET = latin1",
            "DEFAULT CHARSET=utf8mb4",
        ),
        ("table.option.row_format", "ROW_FORMAT=COMPACT", "ROW_FORMAT=DYNAMIC"),
        ("table.option.auto_increment", "AUTO_INCREMENT=5", "AUTO_INCREMENT=9"),
    ];
    for (flag, source_option, target_option) in cases {
        let source = format!("CREATE TABLE t (a INT) {source_option}");
        let target = format!("CREATE TABLE t (a BIGINT) {target_option}");
        let modify = "MODIFY COLUMN `a` BIGINT".to_string();

        let changes = diff(&source, &target, &IgnorePolicy::none());
        let expected_options = snapshot(&target).tables["t"]
            .options
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(
            alter_specs(&changes, "t"),
            vec![modify.clone(), expected_options],
            "{flag}"
        );

        let mut policy = IgnorePolicy::none();
        policy.set_flag(flag).unwrap();
        let changes = diff(&source, &target, &policy);
        assert_eq!(alter_specs(&changes, "t"), vec![modify], "{flag}");
    }
}

#[test]
fn test_primary_key_asymmetry() {
    let source = "CREATE TABLE t (a INT NOT NULL, b INT NOT NULL, PRIMARY KEY (a), UNIQUE KEY u (a))";

    let changed = "CREATE TABLE t (a INT NOT NULL, b INT NOT NULL, PRIMARY KEY (a, b), UNIQUE KEY u (b))";
    assert_eq!(
        alter_specs(&diff(source, changed, &IgnorePolicy::default()), "t"),
        vec![
            "DROP PRIMARY KEY",
            "ADD PRIMARY KEY (`a`,`b`)",
            "DROP INDEX `u`",
            "ADD UNIQUE KEY `u` (`b`)",
        ]
    );

    let removed = "CREATE TABLE t (a INT NOT NULL, b INT NOT NULL)";
    assert_eq!(
        alter_specs(&diff(source, removed, &IgnorePolicy::default()), "t"),
        vec!["DROP INDEX `PRIMARY`", "DROP INDEX `u`"]
    );
}

#[test]
fn test_index_options_flag() {
    let source = "CREATE TABLE t (a INT, KEY k (a) COMMENT 'one')";
    let target = "CREATE TABLE t (a INT, KEY k (a) USING BTREE COMMENT 'two')";
    assert!(diff(source, target, &IgnorePolicy::default()).is_empty());
    assert_eq!(
        alter_specs(&diff(source, target, &IgnorePolicy::none()), "t"),
        vec!["DROP INDEX `k`", "ADD KEY `k` (`a`) USING BTREE COMMENT 'two'"]
    );
}

#[test]
fn test_migration_log_matches_final_dump() {
    let log = "
        CREATE TABLE users (
          id int NOT NULL AUTO_INCREMENT,
          email varchar(100),
          PRIMARY KEY (id)
        ) ENGINE=InnoDB;
        ALTER TABLE users ADD COLUMN name varchar(50) NOT NULL AFTER id, ADD UNIQUE KEY uq_email (email);
        ALTER TABLE users CHANGE email email_address varchar(255) DEFAULT NULL;
        CREATE INDEX idx_name ON users (name);
        INSERT INTO users (name) VALUES ('seed');
        RENAME TABLE users TO accounts;
        CREATE TABLE audit (id int);
        DROP TABLE audit;
        ALTER TABLE accounts COMMENT 'people';
    ";
    let dump = "
        CREATE TABLE `accounts` (
          `id` int NOT NULL AUTO_INCREMENT,
          `name` varchar(50) NOT NULL,
          `email_address` varchar(255) DEFAULT NULL,
          PRIMARY KEY (`id`),
          UNIQUE KEY `uq_email` (`email_address`),
          KEY `idx_name` (`name`)
        ) ENGINE=InnoDB COMMENT='people';
    ";
    let replayed = snapshot(log);
    let dumped = snapshot(dump);
    assert!(diff_snapshots(&replayed, &dumped, &IgnorePolicy::none()).is_empty());
    assert_eq!(replayed, dumped);
}
