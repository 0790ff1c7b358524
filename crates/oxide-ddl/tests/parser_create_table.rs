//! Tests for CREATE TABLE parsing and rendering.

mod common;
use common::*;

use oxide_ddl::ast::{ColumnOption, ConstraintKind, Expr, IndexOption, ObjectName, TableOption};

const SHOW_CREATE_OUTPUT: &str = "CREATE TABLE `orders` (
  `id` bigint(20) unsigned NOT NULL AUTO_INCREMENT,
  `user_id` int(11) NOT NULL,
  `status` enum('new','paid','shipped') NOT NULL DEFAULT 'new',
  `note` varchar(255) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin DEFAULT NULL COMMENT 'free text',
  `total` decimal(10,2) NOT NULL DEFAULT '0.00',
  `created_at` timestamp NOT NULL DEFAULT CURRENT_TIMESTAMP,
  `updated_at` timestamp NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP,
  PRIMARY KEY (`id`),
  UNIQUE KEY `uk_user_status` (`user_id`,`status`),
  KEY `idx_created` (`created_at`) COMMENT 'for reports',
  CONSTRAINT `fk_orders_user` FOREIGN KEY (`user_id`) REFERENCES `users` (`id`) ON DELETE CASCADE
) ENGINE=InnoDB AUTO_INCREMENT=42 DEFAULT CHARSET=utf8mb4 COMMENT='customer orders'";

#[test]
fn create_show_create_output() {
    let table = parse_create(SHOW_CREATE_OUTPUT);
    assert_eq!(table.name, ObjectName::new("orders"));
    assert_eq!(table.columns.len(), 7);
    assert_eq!(table.constraints.len(), 4);
    assert_eq!(table.options.len(), 4);

    let status = table.column("status").unwrap();
    assert_eq!(status.data_type.values, vec!["new", "paid", "shipped"]);
    assert_eq!(status.default_value(), Some(&Expr::string("new")));

    let updated = table.column("updated_at").unwrap();
    assert!(updated
        .options
        .contains(&ColumnOption::OnUpdate(Expr::CurrentTimestamp { precision: None })));

    assert!(table.primary_key().is_some());
    assert!(matches!(
        table.constraint("fk_orders_user").unwrap().kind,
        ConstraintKind::ForeignKey(_)
    ));
    assert_eq!(
        table.constraint("idx_created").unwrap().options,
        vec![IndexOption::Comment("for reports".into())]
    );
    assert!(table.options.contains(&TableOption::AutoIncrement(42)));
}

#[test]
fn create_show_create_round_trip() {
    round_trip(SHOW_CREATE_OUTPUT);
}

#[test]
fn create_renders_canonically() {
    let table = parse_create(
        "create table if not exists Items (
           Id integer not null,
           Flag boolean default false,
           primary key (Id)
         ) engine = innodb, comment 'x'",
    );
    assert_eq!(
        table.to_string(),
        "CREATE TABLE `Items` (\n  `Id` INT NOT NULL,\n  `Flag` TINYINT(1) DEFAULT FALSE,\n  \
         PRIMARY KEY (`Id`)\n) ENGINE=innodb COMMENT='x'"
    );
}

#[test]
fn create_equivalent_spellings_render_equal() {
    let a = parse_create("CREATE TABLE t (a INTEGER, b NUMERIC(5,1), KEY idx (a ASC))");
    let b = parse_create("CREATE TABLE `t` (`a` int, `b` decimal(5, 1), INDEX `idx` (`a`))");
    assert_eq!(a.to_string(), b.to_string());
}

#[test]
fn create_qualified_and_temporary() {
    match parse("CREATE TEMPORARY TABLE db1.scratch (id INT)") {
        oxide_ddl::Statement::CreateTable(create) => {
            assert!(create.temporary);
            assert_eq!(create.table.name, ObjectName::qualified("db1", "scratch"));
        }
        other => panic!("Expected CREATE TABLE, got {other:?}"),
    }
    round_trip("CREATE TEMPORARY TABLE IF NOT EXISTS db1.scratch (id INT)");
}

#[test]
fn create_unnamed_indexes_get_mysql_names() {
    let table = parse_create(
        "CREATE TABLE child (
           id INT, parent_id INT, code CHAR(3),
           KEY (parent_id), UNIQUE (parent_id, code),
           FOREIGN KEY (parent_id) REFERENCES parent (id),
           CHECK (id > 0)
         )",
    );
    let names: Vec<&str> = table.constraints.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["parent_id", "parent_id_2", "child_ibfk_1", "child_chk_1"]
    );
}

#[test]
fn create_generated_and_check_columns() {
    let table = parse_create(
        "CREATE TABLE t (
           price INT, qty INT,
           total INT GENERATED ALWAYS AS ((price * qty)) STORED,
           CONSTRAINT positive CHECK ((qty > 0)) NOT ENFORCED
         )",
    );
    assert_eq!(
        table.column("total").unwrap().options,
        vec![ColumnOption::Generated {
            expr: "`price` * `qty`".into(),
            stored: true,
        }]
    );
    assert_eq!(
        table.constraint("positive").unwrap().kind,
        ConstraintKind::Check {
            expr: "`qty` > 0".into(),
            enforced: false,
        }
    );
    round_trip("CREATE TABLE t (a INT, b INT AS (a + 1), CONSTRAINT c CHECK (a <> 0))");
}

#[test]
fn create_literal_defaults_round_trip() {
    round_trip(
        "CREATE TABLE t (a BIT(1) DEFAULT b'0', b BINARY(2) DEFAULT 0x0A0B, \
         c VARCHAR(10) DEFAULT 'it''s', d DOUBLE DEFAULT -1.5, e DATETIME(6) DEFAULT NOW(6))",
    );
}
