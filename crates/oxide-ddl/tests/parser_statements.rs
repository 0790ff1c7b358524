//! Tests for the non-CREATE/ALTER statements and multi-statement scripts.

mod common;
use common::*;

use oxide_ddl::Statement;
use oxide_ddl::ast::{ConstraintKind, ObjectName};

#[test]
fn drop_table_list() {
    let stmt = parse("DROP TABLE IF EXISTS a, db.b CASCADE");
    assert_eq!(
        stmt,
        Statement::DropTable {
            temporary: false,
            if_exists: true,
            tables: vec![ObjectName::new("a"), ObjectName::qualified("db", "b")],
        }
    );
    round_trip("DROP TEMPORARY TABLE a");
}

#[test]
fn rename_table_pairs() {
    let stmt = parse("RENAME TABLE a TO b, c TO d");
    let Statement::RenameTable { renames } = stmt else {
        panic!("Expected RENAME TABLE");
    };
    assert_eq!(renames.len(), 2);
    assert_eq!(renames[1].1, ObjectName::new("d"));
    round_trip("RENAME TABLE a TO b, c TO d");
}

#[test]
fn create_index_forms() {
    let stmt = parse("CREATE FULLTEXT INDEX ft ON docs (body) WITH PARSER ngram");
    let Statement::CreateIndex { constraint, .. } = &stmt else {
        panic!("Expected CREATE INDEX");
    };
    assert_eq!(constraint.kind, ConstraintKind::Fulltext);
    assert_eq!(constraint.options.len(), 1);
    round_trip("CREATE INDEX i USING HASH ON t (a, b DESC) COMMENT 'c' ALGORITHM=INPLACE");
    round_trip("DROP INDEX i ON t LOCK=NONE");
}

#[test]
fn use_database() {
    assert_eq!(parse("USE `shop`"), Statement::Use("shop".into()));
    round_trip("USE shop");
}

#[test]
fn other_statements_are_kept_verbatim() {
    let stmt = parse("INSERT INTO t (a) VALUES ('x;y'), (2)");
    assert_eq!(
        stmt,
        Statement::Other {
            keyword: "INSERT".into(),
            text: "INSERT INTO t (a) VALUES ('x;y'), (2)".into(),
        }
    );
    assert!(!stmt.is_schema_change());
    assert!(matches!(parse("CREATE DATABASE shop"), Statement::Other { .. }));
    assert!(matches!(parse("DROP DATABASE shop"), Statement::Other { .. }));
    assert!(matches!(parse("LOCK TABLES t WRITE"), Statement::Other { .. }));
}

#[test]
fn mysqldump_script() {
    let statements = oxide_ddl::parse(
        "-- MySQL dump 10.13
/*!40101 SET @OLD_CHARACTER_SET_CLIENT=@@CHARACTER_SET_CLIENT */;
/*!40101 SET NAMES utf8mb4 */;

--
-- Table structure for table `t1`
--

DROP TABLE IF EXISTS `t1`;
/*!40101 SET @saved_cs_client     = @@character_set_client */;
CREATE TABLE `t1` (
  `id` int NOT NULL,
  PRIMARY KEY (`id`)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_0900_ai_ci;
/*!40101 SET character_set_client = @saved_cs_client */;

LOCK TABLES `t1` WRITE;
INSERT INTO `t1` VALUES (1),(2);
UNLOCK TABLES;
",
    )
    .unwrap();

    let kinds: Vec<bool> = statements.iter().map(Statement::is_schema_change).collect();
    assert_eq!(kinds, vec![true, true, false, false, false]);
}
