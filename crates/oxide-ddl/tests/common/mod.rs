#![allow(dead_code)]

use oxide_ddl::ast::{AlterSpec, TableDefinition};
use oxide_ddl::{ParseError, Statement};

pub fn parse(sql: &str) -> Statement {
    let mut statements =
        oxide_ddl::parse(sql).unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e}"));
    assert_eq!(statements.len(), 1, "Expected one statement in: {sql}");
    statements.remove(0)
}

pub fn parse_err(sql: &str) -> ParseError {
    oxide_ddl::parse(sql).expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn parse_create(sql: &str) -> TableDefinition {
    match parse(sql) {
        Statement::CreateTable(create) => create.table,
        other => panic!("Expected CREATE TABLE, got {other:?}"),
    }
}

pub fn parse_alter(sql: &str) -> Vec<AlterSpec> {
    match parse(sql) {
        Statement::AlterTable { specs, .. } => specs,
        other => panic!("Expected ALTER TABLE, got {other:?}"),
    }
}

/// Verifies that `to_string()` produces a fixed point:
/// parse(sql).to_string() can be re-parsed and yields the same
/// string again.
pub fn round_trip(sql: &str) {
    let ast1 = parse(sql);
    let rendered1 = ast1.to_string();
    let ast2 = parse(&rendered1);
    let rendered2 = ast2.to_string();
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:    {sql}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
}
