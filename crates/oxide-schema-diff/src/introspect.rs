//! Live MySQL introspection.
//!
//! Reads `CREATE TABLE` definitions from a running server so they can be
//! replayed like any other SQL text.

use chrono::{DateTime, Utc};
use oxide_ddl::ast::quote_identifier;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::Row;
use tracing::{debug, info};

use crate::error::Result;

/// Opens a small connection pool to the server behind `url`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(url: &str) -> Result<MySqlPool> {
    let pool = MySqlPoolOptions::new()
        .max_connections(2)
        .connect(url)
        .await?;
    Ok(pool)
}

/// Lists the tables of the connection's default database.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn list_tables(pool: &MySqlPool) -> Result<Vec<String>> {
    let rows = sqlx::query("SHOW FULL TABLES WHERE Table_type = 'BASE TABLE'")
        .fetch_all(pool)
        .await?;
    let tables = rows
        .iter()
        .map(|row| text_column(row, 0))
        .collect::<Result<Vec<_>>>()?;
    debug!(count = tables.len(), "Listed tables");
    Ok(tables)
}

/// Builds one multi-statement `SHOW CREATE TABLE` query for a batch.
#[must_use]
pub fn show_create_batch_sql(tables: &[String]) -> String {
    tables
        .iter()
        .map(|table| format!("SHOW CREATE TABLE {}", quote_identifier(table)))
        .collect::<Vec<_>>()
        .join(";")
}

/// Fetches the `CREATE TABLE` text of each table, `batch` tables per round
/// trip. A batch size of zero is treated as one.
///
/// # Errors
///
/// Returns an error if any query fails.
pub async fn fetch_definitions(
    pool: &MySqlPool,
    tables: &[String],
    batch: usize,
) -> Result<Vec<String>> {
    let mut definitions = Vec::with_capacity(tables.len());
    for chunk in tables.chunks(batch.max(1)) {
        let sql = show_create_batch_sql(chunk);
        debug!(sql = %sql, "Fetching definitions");
        let rows = sqlx::raw_sql(&sql).fetch_all(pool).await?;
        for row in &rows {
            definitions.push(text_column(row, 1)?);
        }
    }
    info!(tables = definitions.len(), "Fetched table definitions");
    Ok(definitions)
}

/// Connects, lists (unless `tables` is given) and fetches every definition.
///
/// # Errors
///
/// Returns an error if the connection or any query fails.
pub async fn dump(url: &str, tables: Option<Vec<String>>, batch: usize) -> Result<Vec<String>> {
    let pool = connect(url).await?;
    let tables = match tables {
        Some(tables) => tables,
        None => list_tables(&pool).await?,
    };
    let definitions = fetch_definitions(&pool, &tables, batch).await?;
    pool.close().await;
    Ok(definitions)
}

/// Renders the definitions as a replayable script.
#[must_use]
pub fn dump_script(definitions: &[String], dumped_at: DateTime<Utc>) -> String {
    let mut out = format!("-- Dumped at {}\n", dumped_at.format("%Y-%m-%d %H:%M:%S"));
    for definition in definitions {
        out.push_str(definition);
        out.push_str(";\n");
    }
    out
}

// Some servers report SHOW output with a binary collation, which sqlx
// refuses to decode as String.
fn text_column(row: &MySqlRow, index: usize) -> Result<String> {
    let bytes: Vec<u8> = row.try_get(index)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
