//! Record sanitization and ingestion writes.
//!
//! The ingestion surface is schema-tolerant by design: a record may carry
//! fields the table has never heard of (producer payloads evolve
//! independently of the collector) and the write must still succeed with
//! the recognized subset. Sanitization happens against the live schema
//! inside the same unit of work as the insert.

use rusqlite::types::{ToSqlOutput, Value as SqlValue, ValueRef as SqlValueRef};
use rusqlite::Connection;
use serde_json::Value;
use till_core::tables::RECEIVED_AT_COLUMN;
use till_core::{RecordTable, StorageError};
use tracing::debug;

use crate::{schema, sql_err, RecordMap};

/// Filter a raw record down to the fields the table currently recognizes.
///
/// A key survives iff it is a live schema column and not the server-owned
/// `received_at`. No type coercion, no rejection: a record with zero
/// recognized fields sanitizes to an empty map and still produces a row
/// (with only `received_at` populated). Idempotent.
pub fn sanitize(
    conn: &Connection,
    table: RecordTable,
    raw: &RecordMap,
) -> Result<RecordMap, StorageError> {
    let columns = schema::table_columns(conn, table)?;
    let clean = raw
        .iter()
        .filter(|(key, _)| {
            key.as_str() != RECEIVED_AT_COLUMN && columns.iter().any(|c| c == key.as_str())
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    Ok(clean)
}

/// Append one sanitized record as a new row.
///
/// `received_at` comes from SQLite's own clock at the moment of the write,
/// not from the caller's — branch terminal clocks are not trusted for
/// arrival order. Pure insert: no upsert, no dedup, no retry.
pub fn insert_record(
    conn: &Connection,
    table: RecordTable,
    clean: &RecordMap,
) -> Result<(), StorageError> {
    let mut columns = String::new();
    let mut placeholders = String::new();
    for (index, key) in clean.keys().enumerate() {
        // Keys are sanitized schema columns, so quoting them is safe.
        columns.push_str(&format!("\"{key}\", "));
        placeholders.push_str(&format!("?{}, ", index + 1));
    }
    columns.push_str(RECEIVED_AT_COLUMN);
    placeholders.push_str("strftime('%Y-%m-%dT%H:%M:%fZ', 'now')");

    let sql = format!(
        "INSERT INTO {} ({columns}) VALUES ({placeholders})",
        table.table_name()
    );

    let params: Vec<ToSqlOutput<'_>> = clean.values().map(bind_value).collect();
    conn.execute(&sql, rusqlite::params_from_iter(params.iter()))
        .map_err(sql_err)?;

    debug!(table = %table, fields = clean.len(), "record ingested");
    Ok(())
}

/// Bind a JSON value as a SQL parameter.
///
/// Scalars bind natively (booleans as 0/1); nested arrays and objects
/// bind as their JSON text rendering, letting SQLite's column affinity
/// settle the stored type.
fn bind_value(value: &Value) -> ToSqlOutput<'_> {
    match value {
        Value::Null => ToSqlOutput::Owned(SqlValue::Null),
        Value::Bool(b) => ToSqlOutput::Owned(SqlValue::Integer(i64::from(*b))),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                ToSqlOutput::Owned(SqlValue::Integer(i))
            } else {
                ToSqlOutput::Owned(SqlValue::Real(n.as_f64().unwrap_or(f64::NAN)))
            }
        }
        Value::String(s) => ToSqlOutput::Borrowed(SqlValueRef::Text(s.as_bytes())),
        nested => ToSqlOutput::Owned(SqlValue::Text(nested.to_string())),
    }
}
