//! Full-table scans rendered as dynamic records.

use rusqlite::types::ValueRef;
use rusqlite::Connection;
use serde_json::Value;
use till_core::{RecordTable, StorageError};

use crate::{sql_err, RecordMap};

/// Every row of a record table in storage order, each rendered as a
/// field → value map (`received_at` included). No pagination, no
/// filtering — retrieval consumers get the whole log.
pub fn scan_table(conn: &Connection, table: RecordTable) -> Result<Vec<RecordMap>, StorageError> {
    let mut stmt = conn
        .prepare(&format!("SELECT * FROM {}", table.table_name()))
        .map_err(sql_err)?;

    let column_names: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect();

    let mut rows = stmt.query([]).map_err(sql_err)?;
    let mut records = Vec::new();
    while let Some(row) = rows.next().map_err(sql_err)? {
        let mut record = RecordMap::new();
        for (index, name) in column_names.iter().enumerate() {
            let value = row.get_ref(index).map_err(sql_err)?;
            record.insert(name.clone(), json_value(value));
        }
        records.push(record);
    }
    Ok(records)
}

/// Render a stored SQL value as JSON. Record tables hold only scalars;
/// a NaN/infinite real has no JSON rendering and becomes null.
fn json_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ValueRef::Text(text) => Value::String(String::from_utf8_lossy(text).into_owned()),
        ValueRef::Blob(blob) => Value::String(String::from_utf8_lossy(blob).into_owned()),
    }
}
