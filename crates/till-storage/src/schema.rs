//! Introspection-driven schema registry.

use rusqlite::Connection;
use till_core::{RecordTable, StorageError};

use crate::sql_err;

/// Current column set of a record table, straight from `PRAGMA table_info`.
///
/// Re-queried on every call — the table definition itself is the source of
/// truth, so out-of-band schema additions are picked up on the next ingest
/// with no code change, and column-name casing is whatever is on disk.
/// A table that introspects to zero columns does not exist.
pub fn table_columns(conn: &Connection, table: RecordTable) -> Result<Vec<String>, StorageError> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({})", table.table_name()))
        .map_err(sql_err)?;

    let rows = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .map_err(sql_err)?;

    let mut columns = Vec::new();
    for row in rows {
        columns.push(row.map_err(sql_err)?);
    }

    if columns.is_empty() {
        return Err(StorageError::TableNotFound {
            table: table.table_name().to_string(),
        });
    }
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations;
    use till_core::tables::RECEIVED_AT_COLUMN;

    fn migrated_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        migrations::run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn every_table_reports_received_at() {
        let conn = migrated_conn();
        for table in RecordTable::ALL {
            let columns = table_columns(&conn, table).unwrap();
            assert!(
                columns.iter().any(|c| c == RECEIVED_AT_COLUMN),
                "{table} is missing {RECEIVED_AT_COLUMN}"
            );
        }
    }

    #[test]
    fn casing_comes_from_disk_verbatim() {
        let conn = migrated_conn();
        let sale = table_columns(&conn, RecordTable::Sale).unwrap();
        assert!(sale.iter().any(|c| c == "Id"));
        assert!(!sale.iter().any(|c| c == "id"));

        let details = table_columns(&conn, RecordTable::SaleDetails).unwrap();
        assert!(details.iter().any(|c| c == "id"));
    }

    #[test]
    fn missing_table_is_not_found() {
        // Unmigrated database: the tables are absent from disk.
        let conn = Connection::open_in_memory().unwrap();
        let err = table_columns(&conn, RecordTable::Sale).unwrap_err();
        assert!(matches!(err, StorageError::TableNotFound { .. }));
    }

    #[test]
    fn picks_up_out_of_band_schema_additions() {
        let conn = migrated_conn();
        conn.execute_batch("ALTER TABLE sale ADD COLUMN Cashier TEXT")
            .unwrap();
        let columns = table_columns(&conn, RecordTable::Sale).unwrap();
        assert!(columns.iter().any(|c| c == "Cashier"));
    }
}
